pub mod fs;
pub mod lines;

// Re-exports for the line model
pub use lines::{remove_range, split_lines, strip_terminator};
