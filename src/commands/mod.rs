pub mod delete_lines;

pub use delete_lines::*;
