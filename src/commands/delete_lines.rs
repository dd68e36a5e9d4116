use std::io::Write;
use tracing::{debug, info, warn};

use crate::core::config::DeletionConfig;
use crate::error::{LinecutError, LinecutResult};
use crate::utils::fs::{content_digest, file_digest, read_text, write_lines};
use crate::utils::lines::{remove_range, split_lines, strip_terminator};

/// What a run did to the target file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The range was removed and the file rewritten
    Removed {
        total: usize,
        removed: usize,
        remaining: usize,
        digest_before: String,
        digest_after: String,
    },
    /// The guard passed but nothing was written
    DryRun {
        total: usize,
        removed: usize,
        remaining: usize,
    },
    /// The file had too few lines; left untouched
    Skipped { total: usize },
}

impl Outcome {
    /// Whether the target file was rewritten
    pub fn modified(&self) -> bool {
        matches!(self, Outcome::Removed { .. })
    }
}

/// Removes a fixed range of lines from one file in place
pub struct LineRangeDeleter {
    config: DeletionConfig,
}

impl LineRangeDeleter {
    /// Create a deleter, rejecting configurations that could index out of range
    pub fn new(config: DeletionConfig) -> LinecutResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DeletionConfig {
        &self.config
    }

    /// Read, guard, preview, cut and write, reporting progress to `out`
    pub fn run<W: Write>(&self, out: &mut W) -> LinecutResult<Outcome> {
        let config = &self.config;
        let path = &config.target;
        info!(
            "Deleting lines {}-{} in file: {}",
            config.start_line,
            config.end_line,
            path.display()
        );

        let content = read_text(path, &config.encoding)?;
        let lines = split_lines(&content);
        let total = lines.len();

        say(out, format_args!("Total lines: {total}"))?;

        if total <= config.length_threshold {
            info!(
                "{} has {} lines, not more than {}; skipping",
                path.display(),
                total,
                config.length_threshold
            );
            say(out, format_args!("File is too short, possibly already modified."))?;
            return Ok(Outcome::Skipped { total });
        }

        let start = config.start_index();
        let end = config.end_index();
        let first_removed = lines[start];
        let first_kept = lines[end + 1];

        say(
            out,
            format_args!(
                "Line {} content: {}",
                config.start_line,
                strip_terminator(first_removed)
            ),
        )?;
        say(
            out,
            format_args!(
                "Line {} content: {}",
                config.end_line + 1,
                strip_terminator(first_kept)
            ),
        )?;

        check_marker(config.start_line, first_removed, config.expect_start.as_deref())?;
        check_marker(config.end_line + 1, first_kept, config.expect_end.as_deref())?;

        let kept = remove_range(&lines, start, end);
        let removed = config.removed_count();
        let remaining = kept.len();

        if config.dry_run {
            say(
                out,
                format_args!(
                    "Dry run: would remove lines {}-{} ({} lines), leaving {}.",
                    config.start_line, config.end_line, removed, remaining
                ),
            )?;
            return Ok(Outcome::DryRun {
                total,
                removed,
                remaining,
            });
        }

        let digest_before = content_digest(content.as_bytes());
        let expected = content_digest(kept.concat().as_bytes());

        write_lines(path, &kept)?;

        let digest_after = file_digest(path)?;
        debug!(
            "Digest of {}: {} -> {}",
            path.display(),
            digest_before,
            digest_after
        );
        if digest_after != expected {
            warn!(
                "File hash after write doesn't match expected: {}",
                path.display()
            );
            return Err(LinecutError::WriteVerification {
                path: path.clone(),
                expected,
                actual: digest_after,
            });
        }

        say(
            out,
            format_args!(
                "Successfully removed lines {}-{}.",
                config.start_line, config.end_line
            ),
        )?;

        Ok(Outcome::Removed {
            total,
            removed,
            remaining,
            digest_before,
            digest_after,
        })
    }
}

fn say<W: Write>(out: &mut W, message: std::fmt::Arguments<'_>) -> LinecutResult<()> {
    writeln!(out, "{message}").map_err(LinecutError::Output)
}

fn check_marker(line_number: usize, line: &str, expected: Option<&str>) -> LinecutResult<()> {
    match expected {
        Some(marker) if !line.contains(marker) => Err(LinecutError::BoundaryMismatch {
            line: line_number,
            expected: marker.to_string(),
            found: strip_terminator(line).to_string(),
        }),
        _ => Ok(()),
    }
}
