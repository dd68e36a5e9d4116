//! Line model for in-place range edits.
//!
//! A line is a maximal run of characters ending in `\n`, `\r\n`, a lone `\r`
//! or end of input; the terminator belongs to the line. Keeping the
//! terminator on every line lets an edited file be written back by simple
//! concatenation with its original line endings intact.

/// Split text into lines, each keeping its terminator.
///
/// Empty input yields no lines. A trailing fragment without a terminator is
/// a line of its own.
pub fn split_lines(content: &str) -> Vec<&str> {
    let bytes = content.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&content[start..=i]);
                start = i + 1;
            }
            b'\r' => {
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                lines.push(&content[start..=i]);
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }

    if start < bytes.len() {
        lines.push(&content[start..]);
    }
    lines
}

/// Drop a trailing `\n`, `\r\n` or `\r` for display.
pub fn strip_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Remove the 0-based inclusive range `start..=end` from `lines`.
///
/// Callers validate bounds; `end` must be a valid index.
pub fn remove_range<'a>(lines: &[&'a str], start: usize, end: usize) -> Vec<&'a str> {
    let mut kept = Vec::with_capacity(lines.len() - (end - start + 1));
    kept.extend_from_slice(&lines[..start]);
    kept.extend_from_slice(&lines[end + 1..]);
    kept
}
