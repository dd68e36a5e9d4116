use sha2::{Digest, Sha256};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

use crate::error::{map_io_err, LinecutError, LinecutResult};

/// Whether `encoding` names an encoding linecut can decode
pub fn is_supported_encoding(encoding: &str) -> bool {
    matches!(encoding.to_ascii_lowercase().as_str(), "utf-8" | "utf8")
}

/// Read a whole file and decode it as text
pub fn read_text(path: impl AsRef<Path>, encoding: &str) -> LinecutResult<String> {
    let path = path.as_ref();
    debug!("Reading file: {}", path.display());

    if !is_supported_encoding(encoding) {
        return Err(LinecutError::invalid_config(format!(
            "unsupported encoding: {encoding}"
        )));
    }

    let bytes = fs::read(path).map_err(map_io_err(path))?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());

    String::from_utf8(bytes).map_err(|source| LinecutError::Encoding {
        path: path.to_path_buf(),
        encoding: encoding.to_string(),
        source,
    })
}

/// Truncate `path` and write `lines` back verbatim
pub fn write_lines(path: impl AsRef<Path>, lines: &[&str]) -> LinecutResult<()> {
    let path = path.as_ref();
    debug!("Writing {} lines to {}", lines.len(), path.display());

    let file = fs::File::create(path).map_err(map_io_err(path))?;
    let mut writer = BufWriter::new(file);
    for line in lines {
        writer
            .write_all(line.as_bytes())
            .map_err(map_io_err(path))?;
    }
    writer.flush().map_err(map_io_err(path))?;

    Ok(())
}

/// Lowercase hex SHA-256 of `content`
pub fn content_digest(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}

/// Digest of the file currently at `path`
pub fn file_digest(path: impl AsRef<Path>) -> LinecutResult<String> {
    let path = path.as_ref();
    let content = fs::read(path).map_err(map_io_err(path))?;
    Ok(content_digest(&content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_then_read_preserves_bytes() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("words.ejs");

        write_lines(&file_path, &["<% if (user) { %>\r\n", "  <p>hi</p>\n", "<% } %>"]).unwrap();

        let content = read_text(&file_path, "utf-8").unwrap();
        assert_eq!(content, "<% if (user) { %>\r\n  <p>hi</p>\n<% } %>");
    }

    #[test]
    fn test_write_truncates_existing_content() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("t.txt");
        fs::write(&file_path, "a much longer original body\n").unwrap();

        write_lines(&file_path, &["short\n"]).unwrap();
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "short\n");
    }

    #[test]
    fn test_write_failure_is_access_error() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("no-such-dir").join("words.ejs");

        let err = write_lines(&file_path, &["x\n"]).unwrap_err();
        match err {
            LinecutError::FileAccess { path, .. } => assert_eq!(path, file_path),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!file_path.exists());
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_text(dir.path().join("missing.ejs"), "utf-8").unwrap_err();
        assert!(matches!(err, LinecutError::FileAccess { .. }));
    }

    #[test]
    fn test_read_invalid_utf8() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("latin1.txt");
        fs::write(&file_path, [b'c', b'a', b'f', 0xe9, b'\n']).unwrap();

        let err = read_text(&file_path, "UTF-8").unwrap_err();
        assert!(matches!(err, LinecutError::Encoding { .. }));
    }

    #[test]
    fn test_unsupported_encoding() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("t.txt");
        fs::write(&file_path, "x\n").unwrap();

        let err = read_text(&file_path, "latin-1").unwrap_err();
        assert!(matches!(err, LinecutError::InvalidConfig { .. }));
    }

    #[test]
    fn test_digest() {
        assert_eq!(
            content_digest(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );

        let dir = tempdir().unwrap();
        let file_path = dir.path().join("d.txt");
        fs::write(&file_path, "abc").unwrap();
        assert_eq!(file_digest(&file_path).unwrap(), content_digest(b"abc"));
    }
}
