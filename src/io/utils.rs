//! Utilities for input/output.

use std::{fs, io, io::Write, path::Path};

/// Reads and returns the content of the specified text file.
pub fn read_text_file(file_path: &Path) -> io::Result<String> {
    fs::read_to_string(file_path)
}

/// Writes the given text to the specified file, replacing any existing content.
pub fn write_text_file(file_path: &Path, text: &str) -> io::Result<()> {
    fs::write(file_path, text)
}

/// Appends the given body text to the specified file.
///
/// If the file does not exist at call time it is created and the header
/// text is written before the body. The existence check happens immediately
/// before the file is opened, so exactly one header ends up in the file over
/// any number of sequential appends from a single process.
pub fn append_to_file_with_header(file_path: &Path, header: &str, body: &str) -> io::Result<()> {
    let needs_header = !file_path.exists();
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(file_path)?;
    if needs_header {
        file.write_all(header.as_bytes())?;
    }
    file.write_all(body.as_bytes())
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn header_is_written_exactly_once() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("series.txt");

        append_to_file_with_header(&file_path, "header\n", "body1\n").unwrap();
        append_to_file_with_header(&file_path, "header\n", "body2\n").unwrap();

        let content = read_text_file(&file_path).unwrap();
        assert_eq!(content, "header\nbody1\nbody2\n");
    }

    #[test]
    fn empty_body_still_creates_file_with_header() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("series.txt");

        append_to_file_with_header(&file_path, "header\n", "").unwrap();

        assert!(file_path.exists());
        assert_eq!(read_text_file(&file_path).unwrap(), "header\n");
    }
}
