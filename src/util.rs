//! Small standalone helpers that don't warrant their own module.

use std::fs;
use std::path::Path;

/// Size in bytes of the file at `path`.
pub fn get_file_size(path: &Path) -> std::io::Result<u64> {
    Ok(fs::metadata(path)?.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_size_of_a_written_file() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("bitpack-util-test-{}", std::process::id()));
        fs::write(&path, b"hello world").unwrap();
        assert_eq!(get_file_size(&path).unwrap(), 11);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = Path::new("/nonexistent/path/for/bitpack/tests");
        assert!(get_file_size(path).is_err());
    }
}
