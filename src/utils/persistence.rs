//! Filesystem helpers for the JSON store.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Creates `dir` if needed and returns it.
pub fn ensure_dir(dir: &Path) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    Ok(dir.to_path_buf())
}

/// Reads a file, mapping "not found" to `None`.
pub fn read_optional(path: &Path) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Writes through a sibling temp file and a rename, so a crash mid-write
/// never leaves a half-written collection behind.
pub fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_missing_returns_none() {
        let dir = TempDir::new().unwrap();
        assert_eq!(read_optional(&dir.path().join("nope.json")).unwrap(), None);
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("saves.json");
        write_atomic(&path, "[1,2,3]").unwrap();
        assert_eq!(read_optional(&path).unwrap().as_deref(), Some("[1,2,3]"));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_ensure_dir_is_repeatable() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("data");
        ensure_dir(&target).unwrap();
        ensure_dir(&target).unwrap();
        assert!(target.is_dir());
    }
}
