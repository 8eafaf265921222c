//! Filesystem operations
//!
//! Thin wrappers that attach the offending path to I/O errors.

use std::path::Path;

use crate::error::FilesystemError;

/// Remove a directory and all its contents; missing directories are fine
pub fn remove_dir_all(path: &Path) -> Result<(), FilesystemError> {
    if path.exists() {
        std::fs::remove_dir_all(path).map_err(|e| FilesystemError::RemoveDir {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
    }
    Ok(())
}

/// Write content to a file, creating parent directories
pub fn write_file(path: &Path, content: &str) -> Result<(), FilesystemError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| FilesystemError::WriteFile {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
    }
    std::fs::write(path, content).map_err(|e| FilesystemError::WriteFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a/b/file.txt");
        write_file(&path, "content").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "content");
    }

    #[test]
    fn test_remove_missing_dir_is_ok() {
        let dir = TempDir::new().unwrap();
        assert!(remove_dir_all(&dir.path().join("missing")).is_ok());
    }

    #[test]
    fn test_remove_dir_with_contents() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("pkg");
        write_file(&target.join("index.js"), "x").unwrap();
        remove_dir_all(&target).unwrap();
        assert!(!target.exists());
    }
}
