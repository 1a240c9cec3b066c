//! Directory listing, creation and deletion.

use std::fs::{self, ReadDir};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::FileError;

/// Lazily enumerate the children of `path`.
///
/// Yields each child's full path in the order the OS reports them; `.` and
/// `..` are never yielded. The directory handle is released when the
/// iterator is dropped, whether or not it was exhausted.
pub fn list_dir<P: AsRef<Path>>(path: P) -> Result<DirEntries, FileError> {
    let path = path.as_ref();
    let inner = fs::read_dir(path).map_err(|e| FileError::from_io("opendir", path, e))?;
    debug!(path = %path.display(), "listing directory");
    Ok(DirEntries {
        inner,
        path: path.to_path_buf(),
    })
}

/// Iterator returned by [`list_dir`].
#[derive(Debug)]
pub struct DirEntries {
    inner: ReadDir,
    path: PathBuf,
}

impl DirEntries {
    /// The directory being listed.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Iterator for DirEntries {
    type Item = Result<PathBuf, FileError>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.inner.next()?;
        Some(
            entry
                .map(|entry| entry.path())
                .map_err(|e| FileError::from_io("readdir", &self.path, e)),
        )
    }
}

/// Create a single directory. The parent must already exist.
pub fn create_dir<P: AsRef<Path>>(path: P) -> Result<(), FileError> {
    let path = path.as_ref();
    fs::create_dir(path).map_err(|e| FileError::from_io("mkdir", path, e))
}

/// Remove a file, a symbolic link, or an empty directory.
///
/// A symbolic link is removed itself, never its target.
pub fn delete<P: AsRef<Path>>(path: P) -> Result<(), FileError> {
    let path = path.as_ref();
    let meta = fs::symlink_metadata(path).map_err(|e| FileError::from_io("lstat", path, e))?;
    if meta.is_dir() {
        fs::remove_dir(path).map_err(|e| FileError::from_io("rmdir", path, e))
    } else {
        fs::remove_file(path).map_err(|e| FileError::from_io("unlink", path, e))
    }
}
