//! Error types for path, directory and file-open operations.
//!
//! Once a file is open, cursor reads and writes report
//! [`MemoryError::Io`](octet_core::MemoryError::Io) like every other
//! [`Readable`](octet_core::Readable) and [`Writeable`](octet_core::Writeable).

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Errors from opening files and operating on paths.
#[derive(Debug)]
pub enum FileError {
    /// The path does not resolve to an existing entry.
    NotFound {
        /// The path that was looked up.
        path: PathBuf,
    },
    /// The operating system reported any other failure.
    Io {
        /// Operation that failed (`"open"`, `"create"`, `"readdir"`, ...).
        op: &'static str,
        /// Path the operation was applied to.
        path: PathBuf,
        /// Underlying OS error.
        source: io::Error,
    },
}

impl FileError {
    /// Wrap an OS error raised by `op` on `path`, splitting out
    /// [`NotFound`](Self::NotFound).
    pub fn from_io(op: &'static str, path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io {
                op,
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// The path the failed operation was applied to.
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path } | Self::Io { path, .. } => path,
        }
    }

    /// The OS error code, if the failure carried one.
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            Self::NotFound { .. } => None,
            Self::Io { source, .. } => source.raw_os_error(),
        }
    }
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => write!(f, "not found: {}", path.display()),
            Self::Io { op, path, source } => {
                write!(f, "I/O error during {op} on {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::NotFound { .. } => None,
        }
    }
}
