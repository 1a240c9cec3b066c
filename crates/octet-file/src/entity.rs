//! Path classification.
//!
//! Lookups that fail because the path is missing, forbidden or cannot be
//! resolved are classifications, not errors. Only unexpected OS failures
//! surface as [`FileError::Io`].

use std::fs::{self, FileType, Metadata};
use std::io;
use std::path::Path;

use crate::error::FileError;

/// What a path refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityType {
    /// A directory.
    Directory,
    /// A regular file.
    RegularFile,
    /// A symbolic link (only reported by [`link_entity_type`]).
    SymbolicLink,
    /// Any other kind of entry: socket, FIFO, device.
    OtherFile,
    /// Nothing exists at the path, or a parent component is not a directory.
    Nonexistent,
    /// The caller lacks permission to look the path up.
    Inaccessible,
    /// The path has a symlink loop or is too long to resolve.
    Unresolvable,
}

impl EntityType {
    /// True if the path refers to an existing entry.
    pub fn exists(self) -> bool {
        matches!(
            self,
            Self::Directory | Self::RegularFile | Self::SymbolicLink | Self::OtherFile
        )
    }

    /// True for [`RegularFile`](Self::RegularFile).
    pub fn is_file(self) -> bool {
        self == Self::RegularFile
    }

    /// True for [`Directory`](Self::Directory).
    pub fn is_dir(self) -> bool {
        self == Self::Directory
    }

    fn from_file_type(file_type: FileType) -> Self {
        if file_type.is_symlink() {
            Self::SymbolicLink
        } else if file_type.is_dir() {
            Self::Directory
        } else if file_type.is_file() {
            Self::RegularFile
        } else {
            Self::OtherFile
        }
    }
}

/// Classify `path`, following symbolic links.
pub fn entity_type<P: AsRef<Path>>(path: P) -> Result<EntityType, FileError> {
    let path = path.as_ref();
    classify("stat", path, fs::metadata(path))
}

/// Classify `path` itself, without following a final symbolic link.
pub fn link_entity_type<P: AsRef<Path>>(path: P) -> Result<EntityType, FileError> {
    let path = path.as_ref();
    classify("lstat", path, fs::symlink_metadata(path))
}

fn classify(
    op: &'static str,
    path: &Path,
    lookup: io::Result<Metadata>,
) -> Result<EntityType, FileError> {
    match lookup {
        Ok(meta) => Ok(EntityType::from_file_type(meta.file_type())),
        Err(e) => match classify_error(&e) {
            Some(entity) => Ok(entity),
            None => Err(FileError::Io {
                op,
                path: path.to_path_buf(),
                source: e,
            }),
        },
    }
}

#[cfg(unix)]
fn classify_error(e: &io::Error) -> Option<EntityType> {
    match e.raw_os_error()? {
        libc::ENOENT | libc::ENOTDIR => Some(EntityType::Nonexistent),
        libc::EACCES => Some(EntityType::Inaccessible),
        libc::ELOOP | libc::ENAMETOOLONG => Some(EntityType::Unresolvable),
        _ => None,
    }
}

#[cfg(not(unix))]
fn classify_error(e: &io::Error) -> Option<EntityType> {
    match e.kind() {
        io::ErrorKind::NotFound => Some(EntityType::Nonexistent),
        io::ErrorKind::PermissionDenied => Some(EntityType::Inaccessible),
        _ => None,
    }
}
