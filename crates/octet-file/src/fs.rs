//! Process-wide filesystem queries.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::FileError;

/// Entry points for filesystem state that belongs to the process, not to a
/// single path.
pub struct FileSystem;

impl FileSystem {
    /// The platform's primary path separator.
    pub const PATH_SEPARATOR: char = std::path::MAIN_SEPARATOR;

    /// The directory for temporary files.
    pub fn temp_directory() -> PathBuf {
        env::temp_dir()
    }

    /// The process working directory.
    pub fn current_directory() -> Result<PathBuf, FileError> {
        env::current_dir().map_err(|e| FileError::from_io("getcwd", Path::new("."), e))
    }

    /// Change the process working directory.
    ///
    /// Affects every thread in the process.
    pub fn set_current_directory<P: AsRef<Path>>(path: P) -> Result<(), FileError> {
        let path = path.as_ref();
        env::set_current_dir(path).map_err(|e| FileError::from_io("chdir", path, e))
    }

    /// The filesystem roots: `/` on Unix, every mounted drive on Windows.
    pub fn roots() -> Vec<PathBuf> {
        #[cfg(windows)]
        {
            (b'A'..=b'Z')
                .map(|letter| PathBuf::from(format!("{}:\\", letter as char)))
                .filter(|root| root.exists())
                .collect()
        }
        #[cfg(not(windows))]
        {
            vec![PathBuf::from("/")]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{entity_type, EntityType};

    #[test]
    fn temp_directory_is_a_directory() {
        let temp = FileSystem::temp_directory();
        assert_eq!(entity_type(temp).unwrap(), EntityType::Directory);
    }

    #[test]
    fn current_directory_round_trips() {
        let cwd = FileSystem::current_directory().unwrap();
        FileSystem::set_current_directory(&cwd).unwrap();
        assert_eq!(FileSystem::current_directory().unwrap(), cwd);
    }

    #[test]
    fn set_missing_directory_fails() {
        let missing = FileSystem::temp_directory().join("octet-no-such-dir-for-chdir");
        assert!(matches!(
            FileSystem::set_current_directory(missing),
            Err(FileError::NotFound { .. })
        ));
    }

    #[test]
    fn roots_exist() {
        let roots = FileSystem::roots();
        assert!(!roots.is_empty());
        for root in roots {
            assert!(entity_type(&root).unwrap().is_dir());
        }
    }

    #[test]
    fn separator_matches_platform() {
        let joined = Path::new("a").join("b");
        assert_eq!(
            joined.to_str().unwrap(),
            format!("a{}b", FileSystem::PATH_SEPARATOR)
        );
    }
}
