//! Octet: big-endian memory regions, reusable growable buffers and file cursors.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Octet sub-crates. For most users, adding `octet` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use octet::prelude::*;
//!
//! // Encode variable-length records through one reused backing.
//! let mut buf = ReusableMemory::array(16).unwrap();
//! let path = FileSystem::temp_directory()
//!     .join(format!("octet-quickstart-{}.bin", std::process::id()));
//! let mut out = WriteableFile::create(&path).unwrap();
//! for id in 0..3i64 {
//!     let record = buf
//!         .slice(|w| {
//!             w.write_i64(id)?;
//!             w.write_bytes(&vec![0xAB; id as usize * 10])
//!         })
//!         .unwrap();
//!     out.write_memory(record).unwrap();
//! }
//! out.close().unwrap();
//! assert_eq!(buf.capacity(), 32);
//!
//! // Read them back through the same Readable contract.
//! let mut input = ReadableFile::open(&path).unwrap();
//! for id in 0..3i64 {
//!     assert_eq!(input.read_i64().unwrap(), id);
//!     assert_eq!(input.skip(id as usize * 10).unwrap(), id as usize * 10);
//! }
//! assert_eq!(input.receive().unwrap(), None);
//! octet::file::delete(&path).unwrap();
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `octet-core` | `Memory`, `Allocation`, views, cursor traits, `MemoryError` |
//! | [`memory`] | `octet-memory` | Array and native backings, `ReusableMemory`, `Base64` |
//! | [`file`] | `octet-file` | File cursors, path classification, directory glue |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Memory traits, views and cursor contracts (`octet-core`).
///
/// Contains [`types::Memory`], [`types::Allocation`], [`types::ReadMemory`],
/// the [`types::Readable`] / [`types::Writeable`] cursor traits and
/// [`types::MemoryError`].
pub use octet_core as types;

/// In-process backings and reusable buffers (`octet-memory`).
///
/// Provides [`memory::ArrayMemory`], [`memory::NativeAllocation`],
/// [`memory::ReusableMemory`] and the [`memory::Base64`] codec.
pub use octet_memory as memory;

/// File cursors and filesystem glue (`octet-file`).
///
/// [`file::ReadableFile`] and [`file::WriteableFile`] implement the cursor
/// traits over OS files; [`file::entity_type`] classifies paths.
pub use octet_file as file;

/// Common imports for typical Octet usage.
///
/// ```rust
/// use octet::prelude::*;
/// ```
///
/// This imports the memory and cursor traits, the concrete backings, the
/// reusable buffers, the file cursors and both error types.
pub mod prelude {
    // Traits
    pub use octet_core::{
        Allocation, CursorReadable, CursorWriteable, Memory, Readable, Writeable,
    };

    // Views
    pub use octet_core::{MemoryReader, ReadMemory};

    // Errors
    pub use octet_core::MemoryError;
    pub use octet_file::FileError;

    // Backings and buffers
    pub use octet_memory::{
        ArrayMemory, Base64, BufferConfig, MemoryWriter, NativeAllocation, ReusableAllocation,
        ReusableMemory,
    };

    // Files
    pub use octet_file::{EntityType, FileSystem, ReadableFile, WriteMode, WriteableFile};
}
