//! File cursors, path classification and directory glue for Octet.
//!
//! [`ReadableFile`] and [`WriteableFile`] implement the
//! [`Readable`](octet_core::Readable) and [`Writeable`](octet_core::Writeable)
//! contracts over OS files, so any code that streams big-endian values
//! through memory cursors streams them through files unchanged.
//!
//! Path-level operations ([`entity_type`], [`list_dir`], [`FileSystem`])
//! report [`FileError`]; cursor operations on an open file report
//! [`MemoryError`](octet_core::MemoryError).
//!
//! Everything here is synchronous and blocking.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod dir;
pub mod entity;
pub mod error;
pub mod fs;
pub mod readable;
pub mod writeable;

pub use dir::{create_dir, delete, list_dir, DirEntries};
pub use entity::{entity_type, link_entity_type, EntityType};
pub use error::FileError;
pub use fs::FileSystem;
pub use readable::ReadableFile;
pub use writeable::{WriteMode, WriteableFile};
