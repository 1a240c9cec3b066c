//! Core types and traits for the Octet binary I/O layer.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the abstractions every backing store implements:
//!
//! - [`Memory`] and [`Allocation`]: fixed-size addressable byte regions
//! - [`ReadMemory`]: a borrowed, read-only view into a region
//! - [`Readable`] / [`Writeable`]: pull and push cursor contracts
//! - [`MemoryError`]: the shared error type for all of the above
//!
//! All multi-byte values are big-endian regardless of host byte order.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bounds;
pub mod error;
pub mod memory;
pub mod traits;
pub mod view;

pub use error::MemoryError;
pub use memory::{Allocation, Memory};
pub use traits::{
    write_bytes_buffered, CursorReadable, CursorWriteable, Readable, Writeable,
    DEFAULT_CHUNK_SIZE,
};
pub use view::{MemoryReader, ReadMemory};
