//! In-process backing stores and the reusable growable buffer.
//!
//! # Architecture
//!
//! ```text
//! ReusableMemory<M> / ReusableAllocation<A>   (write-then-snapshot cycles)
//! ├── ReusableWriter (CursorWriteable, grows via request_can_write)
//! └── M: Memory
//!     ├── ArrayMemory      (Vec<u8>)
//!     └── NativeAllocation (raw zeroed heap block, explicit close)
//! MemoryWriter<M>         (CursorWriteable over any fixed Memory)
//! Base64                  (text <-> bytes through views and Writeables)
//! ```
//!
//! # Growth policy
//!
//! A reusable buffer grows in integer multiples of its initial capacity:
//! `ceil(total / initial) * initial`. Only the bytes before the write
//! position are copied into the new backing.
//!
//! This crate is the only one in the workspace that contains `unsafe`
//! code, confined to `raw.rs`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod array;
pub mod config;
pub mod cursor;
pub mod encoding;
pub mod native;
mod raw;
pub mod reusable;

pub use array::ArrayMemory;
pub use config::{BufferConfig, MAX_ALLOCATION};
pub use cursor::MemoryWriter;
pub use encoding::Base64;
pub use native::NativeAllocation;
pub use reusable::{ReusableAllocation, ReusableMemory, ReusableWriter};
