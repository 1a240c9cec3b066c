//! Low-level primitives for native memory blocks.
//!
//! [`RawBlock`] owns a zero-initialised byte block obtained directly from
//! the global allocator. It is the only place in the crate that uses
//! `unsafe`; every block has a mandatory `// SAFETY:` comment.

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::ptr::NonNull;

use octet_core::MemoryError;

/// A uniquely owned, zero-initialised byte block.
///
/// Zero-length blocks never touch the allocator and use a dangling pointer.
pub(crate) struct RawBlock {
    ptr: NonNull<u8>,
    layout: Layout,
}

impl RawBlock {
    /// Allocate `len` zeroed bytes.
    ///
    /// An allocator refusal is reported as
    /// [`MemoryError::AllocationFailed`] rather than aborting.
    pub(crate) fn zeroed(len: usize) -> Result<Self, MemoryError> {
        let layout = Layout::array::<u8>(len).map_err(|e| MemoryError::InvalidConfig {
            reason: format!("cannot allocate {len} bytes: {e}"),
        })?;
        if len == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                layout,
            });
        }
        // SAFETY: `layout` has a non-zero size (checked above).
        let ptr = unsafe { alloc::alloc_zeroed(layout) };
        match NonNull::new(ptr) {
            Some(ptr) => Ok(Self { ptr, layout }),
            None => Err(MemoryError::AllocationFailed { size: len }),
        }
    }

    /// Length of the block in bytes.
    pub(crate) fn len(&self) -> usize {
        self.layout.size()
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        // SAFETY: `ptr` is valid for `len()` initialised bytes (zeroed at
        // allocation, dangling only when `len() == 0`) and uniquely owned
        // by `self`, so a shared borrow of `self` cannot alias a mutable one.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len()) }
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        // SAFETY: as in `as_slice`; `&mut self` guarantees exclusivity.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len()) }
    }
}

impl Drop for RawBlock {
    fn drop(&mut self) {
        if self.layout.size() == 0 {
            return;
        }
        // SAFETY: `ptr` was returned by `alloc_zeroed` with exactly this
        // layout and has not been freed (drop runs once).
        unsafe { alloc::dealloc(self.ptr.as_ptr(), self.layout) }
    }
}
