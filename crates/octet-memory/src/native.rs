//! Natively owned memory with explicit release.

use octet_core::{Allocation, Memory, MemoryError};
use tracing::debug;

use crate::raw::RawBlock;

/// A zero-initialised block from the global allocator.
///
/// [`close`](Allocation::close) frees the block immediately; dropping an
/// open allocation frees it too. After close every accessor fails with
/// [`MemoryError::Released`], while [`size`](Memory::size) keeps reporting
/// the original size.
pub struct NativeAllocation {
    block: Option<RawBlock>,
    size: usize,
}

impl NativeAllocation {
    /// Allocate `size` zeroed bytes.
    pub fn new(size: usize) -> Result<Self, MemoryError> {
        let block = RawBlock::zeroed(size)?;
        Ok(Self {
            block: Some(block),
            size,
        })
    }
}

impl Memory for NativeAllocation {
    fn size(&self) -> usize {
        self.size
    }

    fn bytes(&self) -> Result<&[u8], MemoryError> {
        self.block
            .as_ref()
            .map(RawBlock::as_slice)
            .ok_or(MemoryError::Released)
    }

    fn bytes_mut(&mut self) -> Result<&mut [u8], MemoryError> {
        self.block
            .as_mut()
            .map(RawBlock::as_mut_slice)
            .ok_or(MemoryError::Released)
    }
}

impl Allocation for NativeAllocation {
    fn close(&mut self) {
        if let Some(block) = self.block.take() {
            drop(block);
            debug!(size = self.size, "released native allocation");
        }
    }

    fn is_closed(&self) -> bool {
        self.block.is_none()
    }
}

impl std::fmt::Debug for NativeAllocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeAllocation")
            .field("size", &self.size)
            .field("closed", &self.is_closed())
            .finish()
    }
}
