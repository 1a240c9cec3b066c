//! Push cursor over a fixed-size memory region.

use octet_core::{CursorWriteable, Memory, MemoryError, ReadMemory, Readable, Writeable};

/// Writes front to back into a [`Memory`] that never grows.
///
/// [`request_can_write`](Writeable::request_can_write) is a no-op; a write
/// that does not fit in the remaining room fails with
/// [`MemoryError::ShortWrite`] and leaves the position unchanged.
pub struct MemoryWriter<'a, M: Memory + ?Sized> {
    memory: &'a mut M,
    position: usize,
}

impl<'a, M: Memory + ?Sized> MemoryWriter<'a, M> {
    /// Create a writer at the start of `memory`.
    pub fn new(memory: &'a mut M) -> Self {
        Self::at(memory, 0)
    }

    /// Create a writer at `position` within `memory`.
    pub fn at(memory: &'a mut M, position: usize) -> Self {
        Self { memory, position }
    }

    /// The bytes written so far, from the start of the region.
    pub fn written(&self) -> Result<ReadMemory<'_>, MemoryError> {
        self.memory.slice(0, self.position)
    }

    fn room(&self) -> usize {
        self.memory.size().saturating_sub(self.position)
    }

    fn reserve(&self, needed: usize) -> Result<(), MemoryError> {
        let remaining = self.room();
        if needed > remaining {
            return Err(MemoryError::ShortWrite { needed, remaining });
        }
        Ok(())
    }
}

impl<M: Memory + ?Sized> Writeable for MemoryWriter<'_, M> {
    fn position(&self) -> usize {
        self.position
    }

    fn available(&self) -> Option<usize> {
        Some(self.room())
    }

    fn request_can_write(&mut self, _needed: usize) -> Result<(), MemoryError> {
        Ok(())
    }

    fn write_bytes(&mut self, src: &[u8]) -> Result<(), MemoryError> {
        self.request_can_write(src.len())?;
        self.reserve(src.len())?;
        self.memory.set_bytes(self.position, src)?;
        self.position += src.len();
        Ok(())
    }

    fn write_from(&mut self, src: &mut dyn Readable, length: usize) -> Result<(), MemoryError> {
        self.request_can_write(length)?;
        self.reserve(length)?;
        self.memory.set_from_readable(self.position, src, length)?;
        self.position += length;
        Ok(())
    }
}

impl<M: Memory + ?Sized> CursorWriteable for MemoryWriter<'_, M> {
    fn skip(&mut self, count: usize) -> Result<(), MemoryError> {
        self.request_can_write(count)?;
        self.reserve(count)?;
        self.position += count;
        Ok(())
    }
}
