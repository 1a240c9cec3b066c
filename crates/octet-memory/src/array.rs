//! `Vec<u8>`-backed memory.

use octet_core::{Memory, MemoryError};

/// A heap byte array with typed accessors.
///
/// The simplest [`Memory`]: zero-initialised, never released explicitly,
/// freed on drop.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArrayMemory {
    data: Vec<u8>,
}

impl ArrayMemory {
    /// Create a zero-filled region of `size` bytes.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size],
        }
    }

    /// Adopt an existing vector as the region.
    pub fn from_vec(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Give back the underlying vector.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// The region's bytes. Never fails, unlike [`Memory::bytes`].
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

impl Memory for ArrayMemory {
    fn size(&self) -> usize {
        self.data.len()
    }

    fn bytes(&self) -> Result<&[u8], MemoryError> {
        Ok(&self.data)
    }

    fn bytes_mut(&mut self) -> Result<&mut [u8], MemoryError> {
        Ok(&mut self.data)
    }
}

impl From<Vec<u8>> for ArrayMemory {
    fn from(data: Vec<u8>) -> Self {
        Self::from_vec(data)
    }
}
