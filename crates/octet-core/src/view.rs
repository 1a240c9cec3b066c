//! Read-only views over a memory region.
//!
//! [`ReadMemory`] borrows a byte range from some [`Memory`](crate::Memory)
//! without copying. The borrow ties the view to the region: as long as the
//! view is alive the region cannot be written, grown, or released.
//! [`MemoryReader`] is the pull cursor over such a view.

use crate::bounds::{array_at, check_range};
use crate::error::MemoryError;
use crate::traits::{CursorReadable, Readable};

/// An immutable byte range sharing storage with a memory region.
///
/// Typed getters decode big-endian values at an offset relative to the
/// start of the view.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReadMemory<'a> {
    bytes: &'a [u8],
}

impl<'a> ReadMemory<'a> {
    /// Wrap a byte slice as a view.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// An empty view.
    pub fn empty() -> Self {
        Self { bytes: &[] }
    }

    /// Number of bytes in the view.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// True if the view holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The viewed bytes.
    pub fn as_slice(&self) -> &'a [u8] {
        self.bytes
    }

    /// Copy the viewed bytes into a fresh vector.
    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.to_vec()
    }

    /// A sub-view of `len` bytes starting at `offset`. O(1), no copy.
    pub fn slice(&self, offset: usize, len: usize) -> Result<ReadMemory<'a>, MemoryError> {
        check_range(offset, len, self.bytes.len())?;
        Ok(Self::new(&self.bytes[offset..offset + len]))
    }

    /// A pull cursor positioned at the start of the view.
    pub fn reader(&self) -> MemoryReader<'a> {
        MemoryReader::new(self.bytes)
    }

    /// Byte at `offset`.
    pub fn get_i8(&self, offset: usize) -> Result<i8, MemoryError> {
        array_at(self.bytes, offset).map(i8::from_be_bytes)
    }

    /// Big-endian 16-bit integer at `offset`.
    pub fn get_i16(&self, offset: usize) -> Result<i16, MemoryError> {
        array_at(self.bytes, offset).map(i16::from_be_bytes)
    }

    /// Big-endian 32-bit integer at `offset`.
    pub fn get_i32(&self, offset: usize) -> Result<i32, MemoryError> {
        array_at(self.bytes, offset).map(i32::from_be_bytes)
    }

    /// Big-endian 64-bit integer at `offset`.
    pub fn get_i64(&self, offset: usize) -> Result<i64, MemoryError> {
        array_at(self.bytes, offset).map(i64::from_be_bytes)
    }

    /// Unsigned byte at `offset`.
    pub fn get_u8(&self, offset: usize) -> Result<u8, MemoryError> {
        array_at(self.bytes, offset).map(u8::from_be_bytes)
    }

    /// Big-endian unsigned 16-bit integer at `offset`.
    pub fn get_u16(&self, offset: usize) -> Result<u16, MemoryError> {
        array_at(self.bytes, offset).map(u16::from_be_bytes)
    }

    /// Big-endian unsigned 32-bit integer at `offset`.
    pub fn get_u32(&self, offset: usize) -> Result<u32, MemoryError> {
        array_at(self.bytes, offset).map(u32::from_be_bytes)
    }

    /// Big-endian unsigned 64-bit integer at `offset`.
    pub fn get_u64(&self, offset: usize) -> Result<u64, MemoryError> {
        array_at(self.bytes, offset).map(u64::from_be_bytes)
    }

    /// 32-bit float stored as its big-endian bit pattern at `offset`.
    pub fn get_f32(&self, offset: usize) -> Result<f32, MemoryError> {
        self.get_u32(offset).map(f32::from_bits)
    }

    /// 64-bit float stored as its big-endian bit pattern at `offset`.
    pub fn get_f64(&self, offset: usize) -> Result<f64, MemoryError> {
        self.get_u64(offset).map(f64::from_bits)
    }
}

impl std::fmt::Debug for ReadMemory<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadMemory")
            .field("size", &self.bytes.len())
            .finish()
    }
}

impl<'a> From<&'a [u8]> for ReadMemory<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}

impl AsRef<[u8]> for ReadMemory<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

/// Pull cursor over a borrowed byte range.
///
/// `skip` past the end clamps to the end and reports the bytes actually
/// skipped.
#[derive(Clone, Debug)]
pub struct MemoryReader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> MemoryReader<'a> {
    /// Create a reader at the start of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// The bytes not yet consumed.
    pub fn rest(&self) -> ReadMemory<'a> {
        ReadMemory::new(&self.bytes[self.position..])
    }

    fn left(&self) -> usize {
        self.bytes.len() - self.position
    }
}

impl Readable for MemoryReader<'_> {
    fn available(&self) -> Option<usize> {
        Some(self.left())
    }

    fn receive(&mut self) -> Result<Option<u8>, MemoryError> {
        let Some(&byte) = self.bytes.get(self.position) else {
            return Ok(None);
        };
        self.position += 1;
        Ok(Some(byte))
    }

    fn receive_into(&mut self, dst: &mut [u8]) -> Result<Option<usize>, MemoryError> {
        if dst.is_empty() {
            return Ok(Some(0));
        }
        let left = self.left();
        if left == 0 {
            return Ok(None);
        }
        let n = left.min(dst.len());
        dst[..n].copy_from_slice(&self.bytes[self.position..self.position + n]);
        self.position += n;
        Ok(Some(n))
    }

    fn read_bytes(&mut self, dst: &mut [u8]) -> Result<(), MemoryError> {
        let left = self.left();
        if dst.len() > left {
            return Err(MemoryError::EndOfInput {
                needed: dst.len(),
                available: left,
            });
        }
        dst.copy_from_slice(&self.bytes[self.position..self.position + dst.len()]);
        self.position += dst.len();
        Ok(())
    }

    fn skip(&mut self, count: usize) -> Result<usize, MemoryError> {
        let skipped = count.min(self.left());
        self.position += skipped;
        Ok(skipped)
    }
}

impl CursorReadable for MemoryReader<'_> {
    fn position(&self) -> usize {
        self.position
    }

    fn remaining(&self) -> usize {
        self.left()
    }
}
