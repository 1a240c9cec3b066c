//! Fixed-size addressable memory regions.
//!
//! A [`Memory`] is a byte region whose size never changes after creation.
//! Implementors only expose their bytes; bounds checks, big-endian encoding
//! and zero-copy slicing are provided here once for every backing store.
//! An [`Allocation`] is a region that owns a resource and must be released.

use crate::bounds::check_range;
use crate::error::MemoryError;
use crate::traits::Readable;
use crate::view::ReadMemory;

/// A fixed-capacity byte region with typed, bounds-checked accessors.
///
/// Every accessor fails with [`MemoryError::OutOfBounds`] when
/// `offset + width > size()`. Regions that can be released fail with
/// [`MemoryError::Released`] once they have been.
pub trait Memory {
    /// Size of the region in bytes. Immutable after creation.
    fn size(&self) -> usize;

    /// The whole region.
    fn bytes(&self) -> Result<&[u8], MemoryError>;

    /// The whole region, mutably.
    fn bytes_mut(&mut self) -> Result<&mut [u8], MemoryError>;

    /// `len` bytes starting at `offset`.
    fn range(&self, offset: usize, len: usize) -> Result<&[u8], MemoryError> {
        let bytes = self.bytes()?;
        check_range(offset, len, bytes.len())?;
        Ok(&bytes[offset..offset + len])
    }

    /// `len` bytes starting at `offset`, mutably.
    fn range_mut(&mut self, offset: usize, len: usize) -> Result<&mut [u8], MemoryError> {
        let bytes = self.bytes_mut()?;
        check_range(offset, len, bytes.len())?;
        Ok(&mut bytes[offset..offset + len])
    }

    /// A read-only view of `len` bytes at `offset`. O(1), no copy.
    ///
    /// The view borrows the region, so it stays valid only until the
    /// region is next mutated.
    fn slice(&self, offset: usize, len: usize) -> Result<ReadMemory<'_>, MemoryError> {
        self.range(offset, len).map(ReadMemory::new)
    }

    /// A read-only view of the whole region.
    fn view(&self) -> Result<ReadMemory<'_>, MemoryError> {
        self.bytes().map(ReadMemory::new)
    }

    /// Signed byte at `offset`.
    fn get_i8(&self, offset: usize) -> Result<i8, MemoryError> {
        self.view()?.get_i8(offset)
    }

    /// Big-endian 16-bit integer at `offset`.
    fn get_i16(&self, offset: usize) -> Result<i16, MemoryError> {
        self.view()?.get_i16(offset)
    }

    /// Big-endian 32-bit integer at `offset`.
    fn get_i32(&self, offset: usize) -> Result<i32, MemoryError> {
        self.view()?.get_i32(offset)
    }

    /// Big-endian 64-bit integer at `offset`.
    fn get_i64(&self, offset: usize) -> Result<i64, MemoryError> {
        self.view()?.get_i64(offset)
    }

    /// Unsigned byte at `offset`.
    fn get_u8(&self, offset: usize) -> Result<u8, MemoryError> {
        self.view()?.get_u8(offset)
    }

    /// Big-endian unsigned 16-bit integer at `offset`.
    fn get_u16(&self, offset: usize) -> Result<u16, MemoryError> {
        self.view()?.get_u16(offset)
    }

    /// Big-endian unsigned 32-bit integer at `offset`.
    fn get_u32(&self, offset: usize) -> Result<u32, MemoryError> {
        self.view()?.get_u32(offset)
    }

    /// Big-endian unsigned 64-bit integer at `offset`.
    fn get_u64(&self, offset: usize) -> Result<u64, MemoryError> {
        self.view()?.get_u64(offset)
    }

    /// 32-bit float at `offset`.
    fn get_f32(&self, offset: usize) -> Result<f32, MemoryError> {
        self.view()?.get_f32(offset)
    }

    /// 64-bit float at `offset`.
    fn get_f64(&self, offset: usize) -> Result<f64, MemoryError> {
        self.view()?.get_f64(offset)
    }

    /// Store a signed byte at `offset`.
    fn set_i8(&mut self, offset: usize, value: i8) -> Result<(), MemoryError> {
        self.set_bytes(offset, &value.to_be_bytes())
    }

    /// Store a big-endian 16-bit integer at `offset`.
    fn set_i16(&mut self, offset: usize, value: i16) -> Result<(), MemoryError> {
        self.set_bytes(offset, &value.to_be_bytes())
    }

    /// Store a big-endian 32-bit integer at `offset`.
    fn set_i32(&mut self, offset: usize, value: i32) -> Result<(), MemoryError> {
        self.set_bytes(offset, &value.to_be_bytes())
    }

    /// Store a big-endian 64-bit integer at `offset`.
    fn set_i64(&mut self, offset: usize, value: i64) -> Result<(), MemoryError> {
        self.set_bytes(offset, &value.to_be_bytes())
    }

    /// Store an unsigned byte at `offset`.
    fn set_u8(&mut self, offset: usize, value: u8) -> Result<(), MemoryError> {
        self.set_bytes(offset, &[value])
    }

    /// Store a big-endian unsigned 16-bit integer at `offset`.
    fn set_u16(&mut self, offset: usize, value: u16) -> Result<(), MemoryError> {
        self.set_bytes(offset, &value.to_be_bytes())
    }

    /// Store a big-endian unsigned 32-bit integer at `offset`.
    fn set_u32(&mut self, offset: usize, value: u32) -> Result<(), MemoryError> {
        self.set_bytes(offset, &value.to_be_bytes())
    }

    /// Store a big-endian unsigned 64-bit integer at `offset`.
    fn set_u64(&mut self, offset: usize, value: u64) -> Result<(), MemoryError> {
        self.set_bytes(offset, &value.to_be_bytes())
    }

    /// Store a 32-bit float's bit pattern at `offset`.
    fn set_f32(&mut self, offset: usize, value: f32) -> Result<(), MemoryError> {
        self.set_u32(offset, value.to_bits())
    }

    /// Store a 64-bit float's bit pattern at `offset`.
    fn set_f64(&mut self, offset: usize, value: f64) -> Result<(), MemoryError> {
        self.set_u64(offset, value.to_bits())
    }

    /// Copy `src` into the region at `dst_offset`.
    fn set_bytes(&mut self, dst_offset: usize, src: &[u8]) -> Result<(), MemoryError> {
        self.range_mut(dst_offset, src.len())?.copy_from_slice(src);
        Ok(())
    }

    /// Copy a view of another region into this one at `dst_offset`.
    fn set_memory(&mut self, dst_offset: usize, src: ReadMemory<'_>) -> Result<(), MemoryError> {
        self.set_bytes(dst_offset, src.as_slice())
    }

    /// Pull exactly `len` bytes from `src` straight into place at `dst_offset`.
    ///
    /// Fails with the source's strict read error if fewer than `len` bytes
    /// are available.
    fn set_from_readable(
        &mut self,
        dst_offset: usize,
        src: &mut dyn Readable,
        len: usize,
    ) -> Result<(), MemoryError> {
        let dst = self.range_mut(dst_offset, len)?;
        src.read_bytes(dst)
    }

    /// Set every byte of the region to `value`.
    fn fill(&mut self, value: u8) -> Result<(), MemoryError> {
        self.bytes_mut()?.fill(value);
        Ok(())
    }
}

/// A [`Memory`] that owns a resource requiring explicit release.
///
/// Release is idempotent: closing twice is a no-op. Accessors on a
/// released allocation fail with [`MemoryError::Released`]; its
/// [`size`](Memory::size) is still reported.
pub trait Allocation: Memory {
    /// Release the owned resource.
    fn close(&mut self);

    /// True once [`close`](Self::close) has run.
    fn is_closed(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::MemoryReader;
    use proptest::prelude::*;

    /// Minimal Vec-backed region for exercising the provided methods.
    struct TestMemory(Vec<u8>);

    impl Memory for TestMemory {
        fn size(&self) -> usize {
            self.0.len()
        }

        fn bytes(&self) -> Result<&[u8], MemoryError> {
            Ok(&self.0)
        }

        fn bytes_mut(&mut self) -> Result<&mut [u8], MemoryError> {
            Ok(&mut self.0)
        }
    }

    #[test]
    fn typed_access_is_bounds_checked() {
        let mut mem = TestMemory(vec![0; 8]);
        mem.set_i64(0, -1).unwrap();
        assert!(matches!(
            mem.set_i32(5, 1),
            Err(MemoryError::OutOfBounds {
                offset: 5,
                len: 4,
                size: 8
            })
        ));
        assert!(mem.get_i16(7).is_err());
        assert_eq!(mem.get_i8(7).unwrap(), -1);
    }

    #[test]
    fn set_then_get_is_big_endian() {
        let mut mem = TestMemory(vec![0; 4]);
        mem.set_i32(0, 0x0A0B_0C0D).unwrap();
        assert_eq!(mem.0, vec![0x0A, 0x0B, 0x0C, 0x0D]);
        assert_eq!(mem.get_u16(2).unwrap(), 0x0C0D);
    }

    #[test]
    fn slice_is_zero_copy() {
        let mem = TestMemory((0..10).collect());
        let view = mem.slice(2, 3).unwrap();
        assert_eq!(view.as_slice(), &[2, 3, 4]);
        assert_eq!(view.as_slice().as_ptr(), mem.0[2..].as_ptr());
        assert!(mem.slice(8, 3).is_err());
    }

    #[test]
    fn set_memory_copies_between_regions() {
        let src = TestMemory(vec![1, 2, 3, 4]);
        let mut dst = TestMemory(vec![0; 6]);
        dst.set_memory(1, src.slice(1, 3).unwrap()).unwrap();
        assert_eq!(dst.0, vec![0, 2, 3, 4, 0, 0]);
        assert!(dst.set_memory(4, src.view().unwrap()).is_err());
    }

    #[test]
    fn set_from_readable_pulls_exact_length() {
        let data = [5u8, 6, 7, 8, 9];
        let mut reader = MemoryReader::new(&data);
        let mut mem = TestMemory(vec![0; 4]);
        mem.set_from_readable(1, &mut reader, 3).unwrap();
        assert_eq!(mem.0, vec![0, 5, 6, 7]);

        let err = mem.set_from_readable(0, &mut reader, 3).unwrap_err();
        assert!(matches!(
            err,
            MemoryError::EndOfInput {
                needed: 3,
                available: 2
            }
        ));
    }

    #[test]
    fn fill_sets_every_byte() {
        let mut mem = TestMemory(vec![0; 3]);
        mem.fill(0xAB).unwrap();
        assert_eq!(mem.0, vec![0xAB; 3]);
    }

    proptest! {
        #[test]
        fn every_width_round_trips(offset in 0usize..8, a in any::<i8>(), b in any::<i16>(), c in any::<i32>(), d in any::<i64>()) {
            let mut mem = TestMemory(vec![0; 16]);
            mem.set_i8(offset, a).unwrap();
            prop_assert_eq!(mem.get_i8(offset).unwrap(), a);
            mem.set_i16(offset, b).unwrap();
            prop_assert_eq!(mem.get_i16(offset).unwrap(), b);
            mem.set_i32(offset, c).unwrap();
            prop_assert_eq!(mem.get_i32(offset).unwrap(), c);
            mem.set_i64(offset, d).unwrap();
            prop_assert_eq!(mem.get_i64(offset).unwrap(), d);
        }

        #[test]
        fn floats_round_trip_bitwise(x in any::<f32>(), y in any::<f64>()) {
            let mut mem = TestMemory(vec![0; 12]);
            mem.set_f32(0, x).unwrap();
            mem.set_f64(4, y).unwrap();
            prop_assert_eq!(mem.get_f32(0).unwrap().to_bits(), x.to_bits());
            prop_assert_eq!(mem.get_f64(4).unwrap().to_bits(), y.to_bits());
        }
    }
}
