//! Pull and push cursor contracts.
//!
//! A [`Readable`] is a byte source with a position; a [`Writeable`] is a
//! byte sink with a position. Both are implemented by in-memory cursors,
//! growable buffers and OS files.
//!
//! # Error tiers
//!
//! - **Tolerant:** [`Readable::receive`] and [`Readable::receive_into`]
//!   report end of input as `Ok(None)`. This is the only non-failing way
//!   to detect exhaustion.
//! - **Strict:** every exact-width or exact-length operation
//!   (`read_*`, [`Readable::read_bytes`], `write_*`) fails when the full
//!   number of bytes cannot be produced or consumed.

use crate::error::MemoryError;
use crate::view::ReadMemory;

/// Default chunk size for buffered transfers between cursors (8 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

/// A byte source read front to back.
///
/// Implementors provide the bulk primitives; fixed-width reads default to
/// [`read_bytes`](Self::read_bytes) into a stack array, and sources with a
/// cheaper path (a per-handle scratch buffer, for example) override them.
pub trait Readable {
    /// Remaining byte count, or `None` for unbounded or indeterminate sources.
    fn available(&self) -> Option<usize>;

    /// True while bytes may remain (`available() != Some(0)`).
    fn valid(&self) -> bool {
        self.available() != Some(0)
    }

    /// Read one byte, or `None` at end of input.
    fn receive(&mut self) -> Result<Option<u8>, MemoryError>;

    /// Read up to `dst.len()` bytes.
    ///
    /// Returns the number of bytes transferred, or `None` when the source
    /// is already at end of input. An empty `dst` transfers `Some(0)`.
    fn receive_into(&mut self, dst: &mut [u8]) -> Result<Option<usize>, MemoryError>;

    /// Fill `dst` completely or fail.
    fn read_bytes(&mut self, dst: &mut [u8]) -> Result<(), MemoryError>;

    /// Advance by up to `count` bytes, returning how far the cursor moved.
    fn skip(&mut self, count: usize) -> Result<usize, MemoryError>;

    /// Read one signed byte.
    fn read_i8(&mut self) -> Result<i8, MemoryError> {
        let mut buf = [0u8; 1];
        self.read_bytes(&mut buf)?;
        Ok(i8::from_be_bytes(buf))
    }

    /// Read a big-endian 16-bit integer.
    fn read_i16(&mut self) -> Result<i16, MemoryError> {
        let mut buf = [0u8; 2];
        self.read_bytes(&mut buf)?;
        Ok(i16::from_be_bytes(buf))
    }

    /// Read a big-endian 32-bit integer.
    fn read_i32(&mut self) -> Result<i32, MemoryError> {
        let mut buf = [0u8; 4];
        self.read_bytes(&mut buf)?;
        Ok(i32::from_be_bytes(buf))
    }

    /// Read a big-endian 64-bit integer.
    fn read_i64(&mut self) -> Result<i64, MemoryError> {
        let mut buf = [0u8; 8];
        self.read_bytes(&mut buf)?;
        Ok(i64::from_be_bytes(buf))
    }

    /// Read one unsigned byte.
    fn read_u8(&mut self) -> Result<u8, MemoryError> {
        self.read_i8().map(|v| v as u8)
    }

    /// Read a big-endian unsigned 16-bit integer.
    fn read_u16(&mut self) -> Result<u16, MemoryError> {
        self.read_i16().map(|v| v as u16)
    }

    /// Read a big-endian unsigned 32-bit integer.
    fn read_u32(&mut self) -> Result<u32, MemoryError> {
        self.read_i32().map(|v| v as u32)
    }

    /// Read a big-endian unsigned 64-bit integer.
    fn read_u64(&mut self) -> Result<u64, MemoryError> {
        self.read_i64().map(|v| v as u64)
    }

    /// Read a 32-bit float carried as its integer bit pattern.
    fn read_f32(&mut self) -> Result<f32, MemoryError> {
        self.read_u32().map(f32::from_bits)
    }

    /// Read a 64-bit float carried as its integer bit pattern.
    fn read_f64(&mut self) -> Result<f64, MemoryError> {
        self.read_u64().map(f64::from_bits)
    }
}

/// A [`Readable`] that knows exactly where it is and how much is left.
pub trait CursorReadable: Readable {
    /// Bytes consumed so far.
    fn position(&self) -> usize;

    /// Bytes left before end of input.
    fn remaining(&self) -> usize;
}

/// A byte sink written front to back.
///
/// Every write first calls [`request_can_write`](Self::request_can_write)
/// with the number of bytes it is about to produce. Fixed and file-backed
/// sinks treat the request as a no-op; growable buffers use it to grow.
pub trait Writeable {
    /// Bytes written so far.
    fn position(&self) -> usize;

    /// Room left, or `None` for unbounded sinks.
    fn available(&self) -> Option<usize>;

    /// Make sure `needed` more bytes can be written at the current position.
    fn request_can_write(&mut self, needed: usize) -> Result<(), MemoryError>;

    /// Write every byte of `src`.
    fn write_bytes(&mut self, src: &[u8]) -> Result<(), MemoryError>;

    /// Push buffered bytes to the underlying sink.
    ///
    /// Memory sinks have nothing to flush.
    fn flush(&mut self) -> Result<(), MemoryError> {
        Ok(())
    }

    /// Write every byte of a view.
    fn write_memory(&mut self, src: ReadMemory<'_>) -> Result<(), MemoryError> {
        self.write_bytes(src.as_slice())
    }

    /// Move exactly `length` bytes from `src`, in bounded chunks.
    fn write_from(&mut self, src: &mut dyn Readable, length: usize) -> Result<(), MemoryError> {
        write_bytes_buffered(self, src, length, DEFAULT_CHUNK_SIZE)
    }

    /// Move everything `src` has left, returning the number of bytes moved.
    fn write_remaining(&mut self, src: &mut dyn CursorReadable) -> Result<usize, MemoryError> {
        let count = src.remaining();
        write_bytes_buffered(self, src, count, DEFAULT_CHUNK_SIZE)?;
        Ok(count)
    }

    /// Write one signed byte.
    fn write_i8(&mut self, value: i8) -> Result<(), MemoryError> {
        self.write_bytes(&value.to_be_bytes())
    }

    /// Write a big-endian 16-bit integer.
    fn write_i16(&mut self, value: i16) -> Result<(), MemoryError> {
        self.write_bytes(&value.to_be_bytes())
    }

    /// Write a big-endian 32-bit integer.
    fn write_i32(&mut self, value: i32) -> Result<(), MemoryError> {
        self.write_bytes(&value.to_be_bytes())
    }

    /// Write a big-endian 64-bit integer.
    fn write_i64(&mut self, value: i64) -> Result<(), MemoryError> {
        self.write_bytes(&value.to_be_bytes())
    }

    /// Write one unsigned byte.
    fn write_u8(&mut self, value: u8) -> Result<(), MemoryError> {
        self.write_i8(value as i8)
    }

    /// Write a big-endian unsigned 16-bit integer.
    fn write_u16(&mut self, value: u16) -> Result<(), MemoryError> {
        self.write_i16(value as i16)
    }

    /// Write a big-endian unsigned 32-bit integer.
    fn write_u32(&mut self, value: u32) -> Result<(), MemoryError> {
        self.write_i32(value as i32)
    }

    /// Write a big-endian unsigned 64-bit integer.
    fn write_u64(&mut self, value: u64) -> Result<(), MemoryError> {
        self.write_i64(value as i64)
    }

    /// Write a 32-bit float as its integer bit pattern.
    fn write_f32(&mut self, value: f32) -> Result<(), MemoryError> {
        self.write_u32(value.to_bits())
    }

    /// Write a 64-bit float as its integer bit pattern.
    fn write_f64(&mut self, value: f64) -> Result<(), MemoryError> {
        self.write_u64(value.to_bits())
    }
}

/// A [`Writeable`] whose position can be advanced without writing.
pub trait CursorWriteable: Writeable {
    /// Reserve `count` bytes and move past them.
    ///
    /// Calls [`request_can_write(count)`](Writeable::request_can_write)
    /// first. The content of the skipped region is unspecified.
    fn skip(&mut self, count: usize) -> Result<(), MemoryError>;
}

/// Move exactly `length` bytes from `src` to `dst` through a bounded buffer.
///
/// The buffer holds `min(length, chunk_size)` bytes; each round is an exact
/// read followed by a write, so a source that runs dry fails with its strict
/// read error.
pub fn write_bytes_buffered<W, R>(
    dst: &mut W,
    src: &mut R,
    length: usize,
    chunk_size: usize,
) -> Result<(), MemoryError>
where
    W: Writeable + ?Sized,
    R: Readable + ?Sized,
{
    if chunk_size == 0 {
        return Err(MemoryError::InvalidConfig {
            reason: "chunk size must be greater than zero".to_string(),
        });
    }
    let mut buffer = vec![0u8; length.min(chunk_size)];
    let mut left = length;
    while left > 0 {
        let n = left.min(buffer.len());
        src.read_bytes(&mut buffer[..n])?;
        dst.write_bytes(&buffer[..n])?;
        left -= n;
    }
    Ok(())
}
