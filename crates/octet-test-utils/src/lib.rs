//! Test utilities and mock cursors for Octet development.
//!
//! Provides mock implementations of the cursor traits
//! ([`Readable`], [`Writeable`]) that exercise the edge cases real sources
//! and sinks hit rarely: short reads, unbounded sources and request
//! tracking. Deterministic payloads and scratch directories live in
//! [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{payload, scratch_dir};
pub use tempfile::TempDir;

use octet_core::{CursorWriteable, MemoryError, Readable, Writeable};

/// A [`Readable`] that hands out at most `chunk` bytes per bulk receive.
///
/// Strict reads still succeed while enough bytes remain, so code that
/// assumes `receive_into` fills its buffer is caught without breaking
/// code that uses `read_bytes`.
pub struct ChunkedReadable {
    data: Vec<u8>,
    position: usize,
    chunk: usize,
}

impl ChunkedReadable {
    pub fn new(data: Vec<u8>, chunk: usize) -> Self {
        Self {
            data,
            position: 0,
            chunk: chunk.max(1),
        }
    }

    /// Bytes consumed so far.
    pub fn consumed(&self) -> usize {
        self.position
    }

    fn left(&self) -> usize {
        self.data.len() - self.position
    }
}

impl Readable for ChunkedReadable {
    fn available(&self) -> Option<usize> {
        Some(self.left())
    }

    fn receive(&mut self) -> Result<Option<u8>, MemoryError> {
        let Some(&byte) = self.data.get(self.position) else {
            return Ok(None);
        };
        self.position += 1;
        Ok(Some(byte))
    }

    fn receive_into(&mut self, dst: &mut [u8]) -> Result<Option<usize>, MemoryError> {
        if dst.is_empty() {
            return Ok(Some(0));
        }
        if self.left() == 0 {
            return Ok(None);
        }
        let n = self.left().min(dst.len()).min(self.chunk);
        dst[..n].copy_from_slice(&self.data[self.position..self.position + n]);
        self.position += n;
        Ok(Some(n))
    }

    fn read_bytes(&mut self, dst: &mut [u8]) -> Result<(), MemoryError> {
        if dst.len() > self.left() {
            return Err(MemoryError::EndOfInput {
                needed: dst.len(),
                available: self.left(),
            });
        }
        dst.copy_from_slice(&self.data[self.position..self.position + dst.len()]);
        self.position += dst.len();
        Ok(())
    }

    fn skip(&mut self, count: usize) -> Result<usize, MemoryError> {
        let skipped = count.min(self.left());
        self.position += skipped;
        Ok(skipped)
    }
}

/// A [`Readable`] that never runs dry and never reports a size.
///
/// Yields the byte sequence `seed, seed+1, ...` wrapping at 256.
pub struct UnboundedReadable {
    next: u8,
    produced: usize,
}

impl UnboundedReadable {
    pub fn new(seed: u8) -> Self {
        Self {
            next: seed,
            produced: 0,
        }
    }

    /// Bytes produced so far, including skipped ones.
    pub fn produced(&self) -> usize {
        self.produced
    }

    fn advance(&mut self) -> u8 {
        let byte = self.next;
        self.next = self.next.wrapping_add(1);
        self.produced += 1;
        byte
    }
}

impl Readable for UnboundedReadable {
    fn available(&self) -> Option<usize> {
        None
    }

    fn receive(&mut self) -> Result<Option<u8>, MemoryError> {
        Ok(Some(self.advance()))
    }

    fn receive_into(&mut self, dst: &mut [u8]) -> Result<Option<usize>, MemoryError> {
        for slot in dst.iter_mut() {
            *slot = self.advance();
        }
        Ok(Some(dst.len()))
    }

    fn read_bytes(&mut self, dst: &mut [u8]) -> Result<(), MemoryError> {
        for slot in dst.iter_mut() {
            *slot = self.advance();
        }
        Ok(())
    }

    fn skip(&mut self, count: usize) -> Result<usize, MemoryError> {
        for _ in 0..count {
            self.advance();
        }
        Ok(count)
    }
}

/// A [`Writeable`] backed by a `Vec<u8>` that records every capacity
/// request and flush.
///
/// Optionally bounded: writes past `limit` fail with
/// [`MemoryError::ShortWrite`].
#[derive(Default)]
pub struct RecordingWriteable {
    bytes: Vec<u8>,
    requests: Vec<usize>,
    flushes: usize,
    limit: Option<usize>,
}

impl RecordingWriteable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that refuses to hold more than `limit` bytes.
    pub fn bounded(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Everything written so far.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Every `request_can_write` argument, in call order.
    pub fn requests(&self) -> &[usize] {
        &self.requests
    }

    /// Number of `flush` calls.
    pub fn flushes(&self) -> usize {
        self.flushes
    }

    fn reserve(&self, needed: usize) -> Result<(), MemoryError> {
        if let Some(remaining) = self.available() {
            if needed > remaining {
                return Err(MemoryError::ShortWrite { needed, remaining });
            }
        }
        Ok(())
    }
}

impl Writeable for RecordingWriteable {
    fn position(&self) -> usize {
        self.bytes.len()
    }

    fn available(&self) -> Option<usize> {
        self.limit.map(|limit| limit - self.bytes.len())
    }

    fn request_can_write(&mut self, needed: usize) -> Result<(), MemoryError> {
        self.requests.push(needed);
        Ok(())
    }

    fn write_bytes(&mut self, src: &[u8]) -> Result<(), MemoryError> {
        self.request_can_write(src.len())?;
        self.reserve(src.len())?;
        self.bytes.extend_from_slice(src);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), MemoryError> {
        self.flushes += 1;
        Ok(())
    }
}

impl CursorWriteable for RecordingWriteable {
    fn skip(&mut self, count: usize) -> Result<(), MemoryError> {
        self.request_can_write(count)?;
        self.reserve(count)?;
        self.bytes.resize(self.bytes.len() + count, 0);
        Ok(())
    }
}
