//! Pull cursor over an OS file.

use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use octet_core::{CursorReadable, MemoryError, Readable};
use tracing::{debug, trace};

use crate::error::FileError;

/// A file opened for reading front to back.
///
/// The total size is recorded at open, so [`available`](Readable::available)
/// is always known. Exact reads (`read_*`, [`read_bytes`](Readable::read_bytes))
/// that come up short fail with [`MemoryError::Io`], even exactly at end of
/// file; [`receive`](Readable::receive) is the tolerant way to detect the end.
pub struct ReadableFile {
    reader: Option<BufReader<File>>,
    path: PathBuf,
    size: u64,
    offset: u64,
    scratch: [u8; 8],
}

impl ReadableFile {
    /// Open `path` for reading.
    ///
    /// Fails with [`FileError::NotFound`] if the path does not resolve.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, FileError> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|e| FileError::from_io("open", path, e))?;
        let size = file
            .seek(SeekFrom::End(0))
            .and_then(|size| file.seek(SeekFrom::Start(0)).map(|_| size))
            .map_err(|e| FileError::from_io("seek", path, e))?;
        debug!(path = %path.display(), size, "opened file for reading");
        Ok(Self {
            reader: Some(BufReader::new(file)),
            path: path.to_path_buf(),
            size,
            offset: 0,
            scratch: [0; 8],
        })
    }

    /// The path this file was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size of the file when it was opened.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Release the OS handle. Idempotent.
    pub fn close(&mut self) {
        if self.reader.take().is_some() {
            debug!(path = %self.path.display(), offset = self.offset, "closed file");
        }
    }

    /// True once [`close`](Self::close) has run.
    pub fn is_closed(&self) -> bool {
        self.reader.is_none()
    }

    fn reader(&mut self) -> Result<&mut BufReader<File>, MemoryError> {
        self.reader.as_mut().ok_or(MemoryError::Released)
    }

    fn left(&self) -> u64 {
        self.size.saturating_sub(self.offset)
    }

    /// Re-read the OS position after a failed read left it unknown.
    fn resync(&mut self) {
        if let Some(reader) = self.reader.as_mut() {
            self.offset = reader.stream_position().unwrap_or(self.size);
        }
    }

    /// Read exactly `dst.len()` bytes, keeping `offset` in step with the OS.
    fn read_exact_tracked(&mut self, dst: &mut [u8]) -> Result<(), MemoryError> {
        let result = self.reader()?.read_exact(dst);
        if let Err(e) = result {
            self.resync();
            return Err(MemoryError::io("read", e));
        }
        self.offset += dst.len() as u64;
        Ok(())
    }

    /// Decode a primitive through the per-handle scratch region.
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], MemoryError> {
        let reader = self.reader.as_mut().ok_or(MemoryError::Released)?;
        if let Err(e) = reader.read_exact(&mut self.scratch[..N]) {
            self.resync();
            return Err(MemoryError::io("read", e));
        }
        self.offset += N as u64;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.scratch[..N]);
        Ok(out)
    }

    /// One `read` call, retried on interruption.
    fn read_some(&mut self, dst: &mut [u8]) -> Result<usize, MemoryError> {
        let reader = self.reader()?;
        let n = loop {
            match reader.read(dst) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(MemoryError::io("read", e)),
            }
        };
        self.offset += n as u64;
        Ok(n)
    }
}

impl Readable for ReadableFile {
    fn available(&self) -> Option<usize> {
        if self.is_closed() {
            return Some(0);
        }
        Some(usize::try_from(self.left()).unwrap_or(usize::MAX))
    }

    fn receive(&mut self) -> Result<Option<u8>, MemoryError> {
        let mut byte = [0u8; 1];
        match self.read_some(&mut byte)? {
            0 => {
                trace!(path = %self.path.display(), "end of file");
                Ok(None)
            }
            _ => Ok(Some(byte[0])),
        }
    }

    fn receive_into(&mut self, dst: &mut [u8]) -> Result<Option<usize>, MemoryError> {
        if dst.is_empty() {
            self.reader()?;
            return Ok(Some(0));
        }
        match self.read_some(dst)? {
            0 => {
                trace!(path = %self.path.display(), "end of file");
                Ok(None)
            }
            n => Ok(Some(n)),
        }
    }

    fn read_bytes(&mut self, dst: &mut [u8]) -> Result<(), MemoryError> {
        self.read_exact_tracked(dst)
    }

    fn skip(&mut self, count: usize) -> Result<usize, MemoryError> {
        let delta = (count as u64).min(self.left());
        let reader = self.reader()?;
        // Offsets are bounded by the file size, which fits in i64.
        reader
            .seek_relative(delta as i64)
            .map_err(|e| MemoryError::io("seek", e))?;
        self.offset += delta;
        Ok(delta as usize)
    }

    fn read_i8(&mut self) -> Result<i8, MemoryError> {
        self.read_array().map(i8::from_be_bytes)
    }

    fn read_i16(&mut self) -> Result<i16, MemoryError> {
        self.read_array().map(i16::from_be_bytes)
    }

    fn read_i32(&mut self) -> Result<i32, MemoryError> {
        self.read_array().map(i32::from_be_bytes)
    }

    fn read_i64(&mut self) -> Result<i64, MemoryError> {
        self.read_array().map(i64::from_be_bytes)
    }
}

impl CursorReadable for ReadableFile {
    fn position(&self) -> usize {
        usize::try_from(self.offset).unwrap_or(usize::MAX)
    }

    fn remaining(&self) -> usize {
        self.available().unwrap_or(0)
    }
}

impl Drop for ReadableFile {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for ReadableFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadableFile")
            .field("path", &self.path)
            .field("size", &self.size)
            .field("offset", &self.offset)
            .field("closed", &self.is_closed())
            .finish()
    }
}
