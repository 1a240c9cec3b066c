//! Push cursor over an OS file.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use octet_core::{MemoryError, Readable, Writeable};
use tracing::debug;

use crate::error::FileError;

/// How [`WriteableFile::open`] treats an existing file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WriteMode {
    /// Create the file, or cut an existing one to length 0.
    #[default]
    Truncate,
    /// Create the file, or write after its existing contents.
    Append,
}

/// A file opened for writing front to back.
///
/// The sink is unbounded: [`available`](Writeable::available) is `None` and
/// [`request_can_write`](Writeable::request_can_write) never fails. Writes are
/// buffered; [`flush`](Writeable::flush) pushes them to the OS and
/// [`close`](Self::close) flushes before releasing the handle. Dropping an
/// open file closes it; a flush error there is only logged.
pub struct WriteableFile {
    writer: Option<BufWriter<File>>,
    path: PathBuf,
    written: u64,
    scratch: [u8; 8],
}

impl WriteableFile {
    /// Create `path`, truncating any existing file.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, FileError> {
        Self::open(path, WriteMode::Truncate)
    }

    /// Open `path` for appending, creating it if needed.
    pub fn append<P: AsRef<Path>>(path: P) -> Result<Self, FileError> {
        Self::open(path, WriteMode::Append)
    }

    /// Open `path` for writing in the given mode.
    pub fn open<P: AsRef<Path>>(path: P, mode: WriteMode) -> Result<Self, FileError> {
        let path = path.as_ref();
        let mut options = OpenOptions::new();
        options.create(true);
        match mode {
            WriteMode::Truncate => options.write(true).truncate(true),
            WriteMode::Append => options.append(true),
        };
        let file = options
            .open(path)
            .map_err(|e| FileError::from_io("create", path, e))?;
        debug!(path = %path.display(), ?mode, "opened file for writing");
        Ok(Self {
            writer: Some(BufWriter::new(file)),
            path: path.to_path_buf(),
            written: 0,
            scratch: [0; 8],
        })
    }

    /// The path this file was opened at.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush buffered bytes and release the OS handle.
    ///
    /// Idempotent: closing a closed file succeeds without doing anything.
    pub fn close(&mut self) -> Result<(), MemoryError> {
        let Some(mut writer) = self.writer.take() else {
            return Ok(());
        };
        let flushed = writer.flush().map_err(|e| MemoryError::io("flush", e));
        drop(writer);
        debug!(path = %self.path.display(), written = self.written, "closed file");
        flushed
    }

    /// True once [`close`](Self::close) has run.
    pub fn is_closed(&self) -> bool {
        self.writer.is_none()
    }

    fn writer(&mut self) -> Result<&mut BufWriter<File>, MemoryError> {
        self.writer.as_mut().ok_or(MemoryError::Released)
    }

    /// Encode a primitive into the scratch region, then write it in one call.
    fn write_array<const N: usize>(&mut self, bytes: [u8; N]) -> Result<(), MemoryError> {
        self.request_can_write(N)?;
        self.scratch[..N].copy_from_slice(&bytes);
        let writer = self.writer.as_mut().ok_or(MemoryError::Released)?;
        writer
            .write_all(&self.scratch[..N])
            .map_err(|e| MemoryError::io("write", e))?;
        self.written += N as u64;
        Ok(())
    }
}

impl Writeable for WriteableFile {
    fn position(&self) -> usize {
        usize::try_from(self.written).unwrap_or(usize::MAX)
    }

    fn available(&self) -> Option<usize> {
        None
    }

    fn request_can_write(&mut self, _needed: usize) -> Result<(), MemoryError> {
        Ok(())
    }

    fn write_bytes(&mut self, src: &[u8]) -> Result<(), MemoryError> {
        self.request_can_write(src.len())?;
        self.writer()?
            .write_all(src)
            .map_err(|e| MemoryError::io("write", e))?;
        self.written += src.len() as u64;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), MemoryError> {
        self.writer()?
            .flush()
            .map_err(|e| MemoryError::io("flush", e))
    }

    fn write_from(&mut self, src: &mut dyn Readable, length: usize) -> Result<(), MemoryError> {
        self.request_can_write(length)?;
        for moved in 0..length {
            let Some(byte) = src.receive()? else {
                return Err(MemoryError::EndOfInput {
                    needed: length,
                    available: moved,
                });
            };
            self.write_array([byte])?;
        }
        Ok(())
    }

    fn write_i8(&mut self, value: i8) -> Result<(), MemoryError> {
        self.write_array(value.to_be_bytes())
    }

    fn write_i16(&mut self, value: i16) -> Result<(), MemoryError> {
        self.write_array(value.to_be_bytes())
    }

    fn write_i32(&mut self, value: i32) -> Result<(), MemoryError> {
        self.write_array(value.to_be_bytes())
    }

    fn write_i64(&mut self, value: i64) -> Result<(), MemoryError> {
        self.write_array(value.to_be_bytes())
    }
}

impl Drop for WriteableFile {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            debug!(path = %self.path.display(), error = %e, "flush on drop failed");
        }
    }
}

impl std::fmt::Debug for WriteableFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriteableFile")
            .field("path", &self.path)
            .field("written", &self.written)
            .field("closed", &self.is_closed())
            .finish()
    }
}
