//! Error types shared by every Octet backing store.

use std::error::Error;
use std::fmt;
use std::io;

/// Errors from memory access, cursor reads/writes and buffer growth.
///
/// Out-of-range access ([`OutOfBounds`](Self::OutOfBounds)) is kept apart
/// from stream exhaustion ([`EndOfInput`](Self::EndOfInput),
/// [`ShortWrite`](Self::ShortWrite)) and from OS failures
/// ([`Io`](Self::Io)).
#[derive(Debug)]
pub enum MemoryError {
    /// An access touched bytes outside `[0, size)`.
    OutOfBounds {
        /// Start of the requested range.
        offset: usize,
        /// Length of the requested range.
        len: usize,
        /// Size of the region.
        size: usize,
    },
    /// An exact read needed more bytes than the source could produce.
    EndOfInput {
        /// Number of bytes the read required.
        needed: usize,
        /// Number of bytes that were left.
        available: usize,
    },
    /// A write needed more room than a fixed-size sink has left.
    ShortWrite {
        /// Number of bytes the write required.
        needed: usize,
        /// Number of bytes of room that were left.
        remaining: usize,
    },
    /// The backing resource has already been released.
    Released,
    /// A growable buffer would exceed its configured maximum capacity.
    CapacityExceeded {
        /// Capacity the growth policy asked for.
        requested: usize,
        /// Configured upper bound.
        max: usize,
    },
    /// The allocator refused a block of this size.
    AllocationFailed {
        /// Size of the refused block in bytes.
        size: usize,
    },
    /// A configuration value was rejected at construction.
    InvalidConfig {
        /// Why the value was rejected.
        reason: String,
    },
    /// Text could not be decoded into bytes.
    InvalidEncoding {
        /// Decoder message.
        detail: String,
    },
    /// The operating system reported a failure.
    Io {
        /// Operation that failed (`"read"`, `"write"`, `"seek"`, ...).
        op: &'static str,
        /// Underlying OS error.
        source: io::Error,
    },
}

impl MemoryError {
    /// Wrap an OS error raised while performing `op`.
    pub fn io(op: &'static str, source: io::Error) -> Self {
        Self::Io { op, source }
    }

    /// The OS error code carried by an [`Io`](Self::Io) failure, if any.
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            Self::Io { source, .. } => source.raw_os_error(),
            _ => None,
        }
    }

    /// True for the exhaustion conditions of pure in-memory backings.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::EndOfInput { .. } | Self::ShortWrite { .. })
    }
}

impl fmt::Display for MemoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { offset, len, size } => {
                write!(
                    f,
                    "out of bounds: {len} bytes at offset {offset} in a region of {size} bytes"
                )
            }
            Self::EndOfInput { needed, available } => {
                write!(f, "end of input: needed {needed} bytes, {available} available")
            }
            Self::ShortWrite { needed, remaining } => {
                write!(f, "short write: needed {needed} bytes, {remaining} remaining")
            }
            Self::Released => write!(f, "resource already released"),
            Self::CapacityExceeded { requested, max } => {
                write!(
                    f,
                    "capacity exceeded: requested {requested} bytes, maximum {max} bytes"
                )
            }
            Self::AllocationFailed { size } => write!(f, "allocation of {size} bytes failed"),
            Self::InvalidConfig { reason } => write!(f, "invalid configuration: {reason}"),
            Self::InvalidEncoding { detail } => write!(f, "invalid encoding: {detail}"),
            Self::Io { op, source } => write!(f, "I/O error during {op}: {source}"),
        }
    }
}

impl Error for MemoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
