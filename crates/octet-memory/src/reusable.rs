//! Growable buffers reused across independent write cycles.
//!
//! [`ReusableMemory`] keeps one backing region alive between cycles. Each
//! call to [`slice`](ReusableMemory::slice) binds a fresh writer at position
//! 0, runs the caller's write closure, and returns a [`ReadMemory`] over
//! exactly the bytes written. The backing is reused by the next cycle, so
//! producing a stream of variable-length records costs no allocation once
//! the buffer has grown to fit the largest one.
//!
//! # Aliasing
//!
//! The returned view borrows the buffer. The borrow checker therefore
//! rejects a second `slice` call while a previous view is still alive:
//!
//! ```compile_fail
//! use octet_core::Writeable;
//! use octet_memory::ReusableMemory;
//!
//! let mut buf = ReusableMemory::array(16).unwrap();
//! let first = buf.slice(|w| w.write_i32(1)).unwrap();
//! let second = buf.slice(|w| w.write_i32(2)).unwrap();
//! assert_eq!(first.get_i32(0).unwrap(), 1);
//! ```
//!
//! # Growth
//!
//! When a write needs more room than the backing has, the new capacity is
//! `ceil((position + needed) / initial_capacity) * initial_capacity`. Only
//! the bytes before the current position are copied; the count is added to
//! [`bytes_copied`](ReusableMemory::bytes_copied). Requesting the full size
//! with [`request_can_write`](Writeable::request_can_write) before the first
//! write grows without copying.

use octet_core::{
    Allocation, CursorWriteable, Memory, MemoryError, ReadMemory, Readable, Writeable,
};
use tracing::debug;

use crate::array::ArrayMemory;
use crate::config::{BufferConfig, MAX_ALLOCATION};
use crate::native::NativeAllocation;

type Allocator<M> = Box<dyn FnMut(usize) -> Result<M, MemoryError>>;

/// A growable backing region reused across write-then-snapshot cycles.
///
/// Not safe for concurrent use: [`slice`](Self::slice) takes `&mut self`,
/// and one instance serves one producer at a time.
pub struct ReusableMemory<M: Memory> {
    config: BufferConfig,
    alloc: Allocator<M>,
    /// Hook run on a backing after it has been replaced.
    release: fn(&mut M),
    memory: M,
    bytes_copied: usize,
    cycles: u64,
}

impl<M: Memory> ReusableMemory<M> {
    /// Create a buffer whose backings come from `alloc`.
    ///
    /// `alloc` is called once immediately with `initial_capacity`, then once
    /// per growth event with the new capacity.
    pub fn new<A>(initial_capacity: usize, alloc: A) -> Result<Self, MemoryError>
    where
        A: FnMut(usize) -> Result<M, MemoryError> + 'static,
    {
        Self::with_config(BufferConfig::new(initial_capacity), alloc)
    }

    /// Create a buffer from a validated [`BufferConfig`].
    pub fn with_config<A>(config: BufferConfig, mut alloc: A) -> Result<Self, MemoryError>
    where
        A: FnMut(usize) -> Result<M, MemoryError> + 'static,
    {
        config.validate()?;
        let memory = alloc(config.initial_capacity)?;
        Ok(Self {
            config,
            alloc: Box::new(alloc),
            release: |_| {},
            memory,
            bytes_copied: 0,
            cycles: 0,
        })
    }

    /// Run one write cycle and return a view of exactly the bytes written.
    ///
    /// The view aliases the internal backing and lives until the next
    /// mutating call on this buffer. If `write` fails, its error is
    /// returned and no view is produced.
    pub fn slice<F>(&mut self, write: F) -> Result<ReadMemory<'_>, MemoryError>
    where
        F: FnOnce(&mut ReusableWriter<'_, M>) -> Result<(), MemoryError>,
    {
        let mut writer = ReusableWriter {
            owner: &mut *self,
            position: 0,
        };
        write(&mut writer)?;
        let end = writer.position;
        self.cycles += 1;
        self.memory.slice(0, end)
    }

    /// Total bytes preserved across all growth events.
    pub fn bytes_copied(&self) -> usize {
        self.bytes_copied
    }

    /// Current backing capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.memory.size()
    }

    /// Capacity of the first backing; every capacity is a multiple of it.
    pub fn initial_capacity(&self) -> usize {
        self.config.initial_capacity
    }

    /// Number of completed [`slice`](Self::slice) cycles.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Replace the backing with one large enough for `total` bytes,
    /// preserving the first `live` bytes.
    fn grow(&mut self, total: usize, live: usize) -> Result<(), MemoryError> {
        let capacity = growth_capacity(total, self.config.initial_capacity)?;
        if let Some(max) = self.config.max_capacity {
            if capacity > max {
                return Err(MemoryError::CapacityExceeded {
                    requested: capacity,
                    max,
                });
            }
        }

        let old_capacity = self.memory.size();
        let next = (self.alloc)(capacity)?;
        let mut previous = std::mem::replace(&mut self.memory, next);
        let copied = if live > 0 {
            previous
                .range(0, live)
                .and_then(|prefix| self.memory.set_bytes(0, prefix))
        } else {
            Ok(())
        };
        // The old backing is released whether or not the copy succeeded.
        (self.release)(&mut previous);
        drop(previous);
        copied?;

        self.bytes_copied += live;
        debug!(
            old_capacity,
            new_capacity = capacity,
            bytes_copied = live,
            "grew reusable buffer"
        );
        Ok(())
    }
}

impl ReusableMemory<ArrayMemory> {
    /// A reusable buffer backed by heap byte arrays.
    pub fn array(initial_capacity: usize) -> Result<Self, MemoryError> {
        Self::new(initial_capacity, |size| Ok(ArrayMemory::new(size)))
    }
}

/// Smallest multiple of `initial` that holds `total` bytes.
///
/// Capacities above [`MAX_ALLOCATION`] are rejected before any allocator
/// sees them.
fn growth_capacity(total: usize, initial: usize) -> Result<usize, MemoryError> {
    let exceeded = MemoryError::CapacityExceeded {
        requested: total,
        max: MAX_ALLOCATION,
    };
    match total.div_ceil(initial).checked_mul(initial) {
        Some(capacity) if capacity <= MAX_ALLOCATION => Ok(capacity),
        _ => Err(exceeded),
    }
}

/// The writer bound to one [`ReusableMemory::slice`] cycle.
///
/// Every write calls [`request_can_write`](Writeable::request_can_write)
/// with its own width first, so growth happens immediately before the
/// value that does not fit, with the position at that moment.
pub struct ReusableWriter<'a, M: Memory> {
    owner: &'a mut ReusableMemory<M>,
    position: usize,
}

impl<M: Memory> ReusableWriter<'_, M> {
    /// Capacity of the backing this writer currently targets.
    pub fn capacity(&self) -> usize {
        self.owner.memory.size()
    }
}

impl<M: Memory> Writeable for ReusableWriter<'_, M> {
    fn position(&self) -> usize {
        self.position
    }

    fn available(&self) -> Option<usize> {
        self.owner
            .config
            .max_capacity
            .map(|max| max.saturating_sub(self.position))
    }

    fn request_can_write(&mut self, needed: usize) -> Result<(), MemoryError> {
        let total = self
            .position
            .checked_add(needed)
            .ok_or(MemoryError::CapacityExceeded {
                requested: usize::MAX,
                max: MAX_ALLOCATION,
            })?;
        if total <= self.owner.memory.size() {
            return Ok(());
        }
        self.owner.grow(total, self.position)
    }

    fn write_bytes(&mut self, src: &[u8]) -> Result<(), MemoryError> {
        self.request_can_write(src.len())?;
        self.owner.memory.set_bytes(self.position, src)?;
        self.position += src.len();
        Ok(())
    }

    fn write_memory(&mut self, src: ReadMemory<'_>) -> Result<(), MemoryError> {
        self.request_can_write(src.size())?;
        self.owner.memory.set_memory(self.position, src)?;
        self.position += src.size();
        Ok(())
    }

    fn write_from(&mut self, src: &mut dyn Readable, length: usize) -> Result<(), MemoryError> {
        self.request_can_write(length)?;
        self.owner
            .memory
            .set_from_readable(self.position, src, length)?;
        self.position += length;
        Ok(())
    }
}

impl<M: Memory> CursorWriteable for ReusableWriter<'_, M> {
    fn skip(&mut self, count: usize) -> Result<(), MemoryError> {
        self.request_can_write(count)?;
        self.position += count;
        Ok(())
    }
}

/// A [`ReusableMemory`] over [`Allocation`]s.
///
/// Every replaced backing is closed as soon as its live bytes have been
/// copied. [`close`](Self::close) releases the current backing; after that
/// [`slice`](Self::slice) fails with [`MemoryError::Released`].
pub struct ReusableAllocation<A: Allocation> {
    inner: ReusableMemory<A>,
}

impl<A: Allocation> ReusableAllocation<A> {
    /// Create a buffer whose backings come from `alloc`.
    pub fn new<F>(initial_capacity: usize, alloc: F) -> Result<Self, MemoryError>
    where
        F: FnMut(usize) -> Result<A, MemoryError> + 'static,
    {
        Self::with_config(BufferConfig::new(initial_capacity), alloc)
    }

    /// Create a buffer from a validated [`BufferConfig`].
    pub fn with_config<F>(config: BufferConfig, alloc: F) -> Result<Self, MemoryError>
    where
        F: FnMut(usize) -> Result<A, MemoryError> + 'static,
    {
        let mut inner = ReusableMemory::with_config(config, alloc)?;
        inner.release = |memory: &mut A| memory.close();
        Ok(Self { inner })
    }

    /// Run one write cycle; see [`ReusableMemory::slice`].
    pub fn slice<F>(&mut self, write: F) -> Result<ReadMemory<'_>, MemoryError>
    where
        F: FnOnce(&mut ReusableWriter<'_, A>) -> Result<(), MemoryError>,
    {
        if self.is_closed() {
            return Err(MemoryError::Released);
        }
        self.inner.slice(write)
    }

    /// Release the current backing. Idempotent.
    pub fn close(&mut self) {
        self.inner.memory.close();
    }

    /// True once [`close`](Self::close) has run.
    pub fn is_closed(&self) -> bool {
        self.inner.memory.is_closed()
    }

    /// Total bytes preserved across all growth events.
    pub fn bytes_copied(&self) -> usize {
        self.inner.bytes_copied()
    }

    /// Current backing capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    /// Capacity of the first backing.
    pub fn initial_capacity(&self) -> usize {
        self.inner.initial_capacity()
    }

    /// Number of completed cycles.
    pub fn cycles(&self) -> u64 {
        self.inner.cycles()
    }
}

impl ReusableAllocation<NativeAllocation> {
    /// A reusable buffer backed by native allocations.
    pub fn native(initial_capacity: usize) -> Result<Self, MemoryError> {
        Self::new(initial_capacity, NativeAllocation::new)
    }
}
