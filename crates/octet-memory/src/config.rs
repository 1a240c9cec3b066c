//! Reusable buffer configuration.

use octet_core::MemoryError;

/// Largest block any backing may request: the allocator limit of
/// `isize::MAX` bytes.
pub const MAX_ALLOCATION: usize = isize::MAX as usize;

/// Configuration for a [`ReusableMemory`](crate::ReusableMemory).
///
/// Validated at construction; all values are immutable after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BufferConfig {
    /// Capacity of the first backing, in bytes.
    ///
    /// Every later capacity is an integer multiple of this value.
    /// Must be greater than zero.
    pub initial_capacity: usize,

    /// Upper bound on the backing capacity, in bytes.
    ///
    /// Growth that would exceed it fails with
    /// [`MemoryError::CapacityExceeded`]. `None` means unbounded.
    pub max_capacity: Option<usize>,
}

impl BufferConfig {
    /// Default initial capacity: 1 KiB.
    pub const DEFAULT_INITIAL_CAPACITY: usize = 1024;

    /// Create a config with the given initial capacity and no upper bound.
    pub fn new(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            max_capacity: None,
        }
    }

    /// Set the upper bound on the backing capacity.
    pub fn with_max_capacity(mut self, max_capacity: usize) -> Self {
        self.max_capacity = Some(max_capacity);
        self
    }

    /// Reject values the growth policy cannot work with.
    pub fn validate(&self) -> Result<(), MemoryError> {
        if self.initial_capacity == 0 {
            return Err(MemoryError::InvalidConfig {
                reason: "initial_capacity must be greater than zero".to_string(),
            });
        }
        if self.initial_capacity > MAX_ALLOCATION {
            return Err(MemoryError::InvalidConfig {
                reason: format!(
                    "initial_capacity {} exceeds the allocation limit {MAX_ALLOCATION}",
                    self.initial_capacity
                ),
            });
        }
        if let Some(max) = self.max_capacity {
            if max < self.initial_capacity {
                return Err(MemoryError::InvalidConfig {
                    reason: format!(
                        "max_capacity {max} is below initial_capacity {}",
                        self.initial_capacity
                    ),
                });
            }
        }
        Ok(())
    }
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INITIAL_CAPACITY)
    }
}
