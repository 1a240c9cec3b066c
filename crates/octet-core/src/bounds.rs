//! Range checks and fixed-width extraction used by every backing store.

use crate::error::MemoryError;

/// Check that `len` bytes starting at `offset` fit inside `size`.
///
/// Overflowing `offset + len` is reported as out of bounds.
pub fn check_range(offset: usize, len: usize, size: usize) -> Result<(), MemoryError> {
    match offset.checked_add(len) {
        Some(end) if end <= size => Ok(()),
        _ => Err(MemoryError::OutOfBounds { offset, len, size }),
    }
}

/// Copy `N` bytes starting at `offset` out of `bytes`.
pub fn array_at<const N: usize>(bytes: &[u8], offset: usize) -> Result<[u8; N], MemoryError> {
    check_range(offset, N, bytes.len())?;
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[offset..offset + N]);
    Ok(out)
}
