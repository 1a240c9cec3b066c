//! Deterministic payloads and throwaway directories.
//!
//! - [`payload`]: reproducible pseudo-random bytes for a given seed.
//! - [`scratch_dir`]: a labelled [`TempDir`] under the system temp dir,
//!   removed with its contents on drop.

use std::io;

use tempfile::{Builder, TempDir};

/// `len` bytes from a 64-bit xorshift generator seeded with `seed`.
///
/// The same `(len, seed)` pair always yields the same bytes.
pub fn payload(len: usize, seed: u64) -> Vec<u8> {
    // xorshift has a fixed point at zero.
    let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
    if state == 0 {
        state = 1;
    }
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 24) as u8
        })
        .collect()
}

/// A fresh directory under the system temp dir whose name starts with
/// `octet-{label}-`. Removed with its contents when the handle drops.
pub fn scratch_dir(label: &str) -> io::Result<TempDir> {
    Builder::new().prefix(&format!("octet-{label}-")).tempdir()
}
