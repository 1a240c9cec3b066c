//! Benchmark workloads for the Octet memory and file primitives.
//!
//! - [`record_bodies`]: deterministic variable-length record bodies
//! - [`write_record`]: encode one record through any [`Writeable`]
//! - [`RECORD_HEADER_LEN`]: fixed header size of an encoded record

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use octet_core::{MemoryError, Readable, Writeable};

/// Header bytes before each record body: i64 id, f64 value, u32 length.
pub const RECORD_HEADER_LEN: usize = 8 + 8 + 4;

/// `count` record bodies with lengths cycling through `0..max_len`.
///
/// Deterministic for a given `(count, max_len, seed)`.
pub fn record_bodies(count: usize, max_len: usize, seed: u64) -> Vec<Vec<u8>> {
    (0..count)
        .map(|i| {
            let len = if max_len == 0 { 0 } else { (i * 37) % max_len };
            octet_test_utils::payload(len, seed.wrapping_add(i as u64))
        })
        .collect()
}

/// Encode record `id` with `body` as header then raw bytes.
pub fn write_record<W: Writeable + ?Sized>(
    w: &mut W,
    id: u64,
    body: &[u8],
) -> Result<(), MemoryError> {
    w.request_can_write(RECORD_HEADER_LEN + body.len())?;
    w.write_u64(id)?;
    w.write_f64(id as f64 * 0.5)?;
    w.write_u32(body.len() as u32)?;
    w.write_bytes(body)
}

/// Decode one record header and skip its body, returning the id.
pub fn skip_record<R: Readable + ?Sized>(r: &mut R) -> Result<u64, MemoryError> {
    let id = r.read_u64()?;
    r.read_f64()?;
    let len = r.read_u32()? as usize;
    r.skip(len)?;
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use octet_core::MemoryReader;
    use octet_test_utils::RecordingWriteable;

    #[test]
    fn records_round_trip() {
        let bodies = record_bodies(10, 50, 1);
        let mut sink = RecordingWriteable::new();
        for (id, body) in bodies.iter().enumerate() {
            write_record(&mut sink, id as u64, body).unwrap();
        }
        let mut reader = MemoryReader::new(sink.bytes());
        for id in 0..10u64 {
            assert_eq!(skip_record(&mut reader).unwrap(), id);
        }
        assert!(!reader.valid());
    }

    #[test]
    fn bodies_are_deterministic() {
        assert_eq!(record_bodies(5, 16, 3), record_bodies(5, 16, 3));
        assert!(record_bodies(4, 0, 3).iter().all(Vec::is_empty));
    }
}
