//! Reusable buffer integration tests: growth accounting, cursor transfers
//! from short-reading sources, and record streams across many cycles.

use octet_core::{CursorWriteable, Memory, MemoryError, Readable, Writeable};
use octet_memory::{
    ArrayMemory, Base64, BufferConfig, MemoryWriter, ReusableAllocation, ReusableMemory,
};
use octet_test_utils::{payload, ChunkedReadable, RecordingWriteable, UnboundedReadable};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────

/// Write one value of the given width, tagged with its index.
fn write_width<W: Writeable + ?Sized>(w: &mut W, width: usize, i: usize) -> Result<(), MemoryError> {
    match width {
        1 => w.write_i8(i as i8),
        2 => w.write_i16(i as i16),
        4 => w.write_i32(i as i32),
        _ => w.write_i64(i as i64),
    }
}

/// Capacity and copy count the growth policy predicts for a write sequence.
fn model_growth(initial: usize, widths: &[usize]) -> (usize, usize) {
    let mut capacity = initial;
    let mut copied = 0;
    let mut position = 0;
    for &width in widths {
        let total = position + width;
        if total > capacity {
            capacity = total.div_ceil(initial) * initial;
            copied += position;
        }
        position = total;
    }
    (capacity, copied)
}

// ── Growth ──────────────────────────────────────────────────────

#[test]
fn growth_is_triggered_per_write() {
    let mut buf = ReusableMemory::array(4).unwrap();
    let view = buf
        .slice(|w| {
            w.write_i32(1)?;
            w.write_i32(2)
        })
        .unwrap();
    assert_eq!(view.as_slice(), &[0, 0, 0, 1, 0, 0, 0, 2]);
    assert_eq!(buf.capacity(), 8);
    assert_eq!(buf.bytes_copied(), 4);
}

#[test]
fn capacity_never_shrinks_between_cycles() {
    let mut buf = ReusableMemory::array(8).unwrap();
    buf.slice(|w| w.skip(100)).unwrap();
    assert_eq!(buf.capacity(), 104);

    let view = buf.slice(|w| w.write_i8(1)).unwrap();
    assert_eq!(view.size(), 1);
    assert_eq!(buf.capacity(), 104);
}

#[test]
fn zero_initial_capacity_is_rejected() {
    assert!(matches!(
        ReusableMemory::array(0),
        Err(MemoryError::InvalidConfig { .. })
    ));
    let config = BufferConfig::new(16).with_max_capacity(8);
    assert!(ReusableAllocation::with_config(config, octet_memory::NativeAllocation::new).is_err());
}

#[test]
fn failing_allocator_leaves_buffer_usable() {
    let mut calls = 0;
    let mut buf = ReusableMemory::new(4, move |size| {
        calls += 1;
        if calls == 2 {
            Err(MemoryError::InvalidConfig {
                reason: "allocator refused".to_string(),
            })
        } else {
            Ok(ArrayMemory::new(size))
        }
    })
    .unwrap();

    assert!(buf.slice(|w| w.write_i64(1)).is_err());
    assert_eq!(buf.capacity(), 4);
    let view = buf.slice(|w| w.write_i32(3)).unwrap();
    assert_eq!(view.get_i32(0).unwrap(), 3);
}

// ── Transfers ───────────────────────────────────────────────────

#[test]
fn write_from_short_reading_source() {
    let data = payload(1000, 3);
    let mut src = ChunkedReadable::new(data.clone(), 7);
    let mut buf = ReusableMemory::array(64).unwrap();
    let view = buf.slice(|w| w.write_from(&mut src, 1000)).unwrap();
    assert_eq!(view.as_slice(), data.as_slice());
    assert_eq!(buf.capacity(), 1024);
    assert_eq!(src.consumed(), 1000);
}

#[test]
fn write_from_unbounded_source() {
    let mut src = UnboundedReadable::new(10);
    let mut buf = ReusableMemory::array(16).unwrap();
    let view = buf.slice(|w| w.write_from(&mut src, 20)).unwrap();
    assert_eq!(view.get_u8(0).unwrap(), 10);
    assert_eq!(view.get_u8(19).unwrap(), 29);
    assert_eq!(src.produced(), 20);
}

#[test]
fn write_from_exhausted_source_fails() {
    let mut src = ChunkedReadable::new(vec![1, 2, 3], 2);
    let mut buf = ReusableMemory::array(4).unwrap();
    let err = buf.slice(|w| w.write_from(&mut src, 4)).unwrap_err();
    assert!(matches!(err, MemoryError::EndOfInput { needed: 4, .. }));
}

#[test]
fn snapshot_copies_into_fixed_memory() {
    let mut buf = ReusableMemory::array(4).unwrap();
    let view = buf
        .slice(|w| {
            w.write_i16(-2)?;
            w.write_f64(1.5)
        })
        .unwrap();

    let mut fixed = ArrayMemory::new(20);
    let mut writer = MemoryWriter::new(&mut fixed);
    writer.write_memory(view).unwrap();
    writer.write_memory(view).unwrap();
    assert!(matches!(
        writer.write_memory(view),
        Err(MemoryError::ShortWrite {
            needed: 10,
            remaining: 0
        })
    ));
    assert_eq!(fixed.get_i16(10).unwrap(), -2);
    assert_eq!(fixed.get_f64(12).unwrap(), 1.5);
    assert_eq!(fixed.get_f64(2).unwrap(), 1.5);
}

#[test]
fn snapshot_drains_into_any_writeable() {
    let mut buf = ReusableMemory::array(4).unwrap();
    let view = buf.slice(|w| w.write_i64(0x0102_0304_0506_0708)).unwrap();
    let mut sink = RecordingWriteable::new();
    let mut reader = view.reader();
    assert_eq!(sink.write_remaining(&mut reader).unwrap(), 8);
    assert_eq!(sink.bytes(), view.as_slice());
    assert!(!reader.valid());
}

// ── Record streams ──────────────────────────────────────────────

#[test]
fn variable_length_records_reuse_one_backing() {
    let mut buf = ReusableMemory::array(32).unwrap();
    let mut encoded = Vec::new();
    for len in [5usize, 30, 100, 3, 64, 0] {
        let body = payload(len, len as u64);
        let view = buf
            .slice(|w| {
                w.write_u16(len as u16)?;
                w.write_bytes(&body)
            })
            .unwrap();
        assert_eq!(view.get_u16(0).unwrap() as usize, len);
        assert_eq!(view.slice(2, len).unwrap().as_slice(), body.as_slice());
        encoded.push(Base64::URL_SAFE.encode(view));
    }
    assert_eq!(buf.cycles(), 6);
    assert_eq!(buf.capacity(), 128);

    let decoded = Base64::URL_SAFE.decode(&encoded[2]).unwrap();
    assert_eq!(decoded.len(), 102);
}

#[test]
fn native_buffer_closes_cleanly() {
    let mut buf = ReusableAllocation::native(16).unwrap();
    for i in 0..4i32 {
        let view = buf
            .slice(|w| {
                for _ in 0..=i {
                    w.write_i32(i)?;
                }
                Ok(())
            })
            .unwrap();
        assert_eq!(view.size(), 4 * (i as usize + 1));
    }
    buf.close();
    assert!(buf.is_closed());
    assert!(buf.slice(|w| w.write_i8(0)).is_err());
}

proptest! {
    #[test]
    fn growth_matches_policy(
        initial in 1usize..16,
        widths in prop::collection::vec(prop::sample::select(vec![1usize, 2, 4, 8]), 0..40),
    ) {
        let mut buf = ReusableMemory::array(initial).unwrap();
        let view = buf
            .slice(|w| {
                for (i, &width) in widths.iter().enumerate() {
                    write_width(w, width, i)?;
                }
                Ok(())
            })
            .unwrap();
        let written: usize = widths.iter().sum();
        prop_assert_eq!(view.size(), written);

        let mut reader = view.reader();
        for (i, &width) in widths.iter().enumerate() {
            let value = match width {
                1 => reader.read_i8().unwrap() as i64,
                2 => reader.read_i16().unwrap() as i64,
                4 => reader.read_i32().unwrap() as i64,
                _ => reader.read_i64().unwrap(),
            };
            let expected = match width {
                1 => i as i8 as i64,
                2 => i as i16 as i64,
                4 => i as i32 as i64,
                _ => i as i64,
            };
            prop_assert_eq!(value, expected);
        }

        let (capacity, copied) = model_growth(initial, &widths);
        prop_assert_eq!(buf.capacity(), capacity);
        prop_assert_eq!(buf.bytes_copied(), copied);
        prop_assert_eq!(buf.capacity() % initial, 0);
    }

    #[test]
    fn upfront_request_never_copies(initial in 1usize..64, len in 0usize..512) {
        let data = payload(len, 9);
        let mut buf = ReusableMemory::array(initial).unwrap();
        buf.slice(|w| {
            w.request_can_write(len)?;
            w.write_bytes(&data)
        })
        .unwrap();
        prop_assert_eq!(buf.bytes_copied(), 0);
        prop_assert!(buf.capacity() >= len);
    }
}
