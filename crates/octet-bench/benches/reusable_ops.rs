//! Criterion micro-benchmarks for reusable buffer cycles and growth.

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use octet_bench::{record_bodies, write_record};
use octet_core::Writeable;
use octet_memory::{Base64, ReusableAllocation, ReusableMemory};
use std::hint::black_box;

fn bench_steady_state_cycles(c: &mut Criterion) {
    let bodies = record_bodies(256, 512, 7);

    c.bench_function("reusable_array_256_records", |b| {
        let mut buf = ReusableMemory::array(1024).unwrap();
        b.iter(|| {
            for (id, body) in bodies.iter().enumerate() {
                let view = buf.slice(|w| write_record(w, id as u64, body)).unwrap();
                black_box(view.size());
            }
        });
    });

    c.bench_function("reusable_native_256_records", |b| {
        let mut buf = ReusableAllocation::native(1024).unwrap();
        b.iter(|| {
            for (id, body) in bodies.iter().enumerate() {
                let view = buf.slice(|w| write_record(w, id as u64, body)).unwrap();
                black_box(view.size());
            }
        });
    });
}

fn bench_growth(c: &mut Criterion) {
    let body = octet_test_utils::payload(64 * 1024, 11);

    c.bench_function("grow_from_64_bytes_to_64_kib", |b| {
        b.iter_batched(
            || ReusableMemory::array(64).unwrap(),
            |mut buf| {
                buf.slice(|w| {
                    for chunk in body.chunks(100) {
                        w.write_bytes(chunk)?;
                    }
                    Ok(())
                })
                .unwrap();
                black_box(buf.bytes_copied())
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_base64(c: &mut Criterion) {
    let mut buf = ReusableMemory::array(4096).unwrap();
    let body = octet_test_utils::payload(3000, 2);
    let text = {
        let view = buf.slice(|w| w.write_bytes(&body)).unwrap();
        Base64::STANDARD.encode(view)
    };

    c.bench_function("base64_decode_into_reusable", |b| {
        b.iter(|| {
            let view = buf
                .slice(|w| Base64::STANDARD.decode_into(w, &text).map(|_| ()))
                .unwrap();
            black_box(view.size())
        });
    });
}

criterion_group!(
    benches,
    bench_steady_state_cycles,
    bench_growth,
    bench_base64
);
criterion_main!(benches);
