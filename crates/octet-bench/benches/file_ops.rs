//! Criterion benchmarks for file cursor round-trips.

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use octet_bench::{record_bodies, skip_record, write_record};
use octet_core::{Readable, Writeable};
use octet_file::{ReadableFile, WriteableFile};
use octet_test_utils::scratch_dir;
use std::hint::black_box;

const RECORDS: usize = 1000;

fn bench_file_round_trip(c: &mut Criterion) {
    let dir = scratch_dir("bench-file").unwrap();
    let path = dir.path().join("records.bin");
    let bodies = record_bodies(RECORDS, 256, 3);
    let total: usize = bodies
        .iter()
        .map(|body| octet_bench::RECORD_HEADER_LEN + body.len())
        .sum();

    let mut group = c.benchmark_group("file_ops");
    group.throughput(Throughput::Bytes(total as u64));

    group.bench_function("write_records", |b| {
        b.iter(|| {
            let mut out = WriteableFile::create(&path).unwrap();
            for (id, body) in bodies.iter().enumerate() {
                write_record(&mut out, id as u64, body).unwrap();
            }
            out.close().unwrap();
        });
    });

    group.bench_function("read_records", |b| {
        b.iter(|| {
            let mut input = ReadableFile::open(&path).unwrap();
            let mut last = 0;
            while input.valid() {
                last = skip_record(&mut input).unwrap();
            }
            black_box(last)
        });
    });

    group.bench_function("read_primitives_i64", |b| {
        let words = dir.path().join("words.bin");
        let mut out = WriteableFile::create(&words).unwrap();
        for i in 0..8192i64 {
            out.write_i64(i).unwrap();
        }
        out.close().unwrap();
        b.iter(|| {
            let mut input = ReadableFile::open(&words).unwrap();
            let mut sum = 0i64;
            while input.valid() {
                sum = sum.wrapping_add(input.read_i64().unwrap());
            }
            black_box(sum)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_file_round_trip);
criterion_main!(benches);
