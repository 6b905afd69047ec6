//! Benchmarks for whole-capture decoding
//!
//! Tests decoding performance for:
//! - Single-field extraction from one frame
//! - Full decode passes over captures of increasing frame counts
//!
//! Platform: Cross-platform (synthetic in-memory captures)

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use hktm::schema::SACD_HKTM;
use hktm::{FrameSlicer, PACKET_SIZE, decode, extract};
use std::hint::black_box;

/// Build a synthetic capture with plausible field contents
fn synthetic_capture(frame_count: usize) -> Vec<u8> {
    let mut buffer = vec![0u8; PACKET_SIZE * frame_count];
    for i in 0..frame_count {
        let base = i * PACKET_SIZE;
        let epoch = 1_717_000_000u32 + i as u32;
        let raw_voltage = 33_000u32 + (i % 500) as u32;
        buffer[base + 598..base + 602].copy_from_slice(&epoch.to_be_bytes());
        buffer[base + 100..base + 104].copy_from_slice(&raw_voltage.to_le_bytes());
    }
    buffer
}

fn bench_field_extraction(c: &mut Criterion) {
    let buffer = synthetic_capture(1);
    let frame = FrameSlicer::new(&buffer).expect("one frame").next().expect("frame 0");

    let mut group = c.benchmark_group("field_extraction");

    group.bench_function("u32_be_timestamp", |b| {
        b.iter(|| black_box(extract::extract_raw(&frame, &SACD_HKTM.timestamp).unwrap()))
    });

    group.bench_function("u32_le_voltage_scaled", |b| {
        b.iter(|| black_box(extract::extract_scaled(&frame, &SACD_HKTM.voltage).unwrap()))
    });

    group.finish();
}

fn bench_capture_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("capture_decode");

    for frame_count in [1usize, 100, 1000] {
        let buffer = synthetic_capture(frame_count);
        group.bench_with_input(
            BenchmarkId::from_parameter(frame_count),
            &buffer,
            |b, buffer| b.iter(|| black_box(decode(buffer).unwrap())),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_field_extraction, bench_capture_decode);
criterion_main!(benches);
