//! Criterion benchmarks for the segment codec.
//!
//! The codec sits on the `log()` hot path of every embedding application, so
//! encode latency matters more than decode (decoding happens server-side).
//!
//! Run with:
//! ```bash
//! cargo bench --package devtools-core --bench segment_codec
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use devtools_core::{decode_segments, encode_segments, Segment, SegmentStyle};

// ── Fixtures ──────────────────────────────────────────────────────────────────

/// Builds a payload resembling `lines` printed lines of mixed styled output.
fn make_segments(lines: usize) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(lines * 4);
    for i in 0..lines {
        segments.push(Segment::plain(format!("event {i}: ")));
        segments.push(Segment::styled(
            "ok",
            SegmentStyle::with_color("green"),
        ));
        segments.push(Segment::plain(" latency=1.3ms"));
        segments.push(Segment::line_break());
    }
    segments
}

// ── Benchmarks ────────────────────────────────────────────────────────────────

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_segments");
    for lines in [1usize, 10, 100] {
        let segments = make_segments(lines);
        group.bench_with_input(BenchmarkId::from_parameter(lines), &segments, |b, s| {
            b.iter(|| encode_segments(black_box(s)).unwrap());
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_segments");
    for lines in [1usize, 10, 100] {
        let encoded = encode_segments(&make_segments(lines)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(lines), &encoded, |b, e| {
            b.iter(|| decode_segments(black_box(e)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
