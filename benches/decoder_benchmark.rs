//! Performance benchmarks for SSE decoding
//!
//! Measures frame decoding and event parsing over different chunk sizes.
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use chatline::sse::{FrameDecoder, SseParser};

/// Generate a stream body of `deltas` delta events and a final done event
fn generate_stream_body(deltas: usize) -> Vec<u8> {
    let mut body = String::new();
    for i in 0..deltas {
        body.push_str(&format!(
            "event: delta\ndata: {{\"content\": \"token {} with some text, 世界\"}}\n\n",
            i
        ));
    }
    body.push_str("event: done\ndata: [DONE]\n\n");
    body.into_bytes()
}

/// Benchmark frame splitting with the body arriving in fixed-size chunks
fn bench_frame_decoder(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_decoder");
    let body = generate_stream_body(500);
    group.throughput(Throughput::Bytes(body.len() as u64));

    for chunk_size in [7, 64, 1024, body.len()].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_byte_chunks", chunk_size)),
            chunk_size,
            |b, &chunk_size| {
                b.iter(|| {
                    let mut decoder = FrameDecoder::new();
                    let mut frames = 0;
                    for chunk in body.chunks(chunk_size) {
                        frames += decoder.feed(black_box(chunk)).len();
                    }
                    black_box(frames)
                });
            },
        );
    }

    group.finish();
}

/// Benchmark decoding plus event parsing for different stream lengths
fn bench_sse_parser(c: &mut Criterion) {
    let mut group = c.benchmark_group("sse_parser");

    for deltas in [10, 100, 1000].iter() {
        let body = generate_stream_body(*deltas);
        group.throughput(Throughput::Bytes(body.len() as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_deltas", deltas)),
            &body,
            |b, body| {
                b.iter(|| {
                    let mut parser = SseParser::new();
                    let mut events = 0;
                    for chunk in body.chunks(256) {
                        events += parser.feed(black_box(chunk)).len();
                    }
                    black_box(events)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_frame_decoder, bench_sse_parser);
criterion_main!(benches);
