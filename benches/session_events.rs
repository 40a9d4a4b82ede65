// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for decoder event handling.
//!
//! Measures the performance of:
//! - Position updates through the coordinator (the hottest event)
//! - Raw callback normalization

use criterion::{criterion_group, criterion_main, Criterion};
use playback_session::config::PlayerOptions;
use playback_session::session::{self, adapter, DecoderEvent, RawDecoderEvent};
use serde_json::json;
use std::hint::black_box;

fn bench_position_updates(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_events");

    group.bench_function("position_updates_1000", |b| {
        let (mut coordinator, _rx) = session::create_session(PlayerOptions::with_source("a"));
        coordinator.on_decoder_event(DecoderEvent::Prepared {
            duration_ms: 1_000_000,
        });
        coordinator.on_decoder_event(DecoderEvent::RenderingStart);
        b.iter(|| {
            for position_ms in (0..1000u64).map(|i| i * 250) {
                coordinator.on_decoder_event(DecoderEvent::PositionUpdate { position_ms });
            }
            black_box(coordinator.snapshot());
        });
    });

    group.finish();
}

fn bench_adapt(c: &mut Criterion) {
    let mut group = c.benchmark_group("decoder_adapter");
    let raw = RawDecoderEvent::new(
        adapter::names::LOADING_PROGRESS,
        json!({ "percent": 42, "netSpeed": 812.5 }),
    );

    group.bench_function("adapt_loading_progress", |b| {
        b.iter(|| black_box(adapter::adapt(black_box(&raw))));
    });

    group.finish();
}

criterion_group!(benches, bench_position_updates, bench_adapt);
criterion_main!(benches);
