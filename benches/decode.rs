// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

use std::hint::black_box;

use barcode_robot::{
    BarColor, BarToken, CalibrationMargin, DecoderConfig, Edge, EdgeEvent, MatchPolicy,
    START_STOP, ScanController, Thickness, lookup, pattern_for,
};
use criterion::{Criterion, criterion_group, criterion_main};

const PIN: u8 = 8;
const UNIT_US: u32 = 1000;

fn edges(text: &str) -> Vec<EdgeEvent> {
    let mut patterns = vec![START_STOP];
    patterns.extend(text.chars().filter_map(pattern_for));
    patterns.push(START_STOP);

    let mut now = 0u32;
    let mut edges = Vec::new();
    for (i, pattern) in patterns.iter().enumerate() {
        let gap = (i > 0).then_some(BarToken::LightThin);
        for token in gap.into_iter().chain(BarToken::split(pattern)) {
            let edge = match token.color() {
                BarColor::Dark => Edge::Rising,
                BarColor::Light => Edge::Falling,
            };
            edges.push(EdgeEvent::new(PIN, edge, now));
            now += match token.thickness() {
                Thickness::Thin => UNIT_US,
                Thickness::Thick => 3 * UNIT_US,
            };
        }
    }
    edges.push(EdgeEvent::falling(PIN, now));
    edges
}

fn bench_decode(c: &mut Criterion) {
    let stream = edges("CODE39");

    for (name, policy) in [("substring", MatchPolicy::Substring), ("exact", MatchPolicy::Exact)] {
        let config = DecoderConfig::new()
            .with_margin(CalibrationMargin::Fixed(UNIT_US / 2))
            .with_policy(policy);
        c.bench_function(&format!("scan_code39_{name}"), |b| {
            b.iter(|| {
                let mut scanner = ScanController::new(PIN, config);
                scanner.start();
                for edge in &stream {
                    let _ = black_box(scanner.on_edge(*edge));
                }
                scanner.decoder().stats()
            })
        });
    }

    // worst case: no entry matches, every pattern is compared
    c.bench_function("lookup_miss", |b| {
        b.iter(|| lookup(black_box("000000000000000000000"), MatchPolicy::Substring))
    });
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
