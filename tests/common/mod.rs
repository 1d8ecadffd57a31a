// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Edge stream synthesis shared by the integration tests.

#![allow(dead_code)]

use barcode_robot::{BarColor, BarToken, Edge, EdgeEvent, START_STOP, Thickness, pattern_for};

pub const PIN: u8 = 8;
pub const UNIT_US: u32 = 1000;

/// Bars of `*text*`, with a thin space between symbols.
pub fn framed_bars(text: &str) -> Vec<BarToken> {
    let mut patterns = vec![START_STOP];
    patterns.extend(text.chars().map(|c| pattern_for(c).expect("encodable character")));
    patterns.push(START_STOP);

    let mut bars = Vec::new();
    for (i, pattern) in patterns.iter().enumerate() {
        if i > 0 {
            bars.push(BarToken::LightThin);
        }
        bars.extend(BarToken::split(pattern));
    }
    bars
}

/// Edges produced by driving over `bars` at `unit_us` per thin bar.
///
/// Thick bars are three units wide. The last edge closes the final bar.
pub fn edges_for(bars: &[BarToken], start_us: u32, unit_us: u32) -> Vec<EdgeEvent> {
    let mut now = start_us;
    let mut edges = Vec::new();
    for token in bars {
        let edge = match token.color() {
            BarColor::Dark => Edge::Rising,
            BarColor::Light => Edge::Falling,
        };
        edges.push(EdgeEvent::new(PIN, edge, now));
        let units = match token.thickness() {
            Thickness::Thin => 1,
            Thickness::Thick => 3,
        };
        now = now.wrapping_add(units * unit_us);
    }
    let closing = match bars.last().map(|token| token.color()) {
        Some(BarColor::Light) => Edge::Rising,
        _ => Edge::Falling,
    };
    edges.push(EdgeEvent::new(PIN, closing, now));
    edges
}

/// Edges for `*text*` at the default test unit.
pub fn framed_edges(text: &str) -> Vec<EdgeEvent> {
    edges_for(&framed_bars(text), 0, UNIT_US)
}
