// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! End-to-end decoding of synthesized sensor edge streams.

mod common;

use barcode_robot::symbols::{SYMBOLS, candidates};
use barcode_robot::{
    CalibrationMargin, DecoderConfig, EdgeEvent, MatchPolicy, Orientation, ScanCommand,
    ScanController, SymbolWindow,
};
use common::{PIN, UNIT_US, edges_for, framed_bars, framed_edges};

fn start_scanner(policy: MatchPolicy) -> ScanController {
    let config = DecoderConfig::new()
        .with_margin(CalibrationMargin::Fixed(UNIT_US / 2))
        .with_policy(policy);
    let mut scanner = ScanController::new(PIN, config);
    scanner.execute_command(ScanCommand::Start);
    scanner
}

fn run(scanner: &mut ScanController, edges: &[EdgeEvent]) -> String {
    edges
        .iter()
        .filter_map(|edge| scanner.on_edge(*edge).expect("decode error"))
        .collect()
}

#[test]
fn framed_a_decodes_once() {
    let mut scanner = start_scanner(MatchPolicy::Substring);
    assert_eq!(run(&mut scanner, &framed_edges("A")), "A");
    assert_eq!(scanner.decoded(), "A");

    // 29 bars: one lookup each for tokens 27, 28 and 29
    let stats = scanner.decoder().stats();
    assert_eq!(stats.bars, 29);
    assert_eq!(stats.lookups, 3);
    assert_eq!(stats.decoded, 1);
    assert_eq!(stats.unrecognized, 2);
}

#[test]
fn firmware_margin_handles_slow_scans() {
    // 10 ms per unit: reference is 30 ms, thick bars land exactly on it
    let mut scanner = ScanController::new(PIN, DecoderConfig::default());
    scanner.start();
    let edges = edges_for(&framed_bars("A"), 0, 10_000);
    assert_eq!(run(&mut scanner, &edges), "A");
    assert_eq!(scanner.decoder().reference_us(), Some(30_000));
}

#[test]
fn proportional_margin_tracks_scan_speed() {
    let config = DecoderConfig::new()
        .with_margin(CalibrationMargin::Proportional { percent: 50 })
        .with_policy(MatchPolicy::Exact);
    for unit_us in [400, 1000, 7000] {
        let mut scanner = ScanController::new(PIN, config);
        scanner.start();
        let edges = edges_for(&framed_bars("R"), 1_000_000, unit_us);
        assert_eq!(run(&mut scanner, &edges), "R", "unit {unit_us} us");
    }
}

#[test]
fn quiet_zone_before_first_bar_is_ignored() {
    let mut scanner = start_scanner(MatchPolicy::Substring);
    let mut edges = vec![EdgeEvent::falling(PIN, 0)];
    edges.extend(edges_for(&framed_bars("A"), 250_000, UNIT_US));
    assert_eq!(run(&mut scanner, &edges), "A");
    assert_eq!(scanner.decoder().stats().bars, 29);
}

#[test]
fn exact_policy_decodes_every_symbol() {
    for symbol in SYMBOLS
        .iter()
        .filter(|symbol| symbol.orientation == Orientation::Forward)
    {
        let mut scanner = start_scanner(MatchPolicy::Exact);
        let text = symbol.character.to_string();
        assert_eq!(run(&mut scanner, &framed_edges(&text)), text);
    }
}

#[test]
fn substring_policy_prefers_earlier_table_entries() {
    // the window for L also contains the pattern of H, which comes first
    let mut scanner = start_scanner(MatchPolicy::Substring);
    assert_eq!(run(&mut scanner, &framed_edges("L")), "HH");

    let mut scanner = start_scanner(MatchPolicy::Exact);
    assert_eq!(run(&mut scanner, &framed_edges("L")), "L");
}

#[test]
fn rolling_window_decodes_interior_alignments() {
    // the window slides one bar at a time, so alignments straddling two
    // symbols are looked up as well
    let mut scanner = start_scanner(MatchPolicy::Exact);
    assert_eq!(run(&mut scanner, &framed_edges("AB")), "AXB");

    let stats = scanner.decoder().stats();
    assert_eq!(stats.lookups, 13);
    assert_eq!(stats.decoded, 3);
    assert_eq!(stats.unrecognized, 10);
}

#[test]
fn stop_frame_never_decodes_as_p() {
    // the stop frame matches the reversed P pattern bit for bit
    let mut scanner = start_scanner(MatchPolicy::Substring);
    let decoded = run(&mut scanner, &framed_edges("AA"));
    assert!(!decoded.contains('P'), "{decoded}");
    assert_eq!(decoded, "A77MMAAA");

    let mut scanner = start_scanner(MatchPolicy::Exact);
    assert_eq!(run(&mut scanner, &framed_edges("AA")), "A7A");
}

#[test]
fn reversed_scan_is_ambiguous() {
    let mut bars = framed_bars("A");
    bars.reverse();

    let mut window = SymbolWindow::new();
    let pattern = bars
        .iter()
        .find_map(|token| window.push(*token))
        .expect("window completes");
    assert_eq!(pattern.as_str(), "111010001010111010");
    assert_eq!(candidates(&pattern, MatchPolicy::Substring), ['1', 'A']);

    let mut scanner = start_scanner(MatchPolicy::Substring);
    let edges = edges_for(&bars, 0, UNIT_US);
    assert_eq!(run(&mut scanner, &edges), "1");
}

#[test]
fn restart_discards_previous_scan() {
    let mut scanner = start_scanner(MatchPolicy::Exact);
    run(&mut scanner, &framed_edges("Z"));
    assert_eq!(scanner.decoded(), "Z");

    scanner.execute_command(ScanCommand::Stop);
    scanner.execute_command(ScanCommand::Start);
    let edges = edges_for(&framed_bars("7"), 5_000_000, UNIT_US);
    assert_eq!(run(&mut scanner, &edges), "7");
    assert_eq!(scanner.decoded(), "7");
}
