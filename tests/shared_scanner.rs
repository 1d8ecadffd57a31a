// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

mod common;

use std::thread;

use barcode_robot::{CalibrationMargin, DecoderConfig, ScanCommand, SharedScanner};
use common::{PIN, UNIT_US, framed_edges};

static SCANNER: SharedScanner = SharedScanner::new(
    PIN,
    DecoderConfig::new().with_margin(CalibrationMargin::Fixed(UNIT_US / 2)),
);

#[test]
fn edge_thread_and_reader_share_one_scanner() {
    SCANNER.execute_command(ScanCommand::Start);

    let feeder = thread::spawn(|| {
        let mut decoded = Vec::new();
        for edge in framed_edges("A") {
            if let Some(c) = SCANNER.on_edge(edge).expect("decode error") {
                decoded.push(c);
            }
        }
        decoded
    });

    // the reader only ever sees a prefix of the final output
    while !feeder.is_finished() {
        let snapshot = SCANNER.decoded();
        assert!("A".starts_with(snapshot.as_str()));
    }

    assert_eq!(feeder.join().expect("feeder panicked"), ['A']);
    assert_eq!(SCANNER.decoded().as_str(), "A");
    assert_eq!(SCANNER.stats().decoded, 1);
    // the last 26 bars stay in the window
    assert_eq!(
        SCANNER.window_raw().as_str(),
        "211121112121112121222121112122212111211121"
    );

    SCANNER.execute_command(ScanCommand::Stop);
    assert!(!SCANNER.is_scanning());
    assert_eq!(SCANNER.decoded().as_str(), "A");
}
