// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! RP2350A Barcode Scanning Robot with IR Remote
//!
//! This firmware reads Code 39 barcodes with a reflectance sensor on a
//! Waveshare Pico2Go (RP2350-Plus) using the Embassy async runtime. Scans
//! are started and stopped from an NEC IR remote.
//!
//! # Hardware Configuration
//! - **Microcontroller**: RP2350A (ARM Cortex-M33)
//! - **Barcode Sensor**: reflectance sensor on GPIO 8 (HIGH over black)
//! - **Line Sensors**: left on GPIO 6, right on GPIO 7 (HIGH over black)
//! - **IR Receiver**: NEC protocol decoder on GPIO 5
//! - **Status LED**: GPIO 25, lit while scanning
//!
//! # Tasks
//! - `barcode_edges`: timestamps every barcode sensor edge and feeds the
//!   shared scanner
//! - `line_edges`: tracks the line sensors and reports dead ends
//! - `ir_commands`: decodes IR frames into scan commands
//! - `main`: LED and periodic decoded-output report
//!
//! # IR Remote Commands
//! - `0x18`: Start scan (clears previous output)
//! - `0x1C`: Stop scan
//! - `0x09`: Report decoded output and symbol window
//!
//! # Build
//! ```bash
//! cargo build --release --features rp2350 --target thumbv8m.main-none-eabihf
//! ```

#![no_std]
#![no_main]

use barcode_robot::config::{
    BARCODE_SENSOR_PIN, FIRMWARE_MARGIN_US, LEFT_LINE_SENSOR_PIN, REPORT_PERIOD_MS,
    RIGHT_LINE_SENSOR_PIN,
};
use barcode_robot::{
    CalibrationMargin, DecoderConfig, Edge, EdgeEvent, IrReceiver, LineSensors, LineStatus,
    PulseSource, ScanCommand, SharedScanner,
};
use defmt::*;
use embassy_executor::Spawner;
use embassy_futures::select::{Either, select};
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_time::{Duration, Instant, Timer};
use {defmt_rtt as _, panic_probe as _};

/// Boot image definition required by the RP2350 boot ROM
#[unsafe(link_section = ".start_block")]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

/// Program metadata for picotool info command
///
/// This information is embedded in the binary and can be read by picotool
/// to display program information when querying the firmware.
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"Barcode Robot"),
    embassy_rp::binary_info::rp_program_description!(c"RP2350A Code 39 barcode scanner with IR remote"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

/// Scanner shared by the edge task and the main loop
static SCANNER: SharedScanner = SharedScanner::new(
    BARCODE_SENSOR_PIN,
    DecoderConfig::new().with_margin(CalibrationMargin::Fixed(FIRMWARE_MARGIN_US)),
);

/// Microsecond timestamp in the 32-bit timer domain the decoder expects
fn now_us() -> u32 {
    Instant::now().as_micros() as u32
}

/// Builds the event for an edge that just happened on `pin`
fn edge_event(pin: u8, input: &Input<'static>) -> EdgeEvent {
    let edge = if input.is_high() {
        Edge::Rising
    } else {
        Edge::Falling
    };
    EdgeEvent::new(pin, edge, now_us())
}

/// IR receiver pin polled for NEC pulse widths
struct PinPulses<'a> {
    pin: &'a Input<'static>,
}

impl PulseSource for PinPulses<'_> {
    fn wait_for_level(&mut self, level: barcode_robot::Level, timeout_us: u64) -> Option<u64> {
        let start = Instant::now();
        let timeout = Duration::from_micros(timeout_us);

        loop {
            let current_level = if self.pin.is_high() {
                barcode_robot::Level::High
            } else {
                barcode_robot::Level::Low
            };
            if current_level == level {
                return Some(start.elapsed().as_micros());
            }
            if start.elapsed() > timeout {
                return None;
            }
        }
    }
}

/// Feeds every barcode sensor edge to the scanner
#[embassy_executor::task]
async fn barcode_edges(mut sensor: Input<'static>) {
    loop {
        sensor.wait_for_any_edge().await;
        let event = edge_event(BARCODE_SENSOR_PIN, &sensor);
        match SCANNER.on_edge(event) {
            Ok(Some(c)) => info!("Decoded '{}'", c),
            Ok(None) => {}
            Err(e) => warn!("Decode error: {}", e),
        }
    }
}

/// Tracks both line sensors and logs status changes
#[embassy_executor::task]
async fn line_edges(mut left: Input<'static>, mut right: Input<'static>) {
    let mut line = LineSensors::new(LEFT_LINE_SENSOR_PIN, RIGHT_LINE_SENSOR_PIN);
    let mut last = line.status();

    loop {
        let changed = select(left.wait_for_any_edge(), right.wait_for_any_edge()).await;
        let event = match changed {
            Either::First(()) => edge_event(LEFT_LINE_SENSOR_PIN, &left),
            Either::Second(()) => edge_event(RIGHT_LINE_SENSOR_PIN, &right),
        };
        line.on_edge(event);

        let status = line.status();
        if status != last {
            match status {
                LineStatus::DeadEnd => info!("Dead end reached"),
                _ => debug!("Line: {:?}", status),
            }
            last = status;
        }
    }
}

/// Decodes IR frames into scan commands
#[embassy_executor::task]
async fn ir_commands(mut ir_pin: Input<'static>) {
    loop {
        // Frames start with the lead pulse pulling the output low
        ir_pin.wait_for_falling_edge().await;

        let mut receiver = IrReceiver::new(PinPulses { pin: &ir_pin });
        let Some(code) = receiver.read_command() else {
            continue;
        };

        let command = ScanCommand::from_ir_code(code);
        if command == ScanCommand::Unknown {
            info!("Unknown key: 0x{:02X}", code);
        }
        SCANNER.execute_command(command);
    }
}

/// Main scanner task
///
/// Initializes the sensor and receiver inputs, spawns the edge and IR
/// tasks, then mirrors the scan state on the LED and reports newly
/// decoded output.
///
/// # Safety
/// Never returns. Runs indefinitely until power loss or reset.
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("RP2350A Barcode Robot Starting!");
    let p = embassy_rp::init(Default::default());

    // Status LED on GPIO 25
    let mut led = Output::new(p.PIN_25, Level::Low);

    // IR receiver on GPIO 5 with pull-up
    let ir_pin = Input::new(p.PIN_5, Pull::Up);

    // Line sensors on GPIO 6 / 7, barcode sensor on GPIO 8
    let left = Input::new(p.PIN_6, Pull::None);
    let right = Input::new(p.PIN_7, Pull::None);
    let sensor = Input::new(p.PIN_8, Pull::None);

    spawner.spawn(unwrap!(barcode_edges(sensor)));
    spawner.spawn(unwrap!(line_edges(left, right)));
    spawner.spawn(unwrap!(ir_commands(ir_pin)));

    info!("Scanner ready! Waiting for IR commands...");

    let mut reported = 0;
    loop {
        if SCANNER.is_scanning() {
            led.set_high();
        } else {
            led.set_low();
        }

        let decoded = SCANNER.decoded();
        if decoded.len() != reported {
            info!("Decoded so far: {}", decoded.as_str());
            reported = decoded.len();
        }

        Timer::after_millis(REPORT_PERIOD_MS).await;
    }
}
