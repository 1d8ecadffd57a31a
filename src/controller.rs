// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Scan controller state machine and command execution.
//!
//! This module implements the scanning side of the robot, managing:
//! - The `Idle` / `Scanning` state
//! - Bar and space timestamp bookkeeping for every sensor edge
//! - Scan command execution
//!
//! # Edge Bookkeeping
//!
//! A bar can only be measured once it has ended, so classification always
//! runs one bar behind the sensor:
//!
//! - **Rising edge** (dark starts): ends the light bar that began at the
//!   previous falling edge
//! - **Falling edge** (light starts): ends the dark bar that began at the
//!   previous rising edge
//!
//! Durations use wrapping arithmetic on the 32-bit microsecond timer.

use crate::command::ScanCommand;
use crate::config::DecoderConfig;
use crate::decoder::Decoder;
use crate::edge::{Edge, EdgeEvent};
use crate::error::DecodeError;

/// Scanner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanState {
    /// Edge events are ignored
    Idle,
    /// Edge events on the sensor pin feed the decoder
    Scanning,
}

/// Barcode scan controller.
///
/// # Examples
///
/// ```
/// use barcode_robot::{EdgeEvent, ScanController, ScanState};
///
/// let mut scanner = ScanController::new(8, Default::default());
/// assert_eq!(scanner.state(), ScanState::Idle);
///
/// scanner.start();
/// scanner.on_edge(EdgeEvent::rising(8, 100)).unwrap();
/// assert!(scanner.is_scanning());
/// ```
#[derive(Debug, Clone)]
pub struct ScanController {
    /// GPIO pin of the barcode sensor
    pin: u8,
    state: ScanState,
    decoder: Decoder,
    /// Timestamp of the last rising edge not yet consumed
    dark_started_at: Option<u32>,
    /// Timestamp of the last falling edge not yet consumed
    light_started_at: Option<u32>,
}

impl ScanController {
    /// Creates an idle controller listening to `pin`.
    pub const fn new(pin: u8, config: DecoderConfig) -> Self {
        Self {
            pin,
            state: ScanState::Idle,
            decoder: Decoder::new(config),
            dark_started_at: None,
            light_started_at: None,
        }
    }

    /// Current scan state.
    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn is_scanning(&self) -> bool {
        self.state == ScanState::Scanning
    }

    /// Decoder of the current (or last) scan, for diagnostics.
    pub fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    /// Characters decoded by the current (or last) scan.
    pub fn decoded(&self) -> &str {
        self.decoder.decoded()
    }

    /// Starts a fresh scan.
    ///
    /// Clears the symbol window, decoded output, reference width and edge
    /// timestamps, even when a scan is already running.
    pub fn start(&mut self) {
        self.decoder.reset();
        self.dark_started_at = None;
        self.light_started_at = None;
        self.state = ScanState::Scanning;
        info!("Scan started");
    }

    /// Stops scanning. Buffers are kept so the last output stays readable.
    pub fn stop(&mut self) {
        self.state = ScanState::Idle;
        info!("Scan stopped: {}", self.decoder.decoded());
    }

    /// Handles one sensor edge.
    ///
    /// Events are ignored while idle and for any pin other than the sensor
    /// pin.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(c))` - the bar ended by this edge decoded a character
    /// * `Ok(None)` - nothing decoded
    ///
    /// # Errors
    ///
    /// Propagates [`DecodeError`] from the decoder.
    pub fn on_edge(&mut self, event: EdgeEvent) -> Result<Option<char>, DecodeError> {
        if self.state != ScanState::Scanning || event.pin != self.pin {
            return Ok(None);
        }

        let now = event.timestamp_us;
        let started_at = match event.edge {
            Edge::Rising => {
                self.dark_started_at = Some(now);
                self.light_started_at.take()
            }
            Edge::Falling => {
                self.light_started_at = Some(now);
                self.dark_started_at.take()
            }
        };

        let Some(started_at) = started_at else {
            trace!("First {:?} edge at {} us", event.edge, now);
            return Ok(None);
        };

        let duration_us = now.wrapping_sub(started_at);
        self.decoder.on_bar(event.edge.ends(), duration_us)
    }

    /// Executes a scan command.
    pub fn execute_command(&mut self, command: ScanCommand) {
        match command {
            ScanCommand::Start => self.start(),
            ScanCommand::Stop => self.stop(),
            ScanCommand::Report => {
                let stats = self.decoder.stats();
                info!(
                    "Report: {:?}, decoded \"{}\", window {} ({})",
                    self.state,
                    self.decoder.decoded(),
                    self.decoder.window().raw_digits().as_str(),
                    self.decoder.window().letters().as_str()
                );
                info!(
                    "Bars {}, lookups {}, unrecognized {}",
                    stats.bars,
                    stats.lookups,
                    stats.unrecognized
                );
            }
            ScanCommand::Unknown => {
                info!("Unknown command received");
            }
        }
    }
}
