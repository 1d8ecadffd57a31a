// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Scan controller shared between the edge handler and the main loop.
//!
//! The edge handler is the only writer of decoder state; the main loop
//! reads the decoded output and the scan flag and delivers commands. Every
//! access runs inside a critical section, so the handler can never observe
//! a half-applied command and the main loop never reads a half-appended
//! output.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::command::ScanCommand;
use crate::config::{DecoderConfig, EXPANDED_CAPACITY, OUTPUT_CAPACITY};
use crate::controller::{ScanController, ScanState};
use crate::decoder::DecoderStats;
use crate::edge::EdgeEvent;
use crate::error::DecodeError;

/// A [`ScanController`] behind a critical-section mutex.
///
/// # Examples
///
/// ```
/// use barcode_robot::{DecoderConfig, ScanCommand, SharedScanner};
///
/// static SCANNER: SharedScanner = SharedScanner::new(8, DecoderConfig::new());
///
/// SCANNER.execute_command(ScanCommand::Start);
/// assert!(SCANNER.is_scanning());
/// ```
pub struct SharedScanner {
    inner: Mutex<RefCell<ScanController>>,
}

impl SharedScanner {
    /// Creates an idle scanner listening to `pin`.
    ///
    /// `const` so it can initialise a `static`.
    pub const fn new(pin: u8, config: DecoderConfig) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(ScanController::new(pin, config))),
        }
    }

    /// Runs `f` with exclusive access to the controller.
    pub fn with<R>(&self, f: impl FnOnce(&mut ScanController) -> R) -> R {
        critical_section::with(|cs| f(&mut self.inner.borrow(cs).borrow_mut()))
    }

    /// Feeds one sensor edge, see [`ScanController::on_edge`].
    ///
    /// # Returns
    ///
    /// * `Ok(Some(c))` - the edge completed a bar that decoded to `c`
    /// * `Ok(None)` - nothing decoded, or the scanner is idle
    ///
    /// # Errors
    ///
    /// Propagates [`DecodeError`] from the decoder.
    pub fn on_edge(&self, event: EdgeEvent) -> Result<Option<char>, DecodeError> {
        self.with(|scanner| scanner.on_edge(event))
    }

    /// Applies a scan command from the remote.
    pub fn execute_command(&self, command: ScanCommand) {
        self.with(|scanner| scanner.execute_command(command))
    }

    /// Current scan state.
    pub fn state(&self) -> ScanState {
        self.with(|scanner| scanner.state())
    }

    /// `true` while edges are being decoded.
    pub fn is_scanning(&self) -> bool {
        self.with(|scanner| scanner.is_scanning())
    }

    /// Copy of the decoded output.
    pub fn decoded(&self) -> heapless::String<OUTPUT_CAPACITY> {
        self.with(|scanner| {
            let mut copy = heapless::String::new();
            // same capacity as the decoder's own buffer
            copy.push_str(scanner.decoded()).ok();
            copy
        })
    }

    /// Copy of the raw symbol window, for diagnostics.
    pub fn window_raw(&self) -> heapless::String<EXPANDED_CAPACITY> {
        self.with(|scanner| scanner.decoder().window().raw_digits())
    }

    /// Decoder counters since the last scan start.
    pub fn stats(&self) -> DecoderStats {
        self.with(|scanner| scanner.decoder().stats())
    }
}
