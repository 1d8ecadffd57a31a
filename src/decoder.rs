// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Bar-to-character decoder.
//!
//! Glues the timing classifier, the symbol window and the symbol table
//! together. The decoder owns all per-scan state, so several independent
//! decoders can run side by side (one per sensor, or one per test).
//!
//! # Flow
//!
//! ```text
//! (colour, duration) ─► calibrate on first dark bar
//!                    ─► classify thin / thick
//!                    ─► push token into the 27-token window
//!                    ─► on a full window: trim framing, look up, emit
//! ```

use crate::classifier::Calibration;
use crate::config::{DecoderConfig, OUTPUT_CAPACITY};
use crate::edge::BarColor;
use crate::error::DecodeError;
use crate::symbols;
use crate::window::{BarToken, SymbolWindow};

/// Counters describing what the decoder has seen since the last reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecoderStats {
    /// Bars that made it into the window
    pub bars: u32,
    /// Full windows compared against the symbol table
    pub lookups: u32,
    /// Characters appended to the decoded output
    pub decoded: u32,
    /// Full windows that matched nothing
    pub unrecognized: u32,
}

/// Barcode decoder state for one scan.
#[derive(Debug, Clone)]
pub struct Decoder {
    config: DecoderConfig,
    calibration: Calibration,
    window: SymbolWindow,
    output: heapless::String<OUTPUT_CAPACITY>,
    stats: DecoderStats,
}

impl Decoder {
    pub const fn new(config: DecoderConfig) -> Self {
        Self {
            config,
            calibration: Calibration::new(config.margin),
            window: SymbolWindow::new(),
            output: heapless::String::new(),
            stats: DecoderStats {
                bars: 0,
                lookups: 0,
                decoded: 0,
                unrecognized: 0,
            },
        }
    }

    pub fn config(&self) -> DecoderConfig {
        self.config
    }

    /// Reference unit width, once the first dark bar has been seen.
    pub fn reference_us(&self) -> Option<u32> {
        self.calibration.reference_us()
    }

    pub fn window(&self) -> &SymbolWindow {
        &self.window
    }

    /// Characters decoded so far, oldest first.
    pub fn decoded(&self) -> &str {
        self.output.as_str()
    }

    pub fn stats(&self) -> DecoderStats {
        self.stats
    }

    /// Clears window, output, calibration and counters.
    pub fn reset(&mut self) {
        self.calibration.reset();
        self.window.clear();
        self.output.clear();
        self.stats = DecoderStats::default();
    }

    /// Feeds one measured bar.
    ///
    /// Light bars seen before the first dark bar are part of the quiet zone
    /// and ignored. The first dark bar of a scan sets the reference width.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(c))` - the bar completed a window that decoded to `c`
    /// * `Ok(None)` - nothing decoded (window not primed, or no match)
    ///
    /// # Errors
    ///
    /// * [`DecodeError::InvalidCalibration`] - the reference would be zero
    /// * [`DecodeError::OutputFull`] - a character decoded but had no room
    pub fn on_bar(
        &mut self,
        color: BarColor,
        duration_us: u32,
    ) -> Result<Option<char>, DecodeError> {
        match color {
            BarColor::Dark if !self.calibration.is_calibrated() => {
                let reference_us = self.calibration.calibrate(duration_us)?;
                debug!("Calibrated: unit {} us, reference {} us", duration_us, reference_us);
            }
            BarColor::Light if self.window.is_empty() => {
                trace!("Quiet zone: {} us", duration_us);
                return Ok(None);
            }
            _ => {}
        }

        let thickness = self.calibration.classify(duration_us)?;
        self.push(BarToken::new(color, thickness))
    }

    /// Pushes an already classified token.
    ///
    /// Decodes when the push completes a window. Each completed window is
    /// looked up exactly once.
    pub fn push(&mut self, token: BarToken) -> Result<Option<char>, DecodeError> {
        self.stats.bars = self.stats.bars.wrapping_add(1);

        let Some(pattern) = self.window.push(token) else {
            return Ok(None);
        };
        self.stats.lookups = self.stats.lookups.wrapping_add(1);

        let Some(symbol) = symbols::lookup(&pattern, self.config.policy) else {
            self.stats.unrecognized = self.stats.unrecognized.wrapping_add(1);
            debug!("Unrecognized window: {}", pattern.as_str());
            return Ok(None);
        };

        if self.output.push(symbol.character).is_err() {
            warn!("Decoded output full, dropping {}", symbol.character);
            return Err(DecodeError::OutputFull);
        }
        self.stats.decoded = self.stats.decoded.wrapping_add(1);
        info!("Decoded: {}", symbol.character);
        Ok(Some(symbol.character))
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(DecoderConfig::default())
    }
}
