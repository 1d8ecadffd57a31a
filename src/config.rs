// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Hardware configuration, pin mappings and decoder tuning.
//!
//! This module defines:
//! - GPIO pin assignments for the sensors on the robot
//! - Symbol window geometry used by the barcode decoder
//! - Decoder tuning (`DecoderConfig`)
//!
//! # Pin Mapping Summary
//!
//! ## Sensors
//! - **Left Line Sensor**: GPIO 6
//! - **Right Line Sensor**: GPIO 7
//! - **Barcode Sensor**: GPIO 8 (digital output of the IR reflectance module)
//! - **IR Receiver**: GPIO 5 (with pull-up, scan commands from the remote)
//!
//! ## Indicators
//! - **Status LED**: GPIO 25 (onboard LED, lit while scanning)
//!
//! # Symbol Window
//!
//! A framed character (`*X*`) spans 29 bars. The decoder keeps the most
//! recent 27 of them: 16 expanded characters of start framing, the 15
//! character symbol, and the stop framing that is trimmed away (last 9).

/// GPIO pin number for status LED (onboard LED on RP2350)
pub const LED_PIN: u8 = 25;

/// GPIO pin number for IR receiver data output
pub const IR_RECEIVER_PIN: u8 = 5;

/// GPIO pin number for the left line sensor
pub const LEFT_LINE_SENSOR_PIN: u8 = 6;

/// GPIO pin number for the right line sensor
pub const RIGHT_LINE_SENSOR_PIN: u8 = 7;

/// GPIO pin number for the barcode reflectance sensor
pub const BARCODE_SENSOR_PIN: u8 = 8;

/// Raw bar tokens held by the symbol window before it is finalized
pub const WINDOW_TOKENS: usize = 27;

/// Expanded characters of start framing dropped before lookup
pub const LEADING_FRAME_BITS: usize = 16;

/// Expanded characters of stop framing dropped before lookup
pub const TRAILING_FRAME_BITS: usize = 9;

/// Width of one symbol pattern in the symbol table
pub const SYMBOL_BITS: usize = 15;

/// Longest possible expansion of a full window (every token thick)
pub const EXPANDED_CAPACITY: usize = WINDOW_TOKENS * 3;

/// Characters the decoded output can hold before a restart is needed
pub const OUTPUT_CAPACITY: usize = 64;

/// Calibration margin used on the robot (bars are tens of milliseconds wide)
pub const FIRMWARE_MARGIN_US: u32 = 20_000;

/// Period between decoded output reports in the firmware main loop
pub const REPORT_PERIOD_MS: u64 = 1000;

/// How the reference unit width is derived from the first dark bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationMargin {
    /// Reference = first dark bar + a constant number of microseconds
    Fixed(u32),
    /// Reference = first dark bar + `percent` of the first dark bar
    Proportional { percent: u32 },
}

impl CalibrationMargin {
    /// Computes the reference width for a first dark bar of `unit_us`.
    ///
    /// Saturates rather than overflowing for absurdly long bars.
    pub const fn reference_for(&self, unit_us: u32) -> u32 {
        match *self {
            CalibrationMargin::Fixed(margin_us) => unit_us.saturating_add(margin_us),
            CalibrationMargin::Proportional { percent } => {
                let extra = (unit_us as u64 * percent as u64) / 100;
                let total = unit_us as u64 + extra;
                if total > u32::MAX as u64 {
                    u32::MAX
                } else {
                    total as u32
                }
            }
        }
    }
}

/// How a finalized window is compared with the symbol table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MatchPolicy {
    /// First table pattern found anywhere inside the trimmed window
    Substring,
    /// First table pattern equal to the leading `SYMBOL_BITS` characters
    Exact,
}

/// Decoder tuning.
///
/// # Examples
///
/// ```
/// use barcode_robot::{CalibrationMargin, DecoderConfig, MatchPolicy};
///
/// let config = DecoderConfig::new()
///     .with_margin(CalibrationMargin::Fixed(500))
///     .with_policy(MatchPolicy::Exact);
/// assert_eq!(config.policy, MatchPolicy::Exact);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecoderConfig {
    /// Margin added to the first dark bar to form the reference width
    pub margin: CalibrationMargin,
    /// Lookup policy for finalized windows
    pub policy: MatchPolicy,
}

impl DecoderConfig {
    /// Firmware defaults: 20ms fixed margin, substring lookup.
    pub const fn new() -> Self {
        Self {
            margin: CalibrationMargin::Fixed(FIRMWARE_MARGIN_US),
            policy: MatchPolicy::Substring,
        }
    }

    pub const fn with_margin(mut self, margin: CalibrationMargin) -> Self {
        self.margin = margin;
        self
    }

    pub const fn with_policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_margin_adds_constant() {
        assert_eq!(CalibrationMargin::Fixed(500).reference_for(1000), 1500);
        assert_eq!(CalibrationMargin::Fixed(20_000).reference_for(0), 20_000);
    }

    #[test]
    fn proportional_margin_scales_with_unit() {
        let margin = CalibrationMargin::Proportional { percent: 50 };
        assert_eq!(margin.reference_for(1000), 1500);
        assert_eq!(margin.reference_for(30_000), 45_000);
        assert_eq!(margin.reference_for(0), 0);
    }

    #[test]
    fn margin_saturates() {
        assert_eq!(CalibrationMargin::Fixed(10).reference_for(u32::MAX), u32::MAX);
        let margin = CalibrationMargin::Proportional { percent: 100 };
        assert_eq!(margin.reference_for(u32::MAX), u32::MAX);
    }

    #[test]
    fn framing_leaves_room_for_a_symbol() {
        // *X* framing: 15 + 1 start, 15 symbol, 1 + 13 stop
        assert_eq!(LEADING_FRAME_BITS, SYMBOL_BITS + 1);
        assert!(EXPANDED_CAPACITY >= LEADING_FRAME_BITS + SYMBOL_BITS + TRAILING_FRAME_BITS);
    }

    #[test]
    fn default_is_firmware_tuning() {
        let config = DecoderConfig::default();
        assert_eq!(config.margin, CalibrationMargin::Fixed(FIRMWARE_MARGIN_US));
        assert_eq!(config.policy, MatchPolicy::Substring);
    }
}
