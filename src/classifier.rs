// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Bar timing classifier.
//!
//! Every bar is either one unit (thin) or three units (thick) wide. The
//! unit is not known in advance because it depends on how fast the robot
//! crosses the label, so it is captured from the first dark bar of each
//! scan. Start/stop framing always begins with a thin dark bar.
//!
//! # Threshold
//!
//! A bar is thick when `duration / reference > 0` in integer arithmetic,
//! i.e. when it is at least as long as the reference. The reference is the
//! first bar plus a margin, so a one-unit bar stays below it and a
//! three-unit bar clears it as long as the margin is under two units.

use crate::config::CalibrationMargin;
use crate::error::DecodeError;

/// Width class of a single bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Thickness {
    /// One unit wide
    Thin,
    /// Three units wide
    Thick,
}

/// Classifies a bar duration against the reference width.
///
/// # Errors
///
/// [`DecodeError::InvalidCalibration`] when `reference_us` is zero.
///
/// # Examples
///
/// ```
/// use barcode_robot::{classify, Thickness};
///
/// assert_eq!(classify(1000, 1500), Ok(Thickness::Thin));
/// assert_eq!(classify(3000, 1500), Ok(Thickness::Thick));
/// ```
pub fn classify(duration_us: u32, reference_us: u32) -> Result<Thickness, DecodeError> {
    if reference_us == 0 {
        return Err(DecodeError::InvalidCalibration);
    }

    if duration_us / reference_us > 0 {
        Ok(Thickness::Thick)
    } else {
        Ok(Thickness::Thin)
    }
}

/// Reference unit width for the current scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calibration {
    margin: CalibrationMargin,
    reference_us: Option<u32>,
}

impl Calibration {
    /// Creates an uncalibrated reference.
    pub const fn new(margin: CalibrationMargin) -> Self {
        Self {
            margin,
            reference_us: None,
        }
    }

    /// Returns the reference width, if the scan has seen its first dark bar.
    pub fn reference_us(&self) -> Option<u32> {
        self.reference_us
    }

    pub fn is_calibrated(&self) -> bool {
        self.reference_us.is_some()
    }

    /// Captures the reference from the first dark bar of a scan.
    ///
    /// # Errors
    ///
    /// [`DecodeError::InvalidCalibration`] when the bar and margin add up to
    /// zero; the reference stays unset so the next dark bar can retry.
    pub fn calibrate(&mut self, unit_us: u32) -> Result<u32, DecodeError> {
        let reference_us = self.margin.reference_for(unit_us);
        if reference_us == 0 {
            return Err(DecodeError::InvalidCalibration);
        }
        self.reference_us = Some(reference_us);
        Ok(reference_us)
    }

    /// Classifies a bar against the captured reference.
    ///
    /// # Errors
    ///
    /// [`DecodeError::InvalidCalibration`] when no reference was captured.
    pub fn classify(&self, duration_us: u32) -> Result<Thickness, DecodeError> {
        classify(duration_us, self.reference_us.unwrap_or(0))
    }

    /// Forgets the reference; the next dark bar recalibrates.
    pub fn reset(&mut self) {
        self.reference_us = None;
    }
}
