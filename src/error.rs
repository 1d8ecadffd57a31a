// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Decoder error conditions.

use core::fmt;

/// Errors surfaced by the barcode decode path.
///
/// Unrecognized patterns are not errors: they are dropped and counted in
/// [`DecoderStats`](crate::DecoderStats).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// The reference unit width would be zero, so bars cannot be classified
    InvalidCalibration,
    /// The decoded output is full; the character was dropped
    OutputFull,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::InvalidCalibration => f.write_str("reference unit width is zero"),
            DecodeError::OutputFull => f.write_str("decoded output is full"),
        }
    }
}
