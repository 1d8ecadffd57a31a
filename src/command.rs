// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Scan command definitions and IR remote control mappings.
//!
//! The barcode scanner is started and stopped from a standard NEC IR
//! remote. Default button mappings:
//!
//! ```text
//!   [  ^  ]  0x18 - Start scan
//!   [  ■  ]  0x1C - Stop scan
//!   [  R  ]  0x09 - Report decoded output and window
//! ```
//!
//! Every other button maps to [`ScanCommand::Unknown`].

/// Scanner control commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanCommand {
    /// Clear all scan state and start decoding edges
    Start,
    /// Stop decoding; decoded output stays readable
    Stop,
    /// Log the decoded output and the raw symbol window
    Report,
    /// Unknown or unsupported command code
    Unknown,
}

impl ScanCommand {
    /// Converts an IR remote button code to a scan command.
    ///
    /// # Arguments
    ///
    /// * `code` - 8-bit NEC IR protocol command byte
    ///
    /// # Examples
    ///
    /// ```
    /// use barcode_robot::ScanCommand;
    ///
    /// assert_eq!(ScanCommand::from_ir_code(0x18), ScanCommand::Start);
    /// assert_eq!(ScanCommand::from_ir_code(0xFF), ScanCommand::Unknown);
    /// ```
    pub fn from_ir_code(code: u8) -> Self {
        match code {
            0x18 => ScanCommand::Start,
            0x1C => ScanCommand::Stop,
            0x09 => ScanCommand::Report,
            _ => ScanCommand::Unknown,
        }
    }

    /// Returns the IR code for this command, `None` for `Unknown`.
    pub fn to_ir_code(&self) -> Option<u8> {
        match self {
            ScanCommand::Start => Some(0x18),
            ScanCommand::Stop => Some(0x1C),
            ScanCommand::Report => Some(0x09),
            ScanCommand::Unknown => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ir_codes_map_both_ways() {
        for command in [ScanCommand::Start, ScanCommand::Stop, ScanCommand::Report] {
            let code = command.to_ir_code().unwrap();
            assert_eq!(ScanCommand::from_ir_code(code), command);
        }
        assert_eq!(ScanCommand::Unknown.to_ir_code(), None);
    }

    #[test]
    fn motion_buttons_are_unknown() {
        for code in [0x52, 0x08, 0x5A, 0x15, 0x07] {
            assert_eq!(ScanCommand::from_ir_code(code), ScanCommand::Unknown);
        }
    }
}
