// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! NEC IR protocol decoder for the scan command remote.
//!
//! # NEC Protocol Specification
//!
//! The NEC protocol uses pulse distance encoding with the following timing:
//!
//! - **Lead Pulse**: 9ms LOW
//! - **Space**: 4.5ms HIGH
//! - **Logical '0'**: 560µs LOW + 560µs HIGH
//! - **Logical '1'**: 560µs LOW + 1.69ms HIGH
//! - **Frame Format**: 8-bit address, 8-bit inverse address, 8-bit command, 8-bit inverse command
//!
//! # Validation
//!
//! The decoder validates:
//! - Lead pulse timing (8-10ms)
//! - Space timing (3.5-5ms)
//! - Bit timing (200-2500µs)
//! - Address/inverse checksum
//! - Command/inverse checksum
//!
//! # Hardware Seam
//!
//! Pulse widths come from a [`PulseSource`]. The firmware implements it by
//! polling the receiver pin; tests replay recorded frames.

/// Receiver output level. The module pulls LOW while IR is detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

/// Something that can measure how long the receiver takes to reach a level.
pub trait PulseSource {
    /// Waits until the receiver output reaches `level`.
    ///
    /// # Returns
    ///
    /// * `Some(duration)` - microseconds elapsed when the level was reached
    /// * `None` - `timeout_us` expired first
    fn wait_for_level(&mut self, level: Level, timeout_us: u64) -> Option<u64>;
}

/// NEC IR protocol receiver and decoder.
pub struct IrReceiver<S> {
    source: S,
}

impl<S: PulseSource> IrReceiver<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Reads and decodes a single NEC IR command.
    ///
    /// # Returns
    ///
    /// * `Some(command)` - Successfully decoded 8-bit command byte
    /// * `None` - Invalid frame, timeout, or checksum mismatch
    ///
    /// # Timing
    ///
    /// A complete NEC frame takes approximately 67.5ms to transmit. This
    /// blocks for up to ~150ms waiting for a frame to begin.
    pub fn read_command(&mut self) -> Option<u8> {
        // Wait for leading pulse (9ms low)
        self.source.wait_for_level(Level::Low, 150_000)?;
        let lead_pulse_time = self.source.wait_for_level(Level::High, 12_000)?;
        if !(8_000..=10_000).contains(&lead_pulse_time) {
            return None;
        }

        // Wait for space (4.5ms high)
        let space_time = self.source.wait_for_level(Level::Low, 7_000)?;
        if !(3_500..=5_000).contains(&space_time) {
            return None;
        }

        let mut data = [0u8; 4];
        for i in 0..32 {
            // 560µs low period
            self.source.wait_for_level(Level::High, 1_000)?;

            // High period carries the bit
            let high_time = self.source.wait_for_level(Level::Low, 2_500)?;
            if high_time < 200 {
                return None;
            }
            if high_time > 1_200 {
                data[i / 8] |= 1 << (i % 8);
            }
        }

        if data[0].wrapping_add(data[1]) == 0xFF && data[2].wrapping_add(data[3]) == 0xFF {
            Some(data[2])
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Replays recorded wait durations; `None` entries are timeouts.
    struct Recorded(VecDeque<Option<u64>>);

    impl PulseSource for Recorded {
        fn wait_for_level(&mut self, _level: Level, timeout_us: u64) -> Option<u64> {
            self.0
                .pop_front()
                .flatten()
                .filter(|&elapsed| elapsed <= timeout_us)
        }
    }

    fn frame(address: u8, command: u8) -> Recorded {
        let mut waits = VecDeque::new();
        waits.push_back(Some(0));
        waits.push_back(Some(9_000));
        waits.push_back(Some(4_500));
        let bytes = [address, !address, command, !command];
        for i in 0..32 {
            let bit = bytes[i / 8] >> (i % 8) & 1;
            waits.push_back(Some(560));
            waits.push_back(Some(if bit == 1 { 1_690 } else { 560 }));
        }
        Recorded(waits)
    }

    #[test]
    fn decodes_start_button() {
        let mut ir = IrReceiver::new(frame(0x00, 0x18));
        assert_eq!(ir.read_command(), Some(0x18));
    }

    #[test]
    fn decodes_every_command_byte() {
        for command in [0x00, 0x09, 0x1C, 0x5A, 0xFF] {
            let mut ir = IrReceiver::new(frame(0x04, command));
            assert_eq!(ir.read_command(), Some(command));
        }
    }

    #[test]
    fn rejects_bad_lead_pulse() {
        let mut source = frame(0x00, 0x18);
        source.0[1] = Some(6_000);
        assert_eq!(IrReceiver::new(source).read_command(), None);
    }

    #[test]
    fn rejects_bad_space() {
        let mut source = frame(0x00, 0x18);
        source.0[2] = Some(2_000);
        assert_eq!(IrReceiver::new(source).read_command(), None);
    }

    #[test]
    fn rejects_glitch_bits() {
        let mut source = frame(0x00, 0x18);
        source.0[4] = Some(100);
        assert_eq!(IrReceiver::new(source).read_command(), None);
    }

    #[test]
    fn rejects_checksum_mismatch() {
        let mut source = frame(0x00, 0x18);
        // flip a bit of the inverse command byte (bit 24 high period)
        let index = 3 + 24 * 2 + 1;
        source.0[index] = Some(match source.0[index] {
            Some(560) => 1_690,
            _ => 560,
        });
        assert_eq!(IrReceiver::new(source).read_command(), None);
    }

    #[test]
    fn times_out_without_activity() {
        let source = Recorded(VecDeque::from([None]));
        assert_eq!(IrReceiver::new(source).read_command(), None);
    }
}
