// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Line sensor tracking.
//!
//! Two reflectance sensors sit either side of the barcode sensor. Their
//! outputs go HIGH over black, so a rising edge means "now on the line"
//! and a falling edge means "now off it". Seeing black on both sides at
//! once means the robot reached a crossing stripe (dead end).

use crate::edge::{Edge, EdgeEvent};

/// What the two line sensors currently see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineStatus {
    /// Neither sensor is over black
    Clear,
    /// Only the left sensor is over black
    LeftOnly,
    /// Only the right sensor is over black
    RightOnly,
    /// Both sensors are over black
    DeadEnd,
}

/// Left/right line sensor state.
#[derive(Debug, Clone, Copy)]
pub struct LineSensors {
    left_pin: u8,
    right_pin: u8,
    left_black: bool,
    right_black: bool,
}

impl LineSensors {
    /// Creates the tracker with both sensors over white.
    ///
    /// # Arguments
    ///
    /// * `left_pin` - GPIO of the left line sensor
    /// * `right_pin` - GPIO of the right line sensor
    pub const fn new(left_pin: u8, right_pin: u8) -> Self {
        Self {
            left_pin,
            right_pin,
            left_black: false,
            right_black: false,
        }
    }

    /// `true` while the left sensor is over black.
    pub fn is_left_black(&self) -> bool {
        self.left_black
    }

    /// `true` while the right sensor is over black.
    pub fn is_right_black(&self) -> bool {
        self.right_black
    }

    /// Applies one edge.
    ///
    /// # Returns
    ///
    /// `true` if the event belonged to one of the line sensors.
    pub fn on_edge(&mut self, event: EdgeEvent) -> bool {
        let black = event.edge == Edge::Rising;
        if event.pin == self.left_pin {
            self.left_black = black;
        } else if event.pin == self.right_pin {
            self.right_black = black;
        } else {
            return false;
        }
        true
    }

    /// Combined reading of both sensors.
    ///
    /// # Examples
    ///
    /// ```
    /// use barcode_robot::{EdgeEvent, LineSensors, LineStatus};
    ///
    /// let mut line = LineSensors::new(6, 7);
    /// line.on_edge(EdgeEvent::rising(6, 0));
    /// line.on_edge(EdgeEvent::rising(7, 40));
    /// assert_eq!(line.status(), LineStatus::DeadEnd);
    /// ```
    pub fn status(&self) -> LineStatus {
        match (self.left_black, self.right_black) {
            (false, false) => LineStatus::Clear,
            (true, false) => LineStatus::LeftOnly,
            (false, true) => LineStatus::RightOnly,
            (true, true) => LineStatus::DeadEnd,
        }
    }
}
