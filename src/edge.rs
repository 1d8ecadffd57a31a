// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Edge events produced by the reflectance sensors.
//!
//! The sensor output goes HIGH over a dark stripe and LOW over a light one,
//! so a rising edge starts a dark bar and a falling edge starts a light one.

/// Direction of a sensor transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Light → dark
    Rising,
    /// Dark → light
    Falling,
}

impl Edge {
    /// Colour of the bar that starts at this edge.
    pub const fn starts(self) -> BarColor {
        match self {
            Edge::Rising => BarColor::Dark,
            Edge::Falling => BarColor::Light,
        }
    }

    /// Colour of the bar that ends at this edge.
    pub const fn ends(self) -> BarColor {
        match self {
            Edge::Rising => BarColor::Light,
            Edge::Falling => BarColor::Dark,
        }
    }
}

/// Bar colour as seen by the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BarColor {
    Dark,
    Light,
}

/// A single timestamped sensor transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EdgeEvent {
    /// GPIO pin that changed
    pub pin: u8,
    /// Transition direction
    pub edge: Edge,
    /// Monotonic 32-bit microsecond timestamp (wraps after ~71 minutes)
    pub timestamp_us: u32,
}

impl EdgeEvent {
    /// Creates an event for `pin`.
    ///
    /// # Arguments
    ///
    /// * `pin` - GPIO number the edge was seen on
    /// * `edge` - transition direction
    /// * `timestamp_us` - microsecond timer value when the edge fired
    pub const fn new(pin: u8, edge: Edge, timestamp_us: u32) -> Self {
        Self {
            pin,
            edge,
            timestamp_us,
        }
    }

    /// Rising edge on `pin`: a dark bar starts.
    ///
    /// # Examples
    ///
    /// ```
    /// use barcode_robot::{Edge, EdgeEvent};
    ///
    /// let event = EdgeEvent::rising(8, 1_000);
    /// assert_eq!(event.edge, Edge::Rising);
    /// ```
    pub const fn rising(pin: u8, timestamp_us: u32) -> Self {
        Self::new(pin, Edge::Rising, timestamp_us)
    }

    /// Falling edge on `pin`: a light bar starts.
    pub const fn falling(pin: u8, timestamp_us: u32) -> Self {
        Self::new(pin, Edge::Falling, timestamp_us)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rising_edge_ends_light_bar() {
        assert_eq!(Edge::Rising.starts(), BarColor::Dark);
        assert_eq!(Edge::Rising.ends(), BarColor::Light);
        assert_eq!(Edge::Falling.starts(), BarColor::Light);
        assert_eq!(Edge::Falling.ends(), BarColor::Dark);
    }
}
