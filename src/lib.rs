// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Barcode scanning for a line-following robot.
//!
//! A reflectance sensor under the robot produces one GPIO edge per bar
//! boundary as it drives over a Code 39 barcode. This crate turns those
//! edges back into characters:
//!
//! - [`classifier`] - thin / thick decision against a calibrated reference
//! - [`window`] - the 27-token sliding symbol window
//! - [`symbols`] - the Code 39 pattern table (forward and reversed)
//! - [`decoder`] - per-scan state tying the three together
//! - [`controller`] - edge bookkeeping and the `Idle` / `Scanning` states
//! - [`shared`] - the controller behind a critical section
//!
//! Scan commands arrive from an NEC IR remote ([`ir_receiver`],
//! [`command`]) and the two line sensors are tracked by [`line`].
//!
//! The library is `no_std` and heap-free; the RP2350 firmware lives in
//! `src/main.rs` behind the `rp2350` feature.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod classifier;
pub mod command;
pub mod config;
pub mod controller;
pub mod decoder;
pub mod edge;
pub mod error;
pub mod ir_receiver;
pub mod line;
pub mod shared;
pub mod symbols;
pub mod window;

pub use classifier::{Calibration, Thickness, classify};
pub use command::ScanCommand;
pub use config::{CalibrationMargin, DecoderConfig, MatchPolicy};
pub use controller::{ScanController, ScanState};
pub use decoder::{Decoder, DecoderStats};
pub use edge::{BarColor, Edge, EdgeEvent};
pub use error::DecodeError;
pub use ir_receiver::{IrReceiver, Level, PulseSource};
pub use line::{LineSensors, LineStatus};
pub use shared::SharedScanner;
pub use symbols::{Orientation, START_STOP, Symbol, lookup, pattern_for};
pub use window::{BarToken, SymbolWindow};
