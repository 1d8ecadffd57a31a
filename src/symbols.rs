// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Symbol table for the floor barcodes.
//!
//! Each symbol is five dark bars and four light bars, three of them
//! thick, written out as a 15 character binary run (`1` dark, `0` light,
//! thick bars as three characters). The table is Code 39 without the
//! start/stop symbol, followed by the same symbols read back to front so a
//! label crossed in the opposite direction still decodes.
//!
//! # Ambiguity
//!
//! Reading back to front makes the table ambiguous: the reversed pattern
//! of `A` is the forward pattern of `1`, and so on. Lookups return the
//! first entry in table order, so forward entries always win.
//! [`candidates`] reports every character a window could stand for.
//!
//! The reversed pattern of `P` is the start/stop pattern itself. That entry
//! is kept in the table but never matched, otherwise every window holding
//! the stop frame would decode as `P`.
//!
//! # Examples
//!
//! ```
//! use barcode_robot::{lookup, MatchPolicy};
//!
//! let symbol = lookup("111010100010111", MatchPolicy::Exact).unwrap();
//! assert_eq!(symbol.character, 'A');
//! ```

use crate::config::{MatchPolicy, SYMBOL_BITS};

/// Start/stop framing symbol (`*`).
///
/// Never decoded, even though the reversed `P` entry carries the same
/// pattern.
pub const START_STOP: &str = "100010111011101";

/// Direction the pattern is read in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Orientation {
    Forward,
    Reversed,
}

/// One entry of the symbol table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Symbol {
    pub character: char,
    pub pattern: &'static str,
    pub orientation: Orientation,
}

const fn forward(character: char, pattern: &'static str) -> Symbol {
    Symbol {
        character,
        pattern,
        orientation: Orientation::Forward,
    }
}

const fn reversed(character: char, pattern: &'static str) -> Symbol {
    Symbol {
        character,
        pattern,
        orientation: Orientation::Reversed,
    }
}

/// Number of entries in [`SYMBOLS`].
pub const SYMBOL_COUNT: usize = 86;

/// The symbol table, in lookup order.
pub static SYMBOLS: [Symbol; SYMBOL_COUNT] = [
    forward('A', "111010100010111"),
    forward('B', "101110100010111"),
    forward('C', "111011101000101"),
    forward('D', "101011100010111"),
    forward('E', "111010111000101"),
    forward('F', "101110111000101"),
    forward('G', "101010001110111"),
    forward('H', "111010100011101"),
    forward('I', "101110100011101"),
    forward('J', "101011100011101"),
    forward('K', "111010101000111"),
    forward('L', "101110101000111"),
    forward('M', "111011101010001"),
    forward('N', "101011101000111"),
    forward('O', "111010111010001"),
    forward('P', "101110111010001"),
    forward('Q', "101010111000111"),
    forward('R', "111010101110001"),
    forward('S', "101110101110001"),
    forward('T', "101011101110001"),
    forward('U', "111000101010111"),
    forward('V', "100011101010111"),
    forward('W', "111000111010101"),
    forward('X', "100010111010111"),
    forward('Y', "111000101110101"),
    forward('Z', "100011101110101"),
    forward('0', "101000111011101"),
    forward('1', "111010001010111"),
    forward('2', "101110001010111"),
    forward('3', "111011100010101"),
    forward('4', "101000111010111"),
    forward('5', "111010001110101"),
    forward('6', "101110001110101"),
    forward('7', "101000101110111"),
    forward('8', "111010001011101"),
    forward('9', "101110001011101"),
    forward('-', "100010101110111"),
    forward('.', "111000101011101"),
    forward('$', "100010001000101"),
    forward('/', "100010001010001"),
    forward('+', "100010100010001"),
    forward('%', "101000100010001"),
    forward(' ', "100011101011101"),
    reversed('A', "111010001010111"),
    reversed('B', "111010001011101"),
    reversed('C', "101000101110111"),
    reversed('D', "111010001110101"),
    reversed('E', "101000111010111"),
    reversed('F', "101000111011101"),
    reversed('G', "111011100010101"),
    reversed('H', "101110001010111"),
    reversed('I', "101110001011101"),
    reversed('J', "101110001110101"),
    reversed('K', "111000101010111"),
    reversed('L', "111000101011101"),
    reversed('M', "100010101110111"),
    reversed('N', "111000101110101"),
    reversed('O', "100010111010111"),
    reversed('P', "100010111011101"),
    reversed('Q', "111000111010101"),
    reversed('R', "100011101010111"),
    reversed('S', "100011101011101"),
    reversed('T', "100011101110101"),
    reversed('U', "111010101000111"),
    reversed('V', "111010101110001"),
    reversed('W', "101010111000111"),
    reversed('X', "111010111010001"),
    reversed('Y', "101011101000111"),
    reversed('Z', "101011101110001"),
    reversed('0', "101110111000101"),
    reversed('1', "111010100010111"),
    reversed('2', "111010100011101"),
    reversed('3', "101010001110111"),
    reversed('4', "111010111000101"),
    reversed('5', "101011100010111"),
    reversed('6', "101011100011101"),
    reversed('7', "111011101000101"),
    reversed('8', "101110100010111"),
    reversed('9', "101110100011101"),
    reversed('-', "111011101010001"),
    reversed('.', "101110101000111"),
    reversed('$', "101000100010001"),
    reversed('/', "100010100010001"),
    reversed('+', "100010001010001"),
    reversed('%', "100010001000101"),
    reversed(' ', "101110101110001"),
];

fn matches(window: &str, symbol: &Symbol, policy: MatchPolicy) -> bool {
    // framing, not data
    if symbol.pattern == START_STOP {
        return false;
    }
    match policy {
        MatchPolicy::Substring => window.contains(symbol.pattern),
        MatchPolicy::Exact => window.get(..SYMBOL_BITS) == Some(symbol.pattern),
    }
}

/// Finds the first table entry matching a trimmed window.
pub fn lookup(window: &str, policy: MatchPolicy) -> Option<&'static Symbol> {
    SYMBOLS
        .iter()
        .find(|symbol| matches(window, symbol, policy))
}

/// Lists every distinct character a trimmed window matches, in table order.
pub fn candidates(window: &str, policy: MatchPolicy) -> heapless::Vec<char, SYMBOL_COUNT> {
    let mut found = heapless::Vec::new();
    for symbol in SYMBOLS
        .iter()
        .filter(|symbol| matches(window, symbol, policy))
    {
        if !found.contains(&symbol.character) {
            // capacity equals the table size
            found.push(symbol.character).ok();
        }
    }
    found
}

/// Returns the forward pattern for a character, if the table has one.
pub fn pattern_for(character: char) -> Option<&'static str> {
    SYMBOLS
        .iter()
        .find(|symbol| symbol.orientation == Orientation::Forward && symbol.character == character)
        .map(|symbol| symbol.pattern)
}
