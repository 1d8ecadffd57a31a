// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Sliding symbol window.
//!
//! Classified bars are stored as raw tokens (`1`, `111` for dark bars and
//! `2`, `222` for light bars) so that a thin dark bar and a thin light bar
//! never collide. Once the window holds [`WINDOW_TOKENS`] tokens it is
//! finalized: every token expands to its binary run, the start and stop
//! framing is trimmed off, and the oldest token is evicted so the next bar
//! re-fills the window.
//!
//! ```text
//!  tokens   1 222 1 2 111 2 111 2 1 | 2 | 111 2 1 2 1 222 1 2 111 | 2 | 1 222 1 2 111 2 111
//!  expanded 1000101110111010 | 111010100010111 | 01000101110111
//!           └ start framing ┘  └── symbol ───┘        └ last 9 dropped
//! ```

use core::fmt;

use crate::classifier::Thickness;
use crate::config::{EXPANDED_CAPACITY, LEADING_FRAME_BITS, TRAILING_FRAME_BITS, WINDOW_TOKENS};
use crate::edge::BarColor;

/// Expanded binary string of a finalized window, framing trimmed.
pub type Pattern = heapless::String<EXPANDED_CAPACITY>;

/// A classified bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BarToken {
    DarkThin,
    DarkThick,
    LightThin,
    LightThick,
}

impl BarToken {
    /// Builds the token for a classified bar.
    ///
    /// # Examples
    ///
    /// ```
    /// use barcode_robot::{BarColor, BarToken, Thickness};
    ///
    /// assert_eq!(BarToken::new(BarColor::Light, Thickness::Thick), BarToken::LightThick);
    /// ```
    pub const fn new(color: BarColor, thickness: Thickness) -> Self {
        match (color, thickness) {
            (BarColor::Dark, Thickness::Thin) => BarToken::DarkThin,
            (BarColor::Dark, Thickness::Thick) => BarToken::DarkThick,
            (BarColor::Light, Thickness::Thin) => BarToken::LightThin,
            (BarColor::Light, Thickness::Thick) => BarToken::LightThick,
        }
    }

    /// Whether the bar was dark or light.
    pub const fn color(self) -> BarColor {
        match self {
            BarToken::DarkThin | BarToken::DarkThick => BarColor::Dark,
            BarToken::LightThin | BarToken::LightThick => BarColor::Light,
        }
    }

    /// Thin (one unit) or thick (three units).
    pub const fn thickness(self) -> Thickness {
        match self {
            BarToken::DarkThin | BarToken::LightThin => Thickness::Thin,
            BarToken::DarkThick | BarToken::LightThick => Thickness::Thick,
        }
    }

    /// Raw window code: `1`, `111`, `2` or `222`.
    pub const fn raw_str(self) -> &'static str {
        match self {
            BarToken::DarkThin => "1",
            BarToken::DarkThick => "111",
            BarToken::LightThin => "2",
            BarToken::LightThick => "222",
        }
    }

    /// Binary run the token expands to.
    pub const fn bits(self) -> &'static str {
        match self {
            BarToken::DarkThin => "1",
            BarToken::DarkThick => "111",
            BarToken::LightThin => "0",
            BarToken::LightThick => "000",
        }
    }

    /// Letter used by the sensor trace: `B`/`b` dark, `W`/`w` light.
    pub const fn letter(self) -> char {
        match self {
            BarToken::DarkThin => 'b',
            BarToken::DarkThick => 'B',
            BarToken::LightThin => 'w',
            BarToken::LightThick => 'W',
        }
    }

    /// Splits a binary run string back into tokens.
    ///
    /// Runs of one character are thin, anything longer is thick. Characters
    /// other than `0` and `1` end the split.
    ///
    /// ```
    /// use barcode_robot::BarToken;
    ///
    /// let tokens: Vec<_> = BarToken::split("1110100").collect();
    /// assert_eq!(
    ///     tokens,
    ///     [BarToken::DarkThick, BarToken::LightThin, BarToken::DarkThin, BarToken::LightThick]
    /// );
    /// ```
    pub fn split(pattern: &str) -> impl Iterator<Item = BarToken> + '_ {
        let bytes = pattern.as_bytes();
        let mut pos = 0;
        core::iter::from_fn(move || {
            let first = *bytes.get(pos)?;
            let color = match first {
                b'1' => BarColor::Dark,
                b'0' => BarColor::Light,
                _ => return None,
            };
            let run = bytes[pos..].iter().take_while(|&&b| b == first).count();
            pos += run;
            let thickness = if run > 1 {
                Thickness::Thick
            } else {
                Thickness::Thin
            };
            Some(BarToken::new(color, thickness))
        })
    }
}

/// Drops the start and stop framing from an expanded window.
///
/// Returns an empty string when the expansion is too short to hold both.
pub fn trim_framing(expanded: &str) -> &str {
    if expanded.len() < LEADING_FRAME_BITS + TRAILING_FRAME_BITS {
        return "";
    }
    &expanded[LEADING_FRAME_BITS..expanded.len() - TRAILING_FRAME_BITS]
}

/// Rolling buffer of the most recent bar tokens.
#[derive(Debug, Clone)]
pub struct SymbolWindow {
    tokens: heapless::Deque<BarToken, WINDOW_TOKENS>,
}

impl SymbolWindow {
    pub const fn new() -> Self {
        Self {
            tokens: heapless::Deque::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.tokens.is_full()
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    pub fn tokens(&self) -> impl Iterator<Item = BarToken> + '_ {
        self.tokens.iter().copied()
    }

    /// Appends a token and finalizes the window once it is full.
    ///
    /// Returns the trimmed pattern when the push completed a window. The
    /// oldest token is evicted afterwards, so every later push completes a
    /// window again.
    pub fn push(&mut self, token: BarToken) -> Option<Pattern> {
        if self.tokens.is_full() {
            self.tokens.pop_front();
        }
        // room was made above
        self.tokens.push_back(token).ok();

        if !self.tokens.is_full() {
            return None;
        }

        let pattern = self.finalize();
        self.tokens.pop_front();
        pattern
    }

    /// Expands a full window and trims its framing.
    ///
    /// Returns `None` until the window holds [`WINDOW_TOKENS`] tokens.
    pub fn finalize(&self) -> Option<Pattern> {
        if !self.is_full() {
            return None;
        }

        let expanded = self.expanded();
        let mut pattern = Pattern::new();
        pattern.push_str(trim_framing(&expanded)).ok();
        Some(pattern)
    }

    /// Binary expansion of the current tokens.
    pub fn expanded(&self) -> Pattern {
        let mut expanded = Pattern::new();
        for token in self.tokens() {
            // at most three characters per token
            expanded.push_str(token.bits()).ok();
        }
        expanded
    }

    /// Raw codes concatenated, e.g. `1222121112`.
    pub fn raw_digits(&self) -> heapless::String<EXPANDED_CAPACITY> {
        let mut digits = heapless::String::new();
        for token in self.tokens() {
            digits.push_str(token.raw_str()).ok();
        }
        digits
    }

    /// Letter trace of the current tokens, e.g. `bWbwBwBwb`.
    pub fn letters(&self) -> heapless::String<WINDOW_TOKENS> {
        let mut letters = heapless::String::new();
        for token in self.tokens() {
            letters.push(token.letter()).ok();
        }
        letters
    }
}

impl Default for SymbolWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SymbolWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw_digits())
    }
}
