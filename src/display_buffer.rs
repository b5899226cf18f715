//! Segment patterns for the clock face.
//!
//! [`DisplayBuffer`] holds one logical segment-pattern byte per multiplexed cell, in scan
//! order: hour tens, hour ones, colon, minute tens, minute ones. Bit 0 is segment A through
//! bit 6 for segment G, and bit 7 is the decimal point. A set bit means "lit"; pin polarity is
//! applied later by [`OutputArray`](crate::output_array::OutputArray).

use core::ops::Index;

use crate::clock_time::TimeOfDay;
use crate::config::DisplayConfig;
use crate::shared_constants::CELL_COUNT;

// ============================================================================
// LED Constants
// ============================================================================

/// Constants for 7-segment LED displays.
pub struct Leds;

impl Leds {
    /// Segment A of the 7-segment display.
    pub const SEG_A: u8 = 0b_0000_0001;
    /// Segment B of the 7-segment display.
    pub const SEG_B: u8 = 0b_0000_0010;
    /// Segment C of the 7-segment display.
    pub const SEG_C: u8 = 0b_0000_0100;
    /// Segment D of the 7-segment display.
    pub const SEG_D: u8 = 0b_0000_1000;
    /// Segment E of the 7-segment display.
    pub const SEG_E: u8 = 0b_0001_0000;
    /// Segment F of the 7-segment display.
    pub const SEG_F: u8 = 0b_0010_0000;
    /// Segment G of the 7-segment display.
    pub const SEG_G: u8 = 0b_0100_0000;
    /// Decimal point of the 7-segment display.
    pub const DECIMAL: u8 = 0b_1000_0000;

    /// Nothing lit.
    pub const BLANK: u8 = 0b_0000_0000;

    /// The colon's two dots share the colon cell's A and B lines.
    pub const COLON: u8 = Self::SEG_A | Self::SEG_B;

    /// Array representing the segments for digits 0-9 on a 7-segment display.
    const DIGITS: [u8; 10] = [
        0b_0011_1111, // Digit 0
        0b_0000_0110, // Digit 1
        0b_0101_1011, // Digit 2
        0b_0100_1111, // Digit 3
        0b_0110_0110, // Digit 4
        0b_0110_1101, // Digit 5
        0b_0111_1101, // Digit 6
        0b_0000_0111, // Digit 7
        0b_0111_1111, // Digit 8
        0b_0110_1111, // Digit 9
    ];
}

/// A decimal digit, 0 through 9.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Digit(u8);

impl Digit {
    /// Returns `None` if `value` is not a single decimal digit.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value < 10 { Some(Self(value)) } else { None }
    }

    /// The ones digit of `value`.
    #[must_use]
    pub const fn ones(value: u8) -> Self {
        Self(value % 10)
    }

    /// The tens digit of `value`.
    #[must_use]
    pub const fn tens(value: u8) -> Self {
        Self(value / 10 % 10)
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Segment pattern for this digit.
    #[must_use]
    #[expect(clippy::indexing_slicing, reason = "A Digit is always below 10")]
    pub const fn bits(self) -> u8 {
        Leds::DIGITS[self.0 as usize]
    }
}

// ============================================================================
// Cell
// ============================================================================

/// A multiplexed position on the clock face, in scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Cell {
    HourTens,
    HourOnes,
    Colon,
    MinuteTens,
    MinuteOnes,
}

impl Cell {
    pub const ALL: [Self; CELL_COUNT] = [
        Self::HourTens,
        Self::HourOnes,
        Self::Colon,
        Self::MinuteTens,
        Self::MinuteOnes,
    ];

    /// Position of this cell in the scan order.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

// ============================================================================
// DisplayBuffer
// ============================================================================

/// Segment patterns for every cell of the clock face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayBuffer([u8; CELL_COUNT]);

impl DisplayBuffer {
    pub const BLANK: Self = Self([Leds::BLANK; CELL_COUNT]);

    #[must_use]
    pub const fn new(bits: [u8; CELL_COUNT]) -> Self {
        Self(bits)
    }

    /// Renders `time_of_day` as hours, colon, and minutes.
    ///
    /// The colon is lit on odd tick counts, which blinks it at the tick rate.
    #[must_use]
    pub const fn recompute(time_of_day: &TimeOfDay, config: &DisplayConfig) -> Self {
        let hours = config.hour_mode.display_hours(time_of_day.hours);
        let hour_tens = if config.blank_leading_zero && hours < 10 {
            Leds::BLANK
        } else {
            Digit::tens(hours).bits()
        };
        let colon = if time_of_day.is_odd_phase() {
            Leds::COLON
        } else {
            Leds::BLANK
        };
        Self([
            hour_tens,
            Digit::ones(hours).bits(),
            colon,
            Digit::tens(time_of_day.minutes).bits(),
            Digit::ones(time_of_day.minutes).bits(),
        ])
    }

    /// Segment pattern for the cell at scan position `index`, if there is one.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<u8> {
        self.0.get(index).copied()
    }

    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &u8> {
        self.0.iter()
    }

    #[must_use]
    pub const fn bits(&self) -> [u8; CELL_COUNT] {
        self.0
    }
}

impl Default for DisplayBuffer {
    fn default() -> Self {
        Self::BLANK
    }
}

impl Index<Cell> for DisplayBuffer {
    type Output = u8;

    #[expect(clippy::indexing_slicing, reason = "Every Cell is below CELL_COUNT")]
    fn index(&self, cell: Cell) -> &Self::Output {
        &self.0[cell.index()]
    }
}

impl IntoIterator for DisplayBuffer {
    type Item = u8;
    type IntoIter = core::array::IntoIter<u8, CELL_COUNT>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a DisplayBuffer {
    type Item = &'a u8;
    type IntoIter = core::slice::Iter<'a, u8>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
