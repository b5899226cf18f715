//! Time-division multiplexing of the clock face.
//!
//! All cells share one set of segment lines, so only one cell may be lit at a time. Each
//! [`Multiplexer::scan_step`] turns every cell off, moves to the next cell, puts that cell's
//! pattern on the segment lines, and turns just that cell on. Called fast enough, the eye sees
//! every cell lit at once.

use crate::display_buffer::{DisplayBuffer, Leds};
use crate::shared_constants::CELL_COUNT_U8;
use crate::Result;

const LAST_CELL: u8 = CELL_COUNT_U8 - 1;
const BLANK_STEP: u8 = CELL_COUNT_U8;

/// The shared segment lines.
pub trait SegmentOutput {
    /// Lights the segments whose bits are set in `bits` and darkens the rest.
    ///
    /// # Errors
    ///
    /// Returns an error if a line could not be driven.
    fn write_segments(&mut self, bits: u8) -> Result<()>;
}

/// The per-cell enable lines.
pub trait DigitSelect {
    /// Turns every cell off.
    ///
    /// # Errors
    ///
    /// Returns an error if a line could not be driven.
    fn deassert_all(&mut self) -> Result<()>;

    /// Turns on the cell at scan position `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` has no line or the line could not be driven.
    fn assert_digit(&mut self, index: u8) -> Result<()>;
}

/// Where the scanner is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanCursor {
    /// The cell at this scan position is lit.
    Digit(u8),
    /// Every cell is off.
    Blank,
}

/// Drives a multiplexed display from a [`DisplayBuffer`].
pub struct Multiplexer<S, D> {
    segments: S,
    digits: D,
    position: u8,
    period: u8,
}

impl<S: SegmentOutput, D: DigitSelect> Multiplexer<S, D> {
    /// With `blank_phase`, each cycle has one extra step where every cell is off.
    ///
    /// The first [`scan_step`](Self::scan_step) lights cell 0.
    #[must_use]
    pub const fn new(segments: S, digits: D, blank_phase: bool) -> Self {
        let position = if blank_phase { BLANK_STEP } else { LAST_CELL };
        Self {
            segments,
            digits,
            position,
            period: position.saturating_add(1),
        }
    }

    /// Steps in one full cycle.
    #[must_use]
    pub const fn period(&self) -> u8 {
        self.period
    }

    /// The step most recently driven.
    #[must_use]
    pub const fn cursor(&self) -> ScanCursor {
        if self.position < BLANK_STEP {
            ScanCursor::Digit(self.position)
        } else {
            ScanCursor::Blank
        }
    }

    /// Lights the next cell of `display_buffer` and returns which step was driven.
    ///
    /// The cursor advances even if a line fails, so one bad pin cannot stall the scan.
    ///
    /// # Errors
    ///
    /// Returns the first line error. If the cells could not be turned off, the segments are
    /// blanked and no cell is turned on.
    pub fn scan_step(&mut self, display_buffer: &DisplayBuffer) -> Result<ScanCursor> {
        self.position = match self.position.checked_add(1) {
            Some(next) if next < self.period => next,
            _ => 0,
        };
        let cursor = self.cursor();
        if let Err(err) = self.digits.deassert_all() {
            // A cell may still be lit, so keep the segments dark and assert nothing.
            let _ = self.segments.write_segments(Leds::BLANK);
            return Err(err);
        }
        match cursor {
            ScanCursor::Digit(index) => {
                let bits = display_buffer
                    .get(usize::from(index))
                    .unwrap_or(Leds::BLANK);
                self.segments.write_segments(bits)?;
                self.digits.assert_digit(index)?;
            }
            ScanCursor::Blank => self.segments.write_segments(Leds::BLANK)?,
        }
        Ok(cursor)
    }

    /// Turns every cell off without moving the cursor.
    ///
    /// # Errors
    ///
    /// Returns the first line error.
    pub fn blank(&mut self) -> Result<()> {
        self.digits.deassert_all()?;
        self.segments.write_segments(Leds::BLANK)
    }

    #[must_use]
    pub fn into_parts(self) -> (S, D) {
        (self.segments, self.digits)
    }
}
