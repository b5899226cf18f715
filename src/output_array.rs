use embedded_hal::digital::OutputPin;

use crate::config::Polarity;
use crate::error::Error::{CannotSetOutputState, IndexOutOfBounds};
use crate::multiplex::{DigitSelect, SegmentOutput};
use crate::shared_constants::SEGMENT_COUNT;
use crate::Result;

/// A group of output pins that share one electrical [`Polarity`].
///
/// Eight of them drive the segment lines; one per cell drives the digit-select lines. Callers
/// speak in "active" and "inactive" and the array turns that into pin levels.
pub struct OutputArray<P, const N: usize> {
    pins: [P; N],
    polarity: Polarity,
}

impl<P: OutputPin, const N: usize> OutputArray<P, N> {
    #[must_use]
    pub const fn new(pins: [P; N], polarity: Polarity) -> Self {
        Self { pins, polarity }
    }

    /// Drives every pin active or inactive.
    ///
    /// # Errors
    ///
    /// Returns [`CannotSetOutputState`] if a pin rejects its new level.
    #[inline]
    pub fn set_all(&mut self, active: bool) -> Result<()> {
        let state = self.polarity.pin_state(active);
        for pin in &mut self.pins {
            pin.set_state(state).map_err(|_| CannotSetOutputState)?;
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`IndexOutOfBounds`] if there is no pin at `index`, or
    /// [`CannotSetOutputState`] if the pin rejects its new level.
    #[inline]
    pub fn set_active_at_index(&mut self, index: u8, active: bool) -> Result<()> {
        let state = self.polarity.pin_state(active);
        self.pins
            .get_mut(usize::from(index))
            .ok_or(IndexOutOfBounds)?
            .set_state(state)
            .map_err(|_| CannotSetOutputState)
    }

    #[must_use]
    pub fn into_pins(self) -> [P; N] {
        self.pins
    }
}

impl<P: OutputPin> OutputArray<P, SEGMENT_COUNT> {
    /// Drives pin `i` active when bit `i` of `bits` is set.
    ///
    /// # Errors
    ///
    /// Returns [`CannotSetOutputState`] if a pin rejects its new level.
    #[inline]
    pub fn set_from_bits(&mut self, mut bits: u8) -> Result<()> {
        for pin in &mut self.pins {
            let state = self.polarity.pin_state(bits & 1 == 1);
            pin.set_state(state).map_err(|_| CannotSetOutputState)?;
            bits >>= 1;
        }
        Ok(())
    }
}

impl<P: OutputPin> SegmentOutput for OutputArray<P, SEGMENT_COUNT> {
    fn write_segments(&mut self, bits: u8) -> Result<()> {
        self.set_from_bits(bits)
    }
}

impl<P: OutputPin, const N: usize> DigitSelect for OutputArray<P, N> {
    fn deassert_all(&mut self) -> Result<()> {
        self.set_all(false)
    }

    fn assert_digit(&mut self, index: u8) -> Result<()> {
        self.set_active_at_index(index, true)
    }
}
