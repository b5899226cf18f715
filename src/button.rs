//! The two edit buttons: one advances minutes, the other hours.
//!
//! Buttons are polled on a fixed sample tick rather than waited on, so a held button keeps
//! editing. [`EditRepeat`] paces those edits: the first sample of a press fires at once, and
//! while the button stays down it fires again every `period` samples.

use core::num::NonZeroU16;

use embedded_hal::digital::InputPin;

use crate::clock_time::Edit;
use crate::config::Polarity;
use crate::error::Error::CannotReadInput;
use crate::Result;

/// Which edit buttons are held at one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonState {
    pub minutes: bool,
    pub hours: bool,
}

impl ButtonState {
    pub const RELEASED: Self = Self {
        minutes: false,
        hours: false,
    };

    /// The edit requested by this sample. Holding both buttons requests nothing.
    #[must_use]
    pub const fn edit(self) -> Option<Edit> {
        match (self.minutes, self.hours) {
            (true, false) => Some(Edit::Minutes),
            (false, true) => Some(Edit::Hours),
            (false, false) | (true, true) => None,
        }
    }
}

/// Something that can report the edit buttons.
pub trait ButtonInput {
    /// Reads both buttons.
    ///
    /// # Errors
    ///
    /// Returns an error if either button could not be read.
    fn sample(&mut self) -> Result<ButtonState>;
}

/// A pair of button input pins.
pub struct EditButtons<M, H> {
    minutes: M,
    hours: H,
    pressed: Polarity,
}

impl<M: InputPin, H: InputPin> EditButtons<M, H> {
    /// `pressed` is the level a held button reads as: `ActiveLow` for buttons to ground with a
    /// pull-up.
    #[must_use]
    pub const fn new(minutes: M, hours: H, pressed: Polarity) -> Self {
        Self {
            minutes,
            hours,
            pressed,
        }
    }
}

impl<M: InputPin, H: InputPin> ButtonInput for EditButtons<M, H> {
    fn sample(&mut self) -> Result<ButtonState> {
        let minutes = self.minutes.is_high().map_err(|_| CannotReadInput)?;
        let hours = self.hours.is_high().map_err(|_| CannotReadInput)?;
        Ok(ButtonState {
            minutes: self.pressed.is_active(minutes),
            hours: self.pressed.is_active(hours),
        })
    }
}

/// Turns a stream of button samples into paced edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRepeat {
    period: NonZeroU16,
    countdown: u16,
    held: Option<Edit>,
}

impl EditRepeat {
    /// Fires at most once every `period` samples while an edit is held.
    #[must_use]
    pub const fn new(period: NonZeroU16) -> Self {
        Self {
            period,
            countdown: 0,
            held: None,
        }
    }

    /// Feeds one sample and returns the edit to apply, if any.
    ///
    /// A release, a chord, or a switch to the other button starts over, so the next press
    /// fires on its first sample.
    pub const fn update(&mut self, edit: Option<Edit>) -> Option<Edit> {
        let Some(edit) = edit else {
            self.held = None;
            return None;
        };
        let same = matches!(
            (self.held, edit),
            (Some(Edit::Minutes), Edit::Minutes) | (Some(Edit::Hours), Edit::Hours)
        );
        if same {
            if let Some(countdown) = self.countdown.checked_sub(1) {
                self.countdown = countdown;
                return None;
            }
        } else {
            self.held = Some(edit);
        }
        self.countdown = self.period.get().saturating_sub(1);
        Some(edit)
    }
}

#[cfg(all(test, not(target_os = "none")))]
mod tests {
    use core::convert::Infallible;

    use embedded_hal::digital::ErrorType;

    use super::*;
    use crate::Error;

    struct FakeInput(core::result::Result<bool, ()>);

    #[derive(Debug)]
    struct ReadFailed;

    impl embedded_hal::digital::Error for ReadFailed {
        fn kind(&self) -> embedded_hal::digital::ErrorKind {
            embedded_hal::digital::ErrorKind::Other
        }
    }

    impl ErrorType for FakeInput {
        type Error = ReadFailed;
    }

    impl InputPin for FakeInput {
        fn is_high(&mut self) -> core::result::Result<bool, ReadFailed> {
            self.0.map_err(|()| ReadFailed)
        }

        fn is_low(&mut self) -> core::result::Result<bool, ReadFailed> {
            self.is_high().map(|high| !high)
        }
    }

    struct AlwaysLow;

    impl ErrorType for AlwaysLow {
        type Error = Infallible;
    }

    impl InputPin for AlwaysLow {
        fn is_high(&mut self) -> core::result::Result<bool, Infallible> {
            Ok(false)
        }

        fn is_low(&mut self) -> core::result::Result<bool, Infallible> {
            Ok(true)
        }
    }

    fn repeat(period: u16) -> EditRepeat {
        EditRepeat::new(NonZeroU16::new(period).expect("nonzero period"))
    }

    #[test]
    fn test_chord_requests_nothing() {
        let both = ButtonState {
            minutes: true,
            hours: true,
        };
        assert_eq!(both.edit(), None);
        assert_eq!(ButtonState::RELEASED.edit(), None);
        let hours = ButtonState {
            minutes: false,
            hours: true,
        };
        assert_eq!(hours.edit(), Some(Edit::Hours));
    }

    #[test]
    fn test_active_low_buttons() {
        let mut buttons = EditButtons::new(AlwaysLow, FakeInput(Ok(true)), Polarity::ActiveLow);
        assert_eq!(
            buttons.sample().expect("readable pins"),
            ButtonState {
                minutes: true,
                hours: false
            }
        );
    }

    #[test]
    fn test_read_failure() {
        let mut buttons = EditButtons::new(AlwaysLow, FakeInput(Err(())), Polarity::ActiveLow);
        assert!(matches!(buttons.sample(), Err(Error::CannotReadInput)));
    }

    #[test]
    fn test_repeat_fires_immediately_then_every_period() {
        let mut repeat = repeat(3);
        let fired: Vec<bool> = (0..7)
            .map(|_| repeat.update(Some(Edit::Minutes)).is_some())
            .collect();
        assert_eq!(fired, [true, false, false, true, false, false, true]);
    }

    #[test]
    fn test_repeat_period_one_fires_every_sample() {
        let mut repeat = repeat(1);
        for _ in 0..5 {
            assert_eq!(repeat.update(Some(Edit::Hours)), Some(Edit::Hours));
        }
    }

    #[test]
    fn test_release_and_switch_rearm() {
        let mut repeat = repeat(150);
        assert_eq!(repeat.update(Some(Edit::Minutes)), Some(Edit::Minutes));
        assert_eq!(repeat.update(Some(Edit::Minutes)), None);
        assert_eq!(repeat.update(None), None);
        assert_eq!(repeat.update(Some(Edit::Minutes)), Some(Edit::Minutes));
        assert_eq!(repeat.update(Some(Edit::Hours)), Some(Edit::Hours));
        assert_eq!(repeat.update(Some(Edit::Hours)), None);
    }
}
