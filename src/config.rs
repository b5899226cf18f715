//! Configuration for the clock core.
//!
//! Everything that differs between clock builds lives here: the tick period (which fixes how
//! many ticks make a minute), 12- or 24-hour display, and how segment and digit lines are wired.
//! A [`ClockConfig`] is a plain `const` value so it can seed a `static` clock.

use core::num::{NonZeroU8, NonZeroU16};

use embassy_time::Duration;
use embedded_hal::digital::PinState;

use crate::shared_constants::{CLOCK_TICK_PERIOD, EDIT_REPEAT_SAMPLES, ONE_MINUTE};
use crate::{Error, Result};

/// How hours are shown on the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HourMode {
    /// 0 to 23.
    #[default]
    TwentyFour,
    /// 1 to 12, with midnight and noon shown as 12.
    Twelve,
}

impl HourMode {
    /// Maps a 0-23 hour counter to the value to display.
    #[must_use]
    pub const fn display_hours(self, hours: u8) -> u8 {
        match self {
            Self::TwentyFour => hours,
            Self::Twelve => match hours % 12 {
                0 => 12,
                hours => hours,
            },
        }
    }

    /// Parses a build setting. `"12"` selects 12-hour mode; anything else is 24-hour.
    #[must_use]
    pub const fn from_setting(setting: &str) -> Self {
        match setting.as_bytes() {
            [b'1', b'2'] => Self::Twelve,
            _ => Self::TwentyFour,
        }
    }
}

/// Electrical sense of a group of output lines.
///
/// Common-cathode displays drive segments high and select digits low; common-anode displays
/// do the opposite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    ActiveHigh,
    ActiveLow,
}

impl Polarity {
    /// Pin state that makes a line `active`.
    #[must_use]
    pub const fn pin_state(self, active: bool) -> PinState {
        if self.is_high(active) {
            PinState::High
        } else {
            PinState::Low
        }
    }

    /// Whether a line that is `active` sits at a high level.
    #[must_use]
    pub const fn is_high(self, active: bool) -> bool {
        match self {
            Self::ActiveHigh => active,
            Self::ActiveLow => !active,
        }
    }

    /// Whether an input read as `high` counts as active.
    #[must_use]
    pub const fn is_active(self, high: bool) -> bool {
        self.is_high(high)
    }
}

/// Settings that affect how time is rendered into segment patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    pub hour_mode: HourMode,
    /// Show nothing, rather than `0`, in the hour-tens cell.
    pub blank_leading_zero: bool,
}

impl DisplayConfig {
    pub const DEFAULT: Self = Self {
        hour_mode: HourMode::TwentyFour,
        blank_leading_zero: false,
    };
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Complete configuration for one clock.
///
/// ```
/// use embassy_time::Duration;
/// use mux_clock::config::{ClockConfig, HourMode, Polarity};
///
/// let config = ClockConfig::new(Duration::from_millis(250))?
///     .with_hour_mode(HourMode::Twelve)
///     .with_digit_polarity(Polarity::ActiveHigh);
/// assert_eq!(config.ticks_per_minute().get(), 240);
/// # Ok::<(), mux_clock::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockConfig {
    ticks_per_minute: NonZeroU8,
    display: DisplayConfig,
    segment_polarity: Polarity,
    digit_polarity: Polarity,
    blank_phase: bool,
    edit_repeat_samples: NonZeroU16,
}

impl ClockConfig {
    /// Half-second ticks, 24-hour display, common-cathode wiring, no blank scan phase.
    pub const DEFAULT: Self = match Self::new(CLOCK_TICK_PERIOD) {
        Ok(config) => config,
        Err(_) => panic!("CLOCK_TICK_PERIOD must divide one minute"),
    };

    /// Creates a configuration for a clock ticked every `tick_period`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTickPeriod`] unless `tick_period` divides one minute evenly into
    /// 1 to 255 ticks.
    pub const fn new(tick_period: Duration) -> Result<Self> {
        let Some(ticks_per_minute) = ticks_per_minute(tick_period) else {
            return Err(Error::InvalidTickPeriod);
        };
        let Some(edit_repeat_samples) = NonZeroU16::new(EDIT_REPEAT_SAMPLES) else {
            return Err(Error::InvalidEditRepeat);
        };
        Ok(Self {
            ticks_per_minute,
            display: DisplayConfig::DEFAULT,
            segment_polarity: Polarity::ActiveHigh,
            digit_polarity: Polarity::ActiveLow,
            blank_phase: false,
            edit_repeat_samples,
        })
    }

    #[must_use]
    pub const fn with_hour_mode(mut self, hour_mode: HourMode) -> Self {
        self.display.hour_mode = hour_mode;
        self
    }

    #[must_use]
    pub const fn with_blank_leading_zero(mut self, blank_leading_zero: bool) -> Self {
        self.display.blank_leading_zero = blank_leading_zero;
        self
    }

    #[must_use]
    pub const fn with_segment_polarity(mut self, polarity: Polarity) -> Self {
        self.segment_polarity = polarity;
        self
    }

    #[must_use]
    pub const fn with_digit_polarity(mut self, polarity: Polarity) -> Self {
        self.digit_polarity = polarity;
        self
    }

    /// Adds a scan step with every digit off once per multiplex cycle.
    #[must_use]
    pub const fn with_blank_phase(mut self, blank_phase: bool) -> Self {
        self.blank_phase = blank_phase;
        self
    }

    /// Sets how many button samples pass between repeated edits while a button is held.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEditRepeat`] if `samples` is zero.
    pub const fn with_edit_repeat_samples(mut self, samples: u16) -> Result<Self> {
        let Some(samples) = NonZeroU16::new(samples) else {
            return Err(Error::InvalidEditRepeat);
        };
        self.edit_repeat_samples = samples;
        Ok(self)
    }

    #[must_use]
    pub const fn ticks_per_minute(&self) -> NonZeroU8 {
        self.ticks_per_minute
    }

    #[must_use]
    pub const fn display(&self) -> DisplayConfig {
        self.display
    }

    #[must_use]
    pub const fn segment_polarity(&self) -> Polarity {
        self.segment_polarity
    }

    #[must_use]
    pub const fn digit_polarity(&self) -> Polarity {
        self.digit_polarity
    }

    #[must_use]
    pub const fn blank_phase(&self) -> bool {
        self.blank_phase
    }

    #[must_use]
    pub const fn edit_repeat_samples(&self) -> NonZeroU16 {
        self.edit_repeat_samples
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

const fn ticks_per_minute(tick_period: Duration) -> Option<NonZeroU8> {
    let minute = ONE_MINUTE.as_ticks();
    let period = tick_period.as_ticks();
    match (minute.checked_rem(period), minute.checked_div(period)) {
        (Some(0), Some(ticks)) if ticks <= u8::MAX as u64 => {
            #[expect(clippy::cast_possible_truncation, reason = "Checked against u8::MAX")]
            let ticks = ticks as u8;
            NonZeroU8::new(ticks)
        }
        _ => None,
    }
}

#[cfg(all(test, not(target_os = "none")))]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_half_second_ticks() {
        let config = ClockConfig::DEFAULT;
        assert_eq!(config.ticks_per_minute().get(), 120);
        assert_eq!(config.display().hour_mode, HourMode::TwentyFour);
        assert_eq!(config.edit_repeat_samples().get(), EDIT_REPEAT_SAMPLES);
    }

    #[test]
    fn test_tick_period_must_divide_a_minute() {
        assert!(ClockConfig::new(Duration::from_secs(1)).is_ok());
        assert!(matches!(
            ClockConfig::new(Duration::from_millis(700)),
            Err(Error::InvalidTickPeriod)
        ));
        // 100 ms would need 600 ticks per minute
        assert!(matches!(
            ClockConfig::new(Duration::from_millis(100)),
            Err(Error::InvalidTickPeriod)
        ));
        assert!(matches!(
            ClockConfig::new(Duration::from_ticks(0)),
            Err(Error::InvalidTickPeriod)
        ));
        // Longer than a minute
        assert!(matches!(
            ClockConfig::new(Duration::from_secs(120)),
            Err(Error::InvalidTickPeriod)
        ));
    }

    #[test]
    fn test_zero_edit_repeat_rejected() {
        assert!(matches!(
            ClockConfig::DEFAULT.with_edit_repeat_samples(0),
            Err(Error::InvalidEditRepeat)
        ));
    }

    #[test]
    fn test_twelve_hour_mapping() {
        let mode = HourMode::Twelve;
        assert_eq!(mode.display_hours(0), 12);
        assert_eq!(mode.display_hours(1), 1);
        assert_eq!(mode.display_hours(11), 11);
        assert_eq!(mode.display_hours(12), 12);
        assert_eq!(mode.display_hours(13), 1);
        assert_eq!(mode.display_hours(23), 11);
        assert_eq!(HourMode::TwentyFour.display_hours(23), 23);
    }

    #[test]
    fn test_hour_mode_from_setting() {
        assert_eq!(HourMode::from_setting("12"), HourMode::Twelve);
        assert_eq!(HourMode::from_setting("24"), HourMode::TwentyFour);
        assert_eq!(HourMode::from_setting(""), HourMode::TwentyFour);
    }

    #[test]
    fn test_polarity() {
        assert_eq!(Polarity::ActiveHigh.pin_state(true), PinState::High);
        assert_eq!(Polarity::ActiveLow.pin_state(true), PinState::Low);
        assert_eq!(Polarity::ActiveLow.pin_state(false), PinState::High);
        assert!(Polarity::ActiveLow.is_active(false));
        assert!(!Polarity::ActiveHigh.is_active(false));
    }
}
