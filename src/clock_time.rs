//! Time-of-day counters for a tick-driven clock.
//!
//! [`ClockTime`] counts ticks into minutes and minutes into hours, wrapping silently at
//! midnight. The user can also nudge minutes or hours with [`Edit`]s; an edit wraps its own
//! counter but never carries into the next one.
//!
//! # Example
//!
//! ```
//! use mux_clock::clock_time::{Carry, ClockTime, TimeOfDay};
//! use mux_clock::config::ClockConfig;
//!
//! let mut clock = ClockTime::new(ClockConfig::DEFAULT.ticks_per_minute());
//! clock.set_time_of_day(TimeOfDay { hours: 23, minutes: 59, seconds: 119 })?;
//! assert_eq!(clock.tick(), Carry::Day);
//! assert_eq!(clock.time_of_day(), TimeOfDay::MIDNIGHT);
//! # Ok::<(), mux_clock::Error>(())
//! ```

use core::num::{NonZeroU8, NonZeroU16};

use crate::{Error, Result};

pub const MINUTES_PER_HOUR: u8 = 60;
pub const HOURS_PER_DAY: u8 = 24;
const SECONDS_PER_MINUTE: u16 = 60;

/// A snapshot of the clock.
///
/// `seconds` counts clock ticks within the current minute, so its range depends on the tick
/// rate (0..120 for half-second ticks). Use [`TimeOfDay::whole_seconds`] for real seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeOfDay {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl TimeOfDay {
    pub const MIDNIGHT: Self = Self {
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Colon phase: odd tick counts light the colon.
    #[must_use]
    pub const fn is_odd_phase(&self) -> bool {
        self.seconds & 1 == 1
    }

    /// Seconds elapsed in the current minute.
    #[must_use]
    pub fn whole_seconds(&self, ticks_per_minute: NonZeroU8) -> u8 {
        let scaled = u16::from(self.seconds).saturating_mul(SECONDS_PER_MINUTE);
        let seconds = scaled / NonZeroU16::from(ticks_per_minute);
        u8::try_from(seconds).unwrap_or(u8::MAX)
    }
}

/// The highest unit that rolled over on a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Carry {
    None,
    Minute,
    Hour,
    Day,
}

/// A user adjustment from the edit buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edit {
    Minutes,
    Hours,
}

/// The clock's time-of-day state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockTime {
    now: TimeOfDay,
    ticks_per_minute: NonZeroU8,
}

impl ClockTime {
    /// Creates a clock at midnight that rolls over a minute every `ticks_per_minute` ticks.
    #[must_use]
    pub const fn new(ticks_per_minute: NonZeroU8) -> Self {
        Self {
            now: TimeOfDay::MIDNIGHT,
            ticks_per_minute,
        }
    }

    #[must_use]
    pub const fn time_of_day(&self) -> TimeOfDay {
        self.now
    }

    #[must_use]
    pub const fn ticks_per_minute(&self) -> NonZeroU8 {
        self.ticks_per_minute
    }

    /// Replaces the current time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimeOutOfRange`] if any counter is outside its range.
    pub const fn set_time_of_day(&mut self, time_of_day: TimeOfDay) -> Result<()> {
        if time_of_day.hours >= HOURS_PER_DAY
            || time_of_day.minutes >= MINUTES_PER_HOUR
            || time_of_day.seconds >= self.ticks_per_minute.get()
        {
            return Err(Error::TimeOutOfRange);
        }
        self.now = time_of_day;
        Ok(())
    }

    /// Advances one tick, carrying into minutes and hours.
    pub const fn tick(&mut self) -> Carry {
        let (seconds, next_minute) = increment(self.now.seconds, self.ticks_per_minute.get());
        self.now.seconds = seconds;
        if !next_minute {
            return Carry::None;
        }
        let (minutes, next_hour) = increment(self.now.minutes, MINUTES_PER_HOUR);
        self.now.minutes = minutes;
        if !next_hour {
            return Carry::Minute;
        }
        let (hours, next_day) = increment(self.now.hours, HOURS_PER_DAY);
        self.now.hours = hours;
        if next_day { Carry::Day } else { Carry::Hour }
    }

    /// Adds one minute. Wraps 59 to 0 without touching hours.
    pub const fn advance_minutes_by_edit(&mut self) {
        self.now.minutes = increment(self.now.minutes, MINUTES_PER_HOUR).0;
    }

    /// Adds one hour. Wraps 23 to 0.
    pub const fn advance_hours_by_edit(&mut self) {
        self.now.hours = increment(self.now.hours, HOURS_PER_DAY).0;
    }

    pub const fn apply_edit(&mut self, edit: Edit) {
        match edit {
            Edit::Minutes => self.advance_minutes_by_edit(),
            Edit::Hours => self.advance_hours_by_edit(),
        }
    }
}

/// Returns the next counter value and whether it wrapped to zero.
const fn increment(value: u8, bound: u8) -> (u8, bool) {
    let next = value.saturating_add(1);
    if next >= bound { (0, true) } else { (next, false) }
}
