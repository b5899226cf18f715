//! The clock's shared state and the handlers that run against it.
//!
//! [`ClockCore`] bundles the time counters, the rendered display buffer, and the edit-repeat
//! pacing. [`SharedClock`] puts one `ClockCore` behind a blocking mutex so the clock tick, the
//! button sample, and the scan tick can each run to completion without seeing a half-updated
//! buffer.
//!
//! ```
//! use embassy_sync::blocking_mutex::raw::NoopRawMutex;
//! use mux_clock::button::ButtonState;
//! use mux_clock::clock_core::{ClockEvent, SharedClock};
//! use mux_clock::config::ClockConfig;
//!
//! let clock: SharedClock<NoopRawMutex> = SharedClock::new(&ClockConfig::DEFAULT);
//! let hours = ButtonState { minutes: false, hours: true };
//! clock.handle(ClockEvent::ButtonSample(hours));
//! assert_eq!(clock.time_of_day().hours, 1);
//! ```

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::Result;
use crate::button::{ButtonState, EditRepeat};
use crate::clock_time::{Carry, ClockTime, Edit, TimeOfDay};
use crate::config::{ClockConfig, DisplayConfig};
use crate::display_buffer::DisplayBuffer;
use crate::multiplex::{DigitSelect, Multiplexer, ScanCursor, SegmentOutput};

#[cfg(feature = "defmt")]
use defmt::debug;

/// Something that happened to the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockEvent {
    /// One clock tick elapsed.
    Tick,
    /// The edit buttons were sampled.
    ButtonSample(ButtonState),
}

/// What handling a [`ClockEvent`] changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockUpdate {
    /// Nothing changed.
    Idle,
    Ticked(Carry),
    Edited(Edit),
}

impl ClockEvent {
    fn apply(self, clock: &mut ClockTime, edit_repeat: &mut EditRepeat) -> ClockUpdate {
        match self {
            Self::Tick => ClockUpdate::Ticked(clock.tick()),
            Self::ButtonSample(buttons) => match edit_repeat.update(buttons.edit()) {
                Some(edit) => {
                    clock.apply_edit(edit);
                    ClockUpdate::Edited(edit)
                }
                None => ClockUpdate::Idle,
            },
        }
    }
}

/// Everything the handlers share.
#[derive(Debug, Clone)]
pub struct ClockCore {
    clock: ClockTime,
    display: DisplayBuffer,
    display_config: DisplayConfig,
    edit_repeat: EditRepeat,
}

impl ClockCore {
    /// A clock at midnight with its display already rendered.
    #[must_use]
    pub const fn new(config: &ClockConfig) -> Self {
        let clock = ClockTime::new(config.ticks_per_minute());
        let display_config = config.display();
        Self {
            display: DisplayBuffer::recompute(&clock.time_of_day(), &display_config),
            clock,
            display_config,
            edit_repeat: EditRepeat::new(config.edit_repeat_samples()),
        }
    }

    /// Applies `event` and re-renders the display if the time changed.
    pub fn handle(&mut self, event: ClockEvent) -> ClockUpdate {
        let update = event.apply(&mut self.clock, &mut self.edit_repeat);
        if update != ClockUpdate::Idle {
            self.refresh();
        }
        #[cfg(feature = "defmt")]
        if let ClockUpdate::Edited(edit) = update {
            debug!("Edit {:?} -> {:?}", edit, self.clock.time_of_day());
        }
        update
    }

    /// Replaces the current time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimeOutOfRange`](crate::Error::TimeOutOfRange) if any counter is out of
    /// range, leaving the clock unchanged.
    pub fn set_time_of_day(&mut self, time_of_day: TimeOfDay) -> Result<()> {
        self.clock.set_time_of_day(time_of_day)?;
        self.refresh();
        Ok(())
    }

    #[must_use]
    pub const fn time_of_day(&self) -> TimeOfDay {
        self.clock.time_of_day()
    }

    #[must_use]
    pub const fn display_buffer(&self) -> DisplayBuffer {
        self.display
    }

    fn refresh(&mut self) {
        self.display = DisplayBuffer::recompute(&self.clock.time_of_day(), &self.display_config);
    }
}

/// A [`ClockCore`] shared between run-to-completion handlers.
///
/// Use `CriticalSectionRawMutex` when handlers may preempt each other, `NoopRawMutex` when they
/// all run on one thread.
pub struct SharedClock<M: RawMutex>(Mutex<M, RefCell<ClockCore>>);

impl<M: RawMutex> SharedClock<M> {
    #[must_use]
    pub const fn new(config: &ClockConfig) -> Self {
        Self(Mutex::new(RefCell::new(ClockCore::new(config))))
    }

    pub fn handle(&self, event: ClockEvent) -> ClockUpdate {
        self.0.lock(|core| core.borrow_mut().handle(event))
    }

    /// Drives the next multiplexed cell from the current display buffer.
    ///
    /// # Errors
    ///
    /// Returns the multiplexer's line error.
    pub fn scan<S: SegmentOutput, D: DigitSelect>(
        &self,
        multiplexer: &mut Multiplexer<S, D>,
    ) -> Result<ScanCursor> {
        self.0
            .lock(|core| multiplexer.scan_step(&core.borrow().display))
    }

    /// # Errors
    ///
    /// See [`ClockCore::set_time_of_day`].
    pub fn set_time_of_day(&self, time_of_day: TimeOfDay) -> Result<()> {
        self.0
            .lock(|core| core.borrow_mut().set_time_of_day(time_of_day))
    }

    #[must_use]
    pub fn time_of_day(&self) -> TimeOfDay {
        self.0.lock(|core| core.borrow().time_of_day())
    }

    #[must_use]
    pub fn display_buffer(&self) -> DisplayBuffer {
        self.0.lock(|core| core.borrow().display)
    }
}

#[cfg(all(test, not(target_os = "none")))]
mod tests {
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

    use super::*;
    use crate::display_buffer::{Cell, Digit, Leds};

    const MINUTES: ButtonState = ButtonState {
        minutes: true,
        hours: false,
    };

    fn core_at(hours: u8, minutes: u8, seconds: u8) -> ClockCore {
        let mut core = ClockCore::new(&ClockConfig::DEFAULT);
        core.set_time_of_day(TimeOfDay {
            hours,
            minutes,
            seconds,
        })
        .expect("valid time");
        core
    }

    #[test]
    fn test_new_renders_midnight() {
        let core = ClockCore::new(&ClockConfig::DEFAULT);
        assert_eq!(
            core.display_buffer(),
            DisplayBuffer::recompute(&TimeOfDay::MIDNIGHT, &DisplayConfig::DEFAULT)
        );
        assert_eq!(core.display_buffer()[Cell::HourTens], Digit::ones(0).bits());
    }

    #[test]
    fn test_tick_refreshes_colon() {
        let mut core = core_at(12, 0, 0);
        assert_eq!(core.display_buffer()[Cell::Colon], Leds::BLANK);
        assert_eq!(core.handle(ClockEvent::Tick), ClockUpdate::Ticked(Carry::None));
        assert_eq!(core.display_buffer()[Cell::Colon], Leds::COLON);
    }

    #[test]
    fn test_chorded_sample_is_idle() {
        let mut core = core_at(9, 59, 3);
        let both = ButtonState {
            minutes: true,
            hours: true,
        };
        let before = core.display_buffer();
        assert_eq!(core.handle(ClockEvent::ButtonSample(both)), ClockUpdate::Idle);
        assert_eq!(core.time_of_day().minutes, 59);
        assert_eq!(core.time_of_day().hours, 9);
        assert_eq!(core.display_buffer(), before);
    }

    #[test]
    fn test_edit_refreshes_display_immediately() {
        let mut core = core_at(9, 59, 3);
        assert_eq!(
            core.handle(ClockEvent::ButtonSample(MINUTES)),
            ClockUpdate::Edited(Edit::Minutes)
        );
        assert_eq!(core.time_of_day().hours, 9);
        assert_eq!(core.display_buffer()[Cell::MinuteTens], Digit::ones(0).bits());
        assert_eq!(core.display_buffer()[Cell::MinuteOnes], Digit::ones(0).bits());
        // Held: the repeat interval has not elapsed yet
        assert_eq!(core.handle(ClockEvent::ButtonSample(MINUTES)), ClockUpdate::Idle);
    }

    #[test]
    fn test_failed_set_time_keeps_display() {
        let mut core = core_at(1, 2, 3);
        let before = core.display_buffer();
        let bad = TimeOfDay {
            hours: 30,
            minutes: 0,
            seconds: 0,
        };
        assert!(core.set_time_of_day(bad).is_err());
        assert_eq!(core.display_buffer(), before);
    }

    #[test]
    fn test_shared_clock_under_critical_section() {
        static CLOCK: SharedClock<CriticalSectionRawMutex> = SharedClock::new(&ClockConfig::DEFAULT);
        CLOCK
            .set_time_of_day(TimeOfDay {
                hours: 23,
                minutes: 59,
                seconds: 119,
            })
            .expect("valid time");
        assert_eq!(CLOCK.handle(ClockEvent::Tick), ClockUpdate::Ticked(Carry::Day));
        assert_eq!(CLOCK.time_of_day(), TimeOfDay::MIDNIGHT);
        assert_eq!(
            CLOCK.display_buffer(),
            DisplayBuffer::recompute(&TimeOfDay::MIDNIGHT, &DisplayConfig::DEFAULT)
        );
    }
}
