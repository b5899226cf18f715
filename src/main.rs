//! A 4-digit, 7-segment clock with a blinking colon and two edit buttons.
//!
//! Runs on a Raspberry Pi Pico (RP2040) or Pico 2 (RP2350). Build with
//! `cargo xtask build --board pico1` and see [`mux_clock::hardware`] for the wiring.
#![no_std]
#![no_main]
#![allow(clippy::future_not_send, reason = "Single-threaded")]

use core::convert::Infallible;

use defmt::{Display2Format, info, warn};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::{Ticker, Timer};
use mux_clock::button::{ButtonInput, ButtonState};
use mux_clock::clock_core::{ClockEvent, ClockUpdate, SharedClock};
use mux_clock::clock_time::Carry;
use mux_clock::config::{ClockConfig, HourMode};
use mux_clock::hardware::{ClockButtons, ClockMultiplexer, Hardware};
use mux_clock::{BUTTON_SAMPLE_PERIOD, CLOCK_TICK_PERIOD, ONE_DAY, Result, SCAN_PERIOD};
use panic_probe as _;

#[cfg(feature = "pico2")]
#[expect(unsafe_code, reason = "The boot ROM finds the image definition by link section")]
#[unsafe(link_section = ".start_block")]
#[used]
pub static IMAGE_DEF: embassy_rp::block::ImageDef = embassy_rp::block::ImageDef::secure_exe();

/// Set `CLOCK_HOUR_MODE=12` in the environment or a `.env` file for a 12-hour display.
const CONFIG: ClockConfig =
    ClockConfig::DEFAULT.with_hour_mode(HourMode::from_setting(env!("CLOCK_HOUR_MODE")));

static CLOCK: SharedClock<CriticalSectionRawMutex> = SharedClock::new(&CONFIG);

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    // If it returns, something went wrong.
    match inner_main(spawner).await {
        Ok(never) => match never {},
        Err(err) => panic!("{err}"),
    }
}

async fn inner_main(spawner: Spawner) -> Result<Infallible> {
    let hardware = Hardware::new(&CONFIG);
    info!(
        "Clock starting: {:?}, {} ticks per minute",
        CONFIG.display().hour_mode,
        CONFIG.ticks_per_minute().get()
    );

    spawner.spawn(scan_task(hardware.multiplexer)?);
    spawner.spawn(button_task(hardware.buttons)?);
    spawner.spawn(clock_tick_task()?);

    // All work happens in the tasks.
    loop {
        Timer::after(ONE_DAY).await;
    }
}

#[embassy_executor::task]
async fn clock_tick_task() -> ! {
    let mut ticker = Ticker::every(CLOCK_TICK_PERIOD);
    loop {
        ticker.next().await;
        if let ClockUpdate::Ticked(carry @ (Carry::Hour | Carry::Day)) =
            CLOCK.handle(ClockEvent::Tick)
        {
            let now = CLOCK.time_of_day();
            info!(
                "{:?} rollover, now {=u8}:{=u8}:{=u8}",
                carry,
                now.hours,
                now.minutes,
                now.whole_seconds(CONFIG.ticks_per_minute())
            );
        }
    }
}

#[embassy_executor::task]
async fn button_task(mut buttons: ClockButtons) -> ! {
    let mut ticker = Ticker::every(BUTTON_SAMPLE_PERIOD);
    loop {
        ticker.next().await;
        let sample = buttons.sample().unwrap_or_else(|err| {
            warn!("Button read failed: {}", Display2Format(&err));
            ButtonState::RELEASED
        });
        CLOCK.handle(ClockEvent::ButtonSample(sample));
    }
}

#[embassy_executor::task]
async fn scan_task(mut multiplexer: ClockMultiplexer) -> ! {
    let mut ticker = Ticker::every(SCAN_PERIOD);
    loop {
        ticker.next().await;
        if let Err(err) = CLOCK.scan(&mut multiplexer) {
            warn!("Scan failed: {}", Display2Format(&err));
        }
    }
}
