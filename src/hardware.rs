//! Raspberry Pi Pico wiring for the clock.
//!
//! | Pin        | Use                                               |
//! |------------|---------------------------------------------------|
//! | GP1..GP5   | Cell enables: hour tens, hour ones, colon, minute tens, minute ones |
//! | GP6..GP13  | Segments A..G, then the decimal point             |
//! | GP14       | Minutes edit button, to ground                    |
//! | GP15       | Hours edit button, to ground                      |

use embassy_rp::gpio::{self, Level, Pull};

use crate::button::EditButtons;
use crate::config::{ClockConfig, Polarity};
use crate::multiplex::Multiplexer;
use crate::output_array::OutputArray;
use crate::shared_constants::{CELL_COUNT, SEGMENT_COUNT};

pub type SegmentPins = OutputArray<gpio::Output<'static>, SEGMENT_COUNT>;
pub type CellPins = OutputArray<gpio::Output<'static>, CELL_COUNT>;
pub type ClockMultiplexer = Multiplexer<SegmentPins, CellPins>;
pub type ClockButtons = EditButtons<gpio::Input<'static>, gpio::Input<'static>>;

/// The clock's peripherals, configured and idle: every cell off and every segment dark.
pub struct Hardware {
    pub multiplexer: ClockMultiplexer,
    pub buttons: ClockButtons,
}

impl Hardware {
    #[must_use]
    pub fn new(config: &ClockConfig) -> Self {
        let peripherals: embassy_rp::Peripherals =
            embassy_rp::init(embassy_rp::config::Config::default());

        let cell_off = Level::from(config.digit_polarity().is_high(false));
        let cells = OutputArray::new(
            [
                gpio::Output::new(peripherals.PIN_1, cell_off),
                gpio::Output::new(peripherals.PIN_2, cell_off),
                gpio::Output::new(peripherals.PIN_3, cell_off),
                gpio::Output::new(peripherals.PIN_4, cell_off),
                gpio::Output::new(peripherals.PIN_5, cell_off),
            ],
            config.digit_polarity(),
        );

        let segment_off = Level::from(config.segment_polarity().is_high(false));
        let segments = OutputArray::new(
            [
                gpio::Output::new(peripherals.PIN_6, segment_off),
                gpio::Output::new(peripherals.PIN_7, segment_off),
                gpio::Output::new(peripherals.PIN_8, segment_off),
                gpio::Output::new(peripherals.PIN_9, segment_off),
                gpio::Output::new(peripherals.PIN_10, segment_off),
                gpio::Output::new(peripherals.PIN_11, segment_off),
                gpio::Output::new(peripherals.PIN_12, segment_off),
                gpio::Output::new(peripherals.PIN_13, segment_off),
            ],
            config.segment_polarity(),
        );

        let buttons = EditButtons::new(
            gpio::Input::new(peripherals.PIN_14, Pull::Up),
            gpio::Input::new(peripherals.PIN_15, Pull::Up),
            Polarity::ActiveLow,
        );

        Self {
            multiplexer: Multiplexer::new(segments, cells, config.blank_phase()),
            buttons,
        }
    }
}
