//! Timekeeping and display multiplexing for a 4-digit, 7-segment clock with a blinking colon.
//!
//! The core is hardware-independent and runs on the host:
//!
//! - [`clock_time`] counts ticks into minutes and hours and applies button edits.
//! - [`display_buffer`] renders a time of day into one segment pattern per display cell.
//! - [`multiplex`] lights those cells one at a time.
//! - [`clock_core`] keeps all of that behind one mutex for run-to-completion handlers.
//!
//! With the `firmware` feature, [`hardware`] binds the core to Raspberry Pi Pico pins.
#![cfg_attr(not(test), no_std)]

pub mod button;
pub mod clock_core;
pub mod clock_time;
pub mod config;
pub mod display_buffer;
mod error;
#[cfg(feature = "firmware")]
pub mod hardware;
pub mod multiplex;
pub mod output_array;
mod shared_constants;

// Re-export commonly used items
pub use error::{Error, Result};
pub use shared_constants::*;
