use embassy_time::Duration;

/// The number of multiplexed cells: four digits plus the colon.
pub const CELL_COUNT_U8: u8 = 5;
pub const CELL_COUNT: usize = CELL_COUNT_U8 as usize;

/// The number of segment lines shared by all cells.
/// Each cell has 8 segments (7 segments plus a decimal point).
pub const SEGMENT_COUNT: usize = 8;

/// Duration representing one minute (60 seconds).
pub const ONE_MINUTE: Duration = Duration::from_secs(60);

/// Duration representing one day (24 hours).
pub const ONE_DAY: Duration = Duration::from_secs(60 * 60 * 24);

/// Period of the timekeeping tick. Two ticks make one second.
pub const CLOCK_TICK_PERIOD: Duration = Duration::from_millis(500);

/// Time each cell stays lit before the scanner moves to the next one.
/// Five cells at 2 ms refresh every digit at 100 Hz.
pub const SCAN_PERIOD: Duration = Duration::from_millis(2);

/// How often the edit buttons are sampled. Slower than the scan, faster than the clock tick.
pub const BUTTON_SAMPLE_PERIOD: Duration = Duration::from_millis(10);

/// Samples between repeated edits while a button is held: 300 ms at [`BUTTON_SAMPLE_PERIOD`].
pub const EDIT_REPEAT_SAMPLES: u16 = 30;

#[cfg(all(test, not(target_os = "none")))]
mod tests {
    use super::*;

    #[test]
    fn test_button_sampling_sits_between_scan_and_tick() {
        assert!(SCAN_PERIOD < BUTTON_SAMPLE_PERIOD);
        assert!(BUTTON_SAMPLE_PERIOD < CLOCK_TICK_PERIOD);
    }

    #[test]
    fn test_held_button_repeats_every_300_ms() {
        assert_eq!(
            BUTTON_SAMPLE_PERIOD.checked_mul(u32::from(EDIT_REPEAT_SAMPLES)),
            Some(Duration::from_millis(300))
        );
    }
}
