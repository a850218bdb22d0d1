//! Taskbar clock formatting.

use platform_host::LocalClockTime;
use serde::{Deserialize, Serialize};

/// Seconds between taskbar clock refreshes.
pub const CLOCK_REFRESH_SECS: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClockConfig {
    #[serde(default)]
    pub use_24_hour: bool,
}

/// Formats `time` as a short two-digit clock (`09:05 PM` or `21:05`).
pub fn format_clock(time: LocalClockTime, config: ClockConfig) -> String {
    if config.use_24_hour {
        return format!("{:02}:{:02}", time.hour, time.minute);
    }
    let meridiem = if time.hour < 12 { "AM" } else { "PM" };
    let hour = match time.hour % 12 {
        0 => 12,
        hour => hour,
    };
    format!("{hour:02}:{:02} {meridiem}", time.minute)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const TWELVE_HOUR: ClockConfig = ClockConfig { use_24_hour: false };
    const TWENTY_FOUR_HOUR: ClockConfig = ClockConfig { use_24_hour: true };

    #[test]
    fn twelve_hour_clock_handles_midnight_and_noon() {
        assert_eq!(format_clock(LocalClockTime::new(0, 5), TWELVE_HOUR), "12:05 AM");
        assert_eq!(format_clock(LocalClockTime::new(12, 0), TWELVE_HOUR), "12:00 PM");
        assert_eq!(format_clock(LocalClockTime::new(21, 47), TWELVE_HOUR), "09:47 PM");
    }

    #[test]
    fn twenty_four_hour_clock_pads_both_fields() {
        assert_eq!(format_clock(LocalClockTime::new(7, 3), TWENTY_FOUR_HOUR), "07:03");
        assert_eq!(format_clock(LocalClockTime::new(23, 59), TWENTY_FOUR_HOUR), "23:59");
    }
}
