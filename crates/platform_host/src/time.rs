//! Wall-clock helpers shared across host contracts and adapters.

#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Hour and minute of the host's local wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LocalClockTime {
    /// Hour of day, `0..=23`.
    pub hour: u32,
    /// Minute of hour, `0..=59`.
    pub minute: u32,
}

impl LocalClockTime {
    /// Builds a clock time, wrapping out-of-range values into the valid range.
    pub const fn new(hour: u32, minute: u32) -> Self {
        Self {
            hour: hour % 24,
            minute: minute % 60,
        }
    }

    /// Reads the current local time.
    ///
    /// Browser builds read `Date` in the user's time zone. Native builds have no portable local
    /// zone lookup and report UTC.
    pub fn now() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            let date = js_sys::Date::new_0();
            Self::new(date.get_hours(), date.get_minutes())
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let secs = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs();
            let minutes_today = (secs / 60) % (24 * 60);
            Self::new((minutes_today / 60) as u32, (minutes_today % 60) as u32)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn new_wraps_out_of_range_components() {
        assert_eq!(LocalClockTime::new(25, 61), LocalClockTime { hour: 1, minute: 1 });
    }

    #[test]
    fn now_is_always_in_range() {
        let now = LocalClockTime::now();
        assert!(now.hour < 24);
        assert!(now.minute < 60);
    }
}
