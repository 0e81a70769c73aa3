//! System time of day

use jiff::Zoned;
use jukebox_display::{TimeOfDay, WallClock};

/// Local time from the operating system's time zone database
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now(&self) -> TimeOfDay {
        let now = Zoned::now();
        TimeOfDay {
            hour: now.hour() as u8,
            minute: now.minute() as u8,
            second: now.second() as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_is_in_range() {
        let now = SystemClock.now();
        assert!(now.hour < 24);
        assert!(now.minute < 60);
        assert!(now.second < 60);
    }
}
