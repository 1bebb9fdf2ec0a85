//! Half-open time windows used for double-booking checks.

use std::fmt;

use chrono::{NaiveTime, Timelike};

use crate::reservation::ValidationError;

/// A `[start, start + duration)` interval on a single day, in minutes since
/// midnight.
///
/// The end may lie past 24:00 for late bookings; it is compared on the same
/// scale and does not wrap into the next day.
///
/// # Examples
///
/// ```
/// use chrono::NaiveTime;
/// use maitre::TimeWindow;
///
/// let dinner = TimeWindow::new(NaiveTime::from_hms_opt(18, 0, 0).unwrap(), 120).unwrap();
/// let late = TimeWindow::new(NaiveTime::from_hms_opt(20, 0, 0).unwrap(), 60).unwrap();
/// assert!(!dinner.overlaps(&late));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    start: u32,
    end: u32,
}

impl TimeWindow {
    /// Creates a window starting at `time` and lasting `duration_minutes`.
    ///
    /// Seconds in `time` are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if `duration_minutes` is zero.
    pub fn new(time: NaiveTime, duration_minutes: u32) -> Result<Self, ValidationError> {
        if duration_minutes == 0 {
            return Err(ValidationError::new(
                "duration_minutes",
                "must be greater than zero",
            ));
        }
        let start = time.hour() * 60 + time.minute();
        Ok(Self {
            start,
            end: start.saturating_add(duration_minutes),
        })
    }

    /// Minutes since midnight at which the window opens.
    #[must_use]
    pub const fn start(&self) -> u32 {
        self.start
    }

    /// Minutes since midnight at which the window closes (exclusive).
    #[must_use]
    pub const fn end(&self) -> u32 {
        self.end
    }

    /// Returns `true` if the two windows share at least one minute.
    ///
    /// Windows that merely touch (one ends when the other begins) do not
    /// overlap.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}-{:02}:{:02}",
            self.start / 60,
            self.start % 60,
            self.end / 60,
            self.end % 60
        )
    }
}

/// Drops seconds and sub-seconds so times compare at minute precision.
#[must_use]
pub fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_window_bounds() {
        let window = TimeWindow::new(at(18, 30), 90).unwrap();
        assert_eq!(window.start(), 18 * 60 + 30);
        assert_eq!(window.end(), 20 * 60);
        assert_eq!(window.to_string(), "18:30-20:00");
    }

    #[test]
    fn test_zero_duration_rejected() {
        let err = TimeWindow::new(at(12, 0), 0).unwrap_err();
        assert_eq!(err.field, "duration_minutes");
    }

    #[test]
    fn test_overlap_cases() {
        let base = TimeWindow::new(at(18, 0), 120).unwrap();

        assert!(base.overlaps(&TimeWindow::new(at(18, 30), 60).unwrap()));
        assert!(base.overlaps(&TimeWindow::new(at(17, 0), 90).unwrap()));
        assert!(base.overlaps(&TimeWindow::new(at(17, 0), 240).unwrap()));
        assert!(base.overlaps(&base));

        // Touching edges are not overlaps
        assert!(!base.overlaps(&TimeWindow::new(at(20, 0), 60).unwrap()));
        assert!(!base.overlaps(&TimeWindow::new(at(16, 0), 120).unwrap()));
    }

    #[test]
    fn test_window_past_midnight() {
        let late = TimeWindow::new(at(23, 0), 120).unwrap();
        assert_eq!(late.end(), 25 * 60);
        assert_eq!(late.to_string(), "23:00-25:00");
        assert!(late.overlaps(&TimeWindow::new(at(23, 30), 30).unwrap()));
    }

    #[test]
    fn test_truncate_to_minute() {
        let time = NaiveTime::from_hms_milli_opt(19, 45, 31, 250).unwrap();
        assert_eq!(truncate_to_minute(time), at(19, 45));
    }
}
