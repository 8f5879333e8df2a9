use chrono::{DateTime, Datelike, TimeZone, Utc};

/// Source of the current time.
///
/// Injected into anything whose behavior depends on elapsed time so tests can
/// drive it deterministically.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Current time as epoch milliseconds.
    fn now_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Current wall-clock time as epoch milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Returns `[start, end)` of the calendar month (UTC) containing `instant`,
/// both as epoch milliseconds.
pub fn month_bounds_millis(instant: DateTime<Utc>) -> (i64, i64) {
    let start = Utc
        .with_ymd_and_hms(instant.year(), instant.month(), 1, 0, 0, 0)
        .single()
        .unwrap_or(instant);
    let (next_year, next_month) = if instant.month() == 12 {
        (instant.year() + 1, 1)
    } else {
        (instant.year(), instant.month() + 1)
    };
    let end = Utc
        .with_ymd_and_hms(next_year, next_month, 1, 0, 0, 0)
        .single()
        .unwrap_or(instant);
    (start.timestamp_millis(), end.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_bounds_mid_month() {
        let instant = Utc.with_ymd_and_hms(2026, 3, 15, 10, 30, 0).unwrap();
        let (start, end) = month_bounds_millis(instant);
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap().timestamp_millis());
        assert_eq!(end, Utc.with_ymd_and_hms(2026, 4, 1, 0, 0, 0).unwrap().timestamp_millis());
    }

    #[test]
    fn test_month_bounds_december_rolls_year() {
        let instant = Utc.with_ymd_and_hms(2026, 12, 31, 23, 59, 59).unwrap();
        let (_, end) = month_bounds_millis(instant);
        assert_eq!(end, Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap().timestamp_millis());
    }
}
