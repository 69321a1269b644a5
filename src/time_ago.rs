use chrono::{DateTime, Utc};

const SECOND: u64 = 1000;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const WEEK: u64 = 7 * DAY;
const MONTH: u64 = 30 * DAY;
const YEAR: u64 = 365 * DAY;

/// Picks the largest unit not exceeding `elapsed_ms`.
///
/// Returns `(scale in milliseconds, plural unit label)`. Divide the elapsed
/// value by the scale to get the count to display.
pub(crate) fn unit_and_scale(elapsed_ms: u64) -> (u64, &'static str) {
    match elapsed_ms {
        e if e < MINUTE => (SECOND, "seconds"),
        e if e < HOUR => (MINUTE, "minutes"),
        e if e < DAY => (HOUR, "hours"),
        e if e < WEEK => (DAY, "days"),
        e if e < MONTH => (WEEK, "weeks"),
        e if e < YEAR => (MONTH, "months"),
        _ => (YEAR, "years"),
    }
}

/// Renders `then` relative to `now`, e.g. `3 days ago`.
///
/// Instants in the future count as zero elapsed time.
pub(crate) fn time_ago(then: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let elapsed = u64::try_from(now.signed_duration_since(then).num_milliseconds()).unwrap_or(0);
    let (scale, unit) = unit_and_scale(elapsed);
    let count = elapsed / scale;
    if count == 1 {
        format!("1 {} ago", unit.trim_end_matches('s'))
    } else {
        format!("{count} {unit} ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn picks_unit_inside_each_bucket() {
        assert_eq!(unit_and_scale(30 * SECOND), (1000, "seconds"));
        assert_eq!(unit_and_scale(30 * MINUTE), (60_000, "minutes"));
        assert_eq!(unit_and_scale(12 * HOUR), (3_600_000, "hours"));
        assert_eq!(unit_and_scale(3 * DAY), (86_400_000, "days"));
        assert_eq!(unit_and_scale(2 * WEEK), (604_800_000, "weeks"));
        assert_eq!(unit_and_scale(6 * MONTH), (2_592_000_000, "months"));
        assert_eq!(unit_and_scale(2 * YEAR), (31_536_000_000, "years"));
    }

    #[test]
    fn boundaries_promote_to_next_unit() {
        assert_eq!(unit_and_scale(0), (1000, "seconds"));
        assert_eq!(unit_and_scale(59_999), (1000, "seconds"));
        assert_eq!(unit_and_scale(60_000), (60_000, "minutes"));
        assert_eq!(unit_and_scale(3_599_999), (60_000, "minutes"));
        assert_eq!(unit_and_scale(3_600_000), (3_600_000, "hours"));
        assert_eq!(unit_and_scale(86_400_000), (86_400_000, "days"));
        assert_eq!(unit_and_scale(604_800_000), (604_800_000, "weeks"));
        assert_eq!(unit_and_scale(2_592_000_000), (2_592_000_000, "months"));
        assert_eq!(unit_and_scale(31_535_999_999), (2_592_000_000, "months"));
        assert_eq!(unit_and_scale(31_536_000_000), (31_536_000_000, "years"));
        assert_eq!(unit_and_scale(u64::MAX), (31_536_000_000, "years"));
    }

    #[test]
    fn renders_truncated_counts() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        assert_eq!(time_ago(&(now - Duration::days(3)), &now), "3 days ago");
        assert_eq!(time_ago(&(now - Duration::hours(1)), &now), "1 hour ago");
        assert_eq!(time_ago(&(now - Duration::days(13)), &now), "1 week ago");
        assert_eq!(time_ago(&(now - Duration::days(800)), &now), "2 years ago");
        assert_eq!(time_ago(&now, &now), "0 seconds ago");
    }

    #[test]
    fn future_dates_clamp_to_zero() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        assert_eq!(time_ago(&(now + Duration::days(2)), &now), "0 seconds ago");
    }
}
