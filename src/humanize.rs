//! Human-readable durations.

use chrono::TimeDelta;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const MONTH: i64 = 30 * DAY;

/// Describe a span in its largest whole unit, e.g. "1 day", "3 weeks".
///
/// Negative spans are described by their magnitude. Months are 30 days.
pub fn describe(span: TimeDelta) -> String {
    let secs = span.num_seconds().abs();
    let (count, unit) = match secs {
        s if s < MINUTE => (s, "second"),
        s if s < HOUR => (s / MINUTE, "minute"),
        s if s < DAY => (s / HOUR, "hour"),
        s if s < WEEK => (s / DAY, "day"),
        s if s < MONTH => (s / WEEK, "week"),
        s => (s / MONTH, "month"),
    };
    plural(count, unit)
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", count, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_largest_whole_unit() {
        assert_eq!(describe(TimeDelta::seconds(0)), "0 seconds");
        assert_eq!(describe(TimeDelta::seconds(1)), "1 second");
        assert_eq!(describe(TimeDelta::seconds(59)), "59 seconds");
        assert_eq!(describe(TimeDelta::minutes(1)), "1 minute");
        assert_eq!(describe(TimeDelta::minutes(90)), "1 hour");
        assert_eq!(describe(TimeDelta::hours(4)), "4 hours");
        assert_eq!(describe(TimeDelta::days(1)), "1 day");
        assert_eq!(describe(TimeDelta::days(6)), "6 days");
        assert_eq!(describe(TimeDelta::days(15)), "2 weeks");
        assert_eq!(describe(TimeDelta::days(37)), "1 month");
        assert_eq!(describe(TimeDelta::days(400)), "13 months");
    }

    #[test]
    fn negative_spans_use_magnitude() {
        assert_eq!(describe(TimeDelta::hours(-2)), "2 hours");
    }
}
