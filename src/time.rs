use chrono::{Local, Utc};

const SECOND: u64 = 1;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const WEEK: u64 = 7 * DAY;
const MONTH: u64 = 30 * DAY;
const YEAR: u64 = 365 * DAY;

/// Returns the current unix timestamp, in seconds.
pub fn current_timestamp() -> u64 {
    Utc::now().timestamp() as u64
}

/// Formats a timestamp into a human-readable duration string, e.g.
/// "2 hours ago", "last week". Returns "never" for 0 and "now" for anything
/// less than 30 seconds ago.
pub fn format_since(time: u64) -> String {
    if time == 0 {
        return String::from("never");
    }
    let now = Local::now().timestamp() as u64;
    let duration = now.saturating_sub(time);

    let unit: &str;
    let value: u64;
    if duration < MINUTE {
        unit = "second";
        if duration < 30 {
            return String::from("now");
        }
        value = duration;
    } else if duration < HOUR {
        unit = "minute";
        value = duration / MINUTE;
    } else if duration < DAY {
        unit = "hour";
        value = duration / HOUR;
    } else if duration < WEEK {
        unit = "day";
        value = duration / DAY;
    } else if duration < MONTH {
        unit = "week";
        value = duration / WEEK;
    } else if duration < YEAR {
        unit = "month";
        value = duration / MONTH;
    } else {
        unit = "year";
        value = duration / YEAR;
    }

    if value > 1 {
        format!("{value} {unit}s ago")
    } else {
        format!("last {unit}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_since() {
        assert_eq!(format_since(0), "never");

        let now = current_timestamp();
        assert_eq!(format_since(now), "now");
        assert_eq!(format_since(now - 2 * MINUTE), "2 minutes ago");
        assert_eq!(format_since(now - HOUR), "last hour");
        assert_eq!(format_since(now - 3 * DAY), "3 days ago");
        assert_eq!(format_since(now - 2 * YEAR), "2 years ago");
    }
}
