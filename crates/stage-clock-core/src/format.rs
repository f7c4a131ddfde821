//! Text formatting for durations, wall-clock times and dates.

use chrono::NaiveDateTime;

use crate::error::{ClockError, Result};

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;

/// Format a duration as `MM:SS`, or `HH:MM:SS` once it reaches an hour.
///
/// Every field is zero-padded to two digits. Hours are not wrapped into
/// days, so very long durations simply grow the hour field.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / SECS_PER_HOUR;
    let minutes = (seconds % SECS_PER_HOUR) / SECS_PER_MINUTE;
    let secs = seconds % SECS_PER_MINUTE;

    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}

/// Format the time left until a countdown target.
///
/// Always shows hours (`HH:MM:SS`); switches to `DD:HH:MM:SS` when the
/// remaining time spans at least one full day.
pub fn format_countdown(seconds: u64) -> String {
    let days = seconds / SECS_PER_DAY;
    let hours = (seconds % SECS_PER_DAY) / SECS_PER_HOUR;
    let minutes = (seconds % SECS_PER_HOUR) / SECS_PER_MINUTE;
    let secs = seconds % SECS_PER_MINUTE;

    if days > 0 {
        format!("{days:02}:{hours:02}:{minutes:02}:{secs:02}")
    } else {
        format!("{hours:02}:{minutes:02}:{secs:02}")
    }
}

/// Format a wall-clock time as `HH:MM:SS` (24-hour) or `hh:MM:SS AM` (12-hour).
pub fn format_wall_time(time: &NaiveDateTime, is_24_hour: bool) -> String {
    if is_24_hour {
        time.format("%H:%M:%S").to_string()
    } else {
        time.format("%I:%M:%S %p").to_string()
    }
}

/// Long-form date, e.g. `Sunday, October 18, 2026`.
pub fn format_date(time: &NaiveDateTime) -> String {
    time.format("%A, %B %-d, %Y").to_string()
}

/// Parse a user-entered duration into whole seconds.
///
/// Accepted forms:
/// - bare seconds: `90`
/// - clock notation: `05:00`, `1:30:00`
/// - unit groups: `5m`, `1h30m`, `1h 30m 15s`
pub fn parse_duration(input: &str) -> Result<u64> {
    let trimmed = input.trim();
    let invalid = || ClockError::InvalidDuration(input.to_string());
    if trimmed.is_empty() {
        return Err(invalid());
    }

    if trimmed.contains(':') {
        let parts: Vec<&str> = trimmed.split(':').collect();
        if parts.len() > 3 {
            return Err(invalid());
        }
        let mut total: u64 = 0;
        for (idx, part) in parts.iter().enumerate() {
            let value: u64 = part.trim().parse().map_err(|_| invalid())?;
            // Every field after the leading one is a base-60 digit.
            if idx > 0 && value >= 60 {
                return Err(invalid());
            }
            total = total
                .checked_mul(60)
                .and_then(|t| t.checked_add(value))
                .ok_or_else(invalid)?;
        }
        return Ok(total);
    }

    if let Ok(secs) = trimmed.parse::<u64>() {
        return Ok(secs);
    }

    let mut total: u64 = 0;
    let mut digits = String::new();
    for ch in trimmed.chars() {
        match ch {
            '0'..='9' => digits.push(ch),
            'h' | 'H' | 'm' | 'M' | 's' | 'S' => {
                let value: u64 = digits.parse().map_err(|_| invalid())?;
                digits.clear();
                let unit = match ch.to_ascii_lowercase() {
                    'h' => SECS_PER_HOUR,
                    'm' => SECS_PER_MINUTE,
                    _ => 1,
                };
                total = value
                    .checked_mul(unit)
                    .and_then(|v| total.checked_add(v))
                    .ok_or_else(invalid)?;
            }
            c if c.is_whitespace() => {}
            _ => return Err(invalid()),
        }
    }
    if !digits.is_empty() {
        return Err(invalid());
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn duration_minutes_only() {
        assert_eq!(format_duration(0), "00:00");
        assert_eq!(format_duration(59), "00:59");
        assert_eq!(format_duration(60), "01:00");
        assert_eq!(format_duration(3599), "59:59");
    }

    #[test]
    fn duration_with_hours() {
        assert_eq!(format_duration(3600), "01:00:00");
        assert_eq!(format_duration(3661), "01:01:01");
        // Hours keep growing past a day.
        assert_eq!(format_duration(100 * 3600), "100:00:00");
    }

    #[test]
    fn countdown_forms() {
        assert_eq!(format_countdown(0), "00:00:00");
        assert_eq!(format_countdown(90), "00:01:30");
        assert_eq!(format_countdown(86_399), "23:59:59");
        assert_eq!(format_countdown(86_400), "01:00:00:00");
        assert_eq!(format_countdown(2 * 86_400 + 3 * 3600 + 4 * 60 + 5), "02:03:04:05");
    }

    #[test]
    fn wall_time_24_and_12_hour() {
        assert_eq!(format_wall_time(&at(14, 5, 9), true), "14:05:09");
        assert_eq!(format_wall_time(&at(14, 5, 9), false), "02:05:09 PM");
        assert_eq!(format_wall_time(&at(0, 0, 0), false), "12:00:00 AM");
    }

    #[test]
    fn long_date() {
        assert_eq!(format_date(&at(9, 0, 0)), "Sunday, October 18, 2026");
    }

    #[test]
    fn parse_duration_forms() {
        assert_eq!(parse_duration("90").unwrap(), 90);
        assert_eq!(parse_duration("05:00").unwrap(), 300);
        assert_eq!(parse_duration("1:30:00").unwrap(), 5400);
        assert_eq!(parse_duration("5m").unwrap(), 300);
        assert_eq!(parse_duration("1h30m").unwrap(), 5400);
        assert_eq!(parse_duration("1h 30m 15s").unwrap(), 5415);
        assert_eq!(parse_duration(" 45S ").unwrap(), 45);
    }

    #[test]
    fn parse_duration_rejects_garbage() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("abc").is_err());
        assert!(parse_duration("5x").is_err());
        assert!(parse_duration("12m3").is_err());
        assert!(parse_duration("1:75").is_err());
        assert!(parse_duration("1:2:3:4").is_err());
        assert!(parse_duration("-5").is_err());
    }
}
