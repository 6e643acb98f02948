//! Text for the watchface: clock, date and sun event times.
//!
//! Two 12-hour conventions coexist on purpose. The big clock uses chrono's
//! `%I` (midnight reads 12) with a leading zero stripped; the sun times use
//! [`format_hour`], which only folds hours above 12 and leaves 0 as 0.

use crate::calendar::CalendarDate;
use crate::geo::HourMinute;

/// Hour as shown in sun event text.
///
/// In 12-hour mode hours above 12 lose 12. Hour 0 is left as 0, not 12.
pub fn format_hour(hour: u32, use_24h: bool) -> u32 {
    if !use_24h && hour > 12 { hour - 12 } else { hour }
}

/// Main clock text: `HH:MM` in 24-hour mode, `H:MM` / `HH:MM` in 12-hour mode.
pub fn format_clock(date: &CalendarDate, use_24h: bool) -> String {
    let time = date.naive().time();
    if use_24h {
        time.format("%R").to_string()
    } else {
        let text = time.format("%I:%M").to_string();
        strip_leading_zero(&text).to_string()
    }
}

/// Drop one leading `'0'`, so `"01:30"` becomes `"1:30"`.
pub fn strip_leading_zero(text: &str) -> &str {
    text.strip_prefix('0').unwrap_or(text)
}

/// Date line, `MM/DD/YYYY`.
pub fn format_date(date: &CalendarDate) -> String {
    date.naive().format("%m/%d/%Y").to_string()
}

/// One sun event, `H:MM` with an unpadded hour.
pub fn format_event(time: HourMinute, use_24h: bool) -> String {
    format!("{}:{:02}", format_hour(time.hour, use_24h), time.minute)
}

/// Two sun events separated by two spaces, e.g. `"5:06  5:36"`.
pub fn format_event_pair(first: HourMinute, second: HourMinute, use_24h: bool) -> String {
    format!(
        "{}  {}",
        format_event(first, use_24h),
        format_event(second, use_24h)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32, minute: u32) -> CalendarDate {
        CalendarDate::new(2024, 6, 21, hour, minute).unwrap()
    }

    fn hm(hour: u32, minute: u32) -> HourMinute {
        HourMinute { hour, minute }
    }

    #[test]
    fn test_format_hour() {
        assert_eq!(format_hour(13, false), 1);
        assert_eq!(format_hour(13, true), 13);
        assert_eq!(format_hour(12, false), 12);
        assert_eq!(format_hour(23, false), 11);
        assert_eq!(format_hour(9, false), 9);
    }

    #[test]
    fn test_format_hour_midnight_stays_zero() {
        // Midnight is not converted to 12 in sun event text
        assert_eq!(format_hour(0, false), 0);
        assert_eq!(format_hour(0, true), 0);
    }

    #[test]
    fn test_clock_12h_strips_leading_zero() {
        assert_eq!(format_clock(&at(1, 5), false), "1:05");
        assert_eq!(format_clock(&at(13, 5), false), "1:05");
        assert_eq!(format_clock(&at(10, 0), false), "10:00");
        assert_eq!(format_clock(&at(22, 45), false), "10:45");
    }

    #[test]
    fn test_clock_12h_midnight_and_noon_read_twelve() {
        assert_eq!(format_clock(&at(0, 30), false), "12:30");
        assert_eq!(format_clock(&at(12, 0), false), "12:00");
    }

    #[test]
    fn test_clock_24h_keeps_leading_zero() {
        assert_eq!(format_clock(&at(1, 5), true), "01:05");
        assert_eq!(format_clock(&at(0, 0), true), "00:00");
        assert_eq!(format_clock(&at(23, 59), true), "23:59");
    }

    #[test]
    fn test_strip_leading_zero_only_once() {
        assert_eq!(strip_leading_zero("01:30"), "1:30");
        assert_eq!(strip_leading_zero("00:30"), "0:30");
        assert_eq!(strip_leading_zero("11:30"), "11:30");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(&at(0, 0)), "06/21/2024");
        let new_year = CalendarDate::new(2025, 1, 1, 12, 0).unwrap();
        assert_eq!(format_date(&new_year), "01/01/2025");
    }

    #[test]
    fn test_event_pairs() {
        assert_eq!(format_event_pair(hm(5, 6), hm(5, 36), false), "5:06  5:36");
        assert_eq!(format_event_pair(hm(20, 29), hm(21, 1), false), "8:29  9:01");
        assert_eq!(format_event_pair(hm(20, 29), hm(21, 1), true), "20:29  21:01");
    }

    #[test]
    fn test_event_at_midnight_keeps_zero_hour() {
        assert_eq!(format_event(hm(0, 15), false), "0:15");
    }
}
