//! Calendar snapshots and Julian day arithmetic.
//!
//! The watchface works in whole days for all astronomy lookups, so the Julian
//! day number here is the integer JDN of the civil date, computed with the
//! classic truncating-division formula.

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, Timelike};

/// Days between JDN 0 and chrono's day 0 of the common era (0000-12-31).
const JDN_OF_CE_DAY_ZERO: i64 = 1_721_425;

/// Immutable wall-clock snapshot delivered to the watchface on every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDate(NaiveDateTime);

impl CalendarDate {
    /// Build a snapshot from components; `None` if any field is out of range.
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)?
            .and_hms_opt(hour, minute, 0)
            .map(Self)
    }

    /// Current local time, truncated to the minute.
    pub fn now_local() -> Self {
        let now = Local::now().naive_local();
        Self(now.with_second(0).unwrap_or(now).with_nanosecond(0).unwrap_or(now))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month, 1 = January.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Day of week, 0 = Sunday.
    pub fn weekday(&self) -> u32 {
        self.0.weekday().num_days_from_sunday()
    }

    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    pub fn naive(&self) -> NaiveDateTime {
        self.0
    }
}

impl From<NaiveDateTime> for CalendarDate {
    fn from(value: NaiveDateTime) -> Self {
        Self(value)
    }
}

/// Julian day number of the snapshot's civil date.
pub fn julian_day(date: &CalendarDate) -> i64 {
    julian_day_from_ymd(date.year() as i64, date.month() as i64, date.day() as i64)
}

/// Gregorian calendar date to Julian day number.
///
/// All divisions truncate toward zero, which is what the formula relies on;
/// do not replace them with floating point or euclidean division.
///
/// ```
/// use almanac::calendar::julian_day_from_ymd;
/// assert_eq!(julian_day_from_ymd(2000, 1, 1), 2_451_545);
/// ```
pub fn julian_day_from_ymd(year: i64, month: i64, day: i64) -> i64 {
    let (y, m) = (year, month);
    day - 32075 + 1461 * (y + 4800 + (m - 14) / 12) / 4 + 367 * (m - 2 - (m - 14) / 12 * 12) / 12
        - 3 * ((y + 4900 + (m - 14) / 12) / 100) / 4
}

/// Civil date for a Julian day number, `None` outside chrono's range.
pub fn date_from_julian_day(jdn: i64) -> Option<NaiveDate> {
    let days_from_ce = i32::try_from(jdn - JDN_OF_CE_DAY_ZERO).ok()?;
    NaiveDate::from_num_days_from_ce_opt(days_from_ce)
}

/// United States daylight saving rule: second Sunday of March through the
/// first Sunday of November.
///
/// `month` is 1-based and `weekday` counts from Sunday = 0. The switch-over
/// hour itself is not modelled; the whole changeover Sunday counts as DST in
/// March and as standard time in November.
pub fn is_us_dst(day: u32, month: u32, weekday: u32) -> bool {
    if !(3..=11).contains(&month) {
        return false;
    }
    if month > 3 && month < 11 {
        return true;
    }
    let previous_sunday = day as i32 - weekday as i32;
    if month == 3 {
        return previous_sunday >= 8;
    }
    previous_sunday <= 0
}
