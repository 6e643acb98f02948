use almanac::calendar::{CalendarDate, date_from_julian_day, julian_day, julian_day_from_ymd};
use almanac::constants::*;
use almanac::geo::solar::reconstruct_one;
use almanac::moon::{moon_glyph, moon_phase};
use almanac::time_format::format_hour;
use chrono::{Datelike, Duration, NaiveDate};
use proptest::prelude::*;

/// Days from 1900-01-01 up to the end of 2199
fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..109_572).prop_map(|offset| {
        NaiveDate::from_ymd_opt(1900, 1, 1).unwrap() + Duration::days(offset)
    })
}

/// Whole and half hour offsets within the accepted timezone range
fn timezone_strategy() -> impl Strategy<Value = f64> {
    (-24i32..=28).prop_map(|half_hours| half_hours as f64 / 2.0)
}

fn jdn_of(date: NaiveDate) -> i64 {
    julian_day_from_ymd(date.year() as i64, date.month() as i64, date.day() as i64)
}

/// Raw fraction that reconstructs to `minute_of_day` a quarter minute in,
/// far from any rounding edge.
fn fraction_for(minute_of_day: u32, tz: f64) -> f64 {
    (minute_of_day as f64 + 0.25) / MINUTES_PER_DAY - 0.5 - tz / 24.0
}

mod julian_day_tests {
    use super::*;

    proptest! {
        #[test]
        fn test_consecutive_dates_differ_by_one(date in date_strategy()) {
            let next = date.succ_opt().unwrap();
            prop_assert_eq!(jdn_of(next) - jdn_of(date), 1);
        }

        #[test]
        fn test_julian_day_round_trips_to_date(date in date_strategy()) {
            prop_assert_eq!(date_from_julian_day(jdn_of(date)), Some(date));
        }

        #[test]
        fn test_snapshot_time_of_day_does_not_change_jdn(
            date in date_strategy(),
            hour in 0u32..24,
            minute in 0u32..60
        ) {
            let snapshot = CalendarDate::new(date.year(), date.month(), date.day(), hour, minute).unwrap();
            prop_assert_eq!(julian_day(&snapshot), jdn_of(date));
        }
    }
}

mod moon_phase_tests {
    use super::*;

    const EPOCH_JDN: i64 = 2_451_551;

    proptest! {
        #[test]
        fn test_index_in_range_after_epoch(jdn in EPOCH_JDN..EPOCH_JDN + 200_000) {
            let phase = moon_phase(jdn);
            prop_assert!((0..=MOON_PHASE_STEPS).contains(&phase), "phase {} for {}", phase, jdn);
        }

        #[test]
        fn test_consecutive_days_move_at_most_one_glyph(jdn in EPOCH_JDN..EPOCH_JDN + 200_000) {
            let today = moon_phase(jdn).rem_euclid(MOON_PHASE_STEPS);
            let tomorrow = moon_phase(jdn + 1).rem_euclid(MOON_PHASE_STEPS);
            let step = (tomorrow - today).rem_euclid(MOON_PHASE_STEPS);
            prop_assert!(step <= 1, "{} -> {} at {}", today, tomorrow, jdn);
        }

        #[test]
        fn test_phase_repeats_after_one_synodic_month(jdn in EPOCH_JDN..EPOCH_JDN + 200_000) {
            let period = SYNODIC_MONTH_DAYS.round() as i64;
            let now = moon_phase(jdn).rem_euclid(MOON_PHASE_STEPS);
            let later = moon_phase(jdn + period).rem_euclid(MOON_PHASE_STEPS);
            let distance = (later - now).rem_euclid(MOON_PHASE_STEPS);
            prop_assert!(distance <= 1 || distance == MOON_PHASE_STEPS - 1);
        }

        #[test]
        fn test_glyph_always_in_font(jdn in 2_000_000i64..2_700_000) {
            let glyph = moon_glyph(moon_phase(jdn));
            prop_assert!(('a'..='z').contains(&glyph));
        }
    }
}

mod reconstruction_tests {
    use super::*;

    proptest! {
        #[test]
        fn test_reconstructs_exact_minute(minute_of_day in 0u32..1440, tz in timezone_strategy()) {
            let time = reconstruct_one(fraction_for(minute_of_day, tz), tz);
            prop_assert_eq!(time.hour, minute_of_day / 60);
            prop_assert_eq!(time.minute, minute_of_day % 60);
        }

        #[test]
        fn test_whole_day_offset_is_invisible(minute_of_day in 0u32..1440, tz in timezone_strategy()) {
            let fraction = fraction_for(minute_of_day, tz);
            prop_assert_eq!(reconstruct_one(fraction, tz), reconstruct_one(fraction, tz + 24.0));
        }

        #[test]
        fn test_output_always_in_range(fraction in -2.0f64..2.0, tz in -12.0f64..=14.0) {
            let time = reconstruct_one(fraction, tz);
            prop_assert!(time.hour < 24);
            prop_assert!(time.minute < 60);
        }

        #[test]
        fn test_twelve_hour_text_never_exceeds_twelve(hour in 0u32..24) {
            prop_assert!(format_hour(hour, false) <= 12);
            prop_assert_eq!(format_hour(hour, true), hour);
        }
    }
}
