//! Dawn, sunrise, sunset and dusk for the configured location.
//!
//! Solar geometry is delegated to a [`SolarModel`]. A model answers in
//! *fractional days* referenced to noon UTC of the Julian day (the Julian day
//! starts at noon), the convention of the classic sun calculators the
//! watchface was built around. [`reconstruct`] turns those raw fractions into
//! local hour/minute pairs.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sunrise::{Coordinates, DawnType, SolarDay, SolarEvent};

use crate::calendar::date_from_julian_day;
use crate::constants::{MAX_EVENT_DAY_FRACTION, MINUTES_PER_DAY, SECONDS_PER_DAY, UNIX_EPOCH_JD};

/// Raw model output: four times of day as fractions of a day, 0.0 = noon UTC.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarEvents {
    pub dawn: f64,
    pub sunrise: f64,
    pub sunset: f64,
    pub dusk: f64,
}

/// A wall-clock time with 24-hour hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HourMinute {
    pub hour: u32,
    pub minute: u32,
}

/// Local sun event times for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SunEventTimes {
    pub dawn: HourMinute,
    pub sunrise: HourMinute,
    pub sunset: HourMinute,
    pub dusk: HourMinute,
}

/// Source of raw solar event fractions for a day and place.
#[cfg_attr(test, mockall::automock)]
pub trait SolarModel {
    /// Civil dawn, sunrise, sunset and civil dusk for the Julian day `jdn`.
    fn solar_events(&self, jdn: i64, latitude: f64, longitude: f64) -> Result<SolarEvents>;
}

/// [`SolarModel`] backed by the `sunrise` crate, using civil twilight
/// (sun 6° below the horizon) for dawn and dusk.
#[derive(Debug, Default, Clone, Copy)]
pub struct SunriseModel;

impl SolarModel for SunriseModel {
    fn solar_events(&self, jdn: i64, latitude: f64, longitude: f64) -> Result<SolarEvents> {
        let date = date_from_julian_day(jdn)
            .with_context(|| format!("Julian day {} is outside the supported calendar", jdn))?;

        let coord = Coordinates::new(latitude, longitude).ok_or_else(|| {
            anyhow::anyhow!("Invalid coordinates: {}, {}", latitude, longitude)
        })?;
        let solar_day = SolarDay::new(coord, date);

        let fraction = |event: SolarEvent, name: &str| -> Result<f64> {
            let instant = solar_day.event_time(event);
            let value = day_fraction(&instant, jdn);
            // Events that do not happen come back as the Unix epoch
            if instant.timestamp() == 0
                || !(-MAX_EVENT_DAY_FRACTION..=MAX_EVENT_DAY_FRACTION).contains(&value)
            {
                anyhow::bail!("No {} on {} at {:.4}, {:.4}", name, date, latitude, longitude);
            }
            Ok(value)
        };

        Ok(SolarEvents {
            dawn: fraction(SolarEvent::Dawn(DawnType::Civil), "civil dawn")?,
            sunrise: fraction(SolarEvent::Sunrise, "sunrise")?,
            sunset: fraction(SolarEvent::Sunset, "sunset")?,
            dusk: fraction(SolarEvent::Dusk(DawnType::Civil), "civil dusk")?,
        })
    }
}

/// Express a UTC instant as a fraction of a day relative to noon of `jdn`.
pub fn day_fraction(instant: &DateTime<Utc>, jdn: i64) -> f64 {
    let julian_date = instant.timestamp_millis() as f64 / 1000.0 / SECONDS_PER_DAY + UNIX_EPOCH_JD;
    julian_date - jdn as f64
}

/// Local time of day for one raw model fraction.
///
/// The `+ 0.5` moves the noon-referenced value to midnight, the timezone term
/// moves UTC to local time, and only the fractional part survives. Minutes are
/// rounded and wrapped modulo 60 without carrying into the hour, so a time of
/// 10:59.6 reads 10:00.
pub fn reconstruct_one(fraction: f64, tz_offset_hours: f64) -> HourMinute {
    let adjusted = fraction + 0.5 + tz_offset_hours / 24.0;
    let mut time_of_day = adjusted - adjusted.floor();
    // A tiny negative value minus its floor rounds to exactly 1.0
    if time_of_day >= 1.0 {
        time_of_day = 0.0;
    }
    HourMinute {
        hour: (time_of_day * 24.0).floor() as u32,
        minute: (time_of_day * MINUTES_PER_DAY + 0.5).floor() as u32 % 60,
    }
}

/// Local sun event times from raw model output.
pub fn reconstruct(events: SolarEvents, tz_offset_hours: f64) -> SunEventTimes {
    SunEventTimes {
        dawn: reconstruct_one(events.dawn, tz_offset_hours),
        sunrise: reconstruct_one(events.sunrise, tz_offset_hours),
        sunset: reconstruct_one(events.sunset, tz_offset_hours),
        dusk: reconstruct_one(events.dusk, tz_offset_hours),
    }
}
