//! Tick scheduling for the watchface.
//!
//! The host delivers one tick per minute. Every tick refreshes the clock
//! text; the top of the hour may buzz; the top of hour 0 recomputes the
//! date, moon phase and sun times, which are otherwise constant for the day.
//! Initialization runs the daily path once so the face is never blank.

use anyhow::Result;
use chrono::NaiveDate;

use crate::calendar::{CalendarDate, julian_day};
use crate::config::Config;
use crate::geo::solar::{SolarModel, SunEventTimes, SunriseModel, reconstruct};
use crate::logger::Log;
use crate::moon::{moon_glyph, moon_phase};
use crate::time_format::{format_clock, format_date, format_event_pair};

/// Everything the watchface shows, overwritten in place.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayState {
    /// Main clock, e.g. `"9:41"` or `"21:41"`.
    pub clock: String,
    /// `MM/DD/YYYY`
    pub date: String,
    /// Civil dawn and sunrise, e.g. `"5:06  5:36"`.
    pub rise: String,
    /// Sunset and civil dusk, e.g. `"8:29  9:01"`.
    pub set: String,
    /// Moon-phase font glyph.
    pub moon: char,
    pub moon_phase: i32,
    /// Last successfully computed sun times.
    pub sun_times: Option<SunEventTimes>,
    /// Date the daily values were last computed for.
    pub computed_for: Option<NaiveDate>,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            clock: "00:00".to_string(),
            date: "00/00/0000".to_string(),
            rise: "00:00  00:00".to_string(),
            set: "00:00  00:00".to_string(),
            moon: 'm',
            moon_phase: 0,
            sun_times: None,
            computed_for: None,
        }
    }
}

/// What a single tick did besides refreshing the clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// A short haptic pulse was requested.
    pub pulse: bool,
    /// Date, moon and sun values were recomputed.
    pub recomputed: bool,
}

/// Output capabilities supplied by whatever runs the watchface.
#[cfg_attr(test, mockall::automock)]
pub trait WatchHost {
    /// Show the current display state.
    fn render(&mut self, display: &DisplayState) -> Result<()>;

    /// Emit one short vibration.
    fn short_pulse(&mut self) -> Result<()>;

    /// Release host resources when the face is torn down.
    fn teardown(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Lifecycle entry points a host calls.
pub trait WatchFace {
    fn on_init(&mut self, now: &CalendarDate, host: &mut dyn WatchHost) -> Result<TickOutcome>;

    fn on_minute_tick(&mut self, now: &CalendarDate, host: &mut dyn WatchHost)
    -> Result<TickOutcome>;

    fn on_teardown(&mut self, host: &mut dyn WatchHost) -> Result<()>;
}

/// The almanac face: owns its configuration, solar model and display state.
pub struct DailyScheduler<M: SolarModel = SunriseModel> {
    config: Config,
    model: M,
    display: DisplayState,
}

impl DailyScheduler<SunriseModel> {
    pub fn with_sunrise_model(config: Config) -> Self {
        Self::new(config, SunriseModel)
    }
}

impl<M: SolarModel> DailyScheduler<M> {
    pub fn new(config: Config, model: M) -> Self {
        Self {
            config,
            model,
            display: DisplayState::default(),
        }
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    /// True for top-of-hour ticks inside the configured pulse window.
    pub fn should_pulse(&self, now: &CalendarDate) -> bool {
        now.minute() == 0
            && self.config.hourly_pulse()
            && self.config.pulse_hours().contains(&now.hour())
    }

    /// Recompute the clock text.
    pub fn refresh_clock(&mut self, now: &CalendarDate) {
        self.display.clock = format_clock(now, self.config.use_24h());
    }

    /// Recompute date, moon phase and sun times for `now`'s date.
    ///
    /// A solar model failure keeps the previous sun text; date and moon are
    /// still updated.
    pub fn refresh_daily(&mut self, now: &CalendarDate) {
        let jdn = julian_day(now);

        self.display.date = format_date(now);

        let phase = moon_phase(jdn);
        self.display.moon_phase = phase;
        self.display.moon = moon_glyph(phase);

        match self
            .model
            .solar_events(jdn, self.config.latitude(), self.config.longitude())
        {
            Ok(events) => {
                let times = reconstruct(events, self.config.utc_offset_hours(now));
                let use_24h = self.config.use_24h();
                self.display.rise = format_event_pair(times.dawn, times.sunrise, use_24h);
                self.display.set = format_event_pair(times.sunset, times.dusk, use_24h);
                self.display.sun_times = Some(times);
            }
            Err(e) => {
                Log::log_warning(&format!(
                    "Could not calculate sun times for {}: {}",
                    self.display.date, e
                ));
                Log::log_indented("Keeping previous sun times");
            }
        }

        self.display.computed_for = Some(now.date());
    }
}

impl<M: SolarModel> WatchFace for DailyScheduler<M> {
    fn on_init(&mut self, now: &CalendarDate, host: &mut dyn WatchHost) -> Result<TickOutcome> {
        self.refresh_daily(now);
        self.refresh_clock(now);
        host.render(&self.display)?;
        Ok(TickOutcome {
            pulse: false,
            recomputed: true,
        })
    }

    fn on_minute_tick(
        &mut self,
        now: &CalendarDate,
        host: &mut dyn WatchHost,
    ) -> Result<TickOutcome> {
        let mut outcome = TickOutcome::default();

        self.refresh_clock(now);

        if now.minute() == 0 {
            if self.should_pulse(now) {
                host.short_pulse()?;
                outcome.pulse = true;
            }

            if now.hour() == 0 {
                self.refresh_daily(now);
                outcome.recomputed = true;
            }
        }

        host.render(&self.display)?;
        Ok(outcome)
    }

    fn on_teardown(&mut self, host: &mut dyn WatchHost) -> Result<()> {
        host.teardown()
    }
}
