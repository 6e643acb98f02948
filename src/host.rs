//! Terminal host for the watchface.
//!
//! Prints the display to stdout through [`Log`] and turns pulses into a
//! terminal bell. Also provides the clock arithmetic the live loop needs and
//! a sleep-free replay of a whole day.

use anyhow::Result;
use chrono::{DateTime, Duration as ChronoDuration, NaiveDate, NaiveDateTime, Timelike, Utc};
use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::calendar::CalendarDate;
use crate::constants::{MINUTES_IN_SIMULATED_DAY, SLEEP_DETECTION_THRESHOLD_SECS};
use crate::logger::Log;
use crate::moon::phase_name;
use crate::scheduler::{DisplayState, WatchFace, WatchHost};

/// Prints the face whenever its daily values change, and the clock on every
/// other render unless clock lines are turned off.
pub struct TerminalHost {
    print_clock: bool,
    ring_bell: bool,
    last_daily: Option<(String, String, String, char)>,
    pulses: u32,
    renders: u32,
}

impl TerminalHost {
    /// Host for the live loop: every minute is printed and pulses ring the bell.
    pub fn new() -> Self {
        Self {
            print_clock: true,
            ring_bell: true,
            last_daily: None,
            pulses: 0,
            renders: 0,
        }
    }

    /// Host for replays: only daily changes and pulses are printed.
    pub fn quiet() -> Self {
        Self {
            print_clock: false,
            ring_bell: false,
            ..Self::new()
        }
    }

    pub fn pulses(&self) -> u32 {
        self.pulses
    }

    pub fn renders(&self) -> u32 {
        self.renders
    }
}

impl Default for TerminalHost {
    fn default() -> Self {
        Self::new()
    }
}

impl WatchHost for TerminalHost {
    fn render(&mut self, display: &DisplayState) -> Result<()> {
        self.renders += 1;

        let daily = (
            display.date.clone(),
            display.rise.clone(),
            display.set.clone(),
            display.moon,
        );

        if self.last_daily.as_ref() != Some(&daily) {
            Log::log_block_start(&format!("{}  {}", display.clock, display.date));
            Log::log_indented(&format!(
                "Moon: {} ({})",
                display.moon,
                phase_name(display.moon_phase)
            ));
            Log::log_indented(&format!("Dawn / sunrise: {}", display.rise));
            Log::log_indented(&format!("Sunset / dusk:  {}", display.set));
            self.last_daily = Some(daily);
        } else if self.print_clock {
            Log::log_decorated(&display.clock);
        }

        Ok(())
    }

    fn short_pulse(&mut self) -> Result<()> {
        self.pulses += 1;
        Log::log_decorated("Hourly pulse");
        if self.ring_bell && Log::is_enabled() {
            print!("\x07");
            io::stdout().flush()?;
        }
        Ok(())
    }

    fn teardown(&mut self) -> Result<()> {
        Log::log_block_start(&format!(
            "Rendered {} times, pulsed {} times",
            self.renders, self.pulses
        ));
        io::stdout().flush()?;
        Ok(())
    }
}

/// Time left until the next whole minute.
pub fn duration_until_next_minute(now: NaiveDateTime) -> Duration {
    let into_minute =
        Duration::from_secs(now.second() as u64) + Duration::from_nanos(now.nanosecond() as u64);
    Duration::from_secs(60).saturating_sub(into_minute)
}

/// True when the wall clock moved to another date by anything other than a
/// single minute step, e.g. after suspend or a manual clock change.
pub fn crossed_date_by_jump(last: &CalendarDate, now: &CalendarDate) -> bool {
    last.date() != now.date() && (now.naive() - last.naive()).num_minutes() != 1
}

/// Wall-clock gap between two loop wake-ups when it is long enough to mean
/// the machine was suspended. Measured in UTC so DST changes do not count.
pub fn suspended_gap(last_wake: DateTime<Utc>, now: DateTime<Utc>) -> Option<ChronoDuration> {
    let gap = now.signed_duration_since(last_wake);
    (gap > ChronoDuration::seconds(SLEEP_DETECTION_THRESHOLD_SECS as i64)).then_some(gap)
}

/// Counts gathered while replaying a day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationSummary {
    pub ticks: u32,
    pub pulses: u32,
    pub recomputations: u32,
}

/// Initialize at 00:00 of `date`, then deliver one tick for every minute of
/// that day. Stops early if `running` is cleared.
pub fn simulate_day(
    face: &mut dyn WatchFace,
    host: &mut dyn WatchHost,
    date: NaiveDate,
    running: &Arc<AtomicBool>,
) -> Result<SimulationSummary> {
    let midnight = CalendarDate::from(date.and_time(chrono::NaiveTime::MIN));
    face.on_init(&midnight, host)?;

    let mut summary = SimulationSummary::default();
    for minute in 0..MINUTES_IN_SIMULATED_DAY {
        if !running.load(Ordering::SeqCst) {
            Log::log_warning("Simulation interrupted");
            break;
        }

        let now = CalendarDate::from(midnight.naive() + ChronoDuration::minutes(minute as i64));
        let outcome = face.on_minute_tick(&now, host)?;

        summary.ticks += 1;
        if outcome.pulse {
            summary.pulses += 1;
        }
        if outcome.recomputed {
            summary.recomputations += 1;
        }
    }

    Ok(summary)
}
