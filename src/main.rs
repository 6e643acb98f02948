use anyhow::{Context, Result};
use chrono::{Local, Utc};
use std::{
    path::{Path, PathBuf},
    sync::Arc,
    sync::atomic::{AtomicBool, Ordering},
    thread,
    time::Duration,
};

use almanac::{
    args::{CliAction, ParsedArgs, display_help, display_version_info},
    calendar::CalendarDate,
    config::Config,
    constants::*,
    host::{
        TerminalHost, crossed_date_by_jump, duration_until_next_minute, simulate_day,
        suspended_gap,
    },
    logger::Log,
    scheduler::{DailyScheduler, WatchFace, WatchHost},
    signals::setup_signal_handler,
};

const CHECK_INTERVAL: Duration = Duration::from_millis(CHECK_INTERVAL_MS);

/// How the face is driven once configuration is loaded.
enum Mode {
    Live,
    Once,
    Simulate(chrono::NaiveDate),
}

fn main() -> Result<()> {
    let parsed = ParsedArgs::from_env();

    match parsed.action {
        CliAction::ShowVersion => {
            display_version_info();
            Ok(())
        }
        CliAction::ShowHelp => {
            display_help();
            Ok(())
        }
        CliAction::ShowHelpDueToError => {
            display_help();
            std::process::exit(EXIT_FAILURE);
        }
        CliAction::Run {
            debug_enabled,
            config_path,
        } => run(Mode::Live, debug_enabled, config_path),
        CliAction::Once {
            debug_enabled,
            config_path,
        } => run(Mode::Once, debug_enabled, config_path),
        CliAction::Simulate {
            debug_enabled,
            config_path,
            date,
        } => run(Mode::Simulate(date), debug_enabled, config_path),
    }
}

/// Load the configuration from an explicit path or the default location.
fn load_config(config_path: Option<&Path>) -> Result<(Config, PathBuf)> {
    match config_path {
        Some(path) => Ok((Config::load_from_path(path)?, path.to_path_buf())),
        None => {
            let config = Config::load()?;
            Ok((config, Config::get_config_path()?))
        }
    }
}

fn run(mode: Mode, debug_enabled: bool, config_path: Option<PathBuf>) -> Result<()> {
    Log::log_version();

    let (config, path) = match load_config(config_path.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            Log::log_failure(&e);
            Log::log_end();
            std::process::exit(EXIT_FAILURE);
        }
    };
    config.log_config(&path);

    let running = setup_signal_handler(debug_enabled)?;
    let mut face = DailyScheduler::with_sunrise_model(config);

    match mode {
        Mode::Live => {
            let mut host = TerminalHost::new();
            run_live(&mut face, &mut host, &running, debug_enabled)?;
            Log::log_block_start("Shutting down almanac...");
            face.on_teardown(&mut host)?;
        }
        Mode::Once => {
            let mut host = TerminalHost::new();
            face.on_init(&CalendarDate::now_local(), &mut host)?;
            face.on_teardown(&mut host)?;
        }
        Mode::Simulate(date) => {
            Log::log_block_start(&format!("Simulating every minute of {}", date));
            let mut host = TerminalHost::quiet();
            let summary = simulate_day(&mut face, &mut host, date, &running)?;
            Log::log_block_start(&format!(
                "Simulated {} ticks: {} pulses, {} daily recomputations",
                summary.ticks, summary.pulses, summary.recomputations
            ));
            face.on_teardown(&mut host)?;
        }
    }

    Log::log_end();
    Ok(())
}

/// Deliver one tick per wall-clock minute until a shutdown signal arrives.
fn run_live(
    face: &mut dyn WatchFace,
    host: &mut dyn WatchHost,
    running: &Arc<AtomicBool>,
    debug_enabled: bool,
) -> Result<()> {
    let mut last_tick = CalendarDate::now_local();
    face.on_init(&last_tick, host)
        .context("Failed to initialize the watchface")?;

    let mut last_wake = Utc::now();

    while running.load(Ordering::SeqCst) {
        let sleep_duration = duration_until_next_minute(Local::now().naive_local());
        if debug_enabled {
            Log::log_debug(&format!(
                "Next tick in {:.1} seconds",
                sleep_duration.as_secs_f64()
            ));
        }

        // Sleep in smaller intervals to check running status
        let mut slept = Duration::from_secs(0);
        while slept < sleep_duration && running.load(Ordering::SeqCst) {
            let sleep_chunk = CHECK_INTERVAL.min(sleep_duration - slept);
            thread::sleep(sleep_chunk);
            slept += sleep_chunk;
        }

        if !running.load(Ordering::SeqCst) {
            break;
        }

        // Monotonic clocks stop during suspend, so compare wall-clock time
        let wake = Utc::now();
        if let Some(gap) = suspended_gap(last_wake, wake) {
            Log::log_decorated(&format!(
                "Large time jump detected ({} minutes). System may have resumed from sleep.",
                gap.num_minutes()
            ));
        }
        last_wake = wake;

        let now = CalendarDate::now_local();
        if now == last_tick {
            // Woke a hair early, still the same minute
            continue;
        }

        if crossed_date_by_jump(&last_tick, &now) {
            Log::log_decorated(&format!(
                "Date changed from {} to {} between ticks, reinitializing",
                last_tick.date(),
                now.date()
            ));
            face.on_init(&now, host)?;
        } else {
            let outcome = face.on_minute_tick(&now, host)?;
            if debug_enabled && outcome.recomputed {
                Log::log_debug("Recomputed date, moon phase and sun times");
            }
        }

        last_tick = now;
    }

    Ok(())
}
