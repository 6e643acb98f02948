//! # Almanac
//!
//! A watchface core that shows the time, the date, the moon phase and the
//! day's civil dawn, sunrise, sunset and civil dusk for a fixed location.
//!
//! ## Architecture
//!
//! - **calendar**: Calendar snapshots, Julian day numbers and the US DST rule
//! - **moon**: Moon phase index and font glyph
//! - **geo**: Solar model seam and local reconstruction of sun event times
//! - **time_format**: Clock, date and sun event text
//! - **scheduler**: Init / per-minute / teardown reactions and display state
//! - **config**: Configuration loading, validation, and default generation
//! - **constants**: Application-wide constants and defaults
//! - **logger**: Structured logging with visual formatting
//! - **host**: Terminal host, clock arithmetic and day replay
//! - **args** / **signals**: Command-line parsing and shutdown handling

pub mod args;
pub mod calendar;
pub mod config;
pub mod constants;
pub mod geo;
pub mod host;
pub mod logger;
pub mod moon;
pub mod scheduler;
pub mod signals;
pub mod time_format;

// Re-export important types for easier access
pub use calendar::{CalendarDate, julian_day};
pub use config::Config;
pub use geo::{HourMinute, SolarEvents, SolarModel, SunEventTimes, SunriseModel, reconstruct};
pub use logger::{Log, LogLevel};
pub use moon::{moon_glyph, moon_phase};
pub use scheduler::{DailyScheduler, DisplayState, TickOutcome, WatchFace, WatchHost};
