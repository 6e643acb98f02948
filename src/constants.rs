//! Application constants and default values for almanac.
//!
//! Configuration defaults, validation limits, astronomical constants and the
//! operational timing of the terminal host.

// ═══ Application Configuration Defaults ═══
// Used when config options are not specified by the user

pub const DEFAULT_LATITUDE: f64 = 38.7601; // Wentzville, MO
pub const DEFAULT_LONGITUDE: f64 = -90.7559; // East positive, west negative
pub const DEFAULT_TIMEZONE_OFFSET: f64 = -5.0; // hours from UTC
pub const DEFAULT_USE_DST: bool = false;
pub const DEFAULT_USE_24H: bool = false;
pub const DEFAULT_HOURLY_PULSE: bool = true;
pub const DEFAULT_PULSE_START_HOUR: u32 = 6; // first hour that buzzes
pub const DEFAULT_PULSE_END_HOUR: u32 = 22; // last hour that buzzes (inclusive)

// ═══ Validation Limits ═══

// Civil twilight stops ending around the solstices above about 60.5 degrees
pub const MINIMUM_LATITUDE: f64 = -60.0;
pub const MAXIMUM_LATITUDE: f64 = 60.0;
pub const MINIMUM_LONGITUDE: f64 = -180.0;
pub const MAXIMUM_LONGITUDE: f64 = 180.0;
pub const MINIMUM_TIMEZONE_OFFSET: f64 = -12.0;
pub const MAXIMUM_TIMEZONE_OFFSET: f64 = 14.0;
pub const MAXIMUM_HOUR: u32 = 23;

// ═══ Astronomical Constants ═══

/// Julian date of the reference new moon (2000-01-06 14:24 UT).
pub const NEW_MOON_EPOCH_JD: f64 = 2_451_550.1;
/// Mean synodic month in days.
pub const SYNODIC_MONTH_DAYS: f64 = 29.530_588_853;
/// Number of glyphs in the moon-phase font.
pub const MOON_PHASE_STEPS: i32 = 26;
/// Glyph for phase index 0 (new moon); the font maps 'a'..='z' to the cycle.
pub const MOON_GLYPH_BASE: char = 'a';
/// Julian date of the Unix epoch.
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;
pub const SECONDS_PER_DAY: f64 = 86_400.0;
pub const MINUTES_PER_DAY: f64 = 1440.0;
/// Largest distance from noon of the Julian day a real solar event can have.
pub const MAX_EVENT_DAY_FRACTION: f64 = 1.5;

// ═══ Operational Timing Constants ═══

pub const CHECK_INTERVAL_MS: u64 = 250; // How often the tick loop checks the running flag
pub const SLEEP_DETECTION_THRESHOLD_SECS: u64 = 300; // 5 minutes - detect system sleep/resume
pub const MINUTES_IN_SIMULATED_DAY: u32 = 1440;

// ═══ Exit Codes ═══

pub const EXIT_FAILURE: i32 = 1;

// ═══ Test Constants ═══
#[cfg(test)]
pub mod test_constants {
    pub const TEST_LATITUDE: f64 = super::DEFAULT_LATITUDE;
    pub const TEST_LONGITUDE: f64 = super::DEFAULT_LONGITUDE;
    pub const TEST_TIMEZONE_OFFSET: f64 = super::DEFAULT_TIMEZONE_OFFSET;
    pub const TEST_J2000_JDN: i64 = 2_451_545; // 2000-01-01
}
