//! Configuration for the almanac watchface.
//!
//! The configuration lives in `almanac.toml` under the XDG config directory
//! (`$XDG_CONFIG_HOME/almanac/almanac.toml`) and is created with commented
//! defaults on first run:
//!
//! ```toml
//! #[Location]
//! latitude = 38.7601         # Degrees, north positive (-60 to 60)
//! longitude = -90.7559       # Degrees, east positive (-180 to 180)
//! timezone_offset = -5.0     # Standard time offset from UTC in hours
//! use_dst = false            # Apply the US daylight saving rule
//! #timezone = "America/Chicago"
//!
//! #[Clock]
//! use_24h = false            # 24-hour clock and sun times
//!
//! #[Hourly pulse]
//! hourly_pulse = true        # Buzz on the hour
//! pulse_start_hour = 6       # First hour that buzzes (0-23)
//! pulse_end_hour = 22        # Last hour that buzzes (0-23)
//! ```
//!
//! Every field is optional; missing values fall back to the `DEFAULT_*`
//! constants. A named IANA `timezone`, when present, replaces
//! `timezone_offset` and `use_dst` for sun time reconstruction.

use anyhow::{Context, Result};
use chrono::{Offset, TimeZone};
use chrono_tz::Tz;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::calendar::{CalendarDate, is_us_dst};
use crate::constants::*;
use crate::geo::format_coordinates;
use crate::logger::Log;

/// Watchface settings loaded from `almanac.toml`.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    pub latitude: Option<f64>,        // Degrees, north positive
    pub longitude: Option<f64>,       // Degrees, east positive
    pub timezone_offset: Option<f64>, // Standard time, hours from UTC
    /// IANA zone name such as `"America/Chicago"`.
    ///
    /// When set, its UTC offset at local noon of each day is used instead of
    /// `timezone_offset` and `use_dst`.
    pub timezone: Option<String>,
    pub use_dst: Option<bool>,
    pub use_24h: Option<bool>,
    pub hourly_pulse: Option<bool>,
    pub pulse_start_hour: Option<u32>,
    pub pulse_end_hour: Option<u32>,
}

impl Config {
    pub fn latitude(&self) -> f64 {
        self.latitude.unwrap_or(DEFAULT_LATITUDE)
    }

    pub fn longitude(&self) -> f64 {
        self.longitude.unwrap_or(DEFAULT_LONGITUDE)
    }

    pub fn timezone_offset(&self) -> f64 {
        self.timezone_offset.unwrap_or(DEFAULT_TIMEZONE_OFFSET)
    }

    pub fn use_dst(&self) -> bool {
        self.use_dst.unwrap_or(DEFAULT_USE_DST)
    }

    pub fn use_24h(&self) -> bool {
        self.use_24h.unwrap_or(DEFAULT_USE_24H)
    }

    pub fn hourly_pulse(&self) -> bool {
        self.hourly_pulse.unwrap_or(DEFAULT_HOURLY_PULSE)
    }

    /// Inclusive range of hours whose top-of-hour tick buzzes.
    pub fn pulse_hours(&self) -> std::ops::RangeInclusive<u32> {
        self.pulse_start_hour.unwrap_or(DEFAULT_PULSE_START_HOUR)
            ..=self.pulse_end_hour.unwrap_or(DEFAULT_PULSE_END_HOUR)
    }

    /// UTC offset in hours to use for the sun times of `date`.
    pub fn utc_offset_hours(&self, date: &CalendarDate) -> f64 {
        if let Some(tz) = self.timezone.as_deref().and_then(|name| name.parse::<Tz>().ok()) {
            let noon = date.date().and_hms_opt(12, 0, 0).unwrap_or(date.naive());
            let offset = tz
                .from_local_datetime(&noon)
                .single()
                .map(|dt| dt.offset().fix())
                .unwrap_or_else(|| tz.from_utc_datetime(&noon).offset().fix());
            return offset.local_minus_utc() as f64 / 3600.0;
        }

        let standard = self.timezone_offset();
        if self.use_dst() && is_us_dst(date.day(), date.month(), date.weekday()) {
            standard + 1.0
        } else {
            standard
        }
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("almanac").join("almanac.toml"))
    }

    /// Write a commented default configuration file to `path`.
    pub fn create_default_config(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_content = ConfigBuilder::new()
            .add_section("Location")
            .add_setting(
                "latitude",
                &DEFAULT_LATITUDE.to_string(),
                &format!(
                    "Degrees, north positive ({} to {})",
                    MINIMUM_LATITUDE, MAXIMUM_LATITUDE
                ),
            )
            .add_setting(
                "longitude",
                &DEFAULT_LONGITUDE.to_string(),
                &format!(
                    "Degrees, east positive ({} to {})",
                    MINIMUM_LONGITUDE, MAXIMUM_LONGITUDE
                ),
            )
            .add_setting(
                "timezone_offset",
                &format!("{:.1}", DEFAULT_TIMEZONE_OFFSET),
                "Standard time offset from UTC in hours",
            )
            .add_setting(
                "use_dst",
                &DEFAULT_USE_DST.to_string(),
                "Apply the US daylight saving rule to sun times",
            )
            .add_commented_setting(
                "timezone",
                "\"America/Chicago\"",
                "IANA zone, overrides timezone_offset and use_dst",
            )
            .add_section("Clock")
            .add_setting(
                "use_24h",
                &DEFAULT_USE_24H.to_string(),
                "24-hour clock and sun times",
            )
            .add_section("Hourly pulse")
            .add_setting(
                "hourly_pulse",
                &DEFAULT_HOURLY_PULSE.to_string(),
                "Buzz on the hour",
            )
            .add_setting(
                "pulse_start_hour",
                &DEFAULT_PULSE_START_HOUR.to_string(),
                &format!("First hour that buzzes (0-{})", MAXIMUM_HOUR),
            )
            .add_setting(
                "pulse_end_hour",
                &DEFAULT_PULSE_END_HOUR.to_string(),
                &format!("Last hour that buzzes (0-{})", MAXIMUM_HOUR),
            )
            .build();

        fs::write(path, config_content)
            .with_context(|| format!("Failed to write default config to {}", path.display()))?;
        Ok(())
    }

    /// Load and validate a configuration file. Does not create missing files.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!(
                "Configuration file not found at specified path: {}",
                path.display()
            );
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        validate_config(&config)
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;

        Ok(config)
    }

    /// Load the configuration from the default location, creating it first if
    /// it does not exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)
                .context("Failed to create default config during load")?;
            Log::log_block_start(&format!(
                "Created new config file: {}",
                config_path.display()
            ));
        }

        Self::load_from_path(&config_path).with_context(|| {
            format!(
                "Failed to load configuration from {}",
                config_path.display()
            )
        })
    }

    pub fn log_config(&self, path: &Path) {
        Log::log_block_start(&format!("Loaded configuration from {}", path.display()));
        Log::log_indented(&format!(
            "Location: {}",
            format_coordinates(self.latitude(), self.longitude())
        ));
        match self.timezone.as_deref() {
            Some(name) => Log::log_indented(&format!("Timezone: {}", name)),
            None => {
                Log::log_indented(&format!("UTC offset: {:+.1} hours", self.timezone_offset()));
                Log::log_indented(&format!("US daylight saving: {}", self.use_dst()));
            }
        }
        Log::log_indented(&format!(
            "Clock: {}",
            if self.use_24h() { "24-hour" } else { "12-hour" }
        ));
        if self.hourly_pulse() {
            let hours = self.pulse_hours();
            Log::log_indented(&format!(
                "Hourly pulse: {:02}:00 to {:02}:00",
                hours.start(),
                hours.end()
            ));
        } else {
            Log::log_indented("Hourly pulse: off");
        }
    }
}

/// Reject configurations the watchface cannot honor.
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(latitude) = config.latitude {
        if !(MINIMUM_LATITUDE..=MAXIMUM_LATITUDE).contains(&latitude) {
            anyhow::bail!(
                "Latitude ({}) must be between {} and {} degrees",
                latitude,
                MINIMUM_LATITUDE,
                MAXIMUM_LATITUDE
            );
        }
    }

    if let Some(longitude) = config.longitude {
        if !(MINIMUM_LONGITUDE..=MAXIMUM_LONGITUDE).contains(&longitude) {
            anyhow::bail!(
                "Longitude ({}) must be between {} and {} degrees",
                longitude,
                MINIMUM_LONGITUDE,
                MAXIMUM_LONGITUDE
            );
        }
    }

    if let Some(offset) = config.timezone_offset {
        if !(MINIMUM_TIMEZONE_OFFSET..=MAXIMUM_TIMEZONE_OFFSET).contains(&offset) {
            anyhow::bail!(
                "Timezone offset ({}) must be between {} and {} hours",
                offset,
                MINIMUM_TIMEZONE_OFFSET,
                MAXIMUM_TIMEZONE_OFFSET
            );
        }
    }

    if let Some(name) = config.timezone.as_deref() {
        if name.parse::<Tz>().is_err() {
            anyhow::bail!("Unknown timezone: \"{}\"", name);
        }
    }

    for (key, hour) in [
        ("pulse_start_hour", config.pulse_start_hour),
        ("pulse_end_hour", config.pulse_end_hour),
    ] {
        if let Some(hour) = hour {
            if hour > MAXIMUM_HOUR {
                anyhow::bail!("{} ({}) must be between 0 and {}", key, hour, MAXIMUM_HOUR);
            }
        }
    }

    let hours = config.pulse_hours();
    if hours.start() > hours.end() {
        anyhow::bail!(
            "pulse_start_hour ({}) must not be after pulse_end_hour ({})",
            hours.start(),
            hours.end()
        );
    }

    Ok(())
}

/// Builder for configuration files with aligned trailing comments.
struct ConfigBuilder {
    entries: Vec<ConfigEntry>,
}

enum ConfigEntry {
    Section(String),
    Setting { line: String, comment: String },
}

impl ConfigBuilder {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn add_section(mut self, title: &str) -> Self {
        self.entries.push(ConfigEntry::Section(format!("#[{}]", title)));
        self
    }

    fn add_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.entries.push(ConfigEntry::Setting {
            line: format!("{} = {}", key, value),
            comment: format!("# {}", comment),
        });
        self
    }

    /// A setting shipped disabled, for the user to uncomment.
    fn add_commented_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.entries.push(ConfigEntry::Setting {
            line: format!("#{} = {}", key, value),
            comment: format!("# {}", comment),
        });
        self
    }

    fn build(self) -> String {
        let max_width = self
            .entries
            .iter()
            .filter_map(|entry| match entry {
                ConfigEntry::Setting { line, .. } => Some(line.len()),
                ConfigEntry::Section(_) => None,
            })
            .max()
            .unwrap_or(0)
            + 1;

        let mut result = Vec::new();
        let mut first_section = true;

        for entry in self.entries {
            match entry {
                ConfigEntry::Section(title) => {
                    if !first_section {
                        result.push(String::new());
                    }
                    result.push(title);
                    first_section = false;
                }
                ConfigEntry::Setting { line, comment } => {
                    let padding = " ".repeat(max_width - line.len());
                    result.push(format!("{}{}{}", line, padding, comment));
                }
            }
        }

        let mut content = result.join("\n");
        content.push('\n');
        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::test_constants::*;
    use serial_test::serial;
    use tempfile::tempdir;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("almanac.toml");
        fs::write(&path, content).unwrap();
        (temp_dir, path)
    }

    #[test]
    fn test_defaults_when_fields_missing() {
        let config = Config::default();
        assert_eq!(config.latitude(), TEST_LATITUDE);
        assert_eq!(config.longitude(), TEST_LONGITUDE);
        assert_eq!(config.timezone_offset(), TEST_TIMEZONE_OFFSET);
        assert!(!config.use_dst());
        assert!(!config.use_24h());
        assert!(config.hourly_pulse());
        assert_eq!(config.pulse_hours(), 6..=22);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_load_from_path_reads_values() {
        let (_dir, path) = write_config(
            r#"
latitude = 51.5074
longitude = -0.1278
timezone_offset = 0.0
use_24h = true
pulse_start_hour = 8
pulse_end_hour = 20
"#,
        );
        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.latitude(), 51.5074);
        assert_eq!(config.longitude(), -0.1278);
        assert_eq!(config.timezone_offset(), 0.0);
        assert!(config.use_24h());
        assert_eq!(config.pulse_hours(), 8..=20);
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let temp_dir = tempdir().unwrap();
        let result = Config::load_from_path(&temp_dir.path().join("missing.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let (_dir, path) = write_config("latitude = \"north\"\n");
        assert!(Config::load_from_path(&path).is_err());
    }

    #[test]
    fn test_validation_rejects_polar_latitude() {
        let config = Config {
            latitude: Some(70.0),
            ..Config::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("Latitude"));
    }

    #[test]
    fn test_validation_rejects_bad_longitude_and_offset() {
        let config = Config {
            longitude: Some(-181.0),
            ..Config::default()
        };
        assert!(validate_config(&config).is_err());

        let config = Config {
            timezone_offset: Some(15.0),
            ..Config::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_of_pulse_window() {
        let config = Config {
            pulse_start_hour: Some(24),
            ..Config::default()
        };
        assert!(validate_config(&config).is_err());

        let config = Config {
            pulse_start_hour: Some(23),
            pulse_end_hour: Some(6),
            ..Config::default()
        };
        assert!(validate_config(&config).is_err());

        let config = Config {
            pulse_start_hour: Some(0),
            pulse_end_hour: Some(23),
            ..Config::default()
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_rejects_unknown_timezone() {
        let config = Config {
            timezone: Some("Mars/Olympus_Mons".to_string()),
            ..Config::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_utc_offset_with_us_dst_rule() {
        let config = Config {
            use_dst: Some(true),
            ..Config::default()
        };
        let summer = CalendarDate::new(2024, 6, 21, 0, 0).unwrap();
        let winter = CalendarDate::new(2024, 1, 15, 0, 0).unwrap();
        assert_eq!(config.utc_offset_hours(&summer), -4.0);
        assert_eq!(config.utc_offset_hours(&winter), -5.0);

        let without_dst = Config::default();
        assert_eq!(without_dst.utc_offset_hours(&summer), -5.0);
    }

    #[test]
    fn test_utc_offset_from_named_timezone() {
        let config = Config {
            timezone: Some("America/Chicago".to_string()),
            timezone_offset: Some(3.0),
            ..Config::default()
        };
        let summer = CalendarDate::new(2024, 6, 21, 0, 0).unwrap();
        let winter = CalendarDate::new(2024, 1, 15, 0, 0).unwrap();
        assert_eq!(config.utc_offset_hours(&summer), -5.0);
        assert_eq!(config.utc_offset_hours(&winter), -6.0);
    }

    #[test]
    fn test_default_config_file_parses_to_defaults() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("almanac.toml");
        Config::create_default_config(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("#[Location]"));
        assert!(content.contains("#timezone = \"America/Chicago\""));

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.latitude(), DEFAULT_LATITUDE);
        assert_eq!(config.longitude(), DEFAULT_LONGITUDE);
        assert_eq!(config.timezone_offset(), DEFAULT_TIMEZONE_OFFSET);
        assert_eq!(config.timezone, None);
        assert_eq!(config.pulse_hours(), DEFAULT_PULSE_START_HOUR..=DEFAULT_PULSE_END_HOUR);
    }

    #[test]
    #[serial]
    fn test_config_load_default_creation() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("almanac").join("almanac.toml");

        let original = std::env::var("XDG_CONFIG_HOME").ok();
        unsafe {
            std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
        }
        Log::set_enabled(false);

        let result = Config::load();

        Log::set_enabled(true);
        unsafe {
            match original {
                Some(val) => std::env::set_var("XDG_CONFIG_HOME", val),
                None => std::env::remove_var("XDG_CONFIG_HOME"),
            }
        }

        assert!(result.is_ok());
        assert!(config_path.exists());
    }
}
