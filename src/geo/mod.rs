//! Geographic location and sun event calculations.
//!
//! - [`solar`]: the solar model seam and the reconstruction of local sun times

pub mod solar;

pub use solar::{HourMinute, SolarEvents, SolarModel, SunEventTimes, SunriseModel, reconstruct};

/// Human readable coordinates, e.g. `38.7601°N, 90.7559°W`.
pub fn format_coordinates(latitude: f64, longitude: f64) -> String {
    format!(
        "{:.4}°{}, {:.4}°{}",
        latitude.abs(),
        if latitude >= 0.0 { "N" } else { "S" },
        longitude.abs(),
        if longitude >= 0.0 { "E" } else { "W" }
    )
}
