//! Moon phase from the Julian day number.
//!
//! The phase is the position inside a mean synodic month measured from the
//! new moon of 2000-01-06, scaled onto the 26 glyphs of the moon-phase font
//! (0 = new, 13 = full).

use crate::constants::{MOON_GLYPH_BASE, MOON_PHASE_STEPS, NEW_MOON_EPOCH_JD, SYNODIC_MONTH_DAYS};

/// Moon phase index for a Julian day number.
///
/// Nominally 0..=25. Two boundary conditions are returned as computed:
/// - 26 when the day falls in the last half step before a new moon;
/// - negative values before the epoch, because the cycle fraction keeps the
///   sign of the truncated quotient.
///
/// [`moon_glyph`] folds both back onto the glyph set.
pub fn moon_phase(jdn: i64) -> i32 {
    let cycles = (jdn as f64 - NEW_MOON_EPOCH_JD) / SYNODIC_MONTH_DAYS;
    let fraction = cycles - cycles.trunc();
    (fraction * MOON_PHASE_STEPS as f64 + 0.5).floor() as i32
}

/// Font glyph for a phase index: 'a' is new moon, 'n' full.
pub fn moon_glyph(phase: i32) -> char {
    let step = phase.rem_euclid(MOON_PHASE_STEPS) as u8;
    (MOON_GLYPH_BASE as u8 + step) as char
}

/// Short human name for a phase index, used in logs.
pub fn phase_name(phase: i32) -> &'static str {
    match phase.rem_euclid(MOON_PHASE_STEPS) {
        0 => "new moon",
        1..=5 => "waxing crescent",
        6..=7 => "first quarter",
        8..=12 => "waxing gibbous",
        13 => "full moon",
        14..=18 => "waning gibbous",
        19..=20 => "last quarter",
        _ => "waning crescent",
    }
}
