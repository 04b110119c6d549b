// Derived metrics computed from existing stat columns.

use crate::data::records::StatLine;

/// Code under which the derived batting average is stored.
pub const BATTING_AVERAGE: &str = "BA";

/// Round to `places` decimal places. Exact ties go to the even digit, so
/// 15.625 becomes 15.62 and 46.875 becomes 46.88.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}

/// Batting average scaled by 1000 ("a .300 hitter" → 300.0), rounded to two
/// decimals.
///
/// Returns `None` when either input is missing or at-bats is zero, so a
/// season without at-bats shows up as missing rather than as 0 or an error.
pub fn batting_average(hits: Option<f64>, at_bats: Option<f64>) -> Option<f64> {
    let hits = hits?;
    let at_bats = at_bats?;
    if at_bats == 0.0 {
        return None;
    }
    let avg = round_to(hits / at_bats * 1000.0, 2);
    avg.is_finite().then_some(avg)
}

/// Add the derived `BA` column to a batting stat line. Leaves the line
/// without `BA` when the average is missing.
pub fn apply_batting_average(stats: &mut StatLine) {
    match batting_average(stats.get("H").copied(), stats.get("AB").copied()) {
        Some(avg) => {
            stats.insert(BATTING_AVERAGE.to_string(), avg);
        }
        None => {
            stats.remove(BATTING_AVERAGE);
        }
    }
}
