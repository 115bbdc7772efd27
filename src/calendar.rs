//! # Calendar and Angle Utilities
//!
//! Julian Day conversion, period reduction for hours and angles, and the
//! day-of-year / day-of-week helpers used by the ephemeris.
//!
//! Every function here is pure and total. Angles are reduced with
//! `rem_euclid`, which differs from `%` for negative inputs:
//!
//! - `-1.0 % 360.0` = `-1.0`
//! - `(-1.0_f64).rem_euclid(360.0)` = `359.0`

use std::f64::consts::TAU;

/// Julian Day of the J2000.0 epoch (2000-01-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Days per Julian century.
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Weekday names indexed by the value returned from [`day_of_week`].
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Reduce `value` into `[0, period)`.
///
/// `rem_euclid` can round up to exactly `period` for tiny negative inputs,
/// so that case folds back to zero.
fn wrap(value: f64, period: f64) -> f64 {
    let r = value.rem_euclid(period);
    if r >= period {
        0.0
    } else {
        r
    }
}

/// Fractional part in `[0, 1)`, also for negative arguments.
pub fn frac(x: f64) -> f64 {
    wrap(x, 1.0)
}

/// Reduce hours to `[0, 24)`.
pub fn hour24(hours: f64) -> f64 {
    wrap(hours, 24.0)
}

/// Reduce radians to `[0, 2π)`.
pub fn angle_2pi(radians: f64) -> f64 {
    wrap(radians, TAU)
}

/// Reduce degrees to `[0, 360)`.
pub fn angle_360(degrees: f64) -> f64 {
    wrap(degrees, 360.0)
}

/// Astronomical Julian Day for a civil date and UTC time of day.
///
/// Dates on or after 1582-10-15 are Gregorian, earlier ones Julian. January
/// and February count as months 13 and 14 of the previous year, and negative
/// year codes take the `INT(365.25·y − 0.75)` branch.
///
/// `day` may be zero, which names the last day of the previous month; this
/// is how [`day_of_year`] gets its reference point.
///
/// # Example
/// ```
/// use moon_ephem_lib::calendar::julian_day;
///
/// assert_eq!(julian_day(2000, 1, 1, 12.0), 2_451_545.0);
/// ```
pub fn julian_day(year: i32, month: u32, day: u32, utc_hours: f64) -> f64 {
    let (mut y, mut m) = (year as f64, month as f64);
    if month < 3 {
        y -= 1.0;
        m += 12.0;
    }

    let b = if (year, month, day) >= (1582, 10, 15) {
        let a = (y / 100.0).trunc();
        2.0 - a + (a / 4.0).trunc()
    } else {
        0.0
    };

    let c = if y < 0.0 {
        (365.25 * y - 0.75).trunc()
    } else {
        (365.25 * y).trunc()
    };
    let d = (30.6001 * (m + 1.0)).trunc();

    b + c + d + day as f64 + 1_720_994.5 + utc_hours / 24.0
}

/// Julian centuries elapsed between `epoch_jd` and `jd`.
pub fn centuries_since(jd: f64, epoch_jd: f64) -> f64 {
    (jd - epoch_jd) / DAYS_PER_CENTURY
}

/// Day of the year, 1 for January 1st.
pub fn day_of_year(year: i32, month: u32, day: u32) -> u32 {
    let days = julian_day(year, month, day, 0.0) - julian_day(year, 1, 0, 0.0);
    days.round() as u32
}

/// Day of the week as `(index, name)`, with Sunday = 0.
///
/// # Example
/// ```
/// use moon_ephem_lib::calendar::day_of_week;
///
/// assert_eq!(day_of_week(2000, 1, 1), (6, "Saturday"));
/// ```
pub fn day_of_week(year: i32, month: u32, day: u32) -> (u8, &'static str) {
    let jd = julian_day(year, month, day, 0.0);
    let index = ((frac((jd + 1.5) / 7.0) * 7.0).round() as usize) % 7;
    (index as u8, WEEKDAY_NAMES[index])
}
