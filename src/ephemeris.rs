//! # Ephemeris Assembly
//!
//! Combines the calendar, the solar orbit, the lunar series and the new-Moon
//! search into an [`EphemerisResult`].
//!
//! Three time arguments are in play:
//! - centuries since J2000.0 at 0h UTC, for Greenwich sidereal time
//! - centuries since 1900 January 0.5, for the Sun's mean elements
//! - centuries since J2000.0 at the instant, for the obliquity and the Moon

use crate::calendar::{
    angle_2pi, angle_360, centuries_since, day_of_week, day_of_year, hour24, julian_day,
    DAYS_PER_CENTURY, J2000_JD,
};
use crate::kepler::{solve_kepler, true_anomaly};
use crate::lunar::evaluate_moon;
use crate::newmoon::locate_new_moon;
use crate::{EphemerisResult, MoonPhase, Observer};
use chrono::{DateTime, Datelike, Timelike, Utc};

/// Julian Day of 1900 January 0.5, epoch of the solar elements.
pub const JD_1900: f64 = 2_415_020.0;

/// Ratio of the mean solar day to the sidereal day.
pub const SIDEREAL_RATE: f64 = 1.002_737_909;

/// Semi-major axis of the Earth's orbit, km.
pub const SUN_MEAN_DISTANCE_KM: f64 = 1.495_985e8;

/// Earth radius used to express distances, km.
pub const EARTH_RADIUS_KM: f64 = 6371.2;

/// Half-width of the new-Moon bracket, Julian centuries (0.4 days).
const NEW_MOON_HALF_WIDTH: f64 = 0.4 / DAYS_PER_CENTURY;

/// Greenwich mean sidereal time in hours.
pub fn greenwich_sidereal_time(jd_midnight: f64, utc_hours: f64) -> f64 {
    let t0 = centuries_since(jd_midnight, J2000_JD);
    hour24(6.697374558 + 2400.051336 * t0 + 0.000025862 * t0 * t0 + utc_hours * SIDEREAL_RATE)
}

/// Local mean sidereal time in hours for a west-positive longitude.
pub fn local_sidereal_time(gmst: f64, longitude_west: f64) -> f64 {
    hour24(gmst - longitude_west / 15.0)
}

/// Mean obliquity of the ecliptic in degrees.
pub fn obliquity(t_j2000: f64) -> f64 {
    let t = t_j2000;
    23.439291 - 0.0130042 * t - 1.64e-7 * t * t + 5.04e-7 * t * t * t
}

/// Ecliptic to equatorial coordinates.
///
/// Takes longitude, latitude and obliquity in degrees; returns right
/// ascension in hours `[0, 24)` and declination in degrees.
pub fn ecliptic_to_equatorial(lon_deg: f64, lat_deg: f64, obliquity_deg: f64) -> (f64, f64) {
    let (l, b, e) = (
        lon_deg.to_radians(),
        lat_deg.to_radians(),
        obliquity_deg.to_radians(),
    );
    let ra = (l.sin() * e.cos() - b.tan() * e.sin()).atan2(l.cos());
    let dec = (b.sin() * e.cos() + b.cos() * e.sin() * l.sin()).asin();
    (angle_360(ra.to_degrees()) / 15.0, dec.to_degrees())
}

/// Equatorial to horizontal coordinates.
///
/// Takes hour angle, declination and latitude in degrees; returns azimuth
/// (from north through east, `[0, 360)`) and altitude in degrees.
pub fn equatorial_to_horizontal(hour_angle_deg: f64, dec_deg: f64, lat_deg: f64) -> (f64, f64) {
    let (h, d, phi) = (
        hour_angle_deg.to_radians(),
        dec_deg.to_radians(),
        lat_deg.to_radians(),
    );
    let alt = (d.sin() * phi.sin() + d.cos() * phi.cos() * h.cos()).asin();
    let az = h.sin().atan2(h.cos() * phi.sin() - d.tan() * phi.cos());
    (angle_360(az.to_degrees() + 180.0), alt.to_degrees())
}

/// Hour angle in degrees `[0, 360)` from sidereal time and right ascension (hours).
fn hour_angle(lmst: f64, ra_hours: f64) -> f64 {
    angle_360(lmst * 15.0 - ra_hours * 15.0)
}

/// Sun position derived from its mean elements.
struct SolarPosition {
    eccentricity: f64,
    longitude: f64,
    distance_er: f64,
}

fn solar_position(jd: f64) -> SolarPosition {
    let t = centuries_since(jd, JD_1900);
    let t2 = t * t;

    let mean_longitude = angle_360(279.6966778 + 36000.76892 * t + 0.0003025 * t2);
    let perigee = angle_360(281.2208444 + 1.719175 * t + 0.000452778 * t2);
    let e = 0.01675104 - 0.0000418 * t - 0.000000126 * t2;

    let mean_anomaly = angle_2pi((mean_longitude - perigee).to_radians());
    let nu = true_anomaly(solve_kepler(mean_anomaly, e), e);

    SolarPosition {
        eccentricity: e,
        longitude: angle_360(nu.to_degrees() + perigee),
        distance_er: SUN_MEAN_DISTANCE_KM * (1.0 - e * e) / (1.0 + e * nu.cos()) / EARTH_RADIUS_KM,
    }
}

/// Compute the full ephemeris for a civil date, UTC hours and an observer.
///
/// Total over its inputs: NaN fields propagate into the result instead of
/// producing an error.
///
/// # Example
/// ```
/// use moon_ephem_lib::{compute_ephemeris, Observer};
///
/// let greenwich = Observer { latitude: 51.4769, longitude: 0.0 };
/// let eph = compute_ephemeris(2000, 1, 1, 12.0, &greenwich);
///
/// assert_eq!(eph.julian_day, 2_451_545.0);
/// assert_eq!(eph.day_of_week, 6);
/// assert!((eph.sun_longitude - 280.4).abs() < 0.1);
/// ```
pub fn compute_ephemeris(
    year: i32,
    month: u32,
    day: u32,
    utc_hours: f64,
    observer: &Observer,
) -> EphemerisResult {
    let (weekday, day_name) = day_of_week(year, month, day);

    let jd = julian_day(year, month, day, utc_hours);
    let gmst = greenwich_sidereal_time(julian_day(year, month, day, 0.0), utc_hours);
    let lmst = local_sidereal_time(gmst, observer.longitude);

    let t = centuries_since(jd, J2000_JD);
    let eps = obliquity(t);

    let sun = solar_position(jd);
    let (sun_ra, sun_dec) = ecliptic_to_equatorial(sun.longitude, 0.0, eps);
    let (sun_azimuth, sun_altitude) =
        equatorial_to_horizontal(hour_angle(lmst, sun_ra), sun_dec, observer.latitude);

    let moon = evaluate_moon(t);
    let (moon_ra, moon_dec) = ecliptic_to_equatorial(moon.lon_deg, moon.lat_deg, eps);
    let (moon_azimuth, moon_altitude) =
        equatorial_to_horizontal(hour_angle(lmst, moon_ra), moon_dec, observer.latitude);

    // Bracket the preceding new Moon around the series' own age estimate
    let tb = t - moon.age_days / DAYS_PER_CENTURY;
    let ta = tb - NEW_MOON_HALF_WIDTH;
    let tc = tb + NEW_MOON_HALF_WIDTH;
    let t_new_moon = locate_new_moon(ta, tb, tc);
    let moon_age = (t - t_new_moon) * DAYS_PER_CENTURY;
    log::debug!(
        "new moon bracket [{ta:.9}, {tb:.9}, {tc:.9}] -> {t_new_moon:.9} (age {moon_age:.4} d)"
    );

    let cos_elongation =
        moon.lat_deg.to_radians().cos() * (moon.lon_deg - sun.longitude).to_radians().cos();

    EphemerisResult {
        year,
        month,
        day,
        utc_hours,
        julian_day: jd,
        day_of_year: day_of_year(year, month, day),
        day_of_week: weekday,
        day_name: day_name.to_string(),
        observer: *observer,
        gmst,
        lmst,
        eccentricity: sun.eccentricity,
        obliquity: eps,
        sun_longitude: sun.longitude,
        sun_distance: sun.distance_er,
        sun_ra,
        sun_dec,
        sun_azimuth,
        sun_altitude,
        moon_longitude: moon.lon_deg,
        moon_latitude: moon.lat_deg,
        moon_ra,
        moon_dec,
        moon_azimuth,
        moon_altitude,
        moon_visible: moon_altitude >= 0.0,
        moon_distance: moon.distance_er,
        moon_phase: moon.phase,
        moon_age,
        moon_illumination: (1.0 - cos_elongation) / 2.0,
        phase_name: MoonPhase::from_age(moon_age),
    }
}

/// Compute the ephemeris for a UTC instant.
///
/// Seconds and sub-second precision are folded into the fractional hours.
pub fn compute_at(instant: DateTime<Utc>, observer: &Observer) -> EphemerisResult {
    let hours = instant.hour() as f64
        + instant.minute() as f64 / 60.0
        + (instant.second() as f64 + instant.nanosecond() as f64 / 1e9) / 3600.0;
    compute_ephemeris(
        instant.year(),
        instant.month(),
        instant.day(),
        hours,
        observer,
    )
}
