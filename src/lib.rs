//! # Moon Ephemeris Core Library
//!
//! Observer-relative positions of the Sun and Moon for a civil date, a UTC
//! time of day and a geographic location: right ascension and declination of
//! both bodies, the Moon's altitude and azimuth, its distance, phase and age
//! since the preceding new Moon.
//!
//! ## Pipeline
//!
//! 1. **Calendar** ([`calendar`]): Julian Day, day of year and day of week
//! 2. **Sun** ([`kepler`]): mean elements at the 1900 epoch, Kepler's
//!    equation, ecliptic longitude and distance
//! 3. **Moon** ([`lunar`]): truncated Brown series with a per-call workspace
//! 4. **New Moon** ([`newmoon`]): golden-section search on the phase fraction
//! 5. **Assembly** ([`ephemeris`]): sidereal time, equatorial and horizontal
//!    coordinates, the flat [`EphemerisResult`]
//!
//! Every computation is a pure function of its arguments. Nothing is cached
//! between calls, so [`compute_ephemeris`] may run on many threads at once.
//!
//! ## Conventions
//!
//! - Longitude is **west-positive** in degrees; latitude is north-positive.
//! - Right ascension and sidereal times are in hours, all other angles in
//!   degrees.
//! - Distances are in Earth radii.
//! - Time is UTC; no ΔT or leap-second correction is applied.
//!
//! ```
//! use moon_ephem_lib::{compute_ephemeris, Observer};
//!
//! let observer = Observer { latitude: 40.0, longitude: -75.0 };
//! let result = compute_ephemeris(2015, 1, 1, 0.0, &observer);
//!
//! assert_eq!(result.day_name, "Thursday");
//! assert!((0.0..1.0).contains(&result.moon_phase));
//! ```

use serde::{Deserialize, Serialize};

pub mod calendar;
pub mod config;
pub mod ephemeris;
pub mod kepler;
pub mod lunar;
mod lunar_terms;
pub mod newmoon;
pub mod report;

pub use config::ConfigError;
pub use ephemeris::{compute_at, compute_ephemeris};
pub use lunar::{evaluate_moon, LunarEphemeris};

/// Geographic position of the observer.
///
/// Read by the ephemeris, never modified by it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observer {
    /// Geographic latitude in degrees, north positive
    pub latitude: f64,
    /// Geographic longitude in degrees, **west** positive
    pub longitude: f64,
}

impl Observer {
    /// Build an observer after checking both coordinates are in range.
    ///
    /// # Example
    /// ```
    /// use moon_ephem_lib::Observer;
    ///
    /// assert!(Observer::new(51.48, 0.0).is_ok());
    /// assert!(Observer::new(91.0, 0.0).is_err());
    /// ```
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ConfigError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ConfigError::Latitude(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ConfigError::Longitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Named phase of the Moon, one of eight equal slices of the synodic month.
///
/// Slices are centred on the principal phases, so `New` covers the last and
/// first sixteenth of a lunation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoonPhase {
    New,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    Full,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    const ALL: [MoonPhase; 8] = [
        MoonPhase::New,
        MoonPhase::WaxingCrescent,
        MoonPhase::FirstQuarter,
        MoonPhase::WaxingGibbous,
        MoonPhase::Full,
        MoonPhase::WaningGibbous,
        MoonPhase::LastQuarter,
        MoonPhase::WaningCrescent,
    ];

    /// Classify an age in days since new Moon. Ages outside one lunation wrap.
    pub fn from_age(age_days: f64) -> Self {
        let slice = ((age_days / lunar::SYNODIC_MONTH) * 8.0 + 0.5).floor() as i64;
        Self::ALL[slice.rem_euclid(8) as usize]
    }

    /// Index 0 – 7 (0 = new, 4 = full).
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            MoonPhase::New => "New Moon",
            MoonPhase::WaxingCrescent => "Waxing Crescent",
            MoonPhase::FirstQuarter => "First Quarter",
            MoonPhase::WaxingGibbous => "Waxing Gibbous",
            MoonPhase::Full => "Full Moon",
            MoonPhase::WaningGibbous => "Waning Gibbous",
            MoonPhase::LastQuarter => "Last Quarter",
            MoonPhase::WaningCrescent => "Waning Crescent",
        }
    }
}

/// Complete ephemeris for one instant and one observer.
///
/// Built fresh by every call to [`compute_ephemeris`] and owned by the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EphemerisResult {
    /// Civil date (UTC)
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// UTC time of day in hours
    pub utc_hours: f64,
    /// Julian Day of the instant
    pub julian_day: f64,
    /// Day of the year, 1 for January 1st
    pub day_of_year: u32,
    /// Day of the week, 0 = Sunday
    pub day_of_week: u8,
    pub day_name: String,
    /// Observer the topocentric fields refer to
    pub observer: Observer,

    /// Greenwich mean sidereal time, hours
    pub gmst: f64,
    /// Local mean sidereal time, hours
    pub lmst: f64,
    /// Eccentricity of the Earth's orbit
    pub eccentricity: f64,
    /// Obliquity of the ecliptic, degrees
    pub obliquity: f64,

    /// Ecliptic longitude of the Sun, degrees
    pub sun_longitude: f64,
    /// Earth–Sun distance, Earth radii
    pub sun_distance: f64,
    /// Right ascension of the Sun, hours
    pub sun_ra: f64,
    /// Declination of the Sun, degrees
    pub sun_dec: f64,
    pub sun_azimuth: f64,
    pub sun_altitude: f64,

    /// Ecliptic longitude of the Moon, degrees
    pub moon_longitude: f64,
    /// Ecliptic latitude of the Moon, degrees
    pub moon_latitude: f64,
    /// Right ascension of the Moon, hours
    pub moon_ra: f64,
    /// Declination of the Moon, degrees
    pub moon_dec: f64,
    /// Azimuth of the Moon, degrees from north through east
    pub moon_azimuth: f64,
    /// Geometric altitude of the Moon, degrees
    pub moon_altitude: f64,
    /// True when the Moon is on or above the horizon
    pub moon_visible: bool,
    /// Earth–Moon distance, Earth radii
    pub moon_distance: f64,
    /// Phase fraction of the synodic month, `[0, 1)`
    pub moon_phase: f64,
    /// Days since the preceding new Moon
    pub moon_age: f64,
    /// Illuminated fraction of the disk, `[0, 1]`
    pub moon_illumination: f64,
    pub phase_name: MoonPhase,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observer_validation() {
        assert!(Observer::new(40.0, -75.0).is_ok());
        assert!(Observer::new(-90.0, 180.0).is_ok());
        assert!(matches!(
            Observer::new(90.5, 0.0),
            Err(ConfigError::Latitude(_))
        ));
        assert!(matches!(
            Observer::new(0.0, -181.0),
            Err(ConfigError::Longitude(_))
        ));
        assert!(Observer::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_phase_slices() {
        assert_eq!(MoonPhase::from_age(0.0), MoonPhase::New);
        assert_eq!(MoonPhase::from_age(29.3), MoonPhase::New);
        assert_eq!(MoonPhase::from_age(7.4), MoonPhase::FirstQuarter);
        assert_eq!(MoonPhase::from_age(11.0), MoonPhase::WaxingGibbous);
        assert_eq!(MoonPhase::from_age(14.8), MoonPhase::Full);
        assert_eq!(MoonPhase::from_age(22.1), MoonPhase::LastQuarter);
        assert_eq!(MoonPhase::from_age(-0.5), MoonPhase::New);
        assert_eq!(MoonPhase::from_age(30.0), MoonPhase::New);
        assert_eq!(MoonPhase::Full.index(), 4);
        assert_eq!(MoonPhase::WaningCrescent.name(), "Waning Crescent");
    }
}
