//! # Text Report
//!
//! Renders an [`EphemerisResult`] as a fixed block of text for terminal
//! output. Right ascension and sidereal times use `HHh MMm SS.Ss`, other
//! angles signed decimal degrees.

use crate::EphemerisResult;
use std::fmt;

/// Split decimal hours into `HHh MMm SS.Ss`.
pub fn format_hms(hours: f64) -> String {
    let total_tenths = (hours * 36_000.0).round() as i64;
    let total_tenths = total_tenths.rem_euclid(24 * 36_000);
    let h = total_tenths / 36_000;
    let m = (total_tenths / 600) % 60;
    let s = (total_tenths % 600) as f64 / 10.0;
    format!("{h:02}h {m:02}m {s:04.1}s")
}

fn format_deg(degrees: f64) -> String {
    format!("{degrees:+08.3}°")
}

/// Text rendering of an [`EphemerisResult`].
///
/// Writes straight into any formatter, so it can go to stdout with
/// `println!("{}", Report(&eph))` without an intermediate `String`.
pub struct Report<'a>(pub &'a EphemerisResult);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let eph = self.0;

        writeln!(
            f,
            "{:04}-{:02}-{:02} {} UTC  {} (day {})",
            eph.year,
            eph.month,
            eph.day,
            format_hms(eph.utc_hours),
            eph.day_name,
            eph.day_of_year
        )?;
        writeln!(
            f,
            "Observer   lat {}  lon {} (west positive)",
            format_deg(eph.observer.latitude),
            format_deg(eph.observer.longitude)
        )?;
        writeln!(
            f,
            "JD {:.5}   GMST {}   LMST {}",
            eph.julian_day,
            format_hms(eph.gmst),
            format_hms(eph.lmst)
        )?;
        writeln!(
            f,
            "Obliquity {}   Eccentricity {:.6}",
            format_deg(eph.obliquity),
            eph.eccentricity
        )?;
        writeln!(f)?;

        writeln!(f, "Sun")?;
        writeln!(f, "  Longitude  {}", format_deg(eph.sun_longitude))?;
        writeln!(
            f,
            "  RA / Dec   {}  {}",
            format_hms(eph.sun_ra),
            format_deg(eph.sun_dec)
        )?;
        writeln!(
            f,
            "  Az / Alt   {}  {}",
            format_deg(eph.sun_azimuth),
            format_deg(eph.sun_altitude)
        )?;
        writeln!(f, "  Distance   {:.1} Earth radii", eph.sun_distance)?;
        writeln!(f)?;

        writeln!(f, "Moon")?;
        writeln!(
            f,
            "  Longitude  {}  Latitude {}",
            format_deg(eph.moon_longitude),
            format_deg(eph.moon_latitude)
        )?;
        writeln!(
            f,
            "  RA / Dec   {}  {}",
            format_hms(eph.moon_ra),
            format_deg(eph.moon_dec)
        )?;
        writeln!(
            f,
            "  Az / Alt   {}  {}  {}",
            format_deg(eph.moon_azimuth),
            format_deg(eph.moon_altitude),
            if eph.moon_visible {
                "above horizon"
            } else {
                "below horizon"
            }
        )?;
        writeln!(f, "  Distance   {:.2} Earth radii", eph.moon_distance)?;
        writeln!(
            f,
            "  Phase      {} ({:.1}% of lunation, {:.1}% illuminated)",
            eph.phase_name.name(),
            eph.moon_phase * 100.0,
            eph.moon_illumination * 100.0
        )?;
        write!(f, "  Age        {:.2} days", eph.moon_age)
    }
}

/// Render the full report.
pub fn format_report(eph: &EphemerisResult) -> String {
    Report(eph).to_string()
}
