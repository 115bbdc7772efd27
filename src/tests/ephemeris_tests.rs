//! # End-to-End Ephemeris Tests
//!
//! Regression values for the full pipeline plus the behavioural checks that
//! only make sense across many calls: age monotonicity, value ranges over
//! decades of dates and identical results from concurrent callers.

use moon_ephem_lib::calendar::{centuries_since, julian_day, J2000_JD};
use moon_ephem_lib::lunar::SYNODIC_MONTH;
use moon_ephem_lib::newmoon::locate_new_moon;
use moon_ephem_lib::{compute_ephemeris, evaluate_moon, EphemerisResult, MoonPhase, Observer};
use std::thread;

fn philadelphia_ish() -> Observer {
    Observer {
        latitude: 40.0,
        longitude: -75.0,
    }
}

/// Relative comparison with a floor of 1 on the scale, so values near zero
/// are compared absolutely.
fn assert_close(name: &str, actual: f64, expected: f64, rel: f64) {
    let scale = expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= rel * scale,
        "{name}: got {actual}, expected {expected}"
    );
}

/// Golden values for 2015-01-01 00:00 UTC at latitude 40°, longitude −75°.
#[test]
fn golden_2015_new_year() {
    let eph = compute_ephemeris(2015, 1, 1, 0.0, &philadelphia_ish());

    assert_eq!(eph.julian_day, 2_457_023.5);
    assert_eq!(eph.day_of_year, 1);
    assert_eq!(eph.day_of_week, 4);
    assert_eq!(eph.day_name, "Thursday");

    let expected = [
        ("gmst", eph.gmst, 6.688648083743317),
        ("lmst", eph.lmst, 11.688648083743317),
        ("eccentricity", eph.eccentricity, 0.01670280365308897),
        ("obliquity", eph.obliquity, 23.43734045702),
        ("sun_longitude", eph.sun_longitude, 280.2372703992255),
        ("sun_distance", eph.sun_distance, 23088.745058548437),
        ("sun_ra", eph.sun_ra, 18.742383184707624),
        ("sun_dec", eph.sun_dec, -23.042504241899234),
        ("sun_azimuth", eph.sun_azimuth, 98.90460347841689),
        ("sun_altitude", eph.sun_altitude, -26.334095945665585),
        ("moon_longitude", eph.moon_longitude, 50.60549292302953),
        ("moon_latitude", eph.moon_latitude, -2.8992828413074268),
        ("moon_ra", eph.moon_ra, 3.264309551209175),
        ("moon_dec", eph.moon_dec, 15.10418648825591),
        ("moon_azimuth", eph.moon_azimuth, 306.13154213089626),
        ("moon_altitude", eph.moon_altitude, -15.725187830702689),
        ("moon_distance", eph.moon_distance, 60.136089702741096),
        ("moon_phase", eph.moon_phase, 0.36213998267725733),
        ("moon_illumination", eph.moon_illumination, 0.8234341884299132),
    ];
    for (name, actual, golden) in expected {
        assert_close(name, actual, golden, 1e-6);
    }

    // The search stops within its own relative tolerance of the minimum
    assert_close("moon_age", eph.moon_age, 11.093913733926371, 1e-4);
    assert!(!eph.moon_visible);
    assert_eq!(eph.phase_name, MoonPhase::WaxingGibbous);
}

/// Golden values at the J2000.0 epoch, seen from Greenwich.
#[test]
fn golden_j2000_greenwich() {
    let greenwich = Observer {
        latitude: 51.4769,
        longitude: 0.0,
    };
    let eph = compute_ephemeris(2000, 1, 1, 12.0, &greenwich);

    assert_eq!(eph.julian_day, J2000_JD);
    assert_eq!(eph.day_name, "Saturday");
    assert_eq!(eph.gmst, eph.lmst);

    let expected = [
        ("gmst", eph.gmst, 18.697374553802877),
        ("obliquity", eph.obliquity, 23.439291),
        ("sun_longitude", eph.sun_longitude, 280.3814699418584),
        ("sun_ra", eph.sun_ra, 18.752809084106808),
        ("sun_dec", eph.sun_dec, -23.033263148304407),
        ("sun_azimuth", eph.sun_azimuth, 179.20594634105115),
        ("sun_altitude", eph.sun_altitude, 15.486248161701216),
        ("moon_longitude", eph.moon_longitude, 223.3189071933383),
        ("moon_latitude", eph.moon_latitude, 5.170920869137504),
        ("moon_ra", eph.moon_ra, 14.82981986506796),
        ("moon_dec", eph.moon_dec, -10.900133967557608),
        ("moon_azimuth", eph.moon_azimuth, 237.78792949128524),
        ("moon_altitude", eph.moon_altitude, 10.13874632821531),
        ("moon_distance", eph.moon_distance, 63.09647578712851),
        ("moon_phase", eph.moon_phase, 0.841498278743571),
        ("moon_illumination", eph.moon_illumination, 0.2292449309402939),
    ];
    for (name, actual, golden) in expected {
        assert_close(name, actual, golden, 1e-6);
    }
    assert!(eph.moon_visible);
}

/// The series' own age grows steadily between two new Moons.
#[test]
fn series_age_increases_within_a_lunation() {
    // New Moons fell on 2014-12-22 and 2015-01-20
    let mut previous = f64::NEG_INFINITY;
    for day in 1..20 {
        for hour in 0..24 {
            let t = centuries_since(julian_day(2015, 1, day, hour as f64), J2000_JD);
            let age = evaluate_moon(t).age_days;
            assert!(
                age > previous,
                "age went from {previous} to {age} on day {day} hour {hour}"
            );
            previous = age;
        }
    }
    assert!(previous < SYNODIC_MONTH);
}

/// Reported age advances hour by hour over a short window.
#[test]
fn reported_age_increases_over_half_a_day() {
    let observer = philadelphia_ish();
    let ages: Vec<f64> = (0..=12)
        .map(|hour| compute_ephemeris(2015, 1, 1, hour as f64, &observer).moon_age)
        .collect();

    for pair in ages.windows(2) {
        let step = pair[1] - pair[0];
        // Roughly one hour per hour
        assert!(
            (0.035..0.048).contains(&step),
            "step {step} between {} and {}",
            pair[0],
            pair[1]
        );
    }
}

/// Outputs stay in their documented ranges over several decades.
#[test]
fn results_are_normalized_across_decades() {
    let observer = Observer {
        latitude: -33.87,
        longitude: -151.21,
    };
    for year in (1950..=2050).step_by(7) {
        for month in [1, 4, 7, 10] {
            let eph = compute_ephemeris(year, month, 15, 6.5, &observer);
            let label = format!("{year}-{month:02}-15");

            assert!((0.0..24.0).contains(&eph.gmst), "{label}");
            assert!((0.0..24.0).contains(&eph.lmst), "{label}");
            assert!((0.0..24.0).contains(&eph.sun_ra), "{label}");
            assert!((0.0..24.0).contains(&eph.moon_ra), "{label}");
            assert!((0.0..360.0).contains(&eph.sun_longitude), "{label}");
            assert!((0.0..360.0).contains(&eph.moon_longitude), "{label}");
            assert!((0.0..360.0).contains(&eph.moon_azimuth), "{label}");
            assert!((0.0..1.0).contains(&eph.moon_phase), "{label}");
            assert!((0.0..=1.0).contains(&eph.moon_illumination), "{label}");
            assert!(eph.sun_dec.abs() < 23.5, "{label}");
            assert!(eph.moon_dec.abs() < 29.0, "{label}");
            assert!(eph.moon_altitude.abs() <= 90.0, "{label}");
            assert_eq!(eph.moon_visible, eph.moon_altitude >= 0.0, "{label}");
            assert!(eph.moon_age >= 0.0 && eph.moon_age < 30.0, "{label}");
            // Earth radii: perihelion ~23050, aphelion ~23850
            assert!((23_000.0..23_900.0).contains(&eph.sun_distance), "{label}");
            assert!((55.0..64.0).contains(&eph.moon_distance), "{label}");
        }
    }
}

/// Illumination tracks the phase: dark near new, bright near full.
#[test]
fn illumination_follows_phase() {
    let observer = philadelphia_ish();
    // New Moon 2015-01-20 13:14, full Moon 2015-02-03 23:09
    let new = compute_ephemeris(2015, 1, 20, 13.25, &observer);
    let full = compute_ephemeris(2015, 2, 3, 23.15, &observer);
    assert!(new.moon_illumination < 0.01, "{}", new.moon_illumination);
    assert!(full.moon_illumination > 0.99, "{}", full.moon_illumination);
    assert_eq!(full.phase_name, MoonPhase::Full);
}

/// The new-Moon search lands on the 2015-01-20 13:14 UTC conjunction when
/// given a bracket around it.
#[test]
fn new_moon_search_around_known_conjunction() {
    let known = centuries_since(julian_day(2015, 1, 20, 13.0 + 14.0 / 60.0), J2000_JD);
    let day = 1.0 / 36_525.0;
    let (ax, bx, cx) = (known - 0.4 * day, known + 0.05 * day, known + 0.4 * day);

    let found = locate_new_moon(ax, bx, cx);
    let minutes_off = (found - known).abs() * 36_525.0 * 24.0 * 60.0;
    assert!(minutes_off < 10.0, "off by {minutes_off} minutes");

    let objective = |t: f64| evaluate_moon(t).phase;
    assert!(objective(found) <= objective(ax));
    assert!(objective(found) <= objective(cx));
}

/// Separate threads computing the same instant agree bit for bit.
#[test]
fn concurrent_calls_are_independent() {
    let observer = philadelphia_ish();
    let reference = compute_ephemeris(2015, 1, 1, 0.0, &observer);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            thread::spawn(move || {
                // Interleave other dates so each thread churns its own workspace
                let _ = compute_ephemeris(1990 + i, 6, 1, 12.0, &observer);
                compute_ephemeris(2015, 1, 1, 0.0, &observer)
            })
        })
        .collect();

    let results: Vec<EphemerisResult> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();
    for result in results {
        assert_eq!(result, reference);
    }
}

#[test]
fn json_output_contains_every_field() {
    let eph = compute_ephemeris(2015, 1, 1, 0.0, &philadelphia_ish());
    let json = serde_json::to_value(&eph).unwrap();

    for key in [
        "julian_day",
        "day_name",
        "gmst",
        "sun_ra",
        "moon_ra",
        "moon_azimuth",
        "moon_visible",
        "moon_age",
        "phase_name",
    ] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
    assert_eq!(json["phase_name"], "WaxingGibbous");
    assert_eq!(json["observer"]["latitude"], 40.0);

    let back: EphemerisResult = serde_json::from_value(json).unwrap();
    assert_eq!(back, eph);
}

mod performance_tests {
    use super::*;
    use std::time::Instant;

    /// A year of daily ephemerides should take well under a few seconds,
    /// even in a debug build.
    #[test]
    fn daily_ephemerides_for_a_year_are_fast() {
        let observer = philadelphia_ish();
        let start = Instant::now();
        for n in 0..365u32 {
            let month = 1 + (n / 28) % 12;
            let day = 1 + n % 28;
            let _ = compute_ephemeris(2015, month, day, 0.0, &observer);
        }
        let elapsed = start.elapsed();
        assert!(elapsed.as_secs() < 10, "took {elapsed:?}");
    }
}
