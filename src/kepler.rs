//! Kepler's equation for elliptical orbits.

/// Convergence tolerance on the eccentric anomaly correction (radians).
pub const KEPLER_TOLERANCE: f64 = 1e-8;

/// Safety bound on Newton iterations.
pub const KEPLER_MAX_ITERATIONS: usize = 100;

/// Solve `M = E − e·sin E` for the eccentric anomaly `E` (radians).
///
/// Newton iteration from `E₀ = M + e·sin M`, stopping once the correction is
/// at most [`KEPLER_TOLERANCE`] or after [`KEPLER_MAX_ITERATIONS`] steps. On
/// exhaustion the last iterate is returned.
///
/// # Example
/// ```
/// use moon_ephem_lib::kepler::solve_kepler;
///
/// assert_eq!(solve_kepler(0.0, 0.0167), 0.0);
/// ```
pub fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let m = mean_anomaly;
    let e = eccentricity;
    let mut ecc_anomaly = m + e * m.sin();

    for _ in 0..KEPLER_MAX_ITERATIONS {
        let delta = (m - ecc_anomaly + e * ecc_anomaly.sin()) / (1.0 - e * ecc_anomaly.cos());
        ecc_anomaly += delta;
        if delta.abs() <= KEPLER_TOLERANCE {
            return ecc_anomaly;
        }
    }

    log::warn!(
        "Kepler iteration cap reached (M = {m}, e = {e}); returning E = {ecc_anomaly}"
    );
    ecc_anomaly
}

/// True anomaly (radians) from the eccentric anomaly.
pub fn true_anomaly(ecc_anomaly: f64, eccentricity: f64) -> f64 {
    let e = eccentricity;
    2.0 * (((1.0 + e) / (1.0 - e)).sqrt() * (ecc_anomaly / 2.0).tan()).atan()
}
