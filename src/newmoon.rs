//! # New Moon Locator
//!
//! Golden-section minimisation of the lunar phase fraction. Just after new
//! Moon the phase fraction is near zero and it climbs towards one over the
//! lunation, so a bracket around the phase wrap has its minimum at the new
//! Moon itself.
//!
//! The search has no iteration cap: it shrinks the bracket geometrically
//! until its width falls under the relative tolerance. On a bracket where
//! the objective is not unimodal it still terminates, but the point it
//! returns is only a local minimum of the samples it took.

use crate::lunar::evaluate_moon;

/// Golden ratio conjugate, `(√5 − 1) / 2`.
pub const GOLDEN_R: f64 = 0.618_033_99;

/// Complement of [`GOLDEN_R`].
pub const GOLDEN_C: f64 = 1.0 - GOLDEN_R;

/// Relative bracket tolerance for [`locate_new_moon`].
pub const NEW_MOON_TOLERANCE: f64 = 1e-7;

/// Result of a golden-section search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Minimum {
    /// Abscissa of the best sample.
    pub x: f64,
    /// Objective value at `x`.
    pub value: f64,
    /// Bracket reductions performed.
    pub iterations: u32,
}

/// Golden-section search for a minimum of `f` inside the bracket `(ax, bx, cx)`.
///
/// `bx` should lie between `ax` and `cx` with `f(bx)` below both ends, but the
/// triplet need not be ordered. The first interior probe goes into the wider
/// of the two sub-intervals. Iteration stops once
/// `|x3 − x0| ≤ tol · (|x1| + |x2|)`, and the better of the two interior
/// points is returned.
pub fn golden_section<F>(mut f: F, ax: f64, bx: f64, cx: f64, tol: f64) -> Minimum
where
    F: FnMut(f64) -> f64,
{
    let mut x0 = ax;
    let mut x3 = cx;
    let (mut x1, mut x2) = if (cx - bx).abs() > (bx - ax).abs() {
        (bx, bx + GOLDEN_C * (cx - bx))
    } else {
        (bx - GOLDEN_C * (bx - ax), bx)
    };

    let mut f1 = f(x1);
    let mut f2 = f(x2);
    let mut iterations = 0;

    while (x3 - x0).abs() > tol * (x1.abs() + x2.abs()) {
        iterations += 1;
        if f2 < f1 {
            x0 = x1;
            x1 = x2;
            x2 = GOLDEN_R * x1 + GOLDEN_C * x3;
            f1 = f2;
            f2 = f(x2);
        } else {
            x3 = x2;
            x2 = x1;
            x1 = GOLDEN_R * x2 + GOLDEN_C * x0;
            f2 = f1;
            f1 = f(x1);
        }
    }

    log::trace!("golden section converged after {iterations} reductions");

    if f1 < f2 {
        Minimum {
            x: x1,
            value: f1,
            iterations,
        }
    } else {
        Minimum {
            x: x2,
            value: f2,
            iterations,
        }
    }
}

/// Time of new Moon (Julian centuries since J2000.0) inside the bracket
/// `(ax, bx, cx)`, found by minimising the series phase fraction.
///
/// # Example
/// ```
/// use moon_ephem_lib::newmoon::locate_new_moon;
///
/// // Bracket around the new Moon of 2014-12-22 01:36 UTC
/// let day = 1.0 / 36_525.0;
/// let guess = (2_457_013.567 - 2_451_545.0) * day;
/// let t = locate_new_moon(guess - 0.4 * day, guess + 0.05 * day, guess + 0.4 * day);
/// assert!((t - guess).abs() < 0.01 * day);
/// ```
pub fn locate_new_moon(ax: f64, bx: f64, cx: f64) -> f64 {
    golden_section(
        |t| evaluate_moon(t).phase,
        ax,
        bx,
        cx,
        NEW_MOON_TOLERANCE,
    )
    .x
}
