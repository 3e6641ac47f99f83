//! One-dimensional curve interpolation.
//!
//! Every strategy implements [`Interpolator`]: it owns one validated
//! [`Coords`] set plus whatever coefficient table its formula needs, and
//! evaluates the fitted curve at arbitrary x. Replacing or extending the
//! data ([`Interpolator::set_coords`], [`Interpolator::append_value`]) fits
//! a brand-new curve and swaps it in whole.
//!
//! | strategy | min points | outside the data |
//! |---|---|---|
//! | [`LinearInterp`] | 2 | clamps to end `y` |
//! | [`PolynomialInterp`] | 2 | extrapolates |
//! | [`CubicSplineInterp`] | 3 | extrapolates |
//! | [`AkimaSplineInterp`] | 4 | extrapolates |
//! | [`HermiteSplineInterp`] | 3 | clamps to end `y` |
//!
//! Below its minimum a strategy quietly degrades to linear interpolation
//! (a single point gives a flat line, no points give `0.0`).
//!
//! Instances are `Send + Sync`; mutation needs `&mut`, so share them behind
//! a lock or rebuild per data set.

pub mod akima;
pub mod coords;
pub mod cubic;
pub mod factory;
pub mod hermite;
pub mod linear;
pub mod polynomial;
pub mod search;

pub use akima::AkimaSplineInterp;
pub use coords::Coords;
pub use cubic::CubicSplineInterp;
pub use factory::{BasicInterpolatorFactory, InterpolatorFactory, InterpolatorKind};
pub use hermite::HermiteSplineInterp;
pub use linear::LinearInterp;
pub use polynomial::PolynomialInterp;
pub use search::binary_search;

use crate::diva_error::DivaError;

static_assertions::assert_impl_all!(LinearInterp: Interpolator, Send, Sync);
static_assertions::assert_impl_all!(PolynomialInterp: Interpolator, Send, Sync);
static_assertions::assert_impl_all!(CubicSplineInterp: Interpolator, Send, Sync);
static_assertions::assert_impl_all!(AkimaSplineInterp: Interpolator, Send, Sync);
static_assertions::assert_impl_all!(HermiteSplineInterp: Interpolator, Send, Sync);
static_assertions::assert_obj_safe!(Interpolator);

/// Evaluation steps per knot interval suggested for curved strategies.
pub const STEPS_PER_INTERVAL: f64 = 16.0;

/// Common contract of every interpolation strategy.
pub trait Interpolator: Send + Sync + std::fmt::Debug {
    /// Which strategy this is.
    fn kind(&self) -> InterpolatorKind;

    /// The data the current fit was built from.
    fn coords(&self) -> &Coords;

    /// Replace the whole fit with one built over `coords`.
    fn refit(&mut self, coords: Coords);

    /// Value of the fitted curve at `xp`.
    fn interpolate(&self, xp: f64) -> f64;

    /// Points needed before the strategy's own formula is used.
    fn min_points(&self) -> usize {
        self.kind().min_points()
    }

    /// Validates and fits `x`/`y`.
    ///
    /// With `check` the x direction is read from the first two values;
    /// without it the current direction is kept and the new data must
    /// follow it. On error the existing fit is left as it was.
    fn set_coords(&mut self, x: &[f64], y: &[f64], check: bool) -> Result<(), DivaError> {
        let current = self.coords();
        let coords = if check || current.len() < 2 {
            Coords::new(x.to_vec(), y.to_vec())?
        } else {
            Coords::with_direction(x.to_vec(), y.to_vec(), current.is_decreasing())?
        };
        self.refit(coords);
        Ok(())
    }

    /// Adds one point at the end and refits, keeping the direction.
    /// O(n) per call.
    fn append_value(&mut self, x: f64, y: f64) -> Result<(), DivaError> {
        let coords = self.coords().appended(x, y)?;
        self.refit(coords);
        Ok(())
    }

    /// Alias of [`interpolate`](Self::interpolate) used by plotting code.
    fn eval_y_data(&self, xp: f64) -> f64 {
        self.interpolate(xp)
    }

    /// Evaluates every position in `xs`.
    fn eval_y_data_array(&self, xs: &[f64]) -> Vec<f64> {
        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;
            if xs.len() >= 4096 {
                return xs.par_iter().map(|&x| self.interpolate(x)).collect();
            }
        }
        xs.iter().map(|&x| self.interpolate(x)).collect()
    }

    fn count(&self) -> usize {
        self.coords().len()
    }

    /// Whether the strategy refuses further points. None of the built-in
    /// strategies has an upper limit.
    fn is_full(&self) -> bool {
        false
    }

    fn x_coords(&self) -> &[f64] {
        self.coords().x()
    }

    fn y_coords(&self) -> &[f64] {
        self.coords().y()
    }

    fn x_coord(&self, index: usize) -> Result<f64, DivaError> {
        self.coords().x_at(index)
    }

    fn y_coord(&self, index: usize) -> Result<f64, DivaError> {
        self.coords().y_at(index)
    }

    /// Suggested x step for drawing the curve: knot spacing divided by
    /// [`STEPS_PER_INTERVAL`]. `0.0` with fewer than two points.
    fn step_guess(&self) -> f64 {
        self.coords().mean_spacing() / STEPS_PER_INTERVAL
    }

    fn is_increasing(&self) -> bool {
        self.coords().is_increasing()
    }
}

/// Returns `Some(y[i])` when `up` lands exactly on knot `i` of the
/// ascending axis `u`, which keeps every strategy exact at its knots.
#[inline]
pub(crate) fn knot_hit(u: &[f64], y: &[f64], bracket: [usize; 2], up: f64) -> Option<f64> {
    let [lo, hi] = bracket;
    (lo == hi && u[lo] == up).then(|| y[lo])
}

/// Segment `[k, k + 1]` to evaluate for a bracket from [`binary_search`]
/// over `n >= 2` knots; collapsed brackets reuse the nearest end segment.
#[inline]
pub(crate) fn segment(bracket: [usize; 2], n: usize) -> usize {
    let [lo, _] = bracket;
    lo.min(n - 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_picks_end_segments() {
        assert_eq!(segment([0, 0], 5), 0);
        assert_eq!(segment([4, 4], 5), 3);
        assert_eq!(segment([2, 3], 5), 2);
        assert_eq!(segment([2, 2], 5), 2);
    }

    #[test]
    fn knot_hit_only_on_exact_match() {
        let u = [0.0, 1.0, 2.0];
        let y = [5.0, 6.0, 7.0];
        assert_eq!(knot_hit(&u, &y, [1, 1], 1.0), Some(6.0));
        assert_eq!(knot_hit(&u, &y, [2, 2], 9.0), None);
        assert_eq!(knot_hit(&u, &y, [0, 1], 0.5), None);
    }
}
