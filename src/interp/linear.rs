//! Piecewise-linear interpolation, and the fallback every other strategy
//! uses below its minimum point count.

use super::coords::Coords;
use super::search::binary_search;
use super::{Interpolator, InterpolatorKind};
use crate::diva_error::DivaError;

/// Straight lines between neighbouring knots; clamps outside the data.
#[derive(Clone, Debug, Default)]
pub struct LinearInterp {
    coords: Coords,
}

impl LinearInterp {
    /// An interpolator with no data; evaluates to `0.0`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fit(coords: Coords) -> Self {
        LinearInterp { coords }
    }

    pub fn from_xy(x: &[f64], y: &[f64]) -> Result<Self, DivaError> {
        Ok(Self::fit(Coords::new(x.to_vec(), y.to_vec())?))
    }
}

/// Linear evaluation over any coordinate set: `0.0` when empty, the lone
/// `y` for one point, endpoint `y` outside the data.
pub(crate) fn linear_eval(coords: &Coords, xp: f64) -> f64 {
    let (x, y) = (coords.x(), coords.y());
    match x.len() {
        0 => 0.0,
        1 => y[0],
        _ => {
            let [lo, hi] = binary_search(x, xp);
            if lo == hi {
                y[lo]
            } else {
                y[lo] + (y[hi] - y[lo]) * ((xp - x[lo]) / (x[hi] - x[lo]))
            }
        }
    }
}

/// Used by curved strategies below their minimum point count.
pub(crate) fn fallback_eval(coords: &Coords, kind: InterpolatorKind, xp: f64) -> f64 {
    log::trace!(
        "{} interpolator has {} point(s), falling back to linear",
        kind.short_name(),
        coords.len()
    );
    linear_eval(coords, xp)
}

impl Interpolator for LinearInterp {
    fn kind(&self) -> InterpolatorKind {
        InterpolatorKind::Linear
    }

    fn coords(&self) -> &Coords {
        &self.coords
    }

    fn refit(&mut self, coords: Coords) {
        self.coords = coords;
    }

    fn interpolate(&self, xp: f64) -> f64 {
        linear_eval(&self.coords, xp)
    }

    /// Lines are exact between knots, so the knot spacing itself is enough.
    fn step_guess(&self) -> f64 {
        self.coords.mean_spacing()
    }
}
