//! Cubic Hermite spline with finite-difference slopes.
//!
//! No global table is built: each query looks up its bracket and works out
//! the two knot slopes it needs on the spot. Queries outside the data clamp
//! to the end values.

use super::coords::Coords;
use super::linear::fallback_eval;
use super::search::binary_search;
use super::{Interpolator, InterpolatorKind, knot_hit};
use crate::diva_error::DivaError;

#[derive(Clone, Debug, Default)]
pub struct HermiteSplineInterp {
    coords: Coords,
    u: Vec<f64>,
}

impl HermiteSplineInterp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fit(coords: Coords) -> Self {
        let u = coords.ascending_x();
        HermiteSplineInterp { coords, u }
    }

    pub fn from_xy(x: &[f64], y: &[f64]) -> Result<Self, DivaError> {
        Ok(Self::fit(Coords::new(x.to_vec(), y.to_vec())?))
    }

    /// dy/du at knot `i`: centred difference inside, one-sided at the ends.
    fn slope(&self, i: usize) -> f64 {
        let (u, y) = (&self.u, self.coords.y());
        let last = u.len() - 1;
        let (a, b) = match i {
            0 => (0, 1),
            i if i == last => (last - 1, last),
            i => (i - 1, i + 1),
        };
        (y[b] - y[a]) / (u[b] - u[a])
    }
}

impl Interpolator for HermiteSplineInterp {
    fn kind(&self) -> InterpolatorKind {
        InterpolatorKind::Hermite
    }

    fn coords(&self) -> &Coords {
        &self.coords
    }

    fn refit(&mut self, coords: Coords) {
        *self = Self::fit(coords);
    }

    fn interpolate(&self, xp: f64) -> f64 {
        if self.u.len() < self.min_points() {
            return fallback_eval(&self.coords, self.kind(), xp);
        }
        let (u, y) = (&self.u, self.coords.y());
        let up = self.coords.sign() * xp;
        let bracket = binary_search(u, up);
        if let Some(hit) = knot_hit(u, y, bracket, up) {
            return hit;
        }
        let [lo, hi] = bracket;
        if lo == hi {
            return y[lo];
        }

        let h = u[hi] - u[lo];
        let t = (up - u[lo]) / h;
        let (t2, t3) = (t * t, t * t * t);
        let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
        let h10 = t3 - 2.0 * t2 + t;
        let h01 = -2.0 * t3 + 3.0 * t2;
        let h11 = t3 - t2;
        h00 * y[lo] + h10 * h * self.slope(lo) + h01 * y[hi] + h11 * h * self.slope(hi)
    }
}
