//! Natural cubic spline.
//!
//! Second derivatives at the knots come from the usual tridiagonal system
//! with zero curvature at both ends, solved by one forward decomposition
//! sweep and one back substitution. Between knots the spline is the cubic
//! built from the neighbouring values and second derivatives; past the ends
//! the end segments are extended.

use super::coords::Coords;
use super::linear::fallback_eval;
use super::search::binary_search;
use super::{Interpolator, InterpolatorKind, knot_hit, segment};
use crate::diva_error::DivaError;

#[derive(Clone, Debug, Default)]
pub struct CubicSplineInterp {
    coords: Coords,
    u: Vec<f64>,
    /// Second derivative of the spline at each knot.
    y2: Vec<f64>,
}

impl CubicSplineInterp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fit(coords: Coords) -> Self {
        let u = coords.ascending_x();
        let y2 = if u.len() >= InterpolatorKind::Cubic.min_points() {
            natural_second_derivatives(&u, coords.y())
        } else {
            Vec::new()
        };
        CubicSplineInterp { coords, u, y2 }
    }

    pub fn from_xy(x: &[f64], y: &[f64]) -> Result<Self, DivaError> {
        Ok(Self::fit(Coords::new(x.to_vec(), y.to_vec())?))
    }

    /// Second derivatives on the ascending proxy axis.
    pub fn second_derivatives(&self) -> &[f64] {
        &self.y2
    }
}

fn natural_second_derivatives(x: &[f64], y: &[f64]) -> Vec<f64> {
    let n = x.len();
    let mut y2 = vec![0.0; n];
    let mut tmp = vec![0.0; n];

    // decomposition
    for i in 1..n - 1 {
        let sig = (x[i] - x[i - 1]) / (x[i + 1] - x[i - 1]);
        let p = sig * y2[i - 1] + 2.0;
        y2[i] = (sig - 1.0) / p;
        let d = (y[i + 1] - y[i]) / (x[i + 1] - x[i]) - (y[i] - y[i - 1]) / (x[i] - x[i - 1]);
        tmp[i] = (6.0 * d / (x[i + 1] - x[i - 1]) - sig * tmp[i - 1]) / p;
    }

    // back substitution; y2[n-1] stays zero
    for k in (0..n - 1).rev() {
        y2[k] = y2[k] * y2[k + 1] + tmp[k];
    }
    y2
}

impl Interpolator for CubicSplineInterp {
    fn kind(&self) -> InterpolatorKind {
        InterpolatorKind::Cubic
    }

    fn coords(&self) -> &Coords {
        &self.coords
    }

    fn refit(&mut self, coords: Coords) {
        *self = Self::fit(coords);
    }

    fn interpolate(&self, xp: f64) -> f64 {
        let n = self.u.len();
        if n < self.min_points() {
            return fallback_eval(&self.coords, self.kind(), xp);
        }
        let (u, y, y2) = (&self.u, self.coords.y(), &self.y2);
        let up = self.coords.sign() * xp;
        let bracket = binary_search(u, up);
        if let Some(hit) = knot_hit(u, y, bracket, up) {
            return hit;
        }
        let lo = segment(bracket, n);
        let hi = lo + 1;
        let h = u[hi] - u[lo];
        let a = (u[hi] - up) / h;
        let b = (up - u[lo]) / h;
        a * y[lo] + b * y[hi] + ((a * a * a - a) * y2[lo] + (b * b * b - b) * y2[hi]) * (h * h) / 6.0
    }
}
