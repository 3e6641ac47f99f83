//! Single global polynomial through every knot.
//!
//! Coefficients are Newton divided differences; evaluation is Horner's
//! scheme on the nested Newton form. High degrees oscillate badly between
//! knots, so this is only sensible for a handful of points.

use super::coords::Coords;
use super::linear::fallback_eval;
use super::search::binary_search;
use super::{Interpolator, InterpolatorKind, knot_hit};
use crate::diva_error::DivaError;

#[derive(Clone, Debug, Default)]
pub struct PolynomialInterp {
    coords: Coords,
    /// Knots on the ascending proxy axis.
    u: Vec<f64>,
    /// Divided differences `f[u0], f[u0,u1], …`.
    newton: Vec<f64>,
}

impl PolynomialInterp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fit(coords: Coords) -> Self {
        let u = coords.ascending_x();
        let mut newton = coords.y().to_vec();
        let n = u.len();
        if n >= InterpolatorKind::Polynomial.min_points() {
            for j in 1..n {
                for i in (j..n).rev() {
                    newton[i] = (newton[i] - newton[i - 1]) / (u[i] - u[i - j]);
                }
            }
        }
        PolynomialInterp { coords, u, newton }
    }

    pub fn from_xy(x: &[f64], y: &[f64]) -> Result<Self, DivaError> {
        Ok(Self::fit(Coords::new(x.to_vec(), y.to_vec())?))
    }

    /// Divided-difference coefficients of the Newton form.
    pub fn coefficients(&self) -> &[f64] {
        &self.newton
    }
}

impl Interpolator for PolynomialInterp {
    fn kind(&self) -> InterpolatorKind {
        InterpolatorKind::Polynomial
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
        let up = self.coords.sign() * xp;
        if let Some(y) = knot_hit(&self.u, self.coords.y(), binary_search(&self.u, up), up) {
            return y;
        }
        let mut acc = self.newton[n - 1];
        for i in (0..n - 1).rev() {
            acc = acc * (up - self.u[i]) + self.newton[i];
        }
        acc
    }
}
