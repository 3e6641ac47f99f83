//! Validated coordinate sets for interpolation.
//!
//! A [`Coords`] value is two parallel sequences with `x` strictly monotonic
//! in one direction. Once built it never changes; growing or replacing the
//! data produces a new value, so an interpolator can swap its whole fit in
//! one assignment.

use itertools::Itertools;

use crate::diva_error::DivaError;

/// Parallel `x`/`y` sequences with a fixed x direction.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "CoordsRepr", into = "CoordsRepr")]
pub struct Coords {
    x: Vec<f64>,
    y: Vec<f64>,
    decreasing: bool,
}

#[derive(serde::Serialize, serde::Deserialize)]
struct CoordsRepr {
    x: Vec<f64>,
    y: Vec<f64>,
    #[serde(default)]
    decreasing: bool,
}

impl TryFrom<CoordsRepr> for Coords {
    type Error = DivaError;

    fn try_from(raw: CoordsRepr) -> Result<Self, DivaError> {
        validate(&raw.x, &raw.y, raw.decreasing, 0)?;
        Ok(Coords {
            x: raw.x,
            y: raw.y,
            decreasing: raw.decreasing,
        })
    }
}

impl From<Coords> for CoordsRepr {
    fn from(c: Coords) -> Self {
        CoordsRepr {
            x: c.x,
            y: c.y,
            decreasing: c.decreasing,
        }
    }
}

/// Smallest coordinate set `Coords::new` accepts.
pub const MIN_COORDS: usize = 2;

impl Coords {
    /// Builds a coordinate set, taking the x direction from `x[0]` vs `x[1]`.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, DivaError> {
        let decreasing = x.len() >= 2 && x[1] < x[0];
        Self::with_direction(x, y, decreasing)
    }

    /// Builds a coordinate set that must run in the given direction.
    pub fn with_direction(x: Vec<f64>, y: Vec<f64>, decreasing: bool) -> Result<Self, DivaError> {
        validate(&x, &y, decreasing, MIN_COORDS)?;
        Ok(Coords { x, y, decreasing })
    }

    /// No points, increasing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Copy of `self` with one more point at the end.
    ///
    /// Unlike [`Coords::new`] this accepts starting from zero or one point.
    /// The direction is fixed by the first two points and kept afterwards.
    pub fn appended(&self, x: f64, y: f64) -> Result<Self, DivaError> {
        let decreasing = match self.x.as_slice() {
            [only] => x < *only,
            _ => self.decreasing,
        };
        let mut xs = Vec::with_capacity(self.x.len() + 1);
        xs.extend_from_slice(&self.x);
        xs.push(x);
        let mut ys = Vec::with_capacity(self.y.len() + 1);
        ys.extend_from_slice(&self.y);
        ys.push(y);
        validate(&xs, &ys, decreasing, 0)?;
        Ok(Coords {
            x: xs,
            y: ys,
            decreasing,
        })
    }

    #[inline]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    #[inline]
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    #[inline]
    pub fn is_decreasing(&self) -> bool {
        self.decreasing
    }

    #[inline]
    pub fn is_increasing(&self) -> bool {
        !self.decreasing
    }

    pub fn x_at(&self, index: usize) -> Result<f64, DivaError> {
        self.x.get(index).copied().ok_or(DivaError::IndexOutOfRange {
            index,
            len: self.len(),
        })
    }

    pub fn y_at(&self, index: usize) -> Result<f64, DivaError> {
        self.y.get(index).copied().ok_or(DivaError::IndexOutOfRange {
            index,
            len: self.len(),
        })
    }

    /// `+1.0` for increasing data, `-1.0` for decreasing.
    #[inline]
    pub fn sign(&self) -> f64 {
        if self.decreasing { -1.0 } else { 1.0 }
    }

    /// The x axis mapped so it always increases: negated when the data is
    /// decreasing. Spline fits work on this proxy axis.
    pub fn ascending_x(&self) -> Vec<f64> {
        let s = self.sign();
        self.x.iter().map(|&v| s * v).collect()
    }

    /// Mean distance between neighbouring x values, `0.0` below two points.
    pub fn mean_spacing(&self) -> f64 {
        match (self.x.first(), self.x.last()) {
            (Some(a), Some(b)) if self.len() >= 2 => (b - a).abs() / (self.len() - 1) as f64,
            _ => 0.0,
        }
    }
}

fn validate(x: &[f64], y: &[f64], decreasing: bool, min_len: usize) -> Result<(), DivaError> {
    if x.len() != y.len() {
        return Err(DivaError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    if x.len() < min_len {
        return Err(DivaError::TooFewPoints {
            needed: min_len,
            found: x.len(),
        });
    }
    if let Some(index) = x
        .iter()
        .zip(y)
        .position(|(a, b)| !a.is_finite() || !b.is_finite())
    {
        return Err(DivaError::NonFiniteCoordinate { index });
    }
    let ordered = |(a, b): (&f64, &f64)| if decreasing { b < a } else { b > a };
    if let Some(i) = x.iter().tuple_windows().position(|w| !ordered(w)) {
        return Err(DivaError::NonMonotonic { index: i + 1 });
    }
    Ok(())
}
