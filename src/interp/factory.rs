//! Construction of interpolators from a type tag or name.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::{
    AkimaSplineInterp, Coords, CubicSplineInterp, HermiteSplineInterp, Interpolator, LinearInterp,
    PolynomialInterp,
};
use crate::diva_error::DivaError;

/// Interpolation strategy tag. The discriminants are the stable integer
/// tags used by [`from_index`](Self::from_index).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum InterpolatorKind {
    Hermite = 0,
    Akima = 1,
    Cubic = 2,
    Polynomial = 3,
    Linear = 4,
}

static BY_NAME: Lazy<HashMap<&'static str, InterpolatorKind>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for kind in InterpolatorKind::ALL {
        map.insert(kind.short_name(), kind);
    }
    // a few spellings seen in saved plot settings
    map.insert("hermite spline", InterpolatorKind::Hermite);
    map.insert("akima spline", InterpolatorKind::Akima);
    map.insert("cubic spline", InterpolatorKind::Cubic);
    map.insert("spline", InterpolatorKind::Cubic);
    map.insert("poly", InterpolatorKind::Polynomial);
    map
});

impl InterpolatorKind {
    pub const ALL: [InterpolatorKind; 5] = [
        InterpolatorKind::Hermite,
        InterpolatorKind::Akima,
        InterpolatorKind::Cubic,
        InterpolatorKind::Polynomial,
        InterpolatorKind::Linear,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn short_name(self) -> &'static str {
        match self {
            InterpolatorKind::Hermite => "hermite",
            InterpolatorKind::Akima => "akima",
            InterpolatorKind::Cubic => "cubic",
            InterpolatorKind::Polynomial => "polynomial",
            InterpolatorKind::Linear => "linear",
        }
    }

    /// Human-readable label for menus.
    pub fn long_name(self) -> &'static str {
        match self {
            InterpolatorKind::Hermite => "Hermite spline",
            InterpolatorKind::Akima => "Akima spline",
            InterpolatorKind::Cubic => "Natural cubic spline",
            InterpolatorKind::Polynomial => "Polynomial",
            InterpolatorKind::Linear => "Linear",
        }
    }

    /// Points needed before the strategy stops degrading to linear.
    pub fn min_points(self) -> usize {
        match self {
            InterpolatorKind::Linear | InterpolatorKind::Polynomial => 2,
            InterpolatorKind::Cubic | InterpolatorKind::Hermite => 3,
            InterpolatorKind::Akima => 4,
        }
    }

    /// Case-insensitive lookup; surrounding whitespace is ignored.
    pub fn from_name(name: &str) -> Option<Self> {
        BY_NAME.get(name.trim().to_ascii_lowercase().as_str()).copied()
    }
}

impl fmt::Display for InterpolatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for InterpolatorKind {
    type Err = DivaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| DivaError::UnknownInterpolator(s.to_string()))
    }
}

/// Dispatch from strategy tags to interpolator instances.
pub trait InterpolatorFactory {
    /// A fresh interpolator with no data.
    fn make_interpolator(&self, kind: InterpolatorKind) -> Box<dyn Interpolator>;

    /// Number of strategies on offer; valid tags are `0..interpolator_count()`.
    fn interpolator_count(&self) -> usize {
        InterpolatorKind::ALL.len()
    }

    fn short_name(&self, kind: InterpolatorKind) -> &'static str {
        kind.short_name()
    }

    fn type_from_name(&self, name: &str) -> Result<InterpolatorKind, DivaError> {
        name.parse()
    }

    fn interpolator_type(&self, interp: &dyn Interpolator) -> InterpolatorKind {
        interp.kind()
    }

    /// Builds an interpolator of `kind` already fitted to `x`/`y`.
    fn make_fitted(
        &self,
        kind: InterpolatorKind,
        x: &[f64],
        y: &[f64],
    ) -> Result<Box<dyn Interpolator>, DivaError> {
        let coords = Coords::new(x.to_vec(), y.to_vec())?;
        let mut interp = self.make_interpolator(kind);
        interp.refit(coords);
        Ok(interp)
    }
}

/// The built-in strategies. Stateless; use [`instance`](Self::instance).
#[derive(Debug, Default)]
pub struct BasicInterpolatorFactory {
    _private: (),
}

static INSTANCE: Lazy<BasicInterpolatorFactory> = Lazy::new(|| {
    log::debug!("creating BasicInterpolatorFactory");
    BasicInterpolatorFactory { _private: () }
});

impl BasicInterpolatorFactory {
    pub fn instance() -> &'static BasicInterpolatorFactory {
        &INSTANCE
    }
}

impl InterpolatorFactory for BasicInterpolatorFactory {
    fn make_interpolator(&self, kind: InterpolatorKind) -> Box<dyn Interpolator> {
        match kind {
            InterpolatorKind::Hermite => Box::new(HermiteSplineInterp::new()),
            InterpolatorKind::Akima => Box::new(AkimaSplineInterp::new()),
            InterpolatorKind::Cubic => Box::new(CubicSplineInterp::new()),
            InterpolatorKind::Polynomial => Box::new(PolynomialInterp::new()),
            InterpolatorKind::Linear => Box::new(LinearInterp::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trip() {
        for (i, kind) in InterpolatorKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(InterpolatorKind::from_index(i), Some(*kind));
        }
        assert_eq!(InterpolatorKind::from_index(5), None);
        assert_eq!(InterpolatorKind::Linear.index(), 4);
    }

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!(InterpolatorKind::from_name("AKIMA"), Some(InterpolatorKind::Akima));
        assert_eq!(InterpolatorKind::from_name(" Linear "), Some(InterpolatorKind::Linear));
        assert_eq!(
            InterpolatorKind::from_name("Cubic Spline"),
            Some(InterpolatorKind::Cubic)
        );
        assert_eq!(InterpolatorKind::from_name("bezier"), None);
        assert_eq!(
            "bezier".parse::<InterpolatorKind>(),
            Err(DivaError::UnknownInterpolator("bezier".into()))
        );
        assert_eq!(InterpolatorKind::Polynomial.to_string(), "polynomial");
    }

    #[test]
    fn factory_builds_each_kind() {
        let f = BasicInterpolatorFactory::instance();
        for kind in InterpolatorKind::ALL {
            let interp = f.make_interpolator(kind);
            assert_eq!(f.interpolator_type(interp.as_ref()), kind);
            assert_eq!(interp.count(), 0);
            assert_eq!(interp.interpolate(1.0), 0.0);
            assert_eq!(f.short_name(kind), kind.short_name());
        }
        assert_eq!(f.interpolator_count(), 5);
        for i in 0..f.interpolator_count() {
            let kind = InterpolatorKind::from_index(i).unwrap();
            assert_eq!(f.make_interpolator(kind).kind(), kind);
        }
        assert!(std::ptr::eq(f, BasicInterpolatorFactory::instance()));
    }

    #[test]
    fn make_fitted_validates() {
        let f = BasicInterpolatorFactory::instance();
        let interp = f
            .make_fitted(InterpolatorKind::Cubic, &[0.0, 1.0, 2.0], &[0.0, 1.0, 0.0])
            .unwrap();
        assert_eq!(interp.count(), 3);
        assert!(matches!(
            f.make_fitted(InterpolatorKind::Cubic, &[0.0, 0.0], &[1.0, 2.0]),
            Err(DivaError::NonMonotonic { .. })
        ));
    }

    #[test]
    fn serde_uses_short_names() {
        let s = serde_json::to_string(&InterpolatorKind::Hermite).unwrap();
        assert_eq!(s, "\"hermite\"");
        let back: InterpolatorKind = serde_json::from_str("\"akima\"").unwrap();
        assert_eq!(back, InterpolatorKind::Akima);
    }
}
