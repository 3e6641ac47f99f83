#![cfg_attr(docsrs, feature(doc_cfg))]
//! # diva-core
//!
//! diva-core holds the two headless building blocks behind interactive
//! figure editing: an id-indexed directed graph layer for connecting
//! figures, and a family of 1-D curve interpolators for drawing smooth
//! lines through user-placed points.
//!
//! ## Features
//! - [`topology::Topology`]: edge-indexed connection store with optional
//!   ends instead of sentinel ids
//! - [`topology::Traversal`]: frozen successor/out-edge snapshot, forward or
//!   backward, with root detection
//! - [`topology::LightweightGraph`] / [`topology::LightweightNetwork`]:
//!   payload-carrying graph with a node hierarchy, ports and a lazily
//!   rebuilt traversal cache
//! - [`interp`]: linear, polynomial, natural cubic, Akima and Hermite
//!   interpolation behind one [`interp::Interpolator`] trait, plus a
//!   name/tag driven factory
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! diva-core = "0.3"
//! # Optional features:
//! # features = ["rayon", "strict-invariants"]
//! ```
//!
//! ```rust
//! use diva_core::prelude::*;
//!
//! let f = BasicInterpolatorFactory::instance();
//! let curve = f
//!     .make_fitted(InterpolatorKind::Akima, &[0.0, 1.0, 2.0, 3.0], &[0.0, 1.0, 0.0, 1.0])
//!     .unwrap();
//! assert_eq!(curve.interpolate(2.0), 0.0);
//!
//! let mut t = Topology::new();
//! t.connect(EdgeId::new(0), NodeId::new(0), NodeId::new(1)).unwrap();
//! assert_eq!(Traversal::forward(&t).roots(), &[NodeId::new(0)]);
//! ```
//!
//! ## Invariant checks
//! Mutating operations run `debug_invariants!` after they finish. The checks
//! are on in debug builds; enable `strict-invariants` or `check-invariants`
//! to keep them in release builds.

pub mod debug_invariants;
pub mod diva_error;
pub mod interp;
pub mod topology;

pub use debug_invariants::DebugInvariants;
pub use diva_error::DivaError;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::diva_error::DivaError;
    pub use crate::interp::{
        AkimaSplineInterp, BasicInterpolatorFactory, Coords, CubicSplineInterp,
        HermiteSplineInterp, Interpolator, InterpolatorFactory, InterpolatorKind, LinearInterp,
        PolynomialInterp, binary_search,
    };
    pub use crate::topology::{
        Direction, EdgeEnds, EdgeId, InvalidateCache, LightweightGraph, LightweightNetwork, NodeId,
        PortId, Topology, Traversal,
    };
}
