//! Top-level module for graph topology abstractions.
//!
//! This module provides an integer-indexed directed multigraph and the
//! structures layered over it:
//! - [`Topology`]: tail/head arrays keyed by dense edge ids
//! - [`Traversal`]: a frozen successor/out-edge snapshot with root detection
//! - [`LightweightGraph`] and [`LightweightNetwork`]: client payloads, a node
//!   hierarchy, ports, and lazily rebuilt traversal caches
//!
//! Most users will build a [`LightweightGraph`]; [`Topology`] and
//! [`Traversal`] are exposed for callers that keep payloads elsewhere.

pub mod cache;
pub mod ends;
pub mod graph;
pub mod ids;
pub mod network;
pub mod store;
pub mod traversal;
pub mod validation;

pub use cache::InvalidateCache;
pub use ends::EdgeEnds;
pub use graph::LightweightGraph;
pub use ids::{EdgeId, NodeId, PortId};
pub use network::LightweightNetwork;
pub use store::Topology;
pub use traversal::{Direction, Traversal};
pub use validation::{IssueHandling, TopologyValidationOptions, validate_topology};
