//! DivaError: Unified error type for diva-core public APIs
//!
//! Every fallible operation in the topology and interpolation layers returns
//! this type. Unknown ids and malformed coordinate sets are reported here
//! instead of surfacing as out-of-bounds panics.

use crate::topology::ids::{EdgeId, NodeId, PortId};
use thiserror::Error;

/// Unified error type for diva-core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DivaError {
    /// The edge id was never introduced via `connect`/`add_edge`.
    #[error("Topology error: edge `{0}` has never been introduced")]
    UnknownEdge(EdgeId),
    /// The node id lies outside the node space.
    #[error("Topology error: node `{0}` has never been introduced")]
    UnknownNode(NodeId),
    /// The port id was never created on this network.
    #[error("Network error: port `{0}` does not exist")]
    UnknownPort(PortId),
    /// Indexed accessor called past the end of a sequence.
    #[error("Index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    /// `x` and `y` coordinate arrays differ in length.
    #[error("Coordinate length mismatch: x has {x} values, y has {y}")]
    LengthMismatch { x: usize, y: usize },
    /// Not enough points to define a coordinate set.
    #[error("Too few points: need at least {needed}, found {found}")]
    TooFewPoints { needed: usize, found: usize },
    /// `x[index]` breaks strict monotonicity (duplicates included).
    #[error("X coordinates are not strictly monotonic at index {index}")]
    NonMonotonic { index: usize },
    /// A coordinate is NaN or infinite.
    #[error("Non-finite coordinate at index {index}")]
    NonFiniteCoordinate { index: usize },
    /// Interpolator type name or tag not recognised by the factory.
    #[error("Unknown interpolator type: {0}")]
    UnknownInterpolator(String),
    /// Setting this parent would make `child` its own ancestor.
    #[error("Hierarchy error: making `{parent}` the parent of `{child}` creates a cycle")]
    HierarchyCycle { child: NodeId, parent: NodeId },
    /// Edge has exactly one end set.
    #[error("Topology error: edge `{0}` is only half connected")]
    HalfConnectedEdge(EdgeId),
    /// Edge starts and ends at the same node.
    #[error("Topology error: edge `{0}` is a self loop")]
    SelfLoop(EdgeId),
    /// A cached traversal outlived the topology state it was built from.
    #[error("Traversal built at generation {built} is stale (topology is at {current})")]
    StaleTraversal { built: u64, current: u64 },
    /// A stored summary field disagrees with the edge slots it describes.
    #[error("Topology error: stored `{0}` does not match the edge slots")]
    InconsistentTopology(&'static str),
    /// Two edges share the same tail and head.
    #[error("Topology error: edges `{first}` and `{second}` are parallel")]
    ParallelEdges { first: EdgeId, second: EdgeId },
}
