//! EdgeEnds: the tail/head pair stored for every introduced edge.
//!
//! Either end may be unset. An edge counts as *connected* only when both
//! ends are present; traversals skip everything else.

use crate::topology::ids::NodeId;

/// The two endpoints of an edge, `tail → head`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct EdgeEnds {
    /// Node the edge leaves from.
    pub tail: Option<NodeId>,
    /// Node the edge points to.
    pub head: Option<NodeId>,
}

impl EdgeEnds {
    /// Fully connected ends `tail → head`.
    #[inline]
    pub fn new(tail: NodeId, head: NodeId) -> Self {
        EdgeEnds {
            tail: Some(tail),
            head: Some(head),
        }
    }

    /// Both ends unset.
    #[inline]
    pub const fn disconnected() -> Self {
        EdgeEnds {
            tail: None,
            head: None,
        }
    }

    /// Returns `(tail, head)` when both ends are set.
    #[inline]
    pub fn endpoints(&self) -> Option<(NodeId, NodeId)> {
        Some((self.tail?, self.head?))
    }

    #[inline]
    pub fn is_connected(&self) -> bool {
        self.tail.is_some() && self.head.is_some()
    }

    /// Exactly one end set.
    #[inline]
    pub fn is_half_connected(&self) -> bool {
        self.tail.is_some() != self.head.is_some()
    }

    /// Same edge pointing the other way.
    #[inline]
    pub fn reversed(self) -> Self {
        EdgeEnds {
            tail: self.head,
            head: self.tail,
        }
    }
}
