//! Integer-indexed directed multigraph.
//!
//! [`Topology`] stores, for each edge id, the pair of node ids it connects.
//! Nodes carry no data at this layer; the node space is simply
//! `0..node_count()`. Edge slots are never compacted: removing an edge only
//! clears its ends, and the id stays introduced.
//!
//! Backing storage is a plain `Vec`, so capacity doubles on overflow and
//! `connect` on a fresh id is amortised O(1).

use crate::debug_invariants::DebugInvariants;
use crate::diva_error::DivaError;
use crate::topology::ends::EdgeEnds;
use crate::topology::ids::{EdgeId, NodeId};

/// Array-backed directed multigraph over dense node and edge ids.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "TopologyRepr")]
pub struct Topology {
    /// `None` = never introduced; `Some(ends)` = introduced, maybe disconnected.
    slots: Vec<Option<EdgeEnds>>,
    node_count: usize,
    max_node: Option<NodeId>,
    max_edge: Option<EdgeId>,
    /// Bumped on every connection change.
    #[serde(skip)]
    generation: u64,
}

impl Topology {
    /// Creates an empty topology.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty topology with room for `edges` edge slots.
    pub fn with_capacity(edges: usize) -> Self {
        Self {
            slots: Vec::with_capacity(edges),
            ..Self::default()
        }
    }

    /// Introduces a fresh node id at the end of the node space.
    pub fn add_node(&mut self) -> NodeId {
        let id = NodeId::new(self.node_count);
        self.node_count += 1;
        id
    }

    /// Makes sure `node` is part of the node space.
    ///
    /// `NodeId::new(usize::MAX)` cannot be covered and yields `UnknownNode`.
    pub fn ensure_node(&mut self, node: NodeId) -> Result<(), DivaError> {
        self.node_count = self.node_count.max(space_end(node)?);
        Ok(())
    }

    /// Connects `edge` from `tail` to `head`, introducing any of the three
    /// ids that are new. Previous ends of `edge` are overwritten.
    ///
    /// Fails without touching anything when an id is `usize::MAX`.
    pub fn connect(&mut self, edge: EdgeId, tail: NodeId, head: NodeId) -> Result<(), DivaError> {
        let slot = edge.index();
        let len = slot.checked_add(1).ok_or(DivaError::UnknownEdge(edge))?;
        let nodes_end = space_end(tail)?.max(space_end(head)?);
        if slot >= self.slots.len() {
            self.slots.resize(len, None);
        }
        self.slots[slot] = Some(EdgeEnds::new(tail, head));
        self.node_count = self.node_count.max(nodes_end);
        self.max_edge = self.max_edge.max(Some(edge));
        self.max_node = self.max_node.max(Some(tail.max(head)));
        self.touch();
        crate::debug_invariants!(&*self, "Topology::connect");
        Ok(())
    }

    /// Head (target) of `edge`, `None` if that end is unset.
    pub fn head(&self, edge: EdgeId) -> Result<Option<NodeId>, DivaError> {
        Ok(self.ends(edge)?.head)
    }

    /// Tail (source) of `edge`, `None` if that end is unset.
    pub fn tail(&self, edge: EdgeId) -> Result<Option<NodeId>, DivaError> {
        Ok(self.ends(edge)?.tail)
    }

    /// Both ends of an introduced edge.
    pub fn ends(&self, edge: EdgeId) -> Result<EdgeEnds, DivaError> {
        self.slots
            .get(edge.index())
            .copied()
            .flatten()
            .ok_or(DivaError::UnknownEdge(edge))
    }

    /// Overwrites the head of an already introduced edge.
    pub fn set_head(&mut self, edge: EdgeId, node: NodeId) -> Result<(), DivaError> {
        self.check_node(node)?;
        self.slot_mut(edge)?.head = Some(node);
        self.max_node = self.max_node.max(Some(node));
        self.touch();
        crate::debug_invariants!(&*self, "Topology::set_head");
        Ok(())
    }

    /// Overwrites the tail of an already introduced edge.
    pub fn set_tail(&mut self, edge: EdgeId, node: NodeId) -> Result<(), DivaError> {
        self.check_node(node)?;
        self.slot_mut(edge)?.tail = Some(node);
        self.max_node = self.max_node.max(Some(node));
        self.touch();
        crate::debug_invariants!(&*self, "Topology::set_tail");
        Ok(())
    }

    /// Clears both ends of `edge`. The id is not reclaimed.
    pub fn remove_edge(&mut self, edge: EdgeId) -> Result<(), DivaError> {
        *self.slot_mut(edge)? = EdgeEnds::disconnected();
        self.touch();
        crate::debug_invariants!(&*self, "Topology::remove_edge");
        Ok(())
    }

    /// Turns every edge around in place. Applying it twice is the identity.
    pub fn reverse(&mut self) {
        for ends in self.slots.iter_mut().flatten() {
            *ends = ends.reversed();
        }
        self.touch();
        crate::debug_invariants!(&*self, "Topology::reverse");
    }

    /// First edge at or after `first_edge` running exactly `tail → head`.
    pub fn find(&self, first_edge: EdgeId, tail: NodeId, head: NodeId) -> Option<EdgeId> {
        let last = self.max_edge?.index();
        let want = EdgeEnds::new(tail, head);
        (first_edge.index()..=last)
            .find(|&i| self.slots[i] == Some(want))
            .map(EdgeId::new)
    }

    /// Highest node id ever connected.
    #[inline]
    pub fn max_node_id(&self) -> Option<NodeId> {
        self.max_node
    }

    /// Highest edge id ever connected.
    #[inline]
    pub fn max_edge_id(&self) -> Option<EdgeId> {
        self.max_edge
    }

    /// Size of the node space.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of edge slots, introduced or not.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.slots.len()
    }

    /// Whether `node` lies inside the node space.
    #[inline]
    pub fn contains_node(&self, node: NodeId) -> bool {
        node.index() < self.node_count
    }

    /// Whether `edge` has been introduced, connected or not.
    #[inline]
    pub fn contains_edge(&self, edge: EdgeId) -> bool {
        matches!(self.slots.get(edge.index()), Some(Some(_)))
    }

    /// True when both ends of `edge` are set.
    pub fn is_connected(&self, edge: EdgeId) -> bool {
        self.ends(edge).is_ok_and(|e| e.is_connected())
    }

    /// Connected edges in id order as `(edge, tail, head)`.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, NodeId, NodeId)> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            let (t, h) = slot.as_ref()?.endpoints()?;
            Some((EdgeId::new(i), t, h))
        })
    }

    /// Every introduced edge with its (possibly partial) ends.
    pub fn edge_slots(&self) -> impl Iterator<Item = (EdgeId, EdgeEnds)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.map(|ends| (EdgeId::new(i), ends)))
    }

    /// Drops every node and edge.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.node_count = 0;
        self.max_node = None;
        self.max_edge = None;
        self.touch();
        crate::debug_invariants!(&*self, "Topology::clear");
    }

    /// Counter bumped by every connection change; lets derived views tell
    /// whether they were built from the current state.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    fn touch(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    fn check_node(&self, node: NodeId) -> Result<(), DivaError> {
        if self.contains_node(node) {
            Ok(())
        } else {
            Err(DivaError::UnknownNode(node))
        }
    }

    fn slot_mut(&mut self, edge: EdgeId) -> Result<&mut EdgeEnds, DivaError> {
        self.slots
            .get_mut(edge.index())
            .and_then(Option::as_mut)
            .ok_or(DivaError::UnknownEdge(edge))
    }
}

/// One past `node` in the node space.
fn space_end(node: NodeId) -> Result<usize, DivaError> {
    node.index()
        .checked_add(1)
        .ok_or(DivaError::UnknownNode(node))
}

/// Wire form of [`Topology`]; checked before it becomes one.
#[derive(serde::Deserialize)]
struct TopologyRepr {
    slots: Vec<Option<EdgeEnds>>,
    node_count: usize,
    max_node: Option<NodeId>,
    max_edge: Option<EdgeId>,
}

impl TryFrom<TopologyRepr> for Topology {
    type Error = DivaError;

    fn try_from(raw: TopologyRepr) -> Result<Self, DivaError> {
        let t = Topology {
            slots: raw.slots,
            node_count: raw.node_count,
            max_node: raw.max_node,
            max_edge: raw.max_edge,
            generation: 0,
        };
        t.validate_invariants()?;
        Ok(t)
    }
}

impl DebugInvariants for Topology {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self, "Topology");
    }

    fn validate_invariants(&self) -> Result<(), DivaError> {
        let mut last_edge = None;
        let mut top_node = None;
        for (edge, ends) in self.edge_slots() {
            for node in [ends.tail, ends.head].into_iter().flatten() {
                if !self.contains_node(node) {
                    return Err(DivaError::UnknownNode(node));
                }
                top_node = top_node.max(Some(node));
            }
            last_edge = Some(edge);
        }
        if self.max_edge != last_edge {
            return Err(DivaError::InconsistentTopology("max_edge"));
        }
        // ends may have moved below the recorded maximum, never above it
        match self.max_node {
            None if top_node.is_some() => Err(DivaError::InconsistentTopology("max_node")),
            Some(m) if Some(m) < top_node || !self.contains_node(m) => {
                Err(DivaError::InconsistentTopology("max_node"))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(i: usize) -> NodeId {
        NodeId::new(i)
    }
    fn e(i: usize) -> EdgeId {
        EdgeId::new(i)
    }

    #[test]
    fn connect_and_lookup() {
        let mut t = Topology::new();
        t.connect(e(0), n(1), n(2)).unwrap();
        assert_eq!(t.tail(e(0)).unwrap(), Some(n(1)));
        assert_eq!(t.head(e(0)).unwrap(), Some(n(2)));
        assert_eq!(t.node_count(), 3);
        assert_eq!(t.max_node_id(), Some(n(2)));
        assert_eq!(t.max_edge_id(), Some(e(0)));
    }

    #[test]
    fn connect_far_edge_grows_slots() {
        let mut t = Topology::new();
        t.connect(e(10), n(0), n(1)).unwrap();
        assert_eq!(t.edge_count(), 11);
        assert!(t.contains_edge(e(10)));
        // slots below were never introduced
        assert!(!t.contains_edge(e(3)));
        assert_eq!(t.head(e(3)), Err(DivaError::UnknownEdge(e(3))));
    }

    #[test]
    fn unknown_edge_is_an_error() {
        let t = Topology::new();
        assert_eq!(t.tail(e(0)), Err(DivaError::UnknownEdge(e(0))));
        let mut t = t;
        assert_eq!(t.remove_edge(e(5)), Err(DivaError::UnknownEdge(e(5))));
        assert_eq!(t.set_head(e(0), n(0)), Err(DivaError::UnknownNode(n(0))));
    }

    #[test]
    fn set_head_and_tail() {
        let mut t = Topology::new();
        t.connect(e(0), n(0), n(1)).unwrap();
        t.add_node();
        t.set_head(e(0), n(2)).unwrap();
        assert_eq!(t.ends(e(0)).unwrap(), EdgeEnds::new(n(0), n(2)));
        t.set_tail(e(0), n(1)).unwrap();
        assert_eq!(t.ends(e(0)).unwrap(), EdgeEnds::new(n(1), n(2)));
        assert_eq!(t.set_tail(e(0), n(9)), Err(DivaError::UnknownNode(n(9))));
        assert_eq!(t.set_tail(e(4), n(1)), Err(DivaError::UnknownEdge(e(4))));
    }

    #[test]
    fn remove_keeps_slot() {
        let mut t = Topology::new();
        t.connect(e(0), n(0), n(1)).unwrap();
        t.connect(e(1), n(1), n(2)).unwrap();
        t.remove_edge(e(0)).unwrap();
        assert_eq!(t.tail(e(0)).unwrap(), None);
        assert_eq!(t.head(e(0)).unwrap(), None);
        assert!(t.contains_edge(e(0)));
        assert!(!t.is_connected(e(0)));
        assert_eq!(t.edges().count(), 1);
        assert_eq!(t.max_edge_id(), Some(e(1)));
    }

    #[test]
    fn reverse_swaps_every_edge() {
        let mut t = Topology::new();
        t.connect(e(0), n(0), n(1)).unwrap();
        t.connect(e(1), n(2), n(1)).unwrap();
        t.reverse();
        assert_eq!(t.ends(e(0)).unwrap(), EdgeEnds::new(n(1), n(0)));
        assert_eq!(t.ends(e(1)).unwrap(), EdgeEnds::new(n(1), n(2)));
    }

    #[test]
    fn find_scans_from_first_edge() {
        let mut t = Topology::new();
        t.connect(e(0), n(0), n(1)).unwrap();
        t.connect(e(1), n(1), n(2)).unwrap();
        t.connect(e(2), n(0), n(1)).unwrap();
        assert_eq!(t.find(e(0), n(0), n(1)), Some(e(0)));
        assert_eq!(t.find(e(1), n(0), n(1)), Some(e(2)));
        assert_eq!(t.find(e(3), n(0), n(1)), None);
        assert_eq!(t.find(e(0), n(2), n(1)), None);
        assert_eq!(Topology::new().find(e(0), n(0), n(0)), None);
    }

    #[test]
    fn add_node_extends_space() {
        let mut t = Topology::new();
        assert_eq!(t.add_node(), n(0));
        assert_eq!(t.add_node(), n(1));
        t.connect(e(0), n(5), n(0)).unwrap();
        assert_eq!(t.add_node(), n(6));
        // add_node alone does not count as "connected"
        assert_eq!(t.max_node_id(), Some(n(5)));
    }

    #[test]
    fn generation_tracks_changes() {
        let mut t = Topology::new();
        let g0 = t.generation();
        t.connect(e(0), n(0), n(1)).unwrap();
        assert_ne!(t.generation(), g0);
        let g1 = t.generation();
        let _ = t.head(e(0));
        assert_eq!(t.generation(), g1);
    }

    #[test]
    fn invariants_hold_after_mutation() {
        let mut t = Topology::new();
        t.connect(e(3), n(2), n(7)).unwrap();
        t.remove_edge(e(3)).unwrap();
        t.reverse();
        assert!(t.validate_invariants().is_ok());
    }

    #[test]
    fn connect_rejects_ids_past_the_end_of_usize() {
        let mut t = Topology::new();
        let far = n(usize::MAX);
        assert_eq!(t.connect(e(0), n(0), far), Err(DivaError::UnknownNode(far)));
        assert_eq!(
            t.connect(e(usize::MAX), n(0), n(1)),
            Err(DivaError::UnknownEdge(e(usize::MAX)))
        );
        assert_eq!(t.ensure_node(far), Err(DivaError::UnknownNode(far)));
        assert_eq!(t.edge_count(), 0);
        assert_eq!(t.node_count(), 0);
        assert!(!t.contains_node(far));
    }

    #[test]
    fn max_node_survives_moving_an_end_down() {
        let mut t = Topology::new();
        t.connect(e(0), n(0), n(5)).unwrap();
        t.set_head(e(0), n(1)).unwrap();
        assert_eq!(t.max_node_id(), Some(n(5)));
        assert!(t.validate_invariants().is_ok());
        let back: Topology = serde_json::from_str(&serde_json::to_string(&t).unwrap()).unwrap();
        assert_eq!(back.max_node_id(), Some(n(5)));
    }

    #[test]
    fn clear_resets() {
        let mut t = Topology::new();
        t.connect(e(0), n(0), n(1)).unwrap();
        t.clear();
        assert_eq!(t.edge_count(), 0);
        assert_eq!(t.node_count(), 0);
        assert_eq!(t.max_edge_id(), None);
    }

    #[test]
    fn serde_roundtrip_ignores_generation() {
        let mut t = Topology::new();
        t.connect(e(0), n(0), n(1)).unwrap();
        t.connect(e(2), n(1), n(3)).unwrap();
        let json = serde_json::to_string(&t).unwrap();
        let back: Topology = serde_json::from_str(&json).unwrap();
        assert_eq!(back.ends(e(2)).unwrap(), t.ends(e(2)).unwrap());
        assert_eq!(back.edges().collect::<Vec<_>>(), t.edges().collect::<Vec<_>>());
    }
}
