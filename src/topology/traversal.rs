//! Frozen adjacency snapshot of a [`Topology`].
//!
//! A [`Traversal`] is built once and never mutated. Any change to the
//! topology's connections means the snapshot must be discarded and rebuilt;
//! [`LightweightGraph`](crate::topology::LightweightGraph) does this lazily.
//!
//! Storage is CSR-style: one offsets array indexed by node, and flat
//! successor / edge arrays holding each node's neighbours contiguously. A
//! node's entries appear in increasing edge-id order, which is the order in
//! which the edges were scanned.

use std::sync::Arc;

use crate::debug_invariants::DebugInvariants;
use crate::diva_error::DivaError;
use crate::topology::ids::{EdgeId, NodeId};
use crate::topology::store::Topology;

/// Which way edges are followed when building a [`Traversal`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `tail → head`: successors and out-edges.
    Forward,
    /// `head → tail`: predecessors and in-edges.
    Backward,
}

/// Read-only successor / out-edge adjacency with root and node sets.
#[derive(Clone, Debug)]
pub struct Traversal {
    direction: Direction,
    /// `offsets[n]..offsets[n + 1]` indexes `successors` and `edges` for node `n`.
    offsets: Arc<[usize]>,
    successors: Arc<[NodeId]>,
    edges: Arc<[EdgeId]>,
    nodes: Arc<[NodeId]>,
    roots: Arc<[NodeId]>,
    generation: u64,
}

impl Default for Traversal {
    fn default() -> Self {
        Self {
            direction: Direction::Forward,
            offsets: Arc::from([0]),
            successors: Arc::from([]),
            edges: Arc::from([]),
            nodes: Arc::from([]),
            roots: Arc::from([]),
            generation: 0,
        }
    }
}

impl Traversal {
    /// Successors and out-edges of every node.
    pub fn forward(topology: &Topology) -> Self {
        Self::build(topology, Direction::Forward)
    }

    /// Predecessors and in-edges of every node. Equivalent to building
    /// [`forward`](Self::forward) over a reversed copy, without touching
    /// the topology.
    pub fn backward(topology: &Topology) -> Self {
        Self::build(topology, Direction::Backward)
    }

    /// Builds the snapshot for either orientation.
    pub fn build(topology: &Topology, direction: Direction) -> Self {
        let n = topology.max_node_id().map_or(0, |m| m.index() + 1);
        let oriented = |t: NodeId, h: NodeId| match direction {
            Direction::Forward => (t, h),
            Direction::Backward => (h, t),
        };

        // 1) degree counts, plus which roles each node plays
        let mut degree = vec![0usize; n];
        let mut as_source = vec![false; n];
        let mut as_target = vec![false; n];
        for (_, t, h) in topology.edges() {
            let (from, to) = oriented(t, h);
            degree[from.index()] += 1;
            as_source[from.index()] = true;
            as_target[to.index()] = true;
        }

        // prefix sums
        let mut offsets = vec![0usize; n + 1];
        for i in 0..n {
            offsets[i + 1] = offsets[i] + degree[i];
        }
        let m = offsets[n];

        // 2) fill in edge-id order
        let mut successors = vec![NodeId::new(0); m];
        let mut edges = vec![EdgeId::new(0); m];
        let mut write = offsets.clone();
        for (e, t, h) in topology.edges() {
            let (from, to) = oriented(t, h);
            let pos = write[from.index()];
            successors[pos] = to;
            edges[pos] = e;
            write[from.index()] += 1;
        }

        // 3) node and root sets
        let nodes: Vec<NodeId> = (0..n)
            .filter(|&i| as_source[i] || as_target[i])
            .map(NodeId::new)
            .collect();
        let roots: Vec<NodeId> = (0..n)
            .filter(|&i| as_source[i] && !as_target[i])
            .map(NodeId::new)
            .collect();

        Self {
            direction,
            offsets: offsets.into(),
            successors: successors.into(),
            edges: edges.into(),
            nodes: nodes.into(),
            roots: roots.into(),
            generation: topology.generation(),
        }
    }

    /// Orientation this snapshot was built with.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Nodes reachable over one edge from `node`, in edge-id order.
    /// Empty for nodes this snapshot never saw.
    pub fn successors(&self, node: NodeId) -> &[NodeId] {
        match self.range(node) {
            Some((lo, hi)) => &self.successors[lo..hi],
            None => &[],
        }
    }

    /// Edges leaving `node`, parallel to [`successors`](Self::successors).
    pub fn edges(&self, node: NodeId) -> &[EdgeId] {
        match self.range(node) {
            Some((lo, hi)) => &self.edges[lo..hi],
            None => &[],
        }
    }

    /// Out-degree of `node`; zero for unknown nodes.
    #[inline]
    pub fn successor_count(&self, node: NodeId) -> usize {
        self.successors(node).len()
    }

    /// Same as [`successor_count`](Self::successor_count), counted on edges.
    #[inline]
    pub fn edge_count(&self, node: NodeId) -> usize {
        self.edges(node).len()
    }

    /// Nodes with outgoing edges and no incoming ones.
    #[inline]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Every node touched by a connected edge, ascending.
    #[inline]
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Whether `node` touches any captured edge.
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.binary_search(&node).is_ok()
    }

    /// Total number of edges captured.
    #[inline]
    pub fn total_edges(&self) -> usize {
        self.edges.len()
    }

    /// [`Topology::generation`] at build time.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether this snapshot still matches `topology`.
    #[inline]
    pub fn is_current(&self, topology: &Topology) -> bool {
        self.generation == topology.generation()
    }

    #[inline]
    fn range(&self, node: NodeId) -> Option<(usize, usize)> {
        let i = node.index();
        let lo = *self.offsets.get(i)?;
        let hi = *self.offsets.get(i.checked_add(1)?)?;
        Some((lo, hi))
    }
}

impl DebugInvariants for Traversal {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self, "Traversal");
    }

    fn validate_invariants(&self) -> Result<(), DivaError> {
        let n = self.offsets.len() - 1;
        if self.offsets[n] != self.successors.len() || self.successors.len() != self.edges.len() {
            return Err(DivaError::IndexOutOfRange {
                index: self.offsets[n],
                len: self.successors.len(),
            });
        }
        for &s in self.successors.iter() {
            if !self.contains(s) {
                return Err(DivaError::UnknownNode(s));
            }
        }
        for &r in self.roots.iter() {
            if self.successors.contains(&r) {
                return Err(DivaError::UnknownNode(r));
            }
        }
        Ok(())
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

    /// a→b, a→c, b→d with a=0, b=1, c=2, d=3
    fn diamond_ish() -> Topology {
        let mut t = Topology::new();
        t.connect(e(0), n(0), n(1)).unwrap();
        t.connect(e(1), n(0), n(2)).unwrap();
        t.connect(e(2), n(1), n(3)).unwrap();
        t
    }

    #[test]
    fn roots_and_successors() {
        let tr = Traversal::forward(&diamond_ish());
        assert_eq!(tr.roots(), &[n(0)]);
        assert_eq!(tr.successors(n(0)), &[n(1), n(2)]);
        assert_eq!(tr.edges(n(0)), &[e(0), e(1)]);
        assert_eq!(tr.successors(n(1)), &[n(3)]);
        assert!(tr.successors(n(3)).is_empty());
        assert_eq!(tr.nodes(), &[n(0), n(1), n(2), n(3)]);
        assert_eq!(tr.total_edges(), 3);
        assert!(tr.is_consistent());
    }

    #[test]
    fn backward_gives_predecessors() {
        let tr = Traversal::backward(&diamond_ish());
        assert_eq!(tr.direction(), Direction::Backward);
        assert_eq!(tr.successors(n(3)), &[n(1)]);
        assert_eq!(tr.edges(n(3)), &[e(2)]);
        assert_eq!(tr.successors(n(1)), &[n(0)]);
        assert!(tr.successors(n(0)).is_empty());
        // leaves of the forward graph are roots of the backward one
        assert_eq!(tr.roots(), &[n(2), n(3)]);
    }

    #[test]
    fn backward_matches_forward_of_reversed() {
        let t = diamond_ish();
        let mut r = t.clone();
        r.reverse();
        let a = Traversal::backward(&t);
        let b = Traversal::forward(&r);
        for node in 0..4 {
            assert_eq!(a.successors(n(node)), b.successors(n(node)));
            assert_eq!(a.edges(n(node)), b.edges(n(node)));
        }
        assert_eq!(a.roots(), b.roots());
    }

    #[test]
    fn disconnected_edges_are_skipped() {
        let mut t = diamond_ish();
        t.remove_edge(e(2)).unwrap();
        let tr = Traversal::forward(&t);
        assert!(tr.successors(n(1)).is_empty());
        assert!(!tr.contains(n(3)));
        assert_eq!(tr.nodes(), &[n(0), n(1), n(2)]);
    }

    #[test]
    fn largest_node_id_reads_as_empty() {
        let far = n(usize::MAX);
        for tr in [Traversal::forward(&diamond_ish()), Traversal::backward(&diamond_ish())] {
            assert!(tr.successors(far).is_empty());
            assert!(tr.edges(far).is_empty());
            assert_eq!(tr.successor_count(far), 0);
            assert_eq!(tr.edge_count(far), 0);
            assert!(!tr.contains(far));
        }
        assert!(Traversal::forward(&Topology::new()).successors(far).is_empty());
    }

    #[test]
    fn parallel_edges_keep_multiplicity() {
        let mut t = Topology::new();
        t.connect(e(0), n(0), n(1)).unwrap();
        t.connect(e(4), n(0), n(1)).unwrap();
        let tr = Traversal::forward(&t);
        assert_eq!(tr.successors(n(0)), &[n(1), n(1)]);
        assert_eq!(tr.edges(n(0)), &[e(0), e(4)]);
    }

    #[test]
    fn cycle_has_no_roots() {
        let mut t = Topology::new();
        t.connect(e(0), n(0), n(1)).unwrap();
        t.connect(e(1), n(1), n(0)).unwrap();
        let tr = Traversal::forward(&t);
        assert!(tr.roots().is_empty());
        assert_eq!(tr.nodes().len(), 2);
    }

    #[test]
    fn unknown_node_is_empty() {
        let tr = Traversal::forward(&diamond_ish());
        assert!(tr.successors(n(99)).is_empty());
        assert_eq!(tr.edge_count(n(99)), 0);
        let empty = Traversal::forward(&Topology::new());
        assert!(empty.nodes().is_empty());
        assert!(empty.successors(n(0)).is_empty());
    }

    #[test]
    fn staleness_follows_generation() {
        let mut t = diamond_ish();
        let tr = Traversal::forward(&t);
        assert!(tr.is_current(&t));
        t.connect(e(3), n(3), n(0)).unwrap();
        assert!(!tr.is_current(&t));
    }
}
