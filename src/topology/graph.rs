//! Payload-carrying graph layered over [`Topology`].
//!
//! [`LightweightGraph`] associates client node payloads `N` and edge payloads
//! `E` with dense topology ids, keeps a parent/child hierarchy over nodes,
//! and answers successor / predecessor queries from a memoised pair of
//! [`Traversal`] snapshots.
//!
//! The snapshots live in a `OnceCell`. Every connection change clears the
//! cell; the next adjacency query rebuilds both directions at once. The
//! cell is `unsync`, so a graph is `!Sync`: concurrent use needs an
//! external lock.

use once_cell::unsync::OnceCell;

use crate::debug_invariants::DebugInvariants;
use crate::diva_error::DivaError;
use crate::topology::cache::InvalidateCache;
use crate::topology::ids::{EdgeId, NodeId};
use crate::topology::store::Topology;
use crate::topology::traversal::Traversal;

// single writer, or external lock
static_assertions::assert_not_impl_any!(LightweightGraph<(), ()>: Sync);

#[derive(Clone, Debug)]
struct CachedTraversals {
    forward: Traversal,
    backward: Traversal,
}

/// Directed multigraph with client payloads and a node hierarchy.
#[derive(Clone, Debug)]
pub struct LightweightGraph<N, E> {
    topology: Topology,
    /// `None` once a node has been removed.
    nodes: Vec<Option<N>>,
    edges: Vec<Option<E>>,
    parent: Vec<Option<NodeId>>,
    children: Vec<Vec<NodeId>>,
    cache: OnceCell<CachedTraversals>,
}

impl<N, E> Default for LightweightGraph<N, E> {
    fn default() -> Self {
        Self {
            topology: Topology::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
            parent: Vec::new(),
            children: Vec::new(),
            cache: OnceCell::new(),
        }
    }
}

impl<N, E> LightweightGraph<N, E> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    // --- nodes ------------------------------------------------------------

    /// Stores `payload` under a fresh node id.
    pub fn add_node(&mut self, payload: N) -> NodeId {
        let id = self.topology.add_node();
        debug_assert_eq!(id.index(), self.nodes.len());
        self.nodes.push(Some(payload));
        self.parent.push(None);
        self.children.push(Vec::new());
        id
    }

    /// Payload of `node`.
    pub fn node(&self, node: NodeId) -> Result<&N, DivaError> {
        self.nodes
            .get(node.index())
            .and_then(Option::as_ref)
            .ok_or(DivaError::UnknownNode(node))
    }

    /// Mutable payload of `node`.
    pub fn node_mut(&mut self, node: NodeId) -> Result<&mut N, DivaError> {
        self.nodes
            .get_mut(node.index())
            .and_then(Option::as_mut)
            .ok_or(DivaError::UnknownNode(node))
    }

    #[inline]
    pub fn contains_node(&self, node: NodeId) -> bool {
        self.node(node).is_ok()
    }

    /// Removes `node`, disconnecting every incident edge and detaching it
    /// from the hierarchy. Its children become hierarchy roots. The id is
    /// not reused.
    pub fn remove_node(&mut self, node: NodeId) -> Result<N, DivaError> {
        self.node(node)?;
        let incident: Vec<EdgeId> = self
            .topology
            .edge_slots()
            .filter(|(_, ends)| ends.tail == Some(node) || ends.head == Some(node))
            .map(|(e, _)| e)
            .collect();
        for e in incident {
            self.topology.remove_edge(e)?;
        }
        self.set_parent(node, None)?;
        for child in std::mem::take(&mut self.children[node.index()]) {
            self.parent[child.index()] = None;
        }
        self.invalidate_cache();
        let payload = self.nodes[node.index()]
            .take()
            .ok_or(DivaError::UnknownNode(node))?;
        crate::debug_invariants!(&*self, "LightweightGraph::remove_node");
        Ok(payload)
    }

    /// Live nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &N)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.as_ref().map(|n| (NodeId::new(i), n)))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    // --- edges ------------------------------------------------------------

    /// Stores `payload` under a fresh, not yet connected edge id.
    pub fn add_edge(&mut self, payload: E) -> EdgeId {
        let id = EdgeId::new(self.edges.len());
        self.edges.push(Some(payload));
        id
    }

    /// Convenience for `add_edge` followed by `connect`.
    pub fn add_connected_edge(
        &mut self,
        payload: E,
        tail: NodeId,
        head: NodeId,
    ) -> Result<EdgeId, DivaError> {
        self.check_node(tail)?;
        self.check_node(head)?;
        let id = self.add_edge(payload);
        self.connect(id, tail, head)?;
        Ok(id)
    }

    /// Payload of `edge`.
    pub fn edge(&self, edge: EdgeId) -> Result<&E, DivaError> {
        self.edges
            .get(edge.index())
            .and_then(Option::as_ref)
            .ok_or(DivaError::UnknownEdge(edge))
    }

    /// Mutable payload of `edge`.
    pub fn edge_mut(&mut self, edge: EdgeId) -> Result<&mut E, DivaError> {
        self.edges
            .get_mut(edge.index())
            .and_then(Option::as_mut)
            .ok_or(DivaError::UnknownEdge(edge))
    }

    /// Points `edge` from `tail` to `head`.
    pub fn connect(&mut self, edge: EdgeId, tail: NodeId, head: NodeId) -> Result<(), DivaError> {
        self.edge(edge)?;
        self.check_node(tail)?;
        self.check_node(head)?;
        self.topology.connect(edge, tail, head)?;
        self.invalidate_cache();
        crate::debug_invariants!(&*self, "LightweightGraph::connect");
        Ok(())
    }

    /// Clears both ends of `edge`; the payload stays.
    pub fn disconnect(&mut self, edge: EdgeId) -> Result<(), DivaError> {
        self.edge(edge)?;
        if self.topology.contains_edge(edge) {
            self.topology.remove_edge(edge)?;
            self.invalidate_cache();
        }
        Ok(())
    }

    pub fn set_head(&mut self, edge: EdgeId, node: NodeId) -> Result<(), DivaError> {
        self.edge(edge)?;
        self.check_node(node)?;
        self.topology.set_head(edge, node)?;
        self.invalidate_cache();
        Ok(())
    }

    pub fn set_tail(&mut self, edge: EdgeId, node: NodeId) -> Result<(), DivaError> {
        self.edge(edge)?;
        self.check_node(node)?;
        self.topology.set_tail(edge, node)?;
        self.invalidate_cache();
        Ok(())
    }

    /// Head of `edge`; `None` while unconnected.
    pub fn head(&self, edge: EdgeId) -> Result<Option<NodeId>, DivaError> {
        self.edge(edge)?;
        Ok(self.topology.head(edge).ok().flatten())
    }

    /// Tail of `edge`; `None` while unconnected.
    pub fn tail(&self, edge: EdgeId) -> Result<Option<NodeId>, DivaError> {
        self.edge(edge)?;
        Ok(self.topology.tail(edge).ok().flatten())
    }

    /// Disconnects `edge` and hands back its payload.
    pub fn remove_edge(&mut self, edge: EdgeId) -> Result<E, DivaError> {
        self.disconnect(edge)?;
        self.edges[edge.index()]
            .take()
            .ok_or(DivaError::UnknownEdge(edge))
    }

    /// Live edges in id order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &E)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.as_ref().map(|e| (EdgeId::new(i), e)))
    }

    pub fn edge_count(&self) -> usize {
        self.edges.iter().filter(|e| e.is_some()).count()
    }

    /// First live edge running `tail → head`.
    pub fn find_edge(&self, tail: NodeId, head: NodeId) -> Option<EdgeId> {
        let mut from = EdgeId::new(0);
        while let Some(e) = self.topology.find(from, tail, head) {
            if self.edge(e).is_ok() {
                return Some(e);
            }
            from = EdgeId::new(e.index() + 1);
        }
        None
    }

    /// Turns every edge around.
    pub fn reverse(&mut self) {
        self.topology.reverse();
        self.invalidate_cache();
    }

    #[inline]
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    // --- hierarchy --------------------------------------------------------

    /// Re-parents `child`; `None` makes it a hierarchy root.
    pub fn set_parent(&mut self, child: NodeId, parent: Option<NodeId>) -> Result<(), DivaError> {
        self.check_node(child)?;
        if let Some(p) = parent {
            self.check_node(p)?;
            let mut cursor = Some(p);
            while let Some(c) = cursor {
                if c == child {
                    return Err(DivaError::HierarchyCycle { child, parent: p });
                }
                cursor = self.parent[c.index()];
            }
        }
        if let Some(old) = self.parent[child.index()] {
            self.children[old.index()].retain(|&c| c != child);
        }
        self.parent[child.index()] = parent;
        if let Some(p) = parent {
            self.children[p.index()].push(child);
        }
        crate::debug_invariants!(&*self, "LightweightGraph::set_parent");
        Ok(())
    }

    /// Hierarchy parent of `node`, if any.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.parent.get(node.index()).copied().flatten()
    }

    /// Children in the order they were attached.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.children
            .get(node.index())
            .map_or(&[], |c| c.as_slice())
    }

    /// Live nodes with no parent.
    pub fn hierarchy_roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes()
            .map(|(id, _)| id)
            .filter(|id| self.parent[id.index()].is_none())
    }

    // --- cached adjacency -------------------------------------------------

    fn cached(&self) -> &CachedTraversals {
        let cached = self.cache.get_or_init(|| {
            log::debug!(
                "rebuilding traversal cache at generation {}",
                self.topology.generation()
            );
            CachedTraversals {
                forward: Traversal::forward(&self.topology),
                backward: Traversal::backward(&self.topology),
            }
        });
        debug_assert!(cached.forward.is_current(&self.topology));
        cached
    }

    /// Forward snapshot, rebuilt if stale.
    pub fn traversal(&self) -> &Traversal {
        &self.cached().forward
    }

    /// Backward snapshot, rebuilt if stale.
    pub fn backward_traversal(&self) -> &Traversal {
        &self.cached().backward
    }

    /// True when the next adjacency query will not rebuild.
    pub fn is_cache_fresh(&self) -> bool {
        self.cache.get().is_some()
    }

    pub fn successors(&self, node: NodeId) -> &[NodeId] {
        self.traversal().successors(node)
    }

    pub fn predecessors(&self, node: NodeId) -> &[NodeId] {
        self.backward_traversal().successors(node)
    }

    pub fn out_edges(&self, node: NodeId) -> &[EdgeId] {
        self.traversal().edges(node)
    }

    pub fn in_edges(&self, node: NodeId) -> &[EdgeId] {
        self.backward_traversal().edges(node)
    }

    /// Nodes with out-edges but no in-edges.
    pub fn graph_roots(&self) -> &[NodeId] {
        self.traversal().roots()
    }

    fn check_node(&self, node: NodeId) -> Result<(), DivaError> {
        self.node(node).map(|_| ())
    }
}

impl<N, E> InvalidateCache for LightweightGraph<N, E> {
    #[inline]
    fn invalidate_cache(&mut self) {
        self.cache.take();
    }
}

impl<N, E> DebugInvariants for LightweightGraph<N, E> {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self, "LightweightGraph");
    }

    fn validate_invariants(&self) -> Result<(), DivaError> {
        self.topology.validate_invariants()?;
        for (e, t, h) in self.topology.edges() {
            self.edge(e)?;
            self.check_node(t)?;
            self.check_node(h)?;
        }
        for (i, p) in self.parent.iter().enumerate() {
            if let Some(p) = *p {
                let child = NodeId::new(i);
                if !self.children[p.index()].contains(&child) {
                    return Err(DivaError::HierarchyCycle { child, parent: p });
                }
            }
        }
        if let Some(c) = self.cache.get() {
            if !c.forward.is_current(&self.topology) {
                return Err(DivaError::StaleTraversal {
                    built: c.forward.generation(),
                    current: self.topology.generation(),
                });
            }
        }
        Ok(())
    }
}
