//! Port layer over [`LightweightGraph`].
//!
//! A port is an attachment point owned by exactly one node. Connecting an
//! edge port-to-port connects the owning nodes in the underlying topology
//! and remembers which ports the edge is attached to, so callers that draw
//! or route edges can recover the precise attachment points.

use std::ops::Deref;

use crate::diva_error::DivaError;
use crate::topology::graph::LightweightGraph;
use crate::topology::ids::{EdgeId, NodeId, PortId};

#[derive(Clone, Debug)]
struct PortSlot<P> {
    node: NodeId,
    payload: P,
}

/// Port-aware attachment of an edge.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
struct Attachment {
    tail: Option<PortId>,
    head: Option<PortId>,
}

/// [`LightweightGraph`] whose edges may attach to node ports.
#[derive(Clone, Debug)]
pub struct LightweightNetwork<N, E, P> {
    graph: LightweightGraph<N, E>,
    ports: Vec<PortSlot<P>>,
    /// Ports per node, in creation order.
    node_ports: Vec<Vec<PortId>>,
    attachments: Vec<Attachment>,
}

impl<N, E, P> Default for LightweightNetwork<N, E, P> {
    fn default() -> Self {
        Self {
            graph: LightweightGraph::new(),
            ports: Vec::new(),
            node_ports: Vec::new(),
            attachments: Vec::new(),
        }
    }
}

impl<N, E, P> Deref for LightweightNetwork<N, E, P> {
    type Target = LightweightGraph<N, E>;

    fn deref(&self) -> &Self::Target {
        &self.graph
    }
}

impl<N, E, P> LightweightNetwork<N, E, P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, payload: N) -> NodeId {
        let id = self.graph.add_node(payload);
        self.node_ports.push(Vec::new());
        id
    }

    pub fn add_edge(&mut self, payload: E) -> EdgeId {
        let id = self.graph.add_edge(payload);
        self.attachments.push(Attachment::default());
        id
    }

    /// Mutable access to the inner graph for operations that do not touch
    /// port attachments (payload edits, hierarchy).
    pub fn node_mut(&mut self, node: NodeId) -> Result<&mut N, DivaError> {
        self.graph.node_mut(node)
    }

    pub fn edge_mut(&mut self, edge: EdgeId) -> Result<&mut E, DivaError> {
        self.graph.edge_mut(edge)
    }

    pub fn set_parent(&mut self, child: NodeId, parent: Option<NodeId>) -> Result<(), DivaError> {
        self.graph.set_parent(child, parent)
    }

    /// Creates a port on `node`.
    pub fn add_port(&mut self, node: NodeId, payload: P) -> Result<PortId, DivaError> {
        self.graph.node(node)?;
        let id = PortId::new(self.ports.len());
        self.ports.push(PortSlot { node, payload });
        self.node_ports[node.index()].push(id);
        Ok(id)
    }

    pub fn port(&self, port: PortId) -> Result<&P, DivaError> {
        self.slot(port).map(|s| &s.payload)
    }

    pub fn port_mut(&mut self, port: PortId) -> Result<&mut P, DivaError> {
        self.ports
            .get_mut(port.index())
            .map(|s| &mut s.payload)
            .ok_or(DivaError::UnknownPort(port))
    }

    /// Node owning `port`.
    pub fn port_node(&self, port: PortId) -> Result<NodeId, DivaError> {
        self.slot(port).map(|s| s.node)
    }

    /// Ports created on `node`.
    pub fn ports_of(&self, node: NodeId) -> &[PortId] {
        self.node_ports
            .get(node.index())
            .map_or(&[], |p| p.as_slice())
    }

    /// Connects `edge` from the node owning `tail` to the node owning `head`.
    pub fn connect_ports(
        &mut self,
        edge: EdgeId,
        tail: PortId,
        head: PortId,
    ) -> Result<(), DivaError> {
        let t = self.port_node(tail)?;
        let h = self.port_node(head)?;
        self.graph.connect(edge, t, h)?;
        self.attachments[edge.index()] = Attachment {
            tail: Some(tail),
            head: Some(head),
        };
        Ok(())
    }

    /// Node-level connect; clears any port attachment of `edge`.
    pub fn connect(&mut self, edge: EdgeId, tail: NodeId, head: NodeId) -> Result<(), DivaError> {
        self.graph.connect(edge, tail, head)?;
        self.attachments[edge.index()] = Attachment::default();
        Ok(())
    }

    pub fn disconnect(&mut self, edge: EdgeId) -> Result<(), DivaError> {
        self.graph.disconnect(edge)?;
        self.attachments[edge.index()] = Attachment::default();
        Ok(())
    }

    /// Moves the head of `edge` to `node`, dropping its head port.
    pub fn set_head(&mut self, edge: EdgeId, node: NodeId) -> Result<(), DivaError> {
        self.graph.set_head(edge, node)?;
        self.attachments[edge.index()].head = None;
        Ok(())
    }

    /// Moves the tail of `edge` to `node`, dropping its tail port.
    pub fn set_tail(&mut self, edge: EdgeId, node: NodeId) -> Result<(), DivaError> {
        self.graph.set_tail(edge, node)?;
        self.attachments[edge.index()].tail = None;
        Ok(())
    }

    /// Removes `node` with its incident edges' attachments. Its ports stay
    /// allocated but no longer accept connections.
    pub fn remove_node(&mut self, node: NodeId) -> Result<N, DivaError> {
        let payload = self.graph.remove_node(node)?;
        for port in std::mem::take(&mut self.node_ports[node.index()]) {
            for a in self.attachments.iter_mut() {
                if a.tail == Some(port) || a.head == Some(port) {
                    *a = Attachment::default();
                }
            }
        }
        Ok(payload)
    }

    pub fn remove_edge(&mut self, edge: EdgeId) -> Result<E, DivaError> {
        let payload = self.graph.remove_edge(edge)?;
        self.attachments[edge.index()] = Attachment::default();
        Ok(payload)
    }

    /// Port the tail of `edge` is attached to, if it was connected by port.
    pub fn tail_port(&self, edge: EdgeId) -> Result<Option<PortId>, DivaError> {
        self.graph.edge(edge)?;
        Ok(self.attachments[edge.index()].tail)
    }

    /// Port the head of `edge` is attached to, if it was connected by port.
    pub fn head_port(&self, edge: EdgeId) -> Result<Option<PortId>, DivaError> {
        self.graph.edge(edge)?;
        Ok(self.attachments[edge.index()].head)
    }

    /// Edges currently attached to `port` at either end.
    pub fn port_edges(&self, port: PortId) -> Result<Vec<EdgeId>, DivaError> {
        self.slot(port)?;
        Ok(self
            .attachments
            .iter()
            .enumerate()
            .filter(|(_, a)| a.tail == Some(port) || a.head == Some(port))
            .map(|(i, _)| EdgeId::new(i))
            .collect())
    }

    /// Borrow the inner graph.
    #[inline]
    pub fn graph(&self) -> &LightweightGraph<N, E> {
        &self.graph
    }

    fn slot(&self, port: PortId) -> Result<&PortSlot<P>, DivaError> {
        self.ports
            .get(port.index())
            .ok_or(DivaError::UnknownPort(port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ports_belong_to_nodes() {
        let mut net: LightweightNetwork<&str, (), &str> = LightweightNetwork::new();
        let a = net.add_node("a");
        let b = net.add_node("b");
        let out = net.add_port(a, "out").unwrap();
        let in0 = net.add_port(b, "in0").unwrap();
        let in1 = net.add_port(b, "in1").unwrap();
        assert_eq!(net.port_node(out).unwrap(), a);
        assert_eq!(net.ports_of(b), &[in0, in1]);
        assert_eq!(*net.port(in1).unwrap(), "in1");
        let ghost = PortId::new(12);
        assert_eq!(net.port_node(ghost), Err(DivaError::UnknownPort(ghost)));
        assert!(net.add_port(NodeId::new(7), "x").is_err());
    }

    #[test]
    fn connect_ports_connects_owners() {
        let mut net: LightweightNetwork<(), u8, ()> = LightweightNetwork::new();
        let a = net.add_node(());
        let b = net.add_node(());
        let pa = net.add_port(a, ()).unwrap();
        let pb = net.add_port(b, ()).unwrap();
        let e = net.add_edge(5);
        net.connect_ports(e, pa, pb).unwrap();
        assert_eq!(net.tail(e).unwrap(), Some(a));
        assert_eq!(net.head(e).unwrap(), Some(b));
        assert_eq!(net.tail_port(e).unwrap(), Some(pa));
        assert_eq!(net.head_port(e).unwrap(), Some(pb));
        assert_eq!(net.successors(a), &[b]);
        assert_eq!(net.port_edges(pb).unwrap(), vec![e]);
    }

    #[test]
    fn node_connect_and_disconnect_clear_attachment() {
        let mut net: LightweightNetwork<(), (), ()> = LightweightNetwork::new();
        let a = net.add_node(());
        let b = net.add_node(());
        let pa = net.add_port(a, ()).unwrap();
        let pb = net.add_port(b, ()).unwrap();
        let e = net.add_edge(());
        net.connect_ports(e, pa, pb).unwrap();
        net.connect(e, b, a).unwrap();
        assert_eq!(net.tail_port(e).unwrap(), None);
        assert_eq!(net.successors(b), &[a]);
        net.connect_ports(e, pa, pb).unwrap();
        net.disconnect(e).unwrap();
        assert_eq!(net.head_port(e).unwrap(), None);
        assert!(net.successors(a).is_empty());
        assert!(net.port_edges(pa).unwrap().is_empty());
    }
}
