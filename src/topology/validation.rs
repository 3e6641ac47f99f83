//! Topology validation helpers.

use std::collections::HashMap;

use crate::diva_error::DivaError;
use crate::topology::ids::EdgeId;
use crate::topology::store::Topology;

/// What to do when a check finds an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IssueHandling {
    /// Skip the check.
    #[default]
    Ignore,
    /// Log a warning and keep going.
    Warn,
    /// Return an error on the first issue.
    Error,
}

/// Optional validation toggles for topology checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopologyValidationOptions {
    /// Edges with exactly one end set.
    pub half_connected: IssueHandling,
    /// Edges whose tail equals their head.
    pub self_loops: IssueHandling,
    /// More than one edge over the same `(tail, head)` pair.
    pub parallel_edges: IssueHandling,
}

impl TopologyValidationOptions {
    /// Treat every issue as an error.
    pub fn all() -> Self {
        Self {
            half_connected: IssueHandling::Error,
            self_loops: IssueHandling::Error,
            parallel_edges: IssueHandling::Error,
        }
    }

    /// Log every issue without failing.
    pub fn warn_all() -> Self {
        Self {
            half_connected: IssueHandling::Warn,
            self_loops: IssueHandling::Warn,
            parallel_edges: IssueHandling::Warn,
        }
    }
}

/// Validate `topology` against the enabled checks.
pub fn validate_topology(
    topology: &Topology,
    options: TopologyValidationOptions,
) -> Result<(), DivaError> {
    if options.half_connected != IssueHandling::Ignore {
        for (edge, ends) in topology.edge_slots() {
            if ends.is_half_connected() {
                report(options.half_connected, DivaError::HalfConnectedEdge(edge))?;
            }
        }
    }

    if options.self_loops != IssueHandling::Ignore {
        for (edge, tail, head) in topology.edges() {
            if tail == head {
                report(options.self_loops, DivaError::SelfLoop(edge))?;
            }
        }
    }

    if options.parallel_edges != IssueHandling::Ignore {
        let mut first_seen: HashMap<_, EdgeId> = HashMap::new();
        for (edge, tail, head) in topology.edges() {
            if let Some(&first) = first_seen.get(&(tail, head)) {
                report(
                    options.parallel_edges,
                    DivaError::ParallelEdges {
                        first,
                        second: edge,
                    },
                )?;
            } else {
                first_seen.insert((tail, head), edge);
            }
        }
    }

    Ok(())
}

fn report(handling: IssueHandling, issue: DivaError) -> Result<(), DivaError> {
    match handling {
        IssueHandling::Warn => {
            log::warn!("Topology issue: {issue}");
            Ok(())
        }
        IssueHandling::Error => Err(issue),
        IssueHandling::Ignore => Ok(()),
    }
}
