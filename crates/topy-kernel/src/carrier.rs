//! Carriers: the concrete combinatorial structure whose topology is
//! measured and incrementally edited.
//!
//! A carrier has two capabilities: measure its invariants directly, and
//! clone itself into a structurally independent copy (the `Clone`
//! supertrait). New carrier variants implement the same contract.

use crate::graph::{Graph, NodeId};
use crate::invariants::Invariants;
use std::fmt;

/// The measurement interface the kernel needs from a structure.
pub trait Carrier: Clone {
    /// Name of this carrier variant (for diagnostics).
    fn kind(&self) -> &str;

    /// Measure invariants directly from the structure. Ground truth.
    fn measure_invariants(&self) -> Invariants;
}

/// Graph-backed carrier: a 1-dimensional complex.
///
/// With n nodes, m edges, and c connected components:
/// β0 = c, β1 = m − n + c (circuit rank), β2 = 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphCarrier {
    graph: Graph,
}

impl GraphCarrier {
    pub fn new(graph: Graph) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    pub fn contains_edge(&self, u: NodeId, v: NodeId) -> bool {
        self.graph.contains_edge(u, v)
    }
}

impl From<Graph> for GraphCarrier {
    fn from(graph: Graph) -> Self {
        Self::new(graph)
    }
}

impl Carrier for GraphCarrier {
    fn kind(&self) -> &str {
        "graph"
    }

    fn measure_invariants(&self) -> Invariants {
        let n = self.graph.node_count() as i64;
        let m = self.graph.edge_count() as i64;
        let c = self.graph.component_count() as i64;
        Invariants::from_betti(c, m - n + c, 0)
    }
}

impl fmt::Display for GraphCarrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GraphCarrier(n={}, m={}, cc={})",
            self.graph.node_count(),
            self.graph.edge_count(),
            self.graph.component_count()
        )
    }
}
