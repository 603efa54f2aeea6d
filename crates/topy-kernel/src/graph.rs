//! Undirected simple graph: a node set and a set of unordered node pairs.
//!
//! Self-loops and parallel edges are not modeled. Inserting an edge that
//! is already present is a no-op, and inserting an edge inserts any
//! missing endpoint.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Node identifier.
pub type NodeId = u64;

/// An unordered node pair, stored with the smaller endpoint first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Edge(NodeId, NodeId);

impl Edge {
    pub fn new(u: NodeId, v: NodeId) -> Self {
        if u <= v { Self(u, v) } else { Self(v, u) }
    }

    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.0, self.1)
    }

    pub fn is_loop(&self) -> bool {
        self.0 == self.1
    }
}

impl From<(NodeId, NodeId)> for Edge {
    fn from((u, v): (NodeId, NodeId)) -> Self {
        Self::new(u, v)
    }
}

/// Component index per node, as produced by [`Graph::component_index`].
pub type ComponentIndex = BTreeMap<NodeId, usize>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    nodes: BTreeSet<NodeId>,
    edges: BTreeSet<Edge>,
    adjacency: BTreeMap<NodeId, BTreeSet<NodeId>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path graph on nodes `0..n`: edges (0,1), (1,2), …, (n-2, n-1).
    pub fn path(n: u64) -> Self {
        let mut graph = Self::new();
        for node in 0..n {
            graph.add_node(node);
        }
        for node in 1..n {
            graph.add_edge(node - 1, node);
        }
        graph
    }

    /// Build a graph from explicit nodes plus edges. Edge endpoints are
    /// inserted implicitly; self-loops are skipped.
    pub fn from_parts(
        nodes: impl IntoIterator<Item = NodeId>,
        edges: impl IntoIterator<Item = (NodeId, NodeId)>,
    ) -> Self {
        let mut graph = Self::new();
        for node in nodes {
            graph.add_node(node);
        }
        for (u, v) in edges {
            graph.add_edge(u, v);
        }
        graph
    }

    /// Insert a node. Returns false if it was already present.
    pub fn add_node(&mut self, node: NodeId) -> bool {
        self.adjacency.entry(node).or_default();
        self.nodes.insert(node)
    }

    /// Insert an edge and any missing endpoint.
    ///
    /// Returns false if the edge was already present or is a self-loop.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId) -> bool {
        let edge = Edge::new(u, v);
        if edge.is_loop() {
            return false;
        }
        self.add_node(u);
        self.add_node(v);
        if !self.edges.insert(edge) {
            return false;
        }
        self.adjacency.entry(u).or_default().insert(v);
        self.adjacency.entry(v).or_default().insert(u);
        true
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    pub fn contains_edge(&self, u: NodeId, v: NodeId) -> bool {
        self.edges.contains(&Edge::new(u, v))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Connected-component partition.
    ///
    /// Components are numbered from 0 in ascending order of their smallest
    /// node. Breadth-first labeling, linear in nodes + edges.
    pub fn component_index(&self) -> ComponentIndex {
        let mut index = ComponentIndex::new();
        let mut next = 0;
        let mut queue = VecDeque::new();

        for &start in &self.nodes {
            if index.contains_key(&start) {
                continue;
            }
            index.insert(start, next);
            queue.push_back(start);
            while let Some(node) = queue.pop_front() {
                let Some(neighbors) = self.adjacency.get(&node) else {
                    continue;
                };
                for &neighbor in neighbors {
                    if !index.contains_key(&neighbor) {
                        index.insert(neighbor, next);
                        queue.push_back(neighbor);
                    }
                }
            }
            next += 1;
        }
        index
    }

    /// Number of connected components. The empty graph has none.
    pub fn component_count(&self) -> usize {
        self.component_index()
            .values()
            .max()
            .map_or(0, |last| last + 1)
    }
}
