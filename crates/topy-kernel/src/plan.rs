//! Run plans: a graph, constraints, and an operator sequence, loadable
//! from JSON or TOML.
//!
//! ```json
//! {
//!   "graph": { "nodes": [0, 1, 2, 3], "edges": [[0, 1], [1, 2], [2, 3]] },
//!   "constraints": { "max_betti1": 3 },
//!   "operators": [
//!     { "kind": "add_cycle_redundancy", "edges": [[0, 3]] },
//!     { "kind": "calculate_h1_graph" }
//!   ]
//! }
//! ```
//!
//! Operator parameters are validated when the plan is turned into
//! operators, not when the kernel runs.

use crate::carrier::GraphCarrier;
use crate::constraints::Constraints;
use crate::error::PlanError;
use crate::graph::{Graph, NodeId};
use crate::operator::BoxedOperator;
use crate::operators::add_cycle_redundancy::{self, AddCycleRedundancy, AddCycleRedundancyParams};
use crate::operators::calculate_h1_graph::{self, CalculateH1Graph};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The starting structure of a plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphSpec {
    /// Path graph on nodes `0..path`, merged with `nodes`/`edges`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<u64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<NodeId>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub edges: Vec<(NodeId, NodeId)>,
}

impl GraphSpec {
    pub fn build(&self) -> Result<Graph, PlanError> {
        if let Some(&(node, _)) = self.edges.iter().find(|(u, v)| u == v) {
            return Err(PlanError::SelfLoopEdge { node });
        }
        let mut graph = self.path.map(Graph::path).unwrap_or_default();
        for &node in &self.nodes {
            graph.add_node(node);
        }
        for &(u, v) in &self.edges {
            graph.add_edge(u, v);
        }
        Ok(graph)
    }
}

/// One operator entry, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OperatorSpec {
    AddCycleRedundancy(AddCycleRedundancyParams),
    #[serde(rename = "calculate_h1_graph")]
    CalculateH1Graph,
}

impl OperatorSpec {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AddCycleRedundancy(_) => add_cycle_redundancy::NAME,
            Self::CalculateH1Graph => calculate_h1_graph::NAME,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Plan {
    #[serde(default)]
    pub graph: GraphSpec,

    #[serde(default)]
    pub constraints: Constraints,

    #[serde(default)]
    pub operators: Vec<OperatorSpec>,
}

impl Plan {
    /// Path graph on four nodes, close the cycle (0, 3), then re-measure,
    /// with `max_betti1 = 3`.
    pub fn demo() -> Self {
        Self {
            graph: GraphSpec {
                path: Some(4),
                ..GraphSpec::default()
            },
            constraints: Constraints::with_max_betti1(3),
            operators: vec![
                OperatorSpec::AddCycleRedundancy(AddCycleRedundancyParams {
                    edges: vec![(0, 3)],
                }),
                OperatorSpec::CalculateH1Graph,
            ],
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, PlanError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, PlanError> {
        Ok(toml::from_str(raw)?)
    }

    /// Load a plan, picking the format from the file extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PlanError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| PlanError::Io {
            path: path.display().to_string(),
            source,
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&raw),
            Some("toml") => Self::from_toml_str(&raw),
            _ => Err(PlanError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn carrier(&self) -> Result<GraphCarrier, PlanError> {
        Ok(GraphCarrier::new(self.graph.build()?))
    }

    /// Validate and construct the operator sequence.
    pub fn operators(&self) -> Result<Vec<BoxedOperator<GraphCarrier>>, PlanError> {
        self.operators
            .iter()
            .enumerate()
            .map(|(index, spec)| -> Result<BoxedOperator<GraphCarrier>, PlanError> {
                let op: BoxedOperator<GraphCarrier> = match spec {
                    OperatorSpec::AddCycleRedundancy(params) => Box::new(
                        AddCycleRedundancy::from_params(params.clone()).map_err(|source| {
                            PlanError::Parameters {
                                index,
                                kind: spec.kind().to_string(),
                                source,
                            }
                        })?,
                    ),
                    OperatorSpec::CalculateH1Graph => Box::new(CalculateH1Graph::new()),
                };
                Ok(op)
            })
            .collect()
    }
}
