//! Add redundant edges to a graph carrier.
//!
//! ## Prediction
//!
//! The component partition of the carrier is taken once, before any
//! candidate is considered. For each candidate (u, v):
//!
//! - both endpoints in the same component: the edge closes a cycle, β1 += 1
//! - different components, or an endpoint absent: the edge merges, β0 -= 1
//!
//! The partition is NOT updated between candidates of the same call. Two
//! candidates that jointly chain components together are each counted
//! against the original partition, so the prediction can diverge from an
//! incremental union-find. Reconciliation by direct measurement after
//! commit is what keeps the kernel's invariants exact.
//!
//! ## Contract
//!
//! Rejects a negative β1 delta outright; otherwise accepts iff
//! `current.β1 + Δβ1 <= max_betti1` (unbounded when absent).

use crate::carrier::{Carrier, GraphCarrier};
use crate::constraints::Constraints;
use crate::error::ParameterError;
use crate::graph::NodeId;
use crate::invariants::{BETA0, BETA1, Deltas, Invariants};
use crate::operator::Operator;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const NAME: &str = "add_cycle_redundancy";

/// Typed parameters: the ordered candidate edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddCycleRedundancyParams {
    pub edges: Vec<(NodeId, NodeId)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddCycleRedundancy {
    params: AddCycleRedundancyParams,
}

impl AddCycleRedundancy {
    /// Validate candidate edges. Self-loops are rejected; duplicates and
    /// edges already in the carrier are allowed.
    pub fn new(edges: impl IntoIterator<Item = (NodeId, NodeId)>) -> Result<Self, ParameterError> {
        Self::from_params(AddCycleRedundancyParams {
            edges: edges.into_iter().collect(),
        })
    }

    pub fn from_params(params: AddCycleRedundancyParams) -> Result<Self, ParameterError> {
        if let Some(&(node, _)) = params.edges.iter().find(|(u, v)| u == v) {
            return Err(ParameterError::SelfLoop { node });
        }
        Ok(Self { params })
    }

    pub fn edges(&self) -> &[(NodeId, NodeId)] {
        &self.params.edges
    }
}

impl Operator<GraphCarrier> for AddCycleRedundancy {
    fn name(&self) -> &str {
        NAME
    }

    fn requires_geometric_realization(&self) -> bool {
        true
    }

    fn force_measure(&self) -> bool {
        true
    }

    fn parameters(&self) -> Value {
        serde_json::to_value(&self.params).unwrap_or(Value::Null)
    }

    fn algebraic_effect(&self, _current: &Invariants, carrier: &GraphCarrier) -> Deltas {
        let component = carrier.graph().component_index();

        let mut delta_beta1 = 0;
        let mut delta_beta0 = 0;
        for (u, v) in &self.params.edges {
            match (component.get(u), component.get(v)) {
                (Some(cu), Some(cv)) if cu == cv => delta_beta1 += 1,
                _ => delta_beta0 -= 1,
            }
        }

        Deltas::betti([(BETA1, delta_beta1), (BETA0, delta_beta0)])
    }

    fn verify_contract(
        &self,
        current: &Invariants,
        deltas: &Deltas,
        constraints: &Constraints,
        _carrier: &GraphCarrier,
    ) -> bool {
        let delta_beta1 = deltas.betti_delta(BETA1);
        if delta_beta1 < 0 {
            return false;
        }
        constraints.admits_betti1(current.beta1() + delta_beta1)
    }

    fn realize_geometrically(&self, carrier: &mut GraphCarrier) {
        let graph = carrier.graph_mut();
        for &(u, v) in &self.params.edges {
            graph.add_node(u);
            graph.add_node(v);
            graph.add_edge(u, v);
        }
        tracing::trace!(
            carrier = %carrier,
            kind = carrier.kind(),
            "realized candidate edges"
        );
    }
}
