//! Error types for Topy kernel operations.

use crate::graph::NodeId;
use crate::invariants::Deltas;
use crate::witness::compute_violation_id;

/// An operator's contract check rejected its computed deltas.
///
/// The only failure `Kernel::execute` reports. Operators before the
/// rejected one stay committed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("operator {operator} violated constraints with deltas {deltas}")]
pub struct ContractViolation {
    /// Name of the rejected operator.
    pub operator: String,

    /// The rejected algebraic effect.
    pub deltas: Deltas,

    /// Deterministic id over (operator, deltas).
    pub witness_id: String,
}

impl ContractViolation {
    pub fn new(operator: impl Into<String>, deltas: Deltas) -> Self {
        let operator = operator.into();
        let payload = serde_json::to_value(&deltas).unwrap_or(serde_json::Value::Null);
        let witness_id = compute_violation_id(&operator, &payload);
        Self {
            operator,
            deltas,
            witness_id,
        }
    }
}

/// Operator parameters rejected at construction time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParameterError {
    /// Self-loops are not modeled by the graph carrier.
    #[error("candidate edge ({node}, {node}) is a self-loop")]
    SelfLoop { node: NodeId },
}

/// Errors arising while loading a run plan.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("failed to read plan {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON plan: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML plan: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported plan extension for {0} (expected .json or .toml)")]
    UnsupportedFormat(String),

    #[error("graph edge ({node}, {node}) is a self-loop")]
    SelfLoopEdge { node: NodeId },

    #[error("operator #{index} ({kind}): {source}")]
    Parameters {
        index: usize,
        kind: String,
        #[source]
        source: ParameterError,
    },
}
