//! Re-measurement checkpoint.
//!
//! Predicts nothing, always accepts, never mutates. Its only effect is
//! `force_measure`: the kernel replaces its invariants with a direct
//! measurement of the carrier whenever the two disagree.

use crate::carrier::Carrier;
use crate::constraints::Constraints;
use crate::invariants::{Deltas, Invariants};
use crate::operator::Operator;
use serde_json::{Map, Value};

pub const NAME: &str = "calculate_h1_graph";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CalculateH1Graph;

impl CalculateH1Graph {
    pub fn new() -> Self {
        Self
    }
}

impl<C: Carrier> Operator<C> for CalculateH1Graph {
    fn name(&self) -> &str {
        NAME
    }

    fn requires_geometric_realization(&self) -> bool {
        false
    }

    fn force_measure(&self) -> bool {
        true
    }

    fn parameters(&self) -> Value {
        Value::Object(Map::new())
    }

    fn algebraic_effect(&self, _current: &Invariants, _carrier: &C) -> Deltas {
        Deltas::new()
    }

    fn verify_contract(
        &self,
        _current: &Invariants,
        _deltas: &Deltas,
        _constraints: &Constraints,
        _carrier: &C,
    ) -> bool {
        true
    }

    fn realize_geometrically(&self, _carrier: &mut C) {}
}
