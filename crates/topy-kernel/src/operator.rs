//! The operator capability model.
//!
//! An operator declares an edit to a carrier in three steps:
//!
//! - **algebraic effect**: predict the change to invariants, without
//!   touching the carrier
//! - **contract**: decide whether the prediction is admissible under the
//!   current invariants and the caller's constraints
//! - **geometric realization**: actually mutate the carrier
//!
//! The kernel drives these in a fixed order; see [`crate::kernel`].

use crate::carrier::Carrier;
use crate::constraints::Constraints;
use crate::invariants::{Deltas, Invariants};
use serde_json::Value;

/// An edit over carriers of type `C`.
pub trait Operator<C: Carrier> {
    /// Name recorded in the execution log and in violations.
    fn name(&self) -> &str;

    /// Whether committing this operator must mutate the carrier.
    fn requires_geometric_realization(&self) -> bool;

    /// Whether to re-measure the carrier after commit and reconcile.
    fn force_measure(&self) -> bool;

    /// Construction parameters, as recorded in the execution log.
    fn parameters(&self) -> Value;

    /// Predict the change to invariants. Must not mutate anything.
    fn algebraic_effect(&self, current: &Invariants, carrier: &C) -> Deltas;

    /// Accept or reject a predicted effect.
    fn verify_contract(
        &self,
        current: &Invariants,
        deltas: &Deltas,
        constraints: &Constraints,
        carrier: &C,
    ) -> bool;

    /// Mutate the carrier to match a verified effect.
    fn realize_geometrically(&self, carrier: &mut C);
}

impl<C: Carrier, O: Operator<C> + ?Sized> Operator<C> for Box<O> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn requires_geometric_realization(&self) -> bool {
        (**self).requires_geometric_realization()
    }

    fn force_measure(&self) -> bool {
        (**self).force_measure()
    }

    fn parameters(&self) -> Value {
        (**self).parameters()
    }

    fn algebraic_effect(&self, current: &Invariants, carrier: &C) -> Deltas {
        (**self).algebraic_effect(current, carrier)
    }

    fn verify_contract(
        &self,
        current: &Invariants,
        deltas: &Deltas,
        constraints: &Constraints,
        carrier: &C,
    ) -> bool {
        (**self).verify_contract(current, deltas, constraints, carrier)
    }

    fn realize_geometrically(&self, carrier: &mut C) {
        (**self).realize_geometrically(carrier);
    }
}

/// Boxed operator over carriers of type `C`.
pub type BoxedOperator<C> = Box<dyn Operator<C>>;
