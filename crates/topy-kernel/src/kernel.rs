//! The kernel: runs operators against a carrier under shared constraints.
//!
//! Per-operator protocol, strictly in order:
//!
//! 1. `effect = algebraic_effect(invariants, carrier)`
//! 2. `verify_contract(invariants, effect, constraints, carrier)`; on
//!    rejection the run stops with [`ContractViolation`]
//! 3. `invariants = invariants.apply_deltas(effect)`
//! 4. if `requires_geometric_realization`: `realize_geometrically(carrier)`
//! 5. if `force_measure`: measure the carrier; if its betti map differs,
//!    it silently replaces the invariants
//! 6. append `{name, parameters, effect}` to the log
//!
//! Verification precedes any mutation, so a rejected operator leaves the
//! carrier and invariants exactly as the previous operator committed them.
//! Earlier operators are never rolled back.

use crate::carrier::Carrier;
use crate::constraints::Constraints;
use crate::error::ContractViolation;
use crate::invariants::Invariants;
use crate::log::{ExecutionLog, ExecutionRecord};
use crate::operator::Operator;

/// Owns one carrier, its current invariants, and the execution log.
#[derive(Debug, Clone)]
pub struct Kernel<C: Carrier> {
    carrier: C,
    invariants: Invariants,
    log: ExecutionLog,
}

impl<C: Carrier> Kernel<C> {
    /// Take ownership of a carrier and measure its invariants.
    pub fn new(carrier: C) -> Self {
        let invariants = carrier.measure_invariants();
        tracing::debug!(carrier = carrier.kind(), %invariants, "kernel initialized");
        Self {
            carrier,
            invariants,
            log: ExecutionLog::new(),
        }
    }

    pub fn carrier(&self) -> &C {
        &self.carrier
    }

    pub fn invariants(&self) -> &Invariants {
        &self.invariants
    }

    pub fn log(&self) -> &[ExecutionRecord] {
        self.log.records()
    }

    pub fn execution_log(&self) -> &ExecutionLog {
        &self.log
    }

    pub fn into_parts(self) -> (C, Invariants, ExecutionLog) {
        (self.carrier, self.invariants, self.log)
    }

    /// Run `operators` in order, stopping at the first contract violation.
    ///
    /// Returns the number of operators committed by this call.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation`] carrying the rejected operator's name
    /// and deltas. Operators before it remain committed.
    pub fn execute<O>(
        &mut self,
        operators: &[O],
        constraints: &Constraints,
    ) -> Result<usize, ContractViolation>
    where
        O: Operator<C>,
    {
        for (position, op) in operators.iter().enumerate() {
            if let Err(violation) = self.step(op, constraints) {
                tracing::warn!(
                    operator = %violation.operator,
                    position,
                    deltas = %violation.deltas,
                    witness_id = %violation.witness_id,
                    "contract violation; aborting run"
                );
                return Err(violation);
            }
        }
        Ok(operators.len())
    }

    /// Run a single operator through the full protocol.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation`] if the operator's contract rejects
    /// its own algebraic effect; nothing is mutated in that case.
    pub fn step<O>(&mut self, op: &O, constraints: &Constraints) -> Result<(), ContractViolation>
    where
        O: Operator<C> + ?Sized,
    {
        let deltas = op.algebraic_effect(&self.invariants, &self.carrier);
        tracing::debug!(operator = op.name(), %deltas, "algebraic effect");

        if !op.verify_contract(&self.invariants, &deltas, constraints, &self.carrier) {
            return Err(ContractViolation::new(op.name(), deltas));
        }

        self.invariants = self.invariants.apply_deltas(&deltas);

        if op.requires_geometric_realization() {
            op.realize_geometrically(&mut self.carrier);
        }

        let mut reconciled = false;
        if op.force_measure() {
            let measured = self.carrier.measure_invariants();
            if !measured.betti_matches(&self.invariants) {
                tracing::debug!(
                    operator = op.name(),
                    predicted = %self.invariants,
                    %measured,
                    "reconciled invariants from direct measurement"
                );
                self.invariants = measured;
                reconciled = true;
            }
        }

        let record = self
            .log
            .append(op.name(), op.parameters(), deltas, reconciled);
        tracing::info!(
            operator = %record.operator,
            sequence = record.sequence,
            invariants = %self.invariants,
            "operator committed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carrier::GraphCarrier;
    use crate::graph::Graph;
    use crate::invariants::{BETA0, BETA1, Deltas};
    use crate::operator::BoxedOperator;
    use crate::operators::{AddCycleRedundancy, CalculateH1Graph};

    fn path4_kernel() -> Kernel<GraphCarrier> {
        Kernel::new(GraphCarrier::new(Graph::path(4)))
    }

    #[test]
    fn construction_measures_carrier() {
        let kernel = path4_kernel();
        assert_eq!(kernel.invariants(), &Invariants::from_betti(1, 0, 0));
        assert!(kernel.log().is_empty());
    }

    #[test]
    fn demo_sequence_commits_both_operators() {
        let mut kernel = path4_kernel();
        let ops: Vec<BoxedOperator<GraphCarrier>> = vec![
            Box::new(AddCycleRedundancy::new([(0, 3)]).unwrap()),
            Box::new(CalculateH1Graph::new()),
        ];

        let committed = kernel
            .execute(&ops, &Constraints::with_max_betti1(3))
            .unwrap();

        assert_eq!(committed, 2);
        assert_eq!(kernel.invariants(), &Invariants::from_betti(1, 1, 0));
        assert_eq!(kernel.log().len(), 2);
        assert_eq!(kernel.log()[0].operator, "add_cycle_redundancy");
        assert_eq!(kernel.log()[1].operator, "calculate_h1_graph");
        assert!(kernel.log()[1].deltas.is_empty());
        assert_eq!(kernel.execution_log().verify_chain(), Ok(()));
    }

    #[test]
    fn rejected_operator_mutates_nothing() {
        let mut kernel = path4_kernel();
        let op = AddCycleRedundancy::new([(0, 3)]).unwrap();

        let err = kernel
            .step(&op, &Constraints::with_max_betti1(0))
            .unwrap_err();

        assert_eq!(err.operator, "add_cycle_redundancy");
        assert_eq!(err.deltas, Deltas::betti([(BETA1, 1), (BETA0, 0)]));
        assert!(!kernel.carrier().contains_edge(0, 3));
        assert_eq!(kernel.invariants(), &Invariants::from_betti(1, 0, 0));
        assert!(kernel.log().is_empty());
    }

    #[test]
    fn misprediction_is_reconciled_silently() {
        // Edge (5, 6) between absent nodes is predicted as a merge
        // (β0 - 1) but actually creates a new component (β0 + 1).
        let mut kernel = path4_kernel();
        let op = AddCycleRedundancy::new([(5, 6)]).unwrap();

        kernel.step(&op, &Constraints::unbounded()).unwrap();

        assert_eq!(kernel.invariants(), &Invariants::from_betti(2, 0, 0));
        let record = &kernel.log()[0];
        assert_eq!(record.deltas.betti_delta(BETA0), -1);
        assert!(record.reconciled);
    }

    #[test]
    fn exact_prediction_is_not_reconciled() {
        let mut kernel = path4_kernel();
        let op = AddCycleRedundancy::new([(0, 2)]).unwrap();
        kernel.step(&op, &Constraints::unbounded()).unwrap();
        assert!(!kernel.log()[0].reconciled);
        assert_eq!(kernel.invariants().beta1(), 1);
    }

    #[test]
    fn empty_sequence_is_a_no_op() {
        let mut kernel = path4_kernel();
        let ops: Vec<AddCycleRedundancy> = Vec::new();
        assert_eq!(kernel.execute(&ops, &Constraints::unbounded()), Ok(0));
        assert!(kernel.log().is_empty());
    }
}
