//! Integration tests: end-to-end kernel runs over graph carriers.
//!
//! Each test builds a carrier, runs an operator sequence through the
//! kernel, and checks the reported invariants, the carrier, and the log
//! against direct measurement.

use topy_kernel::{
    AddCycleRedundancy, BETA0, BETA1, BoxedOperator, CalculateH1Graph, Carrier, Constraints,
    Deltas, Graph, GraphCarrier, Invariants, Kernel, Plan,
};

fn path4() -> Kernel<GraphCarrier> {
    Kernel::new(GraphCarrier::new(Graph::path(4)))
}

fn add(edges: &[(u64, u64)]) -> BoxedOperator<GraphCarrier> {
    Box::new(AddCycleRedundancy::new(edges.iter().copied()).expect("valid candidate edges"))
}

/// Reported invariants must equal direct measurement of the final carrier.
fn assert_ground_truth(kernel: &Kernel<GraphCarrier>) {
    let graph = kernel.carrier().graph();
    let n = graph.node_count() as i64;
    let m = graph.edge_count() as i64;
    let c = graph.component_count() as i64;
    assert_eq!(kernel.invariants().beta0(), c, "β0 must equal component count");
    assert_eq!(kernel.invariants().beta1(), m - n + c, "β1 must equal circuit rank");
    assert_eq!(kernel.invariants().beta2(), 0);
}

#[test]
fn successful_runs_match_ground_truth() {
    let sequences: Vec<Vec<BoxedOperator<GraphCarrier>>> = vec![
        vec![add(&[(0, 3)]), Box::new(CalculateH1Graph::new())],
        vec![add(&[(5, 6)])],
        vec![add(&[(5, 6), (6, 7), (7, 5)])],
        vec![add(&[(0, 2), (1, 3)]), add(&[(3, 9), (9, 10)])],
        // Snapshot divergence: all three are predicted as merges.
        vec![add(&[(10, 11), (11, 12), (10, 12)])],
        vec![add(&[(0, 1)])],
    ];

    for ops in sequences {
        let mut kernel = path4();
        kernel
            .execute(&ops, &Constraints::unbounded())
            .expect("unbounded run should succeed");
        assert_ground_truth(&kernel);
        assert_eq!(kernel.log().len(), ops.len());
    }
}

#[test]
fn apply_deltas_never_mutates_receiver() {
    let original = Invariants::from_betti(2, 3, 0);
    let _ = original.apply_deltas(&Deltas::betti([(BETA0, -2), (BETA1, 5)]));
    assert_eq!(original, Invariants::from_betti(2, 3, 0));
}

#[test]
fn closing_the_path_cycle_succeeds_within_bound() {
    let mut kernel = path4();
    assert_eq!(kernel.invariants(), &Invariants::from_betti(1, 0, 0));

    kernel
        .execute(&[add(&[(0, 3)])], &Constraints::with_max_betti1(3))
        .expect("within bound");

    assert_eq!(kernel.invariants().beta1(), 1);
    assert_eq!(kernel.invariants().beta0(), 1);
    assert!(kernel.carrier().contains_edge(0, 3));
}

#[test]
fn closing_the_path_cycle_violates_zero_bound() {
    let mut kernel = path4();
    let err = kernel
        .execute(&[add(&[(0, 3)])], &Constraints::with_max_betti1(0))
        .expect_err("β1 would exceed 0");

    assert_eq!(err.operator, "add_cycle_redundancy");
    insta::assert_json_snapshot!(err.deltas, @r#"
    {
      "betti": {
        "β0": 0,
        "β1": 1
      }
    }
    "#);
    assert!(!kernel.carrier().contains_edge(0, 3));
    assert_eq!(kernel.carrier(), &GraphCarrier::new(Graph::path(4)));
    assert!(kernel.log().is_empty());
}

#[test]
fn joining_isolated_nodes_predicts_a_merge() {
    let mut kernel = path4();
    kernel
        .execute(&[add(&[(5, 6)])], &Constraints::unbounded())
        .expect("unbounded");

    let deltas = &kernel.log()[0].deltas;
    assert_eq!(deltas.betti_delta(BETA0), -1);
    assert_eq!(deltas.betti_delta(BETA1), 0);
    assert_ground_truth(&kernel);
}

#[test]
fn third_operator_crossing_the_bound_aborts_after_two_commits() {
    let mut kernel = path4();
    let ops = vec![add(&[(0, 2)]), add(&[(1, 3)]), add(&[(0, 3)])];

    let err = kernel
        .execute(&ops, &Constraints::with_max_betti1(2))
        .expect_err("third operator would reach β1 = 3");

    assert_eq!(err.deltas.betti_delta(BETA1), 1);
    assert_eq!(kernel.log().len(), 2);
    assert_eq!(kernel.invariants().beta1(), 2);
    assert!(kernel.carrier().contains_edge(0, 2));
    assert!(kernel.carrier().contains_edge(1, 3));
    assert!(!kernel.carrier().contains_edge(0, 3));
    assert_eq!(kernel.execution_log().verify_chain(), Ok(()));
}

#[test]
fn checkpoint_after_measurement_is_stable() {
    let mut kernel = path4();
    let before = kernel.invariants().clone();

    kernel
        .execute(&[CalculateH1Graph::new()], &Constraints::unbounded())
        .expect("checkpoint always accepts");
    kernel
        .execute(&[CalculateH1Graph::new()], &Constraints::unbounded())
        .expect("checkpoint always accepts");

    assert_eq!(kernel.invariants(), &before);
    assert_eq!(kernel.log().len(), 2);
    assert!(kernel.log().iter().all(|r| !r.reconciled && r.deltas.is_empty()));
}

#[test]
fn repeated_runs_share_one_log() {
    let mut kernel = path4();
    kernel
        .execute(&[add(&[(0, 2)])], &Constraints::unbounded())
        .expect("first run");
    let head = kernel.execution_log().head().map(str::to_string);

    kernel
        .execute(&[add(&[(1, 3)])], &Constraints::unbounded())
        .expect("second run");

    assert_eq!(kernel.log().len(), 2);
    assert_eq!(kernel.log()[0].record_id.as_str(), head.as_deref().unwrap());
    assert_eq!(kernel.log()[1].sequence, 1);
}

#[test]
fn identical_runs_produce_identical_logs() {
    let run = || {
        let mut kernel = path4();
        kernel
            .execute(&[add(&[(0, 3)]), add(&[(5, 6)])], &Constraints::unbounded())
            .expect("unbounded");
        kernel.into_parts().2
    };
    assert_eq!(run(), run());
}

#[test]
fn demo_plan_reaches_one_cycle() {
    let plan = Plan::demo();
    let mut kernel = Kernel::new(plan.carrier().expect("demo graph"));
    let ops = plan.operators().expect("demo operators");

    kernel.execute(&ops, &plan.constraints).expect("demo run");

    assert_eq!(kernel.invariants(), &Invariants::from_betti(1, 1, 0));
    assert_eq!(kernel.carrier().to_string(), "GraphCarrier(n=4, m=4, cc=1)");
    insta::assert_json_snapshot!(kernel.log()[0].deltas, @r#"
    {
      "betti": {
        "β0": 0,
        "β1": 1
      }
    }
    "#);
    assert_eq!(kernel.carrier().measure_invariants(), *kernel.invariants());
}
