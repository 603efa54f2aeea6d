use crate::support::{
    EXIT_CONTRACT_VIOLATION, RUN_KIND, carrier_json, carrier_or_exit, load_plan_or_exit,
    print_json_or_exit, yes_no,
};
use serde_json::{Value, json};
use topy_kernel::{ContractViolation, GraphCarrier, Invariants, Kernel, Plan};

pub fn run(plan_path: String, max_betti1: Option<i64>, json_output: bool) {
    let mut plan = load_plan_or_exit(&plan_path);
    if let Some(max) = max_betti1 {
        plan.constraints.max_betti1 = Some(max);
    }
    execute_plan(&plan, &format!("topy run {plan_path}"), json_output);
}

/// Run a plan to completion (or first violation) and report it.
///
/// Exits with `EXIT_CONTRACT_VIOLATION` when an operator is rejected.
pub fn execute_plan(plan: &Plan, title: &str, json_output: bool) {
    let operators = plan.operators().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });
    tracing::debug!(
        operators = operators.len(),
        max_betti1 = ?plan.constraints.max_betti1,
        "plan loaded"
    );
    let mut kernel = Kernel::new(carrier_or_exit(plan));
    let initial_carrier = kernel.carrier().to_string();
    let initial = kernel.invariants().clone();

    let outcome = kernel.execute(&operators, &plan.constraints);

    if json_output {
        print_json_or_exit(&run_payload(plan, &initial, &kernel, outcome.as_ref().err()), "run");
    } else {
        print_human(title, &initial_carrier, &initial, &kernel, outcome.as_ref().err());
    }

    if outcome.is_err() {
        std::process::exit(EXIT_CONTRACT_VIOLATION);
    }
}

fn run_payload(
    plan: &Plan,
    initial: &Invariants,
    kernel: &Kernel<GraphCarrier>,
    violation: Option<&ContractViolation>,
) -> Value {
    let status = if violation.is_some() {
        "rejected"
    } else {
        "accepted"
    };
    let mut payload = json!({
        "schema": 1,
        "kind": RUN_KIND,
        "status": status,
        "constraints": plan.constraints,
        "initial": initial,
        "final": kernel.invariants(),
        "carrier": carrier_json(kernel.carrier()),
        "log": kernel.execution_log(),
    });
    if let Some(v) = violation {
        payload["violation"] = json!({
            "operator": v.operator,
            "deltas": v.deltas,
            "witnessId": v.witness_id,
            "message": v.to_string(),
        });
    }
    payload
}

fn print_human(
    title: &str,
    initial_carrier: &str,
    initial: &Invariants,
    kernel: &Kernel<GraphCarrier>,
    violation: Option<&ContractViolation>,
) {
    println!("{title}");
    println!();
    println!("  Initial state: {initial_carrier}");
    println!("  Initial invariants: {initial}");
    match violation {
        None => println!("  Success. Final invariants: {}", kernel.invariants()),
        Some(v) => {
            println!("  Design failed: {v}");
            println!("  Witness: {}", v.witness_id);
            println!("  Committed invariants: {}", kernel.invariants());
        }
    }
    println!("  Final state: {}", kernel.carrier());
    let log = kernel.execution_log();
    println!("  Log ({} entries):", log.len());
    for record in log {
        println!(
            "    [{}] {} parameters={} deltas={} reconciled={} id={}",
            record.sequence,
            record.operator,
            record.parameters,
            record.deltas,
            yes_no(record.reconciled),
            record.record_id
        );
    }
}
