use serde_json::{Value, json};
use topy_kernel::{Carrier, GraphCarrier, Plan};

pub const RUN_KIND: &str = "topy.run.v1";
pub const MEASURE_KIND: &str = "topy.measure.v1";

/// Exit status for a run aborted by a contract violation.
pub const EXIT_CONTRACT_VIOLATION: i32 = 2;

pub fn load_plan_or_exit(path: &str) -> Plan {
    Plan::load(path).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    })
}

pub fn carrier_or_exit(plan: &Plan) -> GraphCarrier {
    plan.carrier().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    })
}

pub fn carrier_json(carrier: &GraphCarrier) -> Value {
    let graph = carrier.graph();
    json!({
        "kind": carrier.kind(),
        "nodes": graph.node_count(),
        "edges": graph.edge_count(),
        "components": graph.component_count(),
    })
}

pub fn print_json_or_exit(payload: &Value, label: &str) {
    let rendered = serde_json::to_string_pretty(payload).unwrap_or_else(|err| {
        eprintln!("error: failed to render {label} payload: {err}");
        std::process::exit(2);
    });
    println!("{rendered}");
}

pub fn yes_no(ok: bool) -> &'static str {
    if ok { "yes" } else { "no" }
}
