use crate::support::{MEASURE_KIND, carrier_json, carrier_or_exit, load_plan_or_exit, print_json_or_exit};
use serde_json::json;
use topy_kernel::Carrier;

pub fn run(plan_path: String, json_output: bool) {
    let plan = load_plan_or_exit(&plan_path);
    let carrier = carrier_or_exit(&plan);
    let invariants = carrier.measure_invariants();

    if json_output {
        let payload = json!({
            "schema": 1,
            "kind": MEASURE_KIND,
            "planPath": plan_path,
            "carrier": carrier_json(&carrier),
            "invariants": invariants,
        });
        print_json_or_exit(&payload, "measure");
        return;
    }

    println!("topy measure {plan_path}");
    println!();
    println!("  State: {carrier}");
    println!("  Invariants: {invariants}");
}
