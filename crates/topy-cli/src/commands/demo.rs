use crate::commands::run::execute_plan;
use topy_kernel::Plan;

pub fn run(json_output: bool) {
    execute_plan(&Plan::demo(), "topy demo", json_output);
}
