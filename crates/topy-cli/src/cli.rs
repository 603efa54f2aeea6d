use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "topy",
    about = "Topy: contract-checked edits over Betti-number invariants",
    version
)]
pub struct Cli {
    /// Log kernel steps at debug level (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Execute a plan's operators against its graph
    Run {
        /// Path to a plan (.json or .toml)
        plan: String,

        /// Override the plan's max_betti1 constraint
        #[arg(long)]
        max_betti1: Option<i64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the built-in demonstration plan
    Demo {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Measure the invariants of a plan's graph without running operators
    Measure {
        /// Path to a plan (.json or .toml)
        plan: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
