//! Concrete operators.
//!
//! - [`AddCycleRedundancy`]: insert candidate edges into a graph carrier,
//!   bounded by `max_betti1`.
//! - [`CalculateH1Graph`]: a checkpoint that forces direct re-measurement.

pub mod add_cycle_redundancy;
pub mod calculate_h1_graph;

pub use add_cycle_redundancy::AddCycleRedundancy;
pub use calculate_h1_graph::CalculateH1Graph;
