//! # Topy Kernel
//!
//! Tracks Betti numbers of a combinatorial structure as it is edited by a
//! sequence of operators, and refuses any edit whose predicted effect
//! breaks the caller's numeric constraints *before* the edit is made.
//!
//! ## Architecture
//!
//! ```text
//! Invariants / Deltas   ← betti group: β0, β1, β2; pure apply_deltas
//!     │
//! Carrier               ← measure_invariants + Clone (GraphCarrier)
//!     │
//! Operator<C>           ← algebraic effect, contract, geometric realization
//!     │
//! Kernel<C>             ← verify → commit → realize → reconcile → log
//! ```
//!
//! Algebraic deltas are advisory. Operators that set `force_measure` make
//! the kernel re-measure the carrier after commit and silently adopt the
//! measurement when the two disagree.

pub mod carrier;
pub mod constraints;
pub mod error;
pub mod graph;
pub mod invariants;
pub mod kernel;
pub mod log;
pub mod operator;
pub mod operators;
pub mod plan;
pub mod witness;

pub use carrier::{Carrier, GraphCarrier};
pub use constraints::Constraints;
pub use error::{ContractViolation, ParameterError, PlanError};
pub use graph::{Edge, Graph, NodeId};
pub use invariants::{BETA0, BETA1, BETA2, BETTI_GROUP, Deltas, Invariants};
pub use kernel::Kernel;
pub use log::{ExecutionLog, ExecutionRecord};
pub use operator::{BoxedOperator, Operator};
pub use operators::{AddCycleRedundancy, CalculateH1Graph};
pub use plan::{GraphSpec, OperatorSpec, Plan};
