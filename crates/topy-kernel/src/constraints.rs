//! Caller-supplied numeric bounds shared by every operator in a run.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Constraints {
    /// Inclusive upper bound on β1 after each committing operator.
    /// `None` means unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_betti1: Option<i64>,
}

impl Constraints {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_max_betti1(max_betti1: i64) -> Self {
        Self {
            max_betti1: Some(max_betti1),
        }
    }

    /// Whether `beta1` is within the `max_betti1` bound.
    pub fn admits_betti1(&self, beta1: i64) -> bool {
        self.max_betti1.is_none_or(|max| beta1 <= max)
    }
}
