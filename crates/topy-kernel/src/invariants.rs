//! Algebraic state: named invariant groups mapping labels to integer counts.
//!
//! Only the `betti` group is interpreted. A 1-dimensional complex carries
//! three labels:
//!
//! - **β0**: connected components
//! - **β1**: independent cycles (circuit rank)
//! - **β2**: enclosed voids, always 0 for graphs
//!
//! `Invariants` evolves by pure transformation: [`Invariants::apply_deltas`]
//! returns a new value and never touches the receiver.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The only invariant group the kernel interprets.
pub const BETTI_GROUP: &str = "betti";

/// Connected-component count.
pub const BETA0: &str = "β0";

/// Cycle-space dimension.
pub const BETA1: &str = "β1";

/// Void count; a fixed placeholder above dimension 1.
pub const BETA2: &str = "β2";

/// Label → count mapping for one invariant group.
pub type BettiMap = BTreeMap<String, i64>;

/// A snapshot of the invariants of a carrier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invariants {
    pub betti: BettiMap,
}

impl Default for Invariants {
    /// A single point: β0 = 1, β1 = 0, β2 = 0.
    fn default() -> Self {
        Self::from_betti(1, 0, 0)
    }
}

impl Invariants {
    /// Build invariants from explicit Betti numbers.
    pub fn from_betti(beta0: i64, beta1: i64, beta2: i64) -> Self {
        let betti = BTreeMap::from([
            (BETA0.to_string(), beta0),
            (BETA1.to_string(), beta1),
            (BETA2.to_string(), beta2),
        ]);
        Self { betti }
    }

    /// Read a betti label, treating a missing label as 0.
    pub fn betti(&self, label: &str) -> i64 {
        self.betti.get(label).copied().unwrap_or(0)
    }

    pub fn beta0(&self) -> i64 {
        self.betti(BETA0)
    }

    pub fn beta1(&self) -> i64 {
        self.betti(BETA1)
    }

    pub fn beta2(&self) -> i64 {
        self.betti(BETA2)
    }

    /// Apply a delta set, returning a new snapshot.
    ///
    /// Each betti label is incremented by its delta; labels missing from
    /// the receiver start at 0. Sums saturate at the `i64` bounds. Groups
    /// other than `betti` are accepted and ignored.
    pub fn apply_deltas(&self, deltas: &Deltas) -> Self {
        let mut out = self.clone();
        for (group, labels) in deltas.groups() {
            if group != BETTI_GROUP {
                continue;
            }
            for (label, delta) in labels {
                let value = out.betti.entry(label.clone()).or_insert(0);
                *value = value.saturating_add(*delta);
            }
        }
        out
    }

    /// Whether the betti groups of two snapshots agree.
    pub fn betti_matches(&self, other: &Self) -> bool {
        self.betti == other.betti
    }
}

impl fmt::Display for Invariants {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invariants(betti=")?;
        write_labels(f, &self.betti)?;
        write!(f, ")")
    }
}

/// Predicted change to invariants: group → (label → delta).
///
/// Produced by an operator's algebraic effect, verified against
/// constraints, then applied with [`Invariants::apply_deltas`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deltas(BTreeMap<String, BTreeMap<String, i64>>);

impl Deltas {
    /// The empty delta: no prediction at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// A delta over the betti group only.
    pub fn betti<I, L>(entries: I) -> Self
    where
        I: IntoIterator<Item = (L, i64)>,
        L: Into<String>,
    {
        let mut deltas = Self::new();
        for (label, value) in entries {
            deltas.set(BETTI_GROUP, label, value);
        }
        deltas
    }

    /// Set one `group.label` entry, replacing any previous value.
    pub fn set(&mut self, group: impl Into<String>, label: impl Into<String>, value: i64) {
        self.0
            .entry(group.into())
            .or_default()
            .insert(label.into(), value);
    }

    /// Read one `group.label` entry, treating a missing entry as 0.
    pub fn get(&self, group: &str, label: &str) -> i64 {
        self.0
            .get(group)
            .and_then(|labels| labels.get(label))
            .copied()
            .unwrap_or(0)
    }

    pub fn betti_delta(&self, label: &str) -> i64 {
        self.get(BETTI_GROUP, label)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn groups(&self) -> impl Iterator<Item = (&String, &BTreeMap<String, i64>)> {
        self.0.iter()
    }
}

impl fmt::Display for Deltas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (group, labels)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{group}: ")?;
            write_labels(f, labels)?;
        }
        write!(f, "}}")
    }
}

fn write_labels(f: &mut fmt::Formatter<'_>, labels: &BTreeMap<String, i64>) -> fmt::Result {
    write!(f, "{{")?;
    for (i, (label, value)) in labels.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{label}: {value}")?;
    }
    write!(f, "}}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_a_single_point() {
        let inv = Invariants::default();
        assert_eq!(inv.beta0(), 1);
        assert_eq!(inv.beta1(), 0);
        assert_eq!(inv.beta2(), 0);
    }

    #[test]
    fn apply_deltas_leaves_receiver_untouched() {
        let inv = Invariants::from_betti(1, 0, 0);
        let next = inv.apply_deltas(&Deltas::betti([(BETA1, 2), (BETA0, -1)]));

        assert_eq!(inv, Invariants::from_betti(1, 0, 0));
        assert_eq!(next.beta0(), 0);
        assert_eq!(next.beta1(), 2);
    }

    #[test]
    fn apply_deltas_starts_missing_labels_at_zero() {
        let inv = Invariants {
            betti: BTreeMap::from([(BETA0.to_string(), 3)]),
        };
        let next = inv.apply_deltas(&Deltas::betti([(BETA1, 4)]));
        assert_eq!(next.betti.get(BETA1), Some(&4));
        assert_eq!(next.beta0(), 3);
    }

    #[test]
    fn apply_deltas_saturates_at_bounds() {
        let inv = Invariants::from_betti(i64::MIN + 1, i64::MAX - 1, 0);
        let next = inv.apply_deltas(&Deltas::betti([(BETA0, i64::MIN), (BETA1, i64::MAX)]));
        assert_eq!(next.beta0(), i64::MIN);
        assert_eq!(next.beta1(), i64::MAX);
        assert_eq!(inv.beta1(), i64::MAX - 1);
    }

    #[test]
    fn apply_deltas_ignores_foreign_groups() {
        let inv = Invariants::default();
        let mut deltas = Deltas::new();
        deltas.set("torsion", BETA1, 7);
        assert_eq!(inv.apply_deltas(&deltas), inv);
    }

    #[test]
    fn clone_is_independent() {
        let inv = Invariants::default();
        let mut copy = inv.clone();
        copy.betti.insert(BETA0.to_string(), 9);
        assert_eq!(inv.beta0(), 1);
    }

    #[test]
    fn display_matches_log_format() {
        assert_eq!(
            Invariants::from_betti(1, 1, 0).to_string(),
            "Invariants(betti={β0: 1, β1: 1, β2: 0})"
        );
        assert_eq!(
            Deltas::betti([(BETA1, 1), (BETA0, 0)]).to_string(),
            "{betti: {β0: 0, β1: 1}}"
        );
        assert_eq!(Deltas::new().to_string(), "{}");
    }
}
