//! Joint composition of independent distributions.
//!
//! The joint of `A` and `B` assigns `A[a] * B[b]` to the concatenated label
//! `a + sep + b`. Distinct pairs that concatenate to the same label (for
//! example `"ab" + "c"` and `"a" + "bc"` with an empty separator) have their
//! probabilities summed into that single label.

use std::collections::btree_map::{BTreeMap, Entry};

use tracing::{debug, warn};

use crate::distribution::Distribution;
use crate::error::QueryError;
use crate::outcome::Outcome;

/// The joint distribution of two independent distributions.
///
/// # Examples
///
/// ```
/// use probdist::{joint, Distribution};
///
/// let coin = Distribution::from_weights([("H", 1.0), ("T", 1.0)]).unwrap();
/// let two = joint(&coin, &coin, "");
/// assert_eq!(two.len(), 4);
/// assert!((two.get("HT") - 0.25).abs() < 1e-12);
/// ```
#[must_use]
pub fn joint(a: &Distribution, b: &Distribution, sep: &str) -> Distribution {
    let mut probs: BTreeMap<Outcome, f64> = BTreeMap::new();
    let mut collisions = 0usize;

    for (left, pa) in a {
        for (right, pb) in b {
            match probs.entry(left.concat(sep, right)) {
                Entry::Vacant(slot) => {
                    slot.insert(pa * pb);
                }
                Entry::Occupied(mut slot) => {
                    collisions += 1;
                    *slot.get_mut() += pa * pb;
                }
            }
        }
    }

    if collisions > 0 {
        warn!(
            collisions,
            separator = sep,
            "joint labels collided; probabilities were summed"
        );
    }
    debug!(left = a.len(), right = b.len(), outcomes = probs.len(), "built joint distribution");
    Distribution::from_masses(probs)
}

/// Folds several independent distributions into one joint, left to right.
///
/// ```
/// use probdist::{Distribution, JointBuilder};
///
/// let team = Distribution::from_weights([("Mercedes", 3.0), ("Ferrari", 1.0)]).unwrap();
/// let weather = Distribution::from_weights([("Rain", 1.0), ("Sun", 1.0)]).unwrap();
/// let both = JointBuilder::new(" ").with(&team).with(&weather).build().unwrap();
/// assert!((both.get("Mercedes Rain") - 0.375).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct JointBuilder {
    sep: String,
    acc: Option<Distribution>,
}

impl JointBuilder {
    /// Creates a builder joining labels with `sep`.
    #[must_use]
    pub fn new(sep: impl Into<String>) -> Self {
        Self {
            sep: sep.into(),
            acc: None,
        }
    }

    /// Adds the next independent factor.
    #[must_use]
    pub fn with(mut self, next: &Distribution) -> Self {
        self.acc = Some(match self.acc.take() {
            None => next.clone(),
            Some(acc) => joint(&acc, next, &self.sep),
        });
        self
    }

    /// Returns the joint, or `None` if no factor was added.
    #[must_use]
    pub fn build(self) -> Option<Distribution> {
        self.acc
    }
}

/// Probability that `outcome` occurs in both of two independent draws.
#[must_use]
pub fn both(a: &Distribution, b: &Distribution, outcome: &str) -> f64 {
    a.get(outcome) * b.get(outcome)
}

/// Probability that `outcome` occurs in at least one of two independent draws.
#[must_use]
pub fn at_least_one(a: &Distribution, b: &Distribution, outcome: &str) -> f64 {
    let (pa, pb) = (a.get(outcome), b.get(outcome));
    pa + pb - pa * pb
}

/// Probability that `outcome` occurs in both draws, given that it occurs in
/// at least one.
///
/// # Errors
///
/// Returns `QueryError::ZeroProbabilityCondition` if `outcome` has
/// probability 0 in both distributions.
pub fn both_given_at_least_one(
    a: &Distribution,
    b: &Distribution,
    outcome: &str,
) -> Result<f64, QueryError> {
    let given = at_least_one(a, b, outcome);
    if given <= 0.0 {
        return Err(QueryError::ZeroProbabilityCondition);
    }
    Ok(both(a, b, outcome) / given)
}
