//! Discrete probability distributions over named outcomes.
//!
//! A [`Distribution`] is built once from raw, non-negative weights and is
//! never mutated afterwards. Filtering and joining always produce a new
//! distribution.

use std::borrow::Borrow;
use std::collections::btree_map::{self, BTreeMap, Entry};
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::{QueryError, WeightError};
use crate::outcome::Outcome;

/// A mapping from outcome to probability.
///
/// Values produced by [`Distribution::from_weights`] sum to 1.0 within
/// floating-point tolerance. A sub-distribution produced by
/// [`Distribution::such_that`] keeps the original masses of the retained
/// outcomes and therefore sums to the selected event's probability.
///
/// # Examples
///
/// ```
/// use probdist::Distribution;
///
/// let dist = Distribution::from_weights([("M", 50.0), ("F", 40.0), ("R", 30.0)]).unwrap();
/// assert!((dist.get("R") - 0.25).abs() < 1e-9);
/// assert_eq!(dist.get("unknown"), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Distribution {
    probs: BTreeMap<Outcome, f64>,
}

impl Distribution {
    /// Normalizes a weight table into a distribution.
    ///
    /// Every outcome receives `weight / total_weight`. Zero weights are kept
    /// as zero-probability outcomes.
    ///
    /// # Errors
    ///
    /// - `WeightError::NonFinite` if a weight is NaN or infinite.
    /// - `WeightError::NegativeWeight` if a weight is negative.
    /// - `WeightError::DuplicateOutcome` if a label appears twice.
    /// - `WeightError::ZeroTotal` if the table is empty or all weights are zero.
    pub fn from_weights<I, K, W>(weights: I) -> Result<Self, WeightError>
    where
        I: IntoIterator<Item = (K, W)>,
        K: Into<Outcome>,
        W: Borrow<f64>,
    {
        let mut raw: BTreeMap<Outcome, f64> = BTreeMap::new();
        for (label, weight) in weights {
            let outcome = label.into();
            let weight = *weight.borrow();
            if !weight.is_finite() {
                return Err(WeightError::NonFinite {
                    outcome: outcome.into_string(),
                    weight,
                });
            }
            if weight < 0.0 {
                return Err(WeightError::NegativeWeight {
                    outcome: outcome.into_string(),
                    weight,
                });
            }
            // -0.0 becomes 0.0
            let weight = weight + 0.0;
            match raw.entry(outcome) {
                Entry::Vacant(slot) => {
                    slot.insert(weight);
                }
                Entry::Occupied(slot) => {
                    return Err(WeightError::DuplicateOutcome {
                        outcome: slot.key().to_string(),
                    });
                }
            }
        }

        let mut total: f64 = raw.values().sum();
        if total.is_infinite() {
            // Individually finite weights can still overflow the sum.
            let max = raw.values().copied().fold(0.0_f64, f64::max);
            for weight in raw.values_mut() {
                *weight /= max;
            }
            total = raw.values().sum();
        }
        if total <= 0.0 {
            return Err(WeightError::ZeroTotal {
                total,
                outcomes: raw.len(),
            });
        }

        let mut probs = BTreeMap::new();
        for (outcome, weight) in raw {
            let probability = weight / total;
            if probability.is_nan() || probability < 0.0 {
                return Err(WeightError::NegativeProbability {
                    outcome: outcome.into_string(),
                    probability,
                });
            }
            probs.insert(outcome, probability);
        }

        debug!(outcomes = probs.len(), total, "normalized weight table");
        Ok(Self { probs })
    }

    /// Builds a distribution from masses that are already valid
    /// probabilities, without renormalizing.
    pub(crate) fn from_masses(probs: BTreeMap<Outcome, f64>) -> Self {
        Self { probs }
    }

    /// Probability of a single outcome. Absent outcomes have probability 0.
    #[must_use]
    pub fn get(&self, outcome: &str) -> f64 {
        self.probs.get(outcome).copied().unwrap_or(0.0)
    }

    /// Probability of a single outcome that must be part of this distribution.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::MissingOutcome` if the outcome is absent.
    pub fn try_get(&self, outcome: &str) -> Result<f64, QueryError> {
        self.probs
            .get(outcome)
            .copied()
            .ok_or_else(|| QueryError::MissingOutcome {
                outcome: outcome.to_string(),
            })
    }

    /// Whether the outcome is in the support (zero-mass outcomes count).
    #[must_use]
    pub fn contains(&self, outcome: &str) -> bool {
        self.probs.contains_key(outcome)
    }

    /// Number of outcomes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.probs.len()
    }

    /// Whether the distribution has no outcomes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }

    /// Iterates over `(outcome, probability)` pairs in label order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.probs.iter(),
        }
    }

    /// Iterates over the outcomes in label order.
    pub fn outcomes(&self) -> impl Iterator<Item = &Outcome> + '_ {
        self.probs.keys()
    }

    /// Sum of all probabilities held by this distribution.
    #[must_use]
    pub fn total_mass(&self) -> f64 {
        self.probs.values().sum()
    }

    /// Returns true if the masses sum to 1.0 within `tolerance`.
    #[must_use]
    pub fn is_normalized(&self, tolerance: f64) -> bool {
        (self.total_mass() - 1.0).abs() <= tolerance
    }

    /// The restriction of this distribution to outcomes matching `predicate`.
    ///
    /// Retained outcomes keep their original masses; nothing is renormalized.
    /// No match yields an empty distribution.
    #[must_use]
    pub fn such_that<F>(&self, predicate: F) -> Self
    where
        F: Fn(&Outcome) -> bool,
    {
        let probs = self
            .probs
            .iter()
            .filter(|(outcome, _)| predicate(*outcome))
            .map(|(outcome, p)| (outcome.clone(), *p))
            .collect();
        Self { probs }
    }

    /// Rescales the masses so they sum to 1.0.
    ///
    /// On a filtered sub-distribution this yields the conditional
    /// distribution given the filtering event.
    ///
    /// # Errors
    ///
    /// Returns `WeightError::ZeroTotal` if the distribution is empty or has
    /// zero total mass.
    pub fn normalized(&self) -> Result<Self, WeightError> {
        Self::from_weights(self.iter())
    }

    /// The outcome with the highest probability. Ties go to the first label.
    #[must_use]
    pub fn most_likely(&self) -> Option<(&Outcome, f64)> {
        self.iter().fold(None, |best, (outcome, p)| match best {
            Some((_, best_p)) if best_p >= p => best,
            _ => Some((outcome, p)),
        })
    }
}

/// Iterator over the `(outcome, probability)` pairs of a [`Distribution`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, Outcome, f64>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a Outcome, f64);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(outcome, p)| (outcome, *p))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Distribution {
    type Item = (&'a Outcome, f64);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (idx, (outcome, p)) in self.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{outcome}: {p}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    const TOL: f64 = 1e-9;

    fn standings() -> Distribution {
        Distribution::from_weights([("M", 50.0), ("F", 40.0), ("R", 30.0)]).unwrap()
    }

    #[test]
    fn test_from_weights_normalizes() {
        let dist = standings();
        assert!((dist.get("M") - 50.0 / 120.0).abs() < TOL);
        assert!((dist.get("F") - 40.0 / 120.0).abs() < TOL);
        assert!((dist.get("R") - 0.25).abs() < TOL);
        assert!(dist.is_normalized(TOL));
    }

    #[test]
    fn test_from_weights_accepts_hash_map_by_reference() {
        let mut weights = HashMap::new();
        weights.insert("Mercedes".to_string(), 3.0);
        weights.insert("Ferrari".to_string(), 1.0);
        let dist = Distribution::from_weights(&weights).unwrap();
        assert!((dist.get("Mercedes") - 0.75).abs() < TOL);
        assert_eq!(weights.len(), 2);
        assert!((weights["Mercedes"] - 3.0).abs() < TOL);
    }

    #[test]
    fn test_from_weights_empty_fails() {
        let empty: Vec<(&str, f64)> = Vec::new();
        let err = Distribution::from_weights(empty).unwrap_err();
        assert!(matches!(err, WeightError::ZeroTotal { outcomes: 0, .. }));
    }

    #[test]
    fn test_from_weights_all_zero_fails() {
        let err = Distribution::from_weights([("a", 0.0), ("b", 0.0)]).unwrap_err();
        assert!(matches!(err, WeightError::ZeroTotal { outcomes: 2, .. }));
    }

    #[test]
    fn test_from_weights_negative_fails() {
        let err = Distribution::from_weights([("a", -1.0), ("b", 2.0)]).unwrap_err();
        assert_eq!(
            err,
            WeightError::NegativeWeight {
                outcome: "a".to_string(),
                weight: -1.0,
            }
        );
    }

    #[test]
    fn test_from_weights_nan_fails() {
        let err = Distribution::from_weights([("a", f64::NAN)]).unwrap_err();
        assert!(matches!(err, WeightError::NonFinite { .. }));
    }

    #[test]
    fn test_from_weights_duplicate_fails() {
        let err = Distribution::from_weights([("a", 1.0), ("a", 2.0)]).unwrap_err();
        assert!(matches!(err, WeightError::DuplicateOutcome { outcome } if outcome == "a"));
    }

    #[test]
    fn test_from_weights_overflowing_total() {
        let dist = Distribution::from_weights([("a", f64::MAX), ("b", f64::MAX)]).unwrap();
        assert!((dist.get("a") - 0.5).abs() < TOL);
        assert!(dist.is_normalized(TOL));
    }

    #[test]
    fn test_zero_weight_outcome_is_kept() {
        let dist = Distribution::from_weights([("Racing Point", 0.0), ("Haas", 4.0)]).unwrap();
        assert_eq!(dist.len(), 2);
        assert!(dist.contains("Racing Point"));
        assert_eq!(dist.get("Racing Point"), 0.0);
    }

    #[test]
    fn test_try_get_missing() {
        let dist = standings();
        assert!(dist.try_get("M").is_ok());
        assert_eq!(
            dist.try_get("X"),
            Err(QueryError::MissingOutcome {
                outcome: "X".to_string()
            })
        );
    }

    #[test]
    fn test_such_that_keeps_original_masses() {
        let dist = standings();
        let sub = dist.such_that(|o| o.as_str() != "R");
        assert_eq!(sub.len(), 2);
        assert!((sub.get("M") - dist.get("M")).abs() < TOL);
        assert!((sub.total_mass() - 0.75).abs() < TOL);
        assert!(!sub.is_normalized(TOL));
    }

    #[test]
    fn test_such_that_no_match_is_empty() {
        let sub = standings().such_that(|_| false);
        assert!(sub.is_empty());
        assert_eq!(sub.total_mass(), 0.0);
    }

    #[test]
    fn test_normalized_gives_conditional() {
        let sub = standings().such_that(|o| o.as_str() != "R");
        let cond = sub.normalized().unwrap();
        assert!((cond.get("M") - 5.0 / 9.0).abs() < TOL);
        assert!(cond.is_normalized(TOL));
    }

    #[test]
    fn test_normalized_is_idempotent() {
        let dist = standings();
        let again = dist.normalized().unwrap();
        for (outcome, p) in &dist {
            assert!((again.get(outcome.as_str()) - p).abs() < TOL);
        }
    }

    #[test]
    fn test_normalized_empty_fails() {
        let empty = standings().such_that(|_| false);
        assert!(empty.normalized().is_err());
    }

    #[test]
    fn test_most_likely() {
        let dist = standings();
        let (outcome, p) = dist.most_likely().unwrap();
        assert_eq!(outcome.as_str(), "M");
        assert!((p - 50.0 / 120.0).abs() < TOL);
        assert!(Distribution::default().most_likely().is_none());
    }

    #[test]
    fn test_most_likely_tie_goes_to_first_label() {
        let dist = Distribution::from_weights([("b", 1.0), ("a", 1.0)]).unwrap();
        assert_eq!(dist.most_likely().unwrap().0.as_str(), "a");
    }

    #[test]
    fn test_display_in_label_order() {
        let dist = Distribution::from_weights([("b", 1.0), ("a", 3.0)]).unwrap();
        assert_eq!(dist.to_string(), "{a: 0.75, b: 0.25}");
    }

    #[test]
    fn test_negative_zero_weight_is_plain_zero() {
        let dist = Distribution::from_weights([("a", -0.0), ("b", 1.0)]).unwrap();
        assert_eq!(dist.to_string(), "{a: 0, b: 1}");
        assert!(dist.get("a").is_sign_positive());
    }

    #[test]
    fn test_serializes_as_object() {
        let dist = Distribution::from_weights([("H", 1.0), ("T", 1.0)]).unwrap();
        let json = serde_json::to_string(&dist).unwrap();
        assert_eq!(json, r#"{"H":0.5,"T":0.5}"#);
    }
}
