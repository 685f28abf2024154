//! Sample spaces, events, and probability queries.
//!
//! A sample space is either weighted (a [`Distribution`]) or a plain set of
//! equally likely outcomes ([`UniformSpace`]). Events are either a literal
//! set of outcomes or a predicate over outcomes; predicates are resolved
//! against the space before any mass is computed.

use std::collections::BTreeSet;
use std::fmt;

use regex::Regex;
use serde::Serialize;
use tracing::trace;

use crate::distribution::Distribution;
use crate::error::QueryError;
use crate::fraction::Fraction;
use crate::outcome::Outcome;

/// A finite set of equally likely outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct UniformSpace {
    outcomes: BTreeSet<Outcome>,
}

impl UniformSpace {
    /// Creates a space from outcome labels. Repeated labels collapse.
    pub fn new<I, K>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<Outcome>,
    {
        Self {
            outcomes: outcomes.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of outcomes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether the space has no outcomes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Whether the outcome belongs to the space.
    #[must_use]
    pub fn contains(&self, outcome: &str) -> bool {
        self.outcomes.contains(outcome)
    }

    /// Outcomes in label order.
    pub fn iter(&self) -> impl Iterator<Item = &Outcome> + '_ {
        self.outcomes.iter()
    }

    /// The subset of outcomes matching `predicate`.
    #[must_use]
    pub fn such_that<F>(&self, predicate: F) -> Self
    where
        F: Fn(&Outcome) -> bool,
    {
        Self {
            outcomes: self.outcomes.iter().filter(|&o| predicate(o)).cloned().collect(),
        }
    }
}

impl<K: Into<Outcome>> FromIterator<K> for UniformSpace {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// A sample space: weighted outcomes or equally likely outcomes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "outcomes", rename_all = "snake_case")]
pub enum SampleSpace {
    /// Outcomes with explicit probabilities.
    Weighted(Distribution),
    /// Equally likely outcomes.
    Uniform(UniformSpace),
}

impl SampleSpace {
    /// Number of outcomes, whatever the kind of space.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Weighted(dist) => dist.len(),
            Self::Uniform(set) => set.len(),
        }
    }

    /// Whether the space has no outcomes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the outcome belongs to the space.
    #[must_use]
    pub fn contains(&self, outcome: &str) -> bool {
        match self {
            Self::Weighted(dist) => dist.contains(outcome),
            Self::Uniform(set) => set.contains(outcome),
        }
    }

    /// Iterates over every outcome of the space.
    pub fn outcomes(&self) -> Box<dyn Iterator<Item = &Outcome> + '_> {
        match self {
            Self::Weighted(dist) => Box::new(dist.outcomes()),
            Self::Uniform(set) => Box::new(set.iter()),
        }
    }

    /// Returns a short stable identifier suitable for logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Weighted(_) => "weighted",
            Self::Uniform(_) => "uniform",
        }
    }
}

impl From<Distribution> for SampleSpace {
    fn from(dist: Distribution) -> Self {
        Self::Weighted(dist)
    }
}

impl From<UniformSpace> for SampleSpace {
    fn from(set: UniformSpace) -> Self {
        Self::Uniform(set)
    }
}

/// The restriction of `space` to outcomes matching `predicate`.
///
/// The kind of space is preserved: a weighted space yields a sub-distribution
/// holding the original masses, a uniform space yields a subset.
#[must_use]
pub fn such_that<F>(predicate: F, space: &SampleSpace) -> SampleSpace
where
    F: Fn(&Outcome) -> bool,
{
    match space {
        SampleSpace::Weighted(dist) => SampleSpace::Weighted(dist.such_that(predicate)),
        SampleSpace::Uniform(set) => SampleSpace::Uniform(set.such_that(predicate)),
    }
}

/// An event: a literal set of outcomes, or a predicate over outcomes.
pub enum Event<'a> {
    /// A concrete collection of outcomes.
    Literal(BTreeSet<Outcome>),
    /// Outcomes for which the predicate holds.
    Predicate(Box<dyn Fn(&Outcome) -> bool + 'a>),
}

impl<'a> Event<'a> {
    /// A literal event from outcome labels.
    pub fn of<I, K>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<Outcome>,
    {
        Self::Literal(outcomes.into_iter().map(Into::into).collect())
    }

    /// A predicate event.
    pub fn matching<F>(predicate: F) -> Self
    where
        F: Fn(&Outcome) -> bool + 'a,
    {
        Self::Predicate(Box::new(predicate))
    }

    /// Outcomes whose label contains `needle`.
    pub fn containing(needle: impl Into<String>) -> Self {
        let needle = needle.into();
        Self::matching(move |o| o.contains(&needle))
    }

    /// Outcomes whose label matches the regular expression `pattern`.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::InvalidPattern` if `pattern` does not compile.
    pub fn pattern(pattern: &str) -> Result<Self, QueryError> {
        let re = Regex::new(pattern).map_err(|e| QueryError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::matching(move |o| re.is_match(o.as_str())))
    }

    /// Resolves the event to the concrete outcomes it selects from `space`.
    ///
    /// Literal events are returned as given, including outcomes absent from
    /// the space.
    #[must_use]
    pub fn resolve(&self, space: &SampleSpace) -> BTreeSet<Outcome> {
        match self {
            Self::Literal(outcomes) => outcomes.clone(),
            Self::Predicate(predicate) => {
                let matched = such_that(|o| predicate(o), space);
                let outcomes = matched.outcomes().cloned().collect();
                outcomes
            }
        }
    }

    /// Returns true if `outcome` belongs to this event.
    #[must_use]
    pub fn includes(&self, outcome: &Outcome) -> bool {
        match self {
            Self::Literal(outcomes) => outcomes.contains(outcome),
            Self::Predicate(predicate) => predicate(outcome),
        }
    }
}

impl fmt::Debug for Event<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(outcomes) => f.debug_tuple("Literal").field(outcomes).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl<K: Into<Outcome>> FromIterator<K> for Event<'_> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self::of(iter)
    }
}

/// The result of a probability query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Probability {
    /// Exact ratio over an equiprobable space.
    Exact(Fraction),
    /// Summed probability mass over a weighted space.
    Approx(f64),
}

impl Probability {
    /// The probability as a float.
    #[must_use]
    pub fn value(&self) -> f64 {
        match self {
            Self::Exact(fraction) => fraction.to_f64(),
            Self::Approx(value) => *value,
        }
    }

    /// The exact ratio, if this probability came from a uniform space.
    #[must_use]
    pub const fn exact(&self) -> Option<Fraction> {
        match self {
            Self::Exact(fraction) => Some(*fraction),
            Self::Approx(_) => None,
        }
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(fraction) => write!(f, "{fraction}"),
            Self::Approx(value) => write!(f, "{value}"),
        }
    }
}

/// The probability of `event` in `space`.
///
/// Outcomes of a literal event that are not part of the space contribute 0.
///
/// # Errors
///
/// Returns `QueryError::EmptySpace` if `space` has no outcomes.
///
/// # Examples
///
/// ```
/// use probdist::{p, Event, Fraction, SampleSpace, UniformSpace};
///
/// let space = SampleSpace::from(UniformSpace::new(["a", "b", "c", "d"]));
/// let prob = p(&Event::of(["a", "b"]), &space).unwrap();
/// assert_eq!(prob.exact(), Fraction::new(1, 2));
/// ```
pub fn p(event: &Event<'_>, space: &SampleSpace) -> Result<Probability, QueryError> {
    if space.is_empty() {
        return Err(QueryError::EmptySpace);
    }
    let selected = event.resolve(space);
    trace!(space = space.kind(), selected = selected.len(), "resolved event");
    Ok(mass(&selected, space))
}

fn mass(selected: &BTreeSet<Outcome>, space: &SampleSpace) -> Probability {
    match space {
        SampleSpace::Weighted(dist) => {
            Probability::Approx(selected.iter().map(|o| dist.get(o.as_str())).sum())
        }
        SampleSpace::Uniform(set) => {
            let favourable = selected.iter().filter(|o| set.contains(o.as_str())).count();
            // Non-empty space checked by the caller.
            Probability::Exact(Fraction::ratio(favourable, set.len()).unwrap_or(Fraction::ZERO))
        }
    }
}

/// The conditional probability `P(event | given)` in `space`.
///
/// # Errors
///
/// - `QueryError::EmptySpace` if `space` has no outcomes.
/// - `QueryError::ZeroProbabilityCondition` if `given` has probability 0.
pub fn conditional(
    event: &Event<'_>,
    given: &Event<'_>,
    space: &SampleSpace,
) -> Result<Probability, QueryError> {
    if space.is_empty() {
        return Err(QueryError::EmptySpace);
    }
    let given_set = given.resolve(space);
    let both: BTreeSet<Outcome> = event
        .resolve(space)
        .into_iter()
        .filter(|o| given_set.contains(o))
        .collect();

    match (mass(&both, space), mass(&given_set, space)) {
        (Probability::Exact(num), Probability::Exact(den)) => num
            .checked_div(&den)
            .map(Probability::Exact)
            .ok_or(QueryError::ZeroProbabilityCondition),
        (num, den) => {
            let den = den.value();
            if den <= 0.0 {
                return Err(QueryError::ZeroProbabilityCondition);
            }
            Ok(Probability::Approx(num.value() / den))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn standings() -> SampleSpace {
        Distribution::from_weights([("M", 50.0), ("F", 40.0), ("R", 30.0)])
            .unwrap()
            .into()
    }

    fn cards() -> SampleSpace {
        UniformSpace::new(["a", "b", "c", "d"]).into()
    }

    #[test]
    fn test_p_literal_on_distribution() {
        let prob = p(&Event::of(["M", "F"]), &standings()).unwrap();
        assert!((prob.value() - 0.75).abs() < TOL);
        assert!(prob.exact().is_none());
    }

    #[test]
    fn test_p_universal_event_is_one() {
        let space = standings();
        let all: Event = space.outcomes().cloned().collect();
        assert!((p(&all, &space).unwrap().value() - 1.0).abs() < TOL);
    }

    #[test]
    fn test_p_missing_outcome_contributes_zero() {
        let prob = p(&Event::of(["M", "Williams"]), &standings()).unwrap();
        assert!((prob.value() - 50.0 / 120.0).abs() < TOL);
    }

    #[test]
    fn test_p_predicate_with_no_match_is_zero() {
        let prob = p(&Event::matching(|_| false), &standings()).unwrap();
        assert_eq!(prob.value(), 0.0);
    }

    #[test]
    fn test_p_uniform_is_exact() {
        let prob = p(&Event::of(["a", "b"]), &cards()).unwrap();
        assert_eq!(prob, Probability::Exact(Fraction::new(1, 2).unwrap()));
        assert_eq!(prob.to_string(), "1/2");
    }

    #[test]
    fn test_p_uniform_ignores_outsiders() {
        let prob = p(&Event::of(["a", "z"]), &cards()).unwrap();
        assert_eq!(prob.exact(), Fraction::new(1, 4));
    }

    #[test]
    fn test_p_uniform_predicate() {
        let prob = p(&Event::matching(|o| o.as_str() < "c"), &cards()).unwrap();
        assert_eq!(prob.exact(), Fraction::new(1, 2));
    }

    #[test]
    fn test_p_empty_space_fails() {
        let empty = SampleSpace::from(UniformSpace::default());
        assert_eq!(p(&Event::of(["a"]), &empty), Err(QueryError::EmptySpace));

        let empty_dist = SampleSpace::from(Distribution::default());
        assert_eq!(p(&Event::of(["a"]), &empty_dist), Err(QueryError::EmptySpace));
    }

    #[test]
    fn test_such_that_preserves_kind() {
        let sub = such_that(|o| o.as_str() == "M", &standings());
        assert!(matches!(sub, SampleSpace::Weighted(ref d) if d.len() == 1));

        let subset = such_that(|o| o.as_str() == "a", &cards());
        assert_eq!(subset, SampleSpace::Uniform(UniformSpace::new(["a"])));
    }

    #[test]
    fn test_such_that_empty_match() {
        assert!(such_that(|_| false, &standings()).is_empty());
        assert!(such_that(|_| false, &cards()).is_empty());
    }

    #[test]
    fn test_event_containing() {
        let space: SampleSpace = UniformSpace::new(["Mercedes Rain", "Mercedes Sun", "Haas Rain"]).into();
        let prob = p(&Event::containing("Rain"), &space).unwrap();
        assert_eq!(prob.exact(), Fraction::new(2, 3));
    }

    #[test]
    fn test_event_pattern() {
        let event = Event::pattern("^Mercedes").unwrap();
        assert!(event.includes(&Outcome::from("Mercedes Ferrari")));
        assert!(!event.includes(&Outcome::from("Ferrari Mercedes")));
    }

    #[test]
    fn test_event_pattern_invalid() {
        let err = Event::pattern("(unclosed").unwrap_err();
        assert!(matches!(err, QueryError::InvalidPattern { .. }));
    }

    #[test]
    fn test_conditional_weighted() {
        let space = standings();
        let prob = conditional(&Event::of(["M"]), &Event::of(["M", "F"]), &space).unwrap();
        assert!((prob.value() - 5.0 / 9.0).abs() < TOL);
    }

    #[test]
    fn test_conditional_uniform_is_exact() {
        let prob = conditional(&Event::of(["a"]), &Event::of(["a", "b", "c"]), &cards()).unwrap();
        assert_eq!(prob.exact(), Fraction::new(1, 3));
    }

    #[test]
    fn test_conditional_zero_condition_fails() {
        let err = conditional(&Event::of(["M"]), &Event::of(["X"]), &standings()).unwrap_err();
        assert_eq!(err, QueryError::ZeroProbabilityCondition);

        let err = conditional(&Event::of(["a"]), &Event::of(["z"]), &cards()).unwrap_err();
        assert_eq!(err, QueryError::ZeroProbabilityCondition);
    }

    #[test]
    fn test_event_debug_hides_closure() {
        let event = Event::matching(|_| true);
        assert_eq!(format!("{event:?}"), "Predicate(..)");
    }
}
