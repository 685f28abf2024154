//! Outcome labels.
//!
//! An outcome is an opaque label such as a driver or team name. The only
//! structure assumed is equality, ordering, and concatenation for joint
//! outcomes.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// An elementary result in a sample space.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Outcome(String);

impl Outcome {
    /// Creates an outcome from a label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Returns the label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Builds the joint label `self + sep + other`.
    #[must_use]
    pub fn concat(&self, sep: &str, other: &Self) -> Self {
        let mut label = String::with_capacity(self.0.len() + sep.len() + other.0.len());
        label.push_str(&self.0);
        label.push_str(sep);
        label.push_str(&other.0);
        Self(label)
    }

    /// Returns true if the label contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.0.contains(needle)
    }

    /// Consumes the outcome and returns its label.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&str> for Outcome {
    fn from(label: &str) -> Self {
        Self(label.to_string())
    }
}

impl From<String> for Outcome {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl From<&String> for Outcome {
    fn from(label: &String) -> Self {
        Self(label.clone())
    }
}

impl From<&Outcome> for Outcome {
    fn from(outcome: &Outcome) -> Self {
        outcome.clone()
    }
}

impl Borrow<str> for Outcome {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Outcome {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
