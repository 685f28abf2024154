//! Weight tables and the collaborators that supply them.
//!
//! A weight table maps outcome labels to raw, non-negative numbers such as
//! championship points. Where the numbers come from (a scraper, a file, a
//! test fixture) is behind the [`WeightSource`] trait; the library only
//! ships in-memory and JSON file sources.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::distribution::Distribution;
use crate::error::{SourceError, WeightError};
use crate::outcome::Outcome;

/// Raw weights keyed by outcome label.
///
/// Deserializes from a JSON object; a repeated key is an error rather than
/// silently keeping the last value.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct WeightTable {
    weights: BTreeMap<Outcome, f64>,
}

impl WeightTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a weight for a new outcome.
    ///
    /// # Errors
    ///
    /// Returns `WeightError::DuplicateOutcome` if the outcome is already present.
    pub fn insert(&mut self, outcome: impl Into<Outcome>, weight: f64) -> Result<(), WeightError> {
        let outcome = outcome.into();
        if self.weights.contains_key(&outcome) {
            return Err(WeightError::DuplicateOutcome {
                outcome: outcome.into_string(),
            });
        }
        self.weights.insert(outcome, weight);
        Ok(())
    }

    /// Parses a JSON object of `{"label": weight}` pairs.
    ///
    /// Repeated keys in the document are rejected rather than silently
    /// keeping the last value.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Parse` for malformed JSON or non-numeric weights,
    /// and `SourceError::DuplicateOutcome` for repeated labels.
    pub fn from_json_str(source_name: &str, json: &str) -> Result<Self, SourceError> {
        let pairs: Vec<(String, f64)> = serde_json::from_str::<OrderedPairs>(json)
            .map_err(|e| SourceError::Parse {
                source_name: source_name.to_string(),
                message: e.to_string(),
            })?
            .0;

        let mut table = Self::new();
        for (label, weight) in pairs {
            if table.weights.contains_key(label.as_str()) {
                return Err(SourceError::DuplicateOutcome {
                    source_name: source_name.to_string(),
                    outcome: label,
                });
            }
            table.weights.insert(Outcome::from(label), weight);
        }
        Ok(table)
    }

    /// Reads and parses a JSON weight file.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Io` if the file cannot be read, otherwise see
    /// [`WeightTable::from_json_str`].
    pub fn from_json_file(path: &Path) -> Result<Self, SourceError> {
        let source_name = path.display().to_string();
        let json = fs::read_to_string(path).map_err(|error| SourceError::Io {
            source_name: source_name.clone(),
            error,
        })?;
        Self::from_json_str(&source_name, &json)
    }

    /// Raw weight for a label, if present.
    #[must_use]
    pub fn get(&self, outcome: &str) -> Option<f64> {
        self.weights.get(outcome).copied()
    }

    /// Number of labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether the table has no labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Labels and weights in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&Outcome, f64)> + '_ {
        self.weights.iter().map(|(outcome, w)| (outcome, *w))
    }

    /// Subtracts `gained` from each weight, e.g. to recover standings
    /// before a race from standings after it. Outcomes missing from `gained`
    /// are unchanged; outcomes only in `gained` are ignored.
    ///
    /// Results may be negative; [`Distribution::from_weights`] rejects them.
    #[must_use]
    pub fn difference(&self, gained: &Self) -> Self {
        let weights = self
            .weights
            .iter()
            .map(|(outcome, w)| (outcome.clone(), w - gained.get(outcome.as_str()).unwrap_or(0.0)))
            .collect();
        Self { weights }
    }

    /// Normalizes the table into a distribution.
    ///
    /// # Errors
    ///
    /// See [`Distribution::from_weights`].
    pub fn to_distribution(&self) -> Result<Distribution, WeightError> {
        Distribution::from_weights(self.iter())
    }
}

impl<K: Into<Outcome>> FromIterator<(K, f64)> for WeightTable {
    /// Later entries overwrite earlier ones; use [`WeightTable::insert`] to
    /// reject duplicates.
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            weights: iter.into_iter().map(|(k, w)| (k.into(), w)).collect(),
        }
    }
}

/// A JSON object read as an ordered list of pairs, so repeated keys survive
/// parsing and can be reported.
struct OrderedPairs(Vec<(String, f64)>);

impl<'de> Deserialize<'de> for OrderedPairs {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct PairsVisitor;

        impl<'de> serde::de::Visitor<'de> for PairsVisitor {
            type Value = OrderedPairs;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("an object mapping outcome labels to numeric weights")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((label, weight)) = map.next_entry::<String, f64>()? {
                    pairs.push((label, weight));
                }
                Ok(OrderedPairs(pairs))
            }
        }

        deserializer.deserialize_map(PairsVisitor)
    }
}

impl<'de> Deserialize<'de> for WeightTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let OrderedPairs(pairs) = OrderedPairs::deserialize(deserializer)?;
        let mut table = Self::new();
        for (label, weight) in pairs {
            table.insert(label, weight).map_err(serde::de::Error::custom)?;
        }
        Ok(table)
    }
}

/// A collaborator that produces a weight table.
pub trait WeightSource {
    /// Name of the source (for error messages and logs).
    fn name(&self) -> &str;

    /// Loads the current weights.
    ///
    /// # Errors
    ///
    /// Returns a `SourceError` if the weights cannot be produced.
    fn load(&self) -> Result<WeightTable, SourceError>;
}

/// A source backed by a table held in memory.
#[derive(Debug, Clone)]
pub struct StaticSource {
    name: String,
    table: WeightTable,
}

impl StaticSource {
    /// Creates a source named `name` that always returns `table`.
    #[must_use]
    pub fn new(name: impl Into<String>, table: WeightTable) -> Self {
        Self {
            name: name.into(),
            table,
        }
    }
}

impl WeightSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<WeightTable, SourceError> {
        Ok(self.table.clone())
    }
}

/// A source backed by a JSON file of `{"label": weight}` pairs.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    name: String,
    path: PathBuf,
}

impl JsonFileSource {
    /// Creates a source reading the JSON object at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            name: path.display().to_string(),
            path,
        }
    }
}

impl WeightSource for JsonFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<WeightTable, SourceError> {
        let table = WeightTable::from_json_file(&self.path)?;
        debug!(source = %self.name, outcomes = table.len(), "loaded weight table");
        Ok(table)
    }
}
