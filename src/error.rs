//! Error types for probdist.
//!
//! All errors are strongly typed using thiserror so callers can match on
//! the exact failure instead of receiving a silently wrong probability.

use thiserror::Error;

/// Errors raised while building a distribution from raw weights.
///
/// A distribution is never partially constructed: any of these aborts
/// construction entirely.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeightError {
    #[error("Outcome '{outcome}' appears more than once in the weight table")]
    DuplicateOutcome {
        outcome: String,
    },

    #[error("Weight for outcome '{outcome}' is not finite: {weight}")]
    NonFinite {
        outcome: String,
        weight: f64,
    },

    #[error("Weight for outcome '{outcome}' is negative: {weight}")]
    NegativeWeight {
        outcome: String,
        weight: f64,
    },

    #[error("Outcome '{outcome}' normalized to a negative probability: {probability}")]
    NegativeProbability {
        outcome: String,
        probability: f64,
    },

    #[error("Total weight is {total} across {outcomes} outcomes; cannot normalize")]
    ZeroTotal {
        total: f64,
        outcomes: usize,
    },
}

/// Errors raised by probability queries.
///
/// These are local to one query; the queried distribution stays valid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error("Sample space is empty")]
    EmptySpace,

    #[error("Outcome '{outcome}' is not part of the sample space")]
    MissingOutcome {
        outcome: String,
    },

    #[error("Conditioning event has zero probability")]
    ZeroProbabilityCondition,

    #[error("Invalid outcome pattern '{pattern}': {reason}")]
    InvalidPattern {
        pattern: String,
        reason: String,
    },
}

/// Errors raised while loading weight tables from a collaborator.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read weight source '{source_name}': {error}")]
    Io {
        source_name: String,
        #[source]
        error: std::io::Error,
    },

    #[error("Failed to parse weight source '{source_name}': {message}")]
    Parse {
        source_name: String,
        message: String,
    },

    #[error("Weight source '{source_name}' lists outcome '{outcome}' twice")]
    DuplicateOutcome {
        source_name: String,
        outcome: String,
    },
}

/// Top-level error type for probdist.
#[derive(Debug, Error)]
pub enum ProbError {
    #[error("Invalid weight: {0}")]
    Weight(#[from] WeightError),

    #[error("Invalid argument: {0}")]
    Query(#[from] QueryError),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

impl ProbError {
    /// Returns true if this is a construction-time weight error.
    #[must_use]
    pub const fn is_weight(&self) -> bool {
        matches!(self, Self::Weight(_))
    }

    /// Returns true if this is a query-time error.
    #[must_use]
    pub const fn is_query(&self) -> bool {
        matches!(self, Self::Query(_))
    }

    /// Returns true if this is a collaborator loading error.
    #[must_use]
    pub const fn is_source(&self) -> bool {
        matches!(self, Self::Source(_))
    }
}

/// Result type alias for probdist operations.
pub type ProbResult<T> = Result<T, ProbError>;
