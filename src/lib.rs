//! # probdist - Discrete probability over named outcomes
//!
//! probdist models discrete probability distributions whose outcomes are
//! labels (drivers, teams, weather), and answers questions about them.
//!
//! ## Core Concepts
//!
//! - **Distribution**: normalized, immutable mapping from outcome to probability
//! - **SampleSpace**: a distribution, or a plain set of equally likely outcomes
//! - **Event**: a literal set of outcomes, or a predicate over outcomes
//! - **Joint**: product distribution of independent distributions over
//!   concatenated labels
//!
//! ## Usage
//!
//! ```rust
//! use probdist::{joint, p, Distribution, Event, SampleSpace};
//!
//! let standings = Distribution::from_weights([("M", 50.0), ("F", 40.0), ("R", 30.0)])?;
//! let space = SampleSpace::from(standings.clone());
//! let front = p(&Event::of(["M", "F"]), &space)?;
//! assert!((front.value() - 0.75).abs() < 1e-9);
//!
//! let two_races = joint(&standings, &standings, " ");
//! assert!((two_races.get("M M") - (50.0_f64 / 120.0).powi(2)).abs() < 1e-9);
//! # Ok::<(), probdist::ProbError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod distribution;
pub mod error;
pub mod format;
pub mod fraction;
pub mod joint;
pub mod outcome;
pub mod source;
pub mod space;

// Re-export primary types at crate root for convenience
pub use config::ProbConfig;
pub use distribution::Distribution;
pub use error::{ProbError, ProbResult, QueryError, SourceError, WeightError};
pub use format::{percent, Percent};
pub use fraction::Fraction;
pub use joint::{at_least_one, both, both_given_at_least_one, joint, JointBuilder};
pub use outcome::Outcome;
pub use source::{JsonFileSource, StaticSource, WeightSource, WeightTable};
pub use space::{conditional, p, such_that, Event, Probability, SampleSpace, UniformSpace};
