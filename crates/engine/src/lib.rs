//! `dnacompare-engine`: consolidates per-service ethnicity estimates.
//!
//! Pure engine crate: receives a pre-loaded [`ObservationSet`], returns one
//! estimate per ethnicity for each aggregation method. No file or console IO.

pub mod average;
pub mod bayes;
pub mod compare;
pub mod error;
pub mod group;
pub mod model;
pub mod weighted;

pub use average::simple_average;
pub use bayes::bayesian_update;
pub use compare::compare;
pub use error::{EngineError, LabelField};
pub use model::{Comparison, ComparisonMeta, Estimates, Method, Observation, ObservationSet};
pub use weighted::weighted_average;
