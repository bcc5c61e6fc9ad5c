use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, LabelField};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One row of input: a single service's estimate for a single ethnicity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub service: String,
    pub ethnicity: String,
    /// Reported share on the 0..=100 scale. Not range-checked.
    pub percentage: f64,
    /// Service confidence. Used as a weight; not clamped.
    pub rating: f64,
}

impl Observation {
    pub fn new(
        service: impl Into<String>,
        ethnicity: impl Into<String>,
        percentage: f64,
        rating: f64,
    ) -> Self {
        Self {
            service: service.into(),
            ethnicity: ethnicity.into(),
            percentage,
            rating,
        }
    }
}

/// Validated, order-preserving collection of observations for one run.
///
/// Never mutated after construction; every aggregation borrows it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationSet {
    observations: Vec<Observation>,
}

impl ObservationSet {
    /// Build a set, rejecting observations with an empty service or ethnicity.
    pub fn new(observations: Vec<Observation>) -> Result<Self, EngineError> {
        for (index, obs) in observations.iter().enumerate() {
            if obs.service.trim().is_empty() {
                return Err(EngineError::EmptyLabel { index, field: LabelField::Service });
            }
            if obs.ethnicity.trim().is_empty() {
                return Err(EngineError::EmptyLabel { index, field: LabelField::Ethnicity });
            }
        }
        Ok(Self { observations })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.observations.iter()
    }

    pub fn as_slice(&self) -> &[Observation] {
        &self.observations
    }

    /// Distinct ethnicity labels in first-seen order.
    pub fn ethnicities(&self) -> Vec<&str> {
        crate::group::distinct_ethnicities(&self.observations)
    }

    /// Distinct service ids in first-seen order (the canonical processing order).
    pub fn services(&self) -> Vec<&str> {
        crate::group::partition_by_service(&self.observations)
            .into_iter()
            .map(|g| g.service)
            .collect()
    }
}

impl<'a> IntoIterator for &'a ObservationSet {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Ethnicity label → estimate. Ordered by label so output is reproducible.
pub type Estimates = BTreeMap<String, f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    Bayesian,
    Average,
    WeightedAverage,
}

impl Method {
    pub const ALL: [Method; 3] = [Method::Bayesian, Method::Average, Method::WeightedAverage];

    /// Human-readable section heading.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Bayesian => "Bayesian method",
            Self::Average => "Simple average",
            Self::WeightedAverage => "Weighted average",
        }
    }

    /// Belief-update output is a fraction; the averages stay on the
    /// percentage scale.
    pub fn is_fraction(&self) -> bool {
        matches!(self, Self::Bayesian)
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bayesian => write!(f, "bayesian"),
            Self::Average => write!(f, "average"),
            Self::WeightedAverage => write!(f, "weighted_average"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonMeta {
    pub engine_version: String,
    pub run_at: String,
    pub observations: usize,
    pub services: usize,
    pub ethnicities: usize,
}

/// All three estimate maps for one observation set.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub meta: ComparisonMeta,
    pub bayesian: Estimates,
    pub average: Estimates,
    pub weighted_average: Estimates,
}

impl Comparison {
    pub fn estimates(&self, method: Method) -> &Estimates {
        match method {
            Method::Bayesian => &self.bayesian,
            Method::Average => &self.average,
            Method::WeightedAverage => &self.weighted_average,
        }
    }

    /// Ethnicity labels, sorted. Identical across all three maps.
    pub fn ethnicities(&self) -> impl Iterator<Item = &str> {
        self.average.keys().map(|k| k.as_str())
    }
}
