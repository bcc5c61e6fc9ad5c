use crate::average::simple_average;
use crate::bayes::bayesian_update;
use crate::error::EngineError;
use crate::model::{Comparison, ComparisonMeta, ObservationSet};
use crate::weighted::weighted_average;

/// Run all three methods over one observation set.
///
/// The methods are independent; the belief update is the only one that can
/// fail, and its error is returned unchanged.
pub fn compare(set: &ObservationSet) -> Result<Comparison, EngineError> {
    let bayesian = bayesian_update(set)?;
    let average = simple_average(set);
    let weighted_average = weighted_average(set);

    let meta = ComparisonMeta {
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        run_at: chrono::Utc::now().to_rfc3339(),
        observations: set.len(),
        services: set.services().len(),
        ethnicities: average.len(),
    };

    tracing::debug!(
        observations = meta.observations,
        services = meta.services,
        ethnicities = meta.ethnicities,
        "comparison complete"
    );

    Ok(Comparison { meta, bayesian, average, weighted_average })
}
