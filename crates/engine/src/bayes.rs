//! Sequential belief update across services.
//!
//! Starts from a uniform prior over every ethnicity in the set, then folds each
//! service in first-seen order: the service's own percentages are normalized
//! into local evidence and blended into the running belief by the service
//! rating,
//!
//! ```text
//! belief[e] = belief[e] * (1 - rating) + local[e] * rating
//! ```
//!
//! Ethnicities a service does not report keep their current belief. After the
//! last service the belief is renormalized to sum to 1.
//!
//! The update does not commute across services, so first-seen order is the
//! canonical order. Ratings outside `[0, 1]` are applied as-is; the final
//! normalization still runs, but intermediate beliefs may leave `[0, 1]`.

use std::collections::BTreeMap;

use crate::error::EngineError;
use crate::group::{distinct_ethnicities, is_degenerate_total, partition_by_service, sum_by, ServiceGroup};
use crate::model::{Estimates, ObservationSet};

type Belief<'a> = BTreeMap<&'a str, f64>;

/// Belief-update estimate per ethnicity, as fractions summing to 1.
///
/// Fails with [`EngineError::ZeroPercentageTotal`] when a service's
/// percentages sum to zero or a non-finite value, and with [`EngineError::ZeroBeliefTotal`] when the
/// final belief cannot be normalized. Empty input yields an empty map.
pub fn bayesian_update(set: &ObservationSet) -> Result<Estimates, EngineError> {
    let ethnicities = distinct_ethnicities(set.as_slice());
    if ethnicities.is_empty() {
        return Ok(Estimates::new());
    }

    let prior = 1.0 / ethnicities.len() as f64;
    let initial: Belief<'_> = ethnicities.iter().map(|e| (*e, prior)).collect();

    let services = partition_by_service(set.as_slice());
    tracing::debug!(
        ethnicities = ethnicities.len(),
        services = services.len(),
        prior,
        "starting belief update"
    );

    let belief = services
        .iter()
        .try_fold(initial, |belief, group| apply_service(belief, group))?;

    normalize(belief)
}

/// Blend one service's local evidence into the running belief.
fn apply_service<'a>(mut belief: Belief<'a>, group: &ServiceGroup<'a>) -> Result<Belief<'a>, EngineError> {
    if group.has_conflicting_ratings() {
        tracing::warn!(
            service = group.service,
            rating = group.rating,
            ignored = ?group.conflicting_ratings,
            "service rows disagree on rating; using the first one"
        );
    }

    let rating = group.rating;
    for (ethnicity, local) in local_evidence(group)? {
        belief
            .entry(ethnicity)
            .and_modify(|b| *b = *b * (1.0 - rating) + local * rating);
    }

    tracing::trace!(service = group.service, rating, ?belief, "applied service");
    Ok(belief)
}

/// A service's percentages rescaled to sum to 1. Repeated rows for the same
/// ethnicity are summed first.
fn local_evidence<'a>(group: &ServiceGroup<'a>) -> Result<Belief<'a>, EngineError> {
    let total = sum_by(group.rows.iter().copied(), |o| o.percentage);
    if is_degenerate_total(total) {
        return Err(EngineError::ZeroPercentageTotal {
            service: group.service.to_string(),
        });
    }

    let mut evidence: Belief<'a> = BTreeMap::new();
    for &row in &group.rows {
        *evidence.entry(row.ethnicity.as_str()).or_insert(0.0) += row.percentage;
    }
    for p in evidence.values_mut() {
        *p /= total;
    }
    Ok(evidence)
}

fn normalize(belief: Belief<'_>) -> Result<Estimates, EngineError> {
    let total = belief.values().fold(0.0, |acc, b| acc + b);
    if is_degenerate_total(total) {
        return Err(EngineError::ZeroBeliefTotal {
            ethnicities: belief.len(),
        });
    }

    Ok(belief
        .into_iter()
        .map(|(ethnicity, b)| (ethnicity.to_string(), b / total))
        .collect())
}
