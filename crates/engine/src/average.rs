use crate::group::{group_by_key, sum_by};
use crate::model::{Estimates, ObservationSet};

/// Arithmetic mean of `percentage` per ethnicity.
pub fn simple_average(set: &ObservationSet) -> Estimates {
    group_by_key(set.as_slice(), |o| o.ethnicity.as_str())
        .into_iter()
        .map(|(ethnicity, rows)| {
            let total = sum_by(rows.iter().copied(), |o| o.percentage);
            (ethnicity.to_string(), total / rows.len() as f64)
        })
        .collect()
}
