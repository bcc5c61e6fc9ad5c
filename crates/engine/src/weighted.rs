use crate::group::{group_by_key, sum_by};
use crate::model::{Estimates, ObservationSet};

/// Rating-weighted mean of `percentage` per ethnicity.
///
/// When an ethnicity's ratings sum to exactly zero the division is skipped and
/// the raw `sum(percentage * rating)` accumulator is reported instead.
/// Negative ratings are used as-is.
pub fn weighted_average(set: &ObservationSet) -> Estimates {
    group_by_key(set.as_slice(), |o| o.ethnicity.as_str())
        .into_iter()
        .map(|(ethnicity, rows)| {
            let weighted = sum_by(rows.iter().copied(), |o| o.percentage * o.rating);
            let weight = sum_by(rows.iter().copied(), |o| o.rating);
            let value = if weight == 0.0 {
                tracing::debug!(ethnicity, weighted, "zero total rating; reporting unweighted accumulator");
                weighted
            } else {
                weighted / weight
            };
            (ethnicity.to_string(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Observation;

    fn set(rows: &[(&str, &str, f64, f64)]) -> ObservationSet {
        ObservationSet::new(
            rows.iter()
                .map(|(s, e, p, r)| Observation::new(*s, *e, *p, *r))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn empty_input() {
        assert!(weighted_average(&ObservationSet::empty()).is_empty());
    }

    #[test]
    fn weights_by_rating() {
        let out = weighted_average(&set(&[("S1", "A", 10.0, 0.5), ("S2", "A", 20.0, 0.8)]));
        let expected = (10.0 * 0.5 + 20.0 * 0.8) / (0.5 + 0.8);
        assert!((out["A"] - expected).abs() < 1e-12);
        assert!((out["A"] - 16.15).abs() < 0.01);
    }

    #[test]
    fn zero_rating_falls_back_to_accumulator() {
        let out = weighted_average(&set(&[("S1", "A", 10.0, 0.0)]));
        assert_eq!(out["A"], 0.0);
        assert!(out["A"].is_finite());
    }

    #[test]
    fn ratings_cancelling_to_zero_report_numerator() {
        // 10*1 + 30*(-1) = -20, weights sum to 0
        let out = weighted_average(&set(&[("S1", "A", 10.0, 1.0), ("S2", "A", 30.0, -1.0)]));
        assert_eq!(out["A"], -20.0);
    }

    #[test]
    fn negative_rating_not_clamped() {
        let out = weighted_average(&set(&[("S1", "A", 10.0, 2.0), ("S2", "A", 40.0, -1.0)]));
        // (20 - 40) / (2 - 1)
        assert_eq!(out["A"], -20.0);
    }
}
