use std::collections::HashMap;
use std::hash::Hash;

use crate::model::Observation;

/// Group items by key, preserving first-seen key order and input order within
/// each group. Empty input yields an empty grouping.
pub fn group_by_key<'a, T, K, F>(items: &'a [T], key: F) -> Vec<(K, Vec<&'a T>)>
where
    K: Eq + Hash + Clone,
    F: Fn(&'a T) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<&'a T>)> = Vec::new();

    for item in items {
        let k = key(item);
        match index.get(&k) {
            Some(&i) => groups[i].1.push(item),
            None => {
                index.insert(k.clone(), groups.len());
                groups.push((k, vec![item]));
            }
        }
    }

    groups
}

/// Sum `value` over `items` left to right. Empty input sums to `0.0`.
pub fn sum_by<'a, T, I, F>(items: I, value: F) -> f64
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
    F: Fn(&T) -> f64,
{
    items.into_iter().fold(0.0, |acc, item| acc + value(item))
}

/// A total that cannot be normalized by: zero, NaN or infinite.
pub fn is_degenerate_total(total: f64) -> bool {
    total == 0.0 || !total.is_finite()
}

/// Distinct ethnicity labels in first-seen order.
pub fn distinct_ethnicities(observations: &[Observation]) -> Vec<&str> {
    group_by_key(observations, |o| o.ethnicity.as_str())
        .into_iter()
        .map(|(ethnicity, _)| ethnicity)
        .collect()
}

/// One service's rows with its resolved rating.
#[derive(Debug, Clone)]
pub struct ServiceGroup<'a> {
    pub service: &'a str,
    /// Rating of the first row seen for this service.
    pub rating: f64,
    pub rows: Vec<&'a Observation>,
    /// Ratings on later rows that differ from `rating`; ignored.
    pub conflicting_ratings: Vec<f64>,
}

impl ServiceGroup<'_> {
    pub fn has_conflicting_ratings(&self) -> bool {
        !self.conflicting_ratings.is_empty()
    }
}

/// Partition by service id in first-seen order. A service whose rows disagree
/// on rating keeps the first one encountered.
pub fn partition_by_service(observations: &[Observation]) -> Vec<ServiceGroup<'_>> {
    group_by_key(observations, |o| o.service.as_str())
        .into_iter()
        .map(|(service, rows)| {
            let rating = rows[0].rating;
            let conflicting_ratings = rows
                .iter()
                .map(|o| o.rating)
                .filter(|r| r.to_bits() != rating.to_bits())
                .collect();
            ServiceGroup { service, rating, rows, conflicting_ratings }
        })
        .collect()
}
