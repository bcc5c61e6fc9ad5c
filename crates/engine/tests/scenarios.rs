use dnacompare_engine::{
    bayesian_update, compare, simple_average, weighted_average, EngineError, Method, Observation,
    ObservationSet,
};

fn set(rows: &[(&str, &str, f64, f64)]) -> ObservationSet {
    ObservationSet::new(
        rows.iter()
            .map(|(s, e, p, r)| Observation::new(*s, *e, *p, *r))
            .collect(),
    )
    .unwrap()
}

/// Three services with overlapping but not identical ethnicity coverage.
fn survey() -> ObservationSet {
    set(&[
        ("Ancestry", "Central European", 48.0, 0.9),
        ("Ancestry", "Eastern European", 32.0, 0.9),
        ("Ancestry", "Scandinavian", 20.0, 0.9),
        ("23andMe", "Central European", 55.0, 0.8),
        ("23andMe", "Eastern European", 40.0, 0.8),
        ("23andMe", "Balkan", 5.0, 0.8),
        ("MyHeritage", "Eastern European", 70.0, 0.6),
        ("MyHeritage", "Balkan", 30.0, 0.6),
    ])
}

// -------------------------------------------------------------------------
// Documented scenarios
// -------------------------------------------------------------------------

#[test]
fn average_of_two_services() {
    let out = simple_average(&set(&[("S1", "A", 10.0, 0.5), ("S2", "A", 20.0, 0.8)]));
    assert_eq!(out.len(), 1);
    assert_eq!(out["A"], 15.0);
}

#[test]
fn weighted_average_of_two_services() {
    let out = weighted_average(&set(&[("S1", "A", 10.0, 0.5), ("S2", "A", 20.0, 0.8)]));
    assert!((out["A"] - (10.0 * 0.5 + 20.0 * 0.8) / (0.5 + 0.8)).abs() < 1e-12);
    assert_eq!(format!("{:.2}", out["A"]), "16.15");
}

#[test]
fn weighted_average_zero_rating() {
    let out = weighted_average(&set(&[("S1", "A", 10.0, 0.0)]));
    assert_eq!(out["A"], 0.0);
}

#[test]
fn belief_update_all_zero_service() {
    let err = bayesian_update(&set(&[
        ("S1", "A", 40.0, 0.7),
        ("S1", "B", 60.0, 0.7),
        ("S2", "A", 0.0, 0.4),
        ("S2", "B", 0.0, 0.4),
    ]))
    .unwrap_err();
    assert_eq!(err, EngineError::ZeroPercentageTotal { service: "S2".into() });
    assert_eq!(
        err.to_string(),
        "service 'S2': reported percentages sum to zero or a non-finite value, cannot normalize local evidence"
    );
}

// -------------------------------------------------------------------------
// Whole-survey behavior
// -------------------------------------------------------------------------

#[test]
fn every_method_covers_every_ethnicity() {
    let data = survey();
    let cmp = compare(&data).unwrap();
    let mut expected: Vec<&str> = data.ethnicities();
    expected.sort_unstable();

    for method in Method::ALL {
        let keys: Vec<&str> = cmp.estimates(method).keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, expected, "{method} keys");
    }
}

#[test]
fn belief_update_is_a_distribution() {
    let out = bayesian_update(&survey()).unwrap();
    let total: f64 = out.values().sum();
    assert!((total - 1.0).abs() < 1e-9, "total = {total}");
    assert!(out.values().all(|p| (0.0..=1.0).contains(p)));
}

#[test]
fn belief_update_favors_consensus() {
    let out = bayesian_update(&survey()).unwrap();
    // Eastern European is the only label every service reports.
    let top = out
        .iter()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(k, _)| k.as_str())
        .unwrap();
    assert_eq!(top, "Eastern European");
}

#[test]
fn averages_stay_on_percentage_scale() {
    let cmp = compare(&survey()).unwrap();
    assert!((cmp.average["Central European"] - 51.5).abs() < 1e-12);
    assert!((cmp.average["Eastern European"] - 142.0 / 3.0).abs() < 1e-12);
    assert_eq!(cmp.average["Scandinavian"], 20.0);

    // (32*0.9 + 40*0.8 + 70*0.6) / (0.9 + 0.8 + 0.6)
    let expected = (28.8 + 32.0 + 42.0) / 2.3;
    assert!((cmp.weighted_average["Eastern European"] - expected).abs() < 1e-9);
}

#[test]
fn repeated_calls_are_bit_identical() {
    let data = survey();
    let first = compare(&data).unwrap();
    let second = compare(&data).unwrap();
    for method in Method::ALL {
        let a = first.estimates(method);
        let b = second.estimates(method);
        for (k, v) in a {
            assert_eq!(v.to_bits(), b[k].to_bits(), "{method} {k}");
        }
    }
}

#[test]
fn comparison_serializes_with_method_keys() {
    let cmp = compare(&survey()).unwrap();
    let json = serde_json::to_value(&cmp).unwrap();
    assert_eq!(json["meta"]["services"], 3);
    assert_eq!(json["meta"]["ethnicities"], 4);
    assert!(json["bayesian"]["Balkan"].is_number());
    assert!(json["weighted_average"]["Scandinavian"].is_number());
}
