use std::path::PathBuf;

use dnacompare_engine::compare;
use dnacompare_io::{export, load_observations, ColumnNames, InputOptions, LoadError};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

#[test]
fn load_survey_fixture() {
    let set = load_observations(&fixtures_dir().join("survey.csv"), &InputOptions::default()).unwrap();
    assert_eq!(set.len(), 8);
    assert_eq!(set.services(), vec!["Ancestry", "23andMe", "MyHeritage"]);
    assert_eq!(
        set.ethnicities(),
        vec!["Central European", "Eastern European", "Scandinavian", "Balkan"]
    );
}

#[test]
fn sniffed_semicolon_fixture_with_capitalized_headers() {
    let set = load_observations(&fixtures_dir().join("semicolon.csv"), &InputOptions::default()).unwrap();
    assert_eq!(set.len(), 4);
    assert_eq!(set.as_slice()[0].percentage, 62.5);

    let cmp = compare(&set).unwrap();
    assert_eq!(cmp.average["Irish"], 71.25);
}

#[test]
fn explicit_delimiter_overrides_sniffing() {
    let options = InputOptions {
        delimiter: Some(b','),
        ..InputOptions::default()
    };
    let err = load_observations(&fixtures_dir().join("semicolon.csv"), &options).unwrap_err();
    assert!(matches!(err, LoadError::MissingColumn { .. }), "{err}");
}

#[test]
fn zero_service_loads_but_fails_to_compare() {
    let set = load_observations(&fixtures_dir().join("zero_service.csv"), &InputOptions::default()).unwrap();
    let err = compare(&set).unwrap_err();
    assert!(err.is_degenerate());
    assert!(err.to_string().contains("'Unknown'"));
}

#[test]
fn renamed_columns_must_exist() {
    let options = InputOptions {
        columns: ColumnNames {
            service: "provider".into(),
            ..ColumnNames::default()
        },
        ..InputOptions::default()
    };
    let err = load_observations(&fixtures_dir().join("survey.csv"), &options).unwrap_err();
    assert_eq!(
        err.to_string(),
        "missing column 'provider' (found: service, ethnicity, percentage, rating)"
    );
}

#[test]
fn export_written_to_disk_round_trips_as_json() {
    let set = load_observations(&fixtures_dir().join("survey.csv"), &InputOptions::default()).unwrap();
    let cmp = compare(&set).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("result.json");
    std::fs::write(&path, export::to_json(&cmp).unwrap()).unwrap();

    let val: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let total: f64 = val["bayesian"]
        .as_object()
        .unwrap()
        .values()
        .map(|v| v.as_f64().unwrap())
        .sum();
    assert!((total - 1.0).abs() < 1e-9);
}
