//! `dnacompare compare | validate | services | config` implementations.

use std::path::{Path, PathBuf};

use dnacompare_config::{Settings, SortOrder};
use dnacompare_engine::group::{is_degenerate_total, partition_by_service, sum_by};
use dnacompare_engine::{compare, simple_average, weighted_average, ObservationSet};
use dnacompare_io::{export, load_observations, ColumnNames, InputOptions, LoadError};

use crate::exit_codes::{engine_exit_code, load_exit_code, EXIT_CONFIG, EXIT_ERROR, EXIT_USAGE, EXIT_WRITE};
use crate::output::{render_averages, render_comparison, render_services, DisplayOptions};
use crate::CliError;

/// Build loader options from the effective settings.
pub fn input_options(settings: &Settings) -> InputOptions {
    let c = &settings.columns;
    InputOptions {
        columns: ColumnNames {
            service: c.service.clone(),
            ethnicity: c.ethnicity.clone(),
            percentage: c.percentage.clone(),
            rating: c.rating.clone(),
        },
        delimiter: settings.input.delimiter_byte(),
        trim: settings.input.trim,
    }
}

fn load(input: &Path, settings: &Settings) -> Result<ObservationSet, CliError> {
    load_observations(input, &input_options(settings)).map_err(load_err)
}

fn load_err(err: LoadError) -> CliError {
    let hint = match &err {
        LoadError::MissingColumn { .. } => {
            Some("set [columns] in the config file to match your header row".to_string())
        }
        LoadError::Csv { .. } => Some("check the delimiter ([input] delimiter in config)".to_string()),
        _ => None,
    };
    CliError { code: load_exit_code(&err), message: err.to_string(), hint }
}

// ============================================================================
// compare
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

pub struct CompareArgs {
    pub input: PathBuf,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub sort: Option<SortOrder>,
    pub precision: Option<usize>,
}

pub fn cmd_compare(args: CompareArgs, settings: &Settings) -> Result<(), CliError> {
    if let Some(p) = args.precision {
        if p > dnacompare_config::settings::MAX_PRECISION {
            return Err(CliError {
                code: EXIT_USAGE,
                message: format!("--precision must be at most {}", dnacompare_config::settings::MAX_PRECISION),
                hint: None,
            });
        }
    }

    let set = load(&args.input, settings)?;
    let options = DisplayOptions {
        precision: args.precision.unwrap_or(settings.display.precision),
        sort: args.sort.unwrap_or(settings.display.sort),
    };

    let comparison = match compare(&set) {
        Ok(comparison) => comparison,
        Err(e) => {
            // The averages never fail; show them before reporting the belief-update error.
            if e.is_degenerate() && args.format == OutputFormat::Text {
                print!("{}", render_averages(&simple_average(&set), &weighted_average(&set), &options));
            }
            let hint = e
                .is_degenerate()
                .then(|| "remove or correct the rows named above; the averages are unaffected".to_string());
            return Err(CliError { code: engine_exit_code(&e), message: e.to_string(), hint });
        }
    };

    if let Some(ref path) = args.output {
        let is_csv = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);
        let body = (if is_csv { export::to_csv(&comparison) } else { export::to_json(&comparison) })
            .map_err(|e| CliError { code: EXIT_ERROR, message: e.to_string(), hint: None })?;
        std::fs::write(path, body).map_err(|e| CliError {
            code: EXIT_WRITE,
            message: format!("cannot write {}: {e}", path.display()),
            hint: None,
        })?;
        eprintln!("wrote {}", path.display());
    }

    match args.format {
        OutputFormat::Json => {
            let json = export::to_json(&comparison)
                .map_err(|e| CliError { code: EXIT_ERROR, message: e.to_string(), hint: None })?;
            println!("{json}");
        }
        OutputFormat::Csv => {
            let csv = export::to_csv(&comparison)
                .map_err(|e| CliError { code: EXIT_ERROR, message: e.to_string(), hint: None })?;
            print!("{csv}");
        }
        OutputFormat::Text => print!("{}", render_comparison(&comparison, &options)),
    }

    let m = &comparison.meta;
    eprintln!(
        "compared {} observation(s) from {} service(s) across {} ethnicity(ies)",
        m.observations, m.services, m.ethnicities,
    );
    Ok(())
}

// ============================================================================
// validate
// ============================================================================

pub fn cmd_validate(input: PathBuf, settings: &Settings) -> Result<(), CliError> {
    let set = load(&input, settings)?;
    let groups = partition_by_service(set.as_slice());

    for g in groups.iter().filter(|g| g.has_conflicting_ratings()) {
        let ignored: Vec<String> = g.conflicting_ratings.iter().map(|r| r.to_string()).collect();
        eprintln!(
            "warning: service '{}' rows disagree on rating; using {} (ignored: {})",
            g.service,
            g.rating,
            ignored.join(", ")
        );
    }

    for g in &groups {
        let total = sum_by(g.rows.iter().copied(), |o| o.percentage);
        if is_degenerate_total(total) {
            eprintln!(
                "warning: service '{}' reports a zero percentage total; the Bayesian method will fail",
                g.service
            );
        }
    }

    eprintln!(
        "valid: {} observation(s), {} service(s), {} ethnicity(ies)",
        set.len(),
        groups.len(),
        set.ethnicities().len(),
    );
    Ok(())
}

// ============================================================================
// services
// ============================================================================

#[derive(serde::Serialize)]
struct ServiceSummary<'a> {
    service: &'a str,
    rating: f64,
    rows: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    ignored_ratings: Vec<f64>,
}

pub fn cmd_services(input: PathBuf, json: bool, settings: &Settings) -> Result<(), CliError> {
    let set = load(&input, settings)?;
    let groups = partition_by_service(set.as_slice());

    if json {
        let summaries: Vec<ServiceSummary<'_>> = groups
            .iter()
            .map(|g| ServiceSummary {
                service: g.service,
                rating: g.rating,
                rows: g.rows.len(),
                ignored_ratings: g.conflicting_ratings.clone(),
            })
            .collect();
        let out = serde_json::to_string_pretty(&summaries)
            .map_err(|e| CliError { code: EXIT_ERROR, message: format!("JSON serialization error: {e}"), hint: None })?;
        println!("{out}");
    } else {
        print!("{}", render_services(&groups));
    }
    Ok(())
}

// ============================================================================
// config
// ============================================================================

pub fn cmd_config_path(used: Option<&Path>) -> Result<(), CliError> {
    match used {
        Some(path) => println!("{}", path.display()),
        None => {
            println!("{}", Settings::config_path_display());
            eprintln!("(not present; using defaults)");
        }
    }
    Ok(())
}

pub fn cmd_config_show(settings: &Settings) -> Result<(), CliError> {
    let out = toml::to_string_pretty(settings)
        .map_err(|e| CliError { code: EXIT_ERROR, message: format!("TOML serialization error: {e}"), hint: None })?;
    print!("{out}");
    Ok(())
}

pub fn cmd_config_init(path: Option<PathBuf>, force: bool) -> Result<(), CliError> {
    let path = path.unwrap_or_else(Settings::config_path);
    if path.exists() && !force {
        return Err(CliError {
            code: EXIT_CONFIG,
            message: format!("{} already exists", path.display()),
            hint: Some("pass --force to overwrite".to_string()),
        });
    }
    Settings::write_default(&path).map_err(|e| CliError { code: EXIT_WRITE, message: e.to_string(), hint: None })?;
    eprintln!("wrote {}", path.display());
    Ok(())
}
