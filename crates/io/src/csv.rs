// CSV/TSV observation import

use std::io::Read;
use std::path::Path;

use dnacompare_engine::{Observation, ObservationSet};

use crate::error::LoadError;

/// Header names for the four observation columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    pub service: String,
    pub ethnicity: String,
    pub percentage: String,
    pub rating: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            service: "service".into(),
            ethnicity: "ethnicity".into(),
            percentage: "percentage".into(),
            rating: "rating".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputOptions {
    pub columns: ColumnNames,
    /// Field delimiter. `None` sniffs it from the first lines.
    pub delimiter: Option<u8>,
    /// Trim whitespace around every field.
    pub trim: bool,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            columns: ColumnNames::default(),
            delimiter: None,
            trim: true,
        }
    }
}

/// Load and validate observations from a delimited file with a header row.
pub fn load_observations(path: &Path, options: &InputOptions) -> Result<ObservationSet, LoadError> {
    let content = read_file_as_utf8(path).map_err(|message| LoadError::Io {
        path: path.display().to_string(),
        message,
    })?;
    let set = parse_observations(&content, options)?;
    tracing::info!(
        path = %path.display(),
        observations = set.len(),
        "loaded observations"
    );
    Ok(set)
}

/// Parse observations from delimited text with a header row.
///
/// Columns are located by header name (case-insensitive), so extra columns and
/// any column order are accepted. Numeric cells that do not parse, or parse to
/// NaN or infinity, are errors.
pub fn parse_observations(content: &str, options: &InputOptions) -> Result<ObservationSet, LoadError> {
    let delimiter = options.delimiter.unwrap_or_else(|| sniff_delimiter(content));
    tracing::debug!(delimiter = %(delimiter as char).escape_default(), "parsing observations");

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .trim(if options.trim { csv::Trim::All } else { csv::Trim::None })
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| csv_error(&e))?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let idx = |name: &str| -> Result<usize, LoadError> {
        let wanted = name.trim().to_lowercase();
        headers.iter().position(|h| *h == wanted).ok_or_else(|| LoadError::MissingColumn {
            column: name.into(),
            found: headers.join(", "),
        })
    };

    let col = &options.columns;
    let service_idx = idx(&col.service)?;
    let ethnicity_idx = idx(&col.ethnicity)?;
    let percentage_idx = idx(&col.percentage)?;
    let rating_idx = idx(&col.rating)?;

    let mut observations = Vec::new();

    for record in reader.records() {
        let record = record.map_err(|e| csv_error(&e))?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let number = |i: usize, column: &str| -> Result<f64, LoadError> {
            let raw = record.get(i).unwrap_or("");
            raw.trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| LoadError::InvalidNumber {
                    line,
                    column: column.into(),
                    value: raw.into(),
                })
        };

        let percentage = number(percentage_idx, &col.percentage)?;
        let rating = number(rating_idx, &col.rating)?;

        observations.push(Observation::new(
            record.get(service_idx).unwrap_or(""),
            record.get(ethnicity_idx).unwrap_or(""),
            percentage,
            rating,
        ));
    }

    Ok(ObservationSet::new(observations)?)
}

fn csv_error(e: &csv::Error) -> LoadError {
    let line = e.position().map(|p| p.line()).unwrap_or(0);
    let message = match e.kind() {
        csv::ErrorKind::UnequalLengths { expected_len, len, .. } => {
            format!("row has {len} field(s), expected {expected_len}")
        }
        _ => e.to_string(),
    };
    LoadError::Csv { line, message }
}

/// Detect the most likely field delimiter by checking consistency across the first few lines.
///
/// For each candidate (comma, semicolon, tab, pipe), count fields per line. The delimiter
/// that produces the most consistent field count (>1 field) wins.
pub fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b',', b';', b'\t', b'|'];
    let sample_lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).take(10).collect();

    if sample_lines.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        if counts.first().copied().unwrap_or(0) <= 1 {
            continue;
        }

        // Score: lines agreeing with the header's field count, times that count
        let target = counts[0];
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub fn read_file_as_utf8(path: &Path) -> Result<String, String> {
    let mut file = std::fs::File::open(path).map_err(|e| e.to_string())?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|e| e.to_string())?;

    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            tracing::debug!(path = %path.display(), "input is not UTF-8, decoding as Windows-1252");
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}
