// Result export (JSON / CSV)

use dnacompare_engine::{Comparison, Method};

use crate::error::ExportError;

/// Pretty-printed JSON document: run metadata plus one object per method.
pub fn to_json(comparison: &Comparison) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(comparison)?)
}

/// One row per ethnicity with a column per method, values unrounded.
/// Belief-update values stay fractions; averages stay on the percentage scale.
pub fn to_csv(comparison: &Comparison) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["ethnicity".to_string()];
    header.extend(Method::ALL.iter().map(|m| m.to_string()));
    writer
        .write_record(&header)
        .map_err(|e| ExportError::Csv(e.to_string()))?;

    for ethnicity in comparison.ethnicities() {
        let mut record = vec![ethnicity.to_string()];
        for method in Method::ALL {
            let value = comparison
                .estimates(method)
                .get(ethnicity)
                .map(|v| v.to_string())
                .unwrap_or_default();
            record.push(value);
        }
        writer
            .write_record(&record)
            .map_err(|e| ExportError::Csv(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Csv(e.to_string()))
}
