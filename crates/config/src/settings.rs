// Application settings
// Loaded from ~/.config/dnacompare/config.toml (or --config)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {message}")]
    Read { path: String, message: String },

    #[error("cannot write {path}: {message}")]
    Write { path: String, message: String },

    #[error("config parse error in {path}: {message}")]
    Parse { path: String, message: String },

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Header names for the four observation columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSettings {
    pub service: String,
    pub ethnicity: String,
    pub percentage: String,
    pub rating: String,
}

impl Default for ColumnSettings {
    fn default() -> Self {
        Self {
            service: "service".into(),
            ethnicity: "ethnicity".into(),
            percentage: "percentage".into(),
            rating: "rating".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// "auto" to sniff, otherwise a single character ("tab" is accepted)
    pub delimiter: String,
    pub trim: bool,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            delimiter: "auto".into(),
            trim: true,
        }
    }
}

impl InputSettings {
    /// Configured delimiter byte, or `None` for auto-detection.
    pub fn delimiter_byte(&self) -> Option<u8> {
        match self.delimiter.as_str() {
            "auto" | "" => None,
            "tab" | "\\t" => Some(b'\t'),
            other => other.bytes().next(),
        }
    }
}

/// Row order for printed results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Alphabetical by ethnicity
    #[default]
    Name,
    /// Highest estimate first
    Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Decimal places in printed percentages
    pub precision: usize,
    pub sort: SortOrder,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            precision: 2,
            sort: SortOrder::Name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// tracing EnvFilter directive, e.g. "dnacompare_engine=debug"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub columns: ColumnSettings,
    pub input: InputSettings,
    pub display: DisplaySettings,
    pub log: LogSettings,
}

pub const MAX_PRECISION: usize = 10;

const DEFAULT_CONFIG: &str = r#"# dnacompare configuration

# Header names in the input CSV (matched case-insensitively)
[columns]
service = "service"
ethnicity = "ethnicity"
percentage = "percentage"
rating = "rating"

[input]
# "auto" sniffs comma, semicolon, tab or pipe
delimiter = "auto"
trim = true

[display]
precision = 2
# "name" or "value"
sort = "name"

[log]
# Overridden by DNACOMPARE_LOG
# filter = "warn"
"#;

impl Settings {
    /// Default settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dnacompare");
        config_dir.join("config.toml")
    }

    pub fn config_path_display() -> String {
        Self::config_path().to_string_lossy().to_string()
    }

    /// Parse and validate settings from TOML text.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(s).map_err(|e| ConfigError::Parse {
            path: "<string>".into(),
            message: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load from an explicit file. A missing file is an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let settings: Settings = toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load from `explicit` if given, else the default path if it exists,
    /// else defaults. Returns the file actually used.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        if let Some(path) = explicit {
            return Ok((Self::load_from(path)?, Some(path.to_path_buf())));
        }

        let path = Self::config_path();
        if path.exists() {
            Ok((Self::load_from(&path)?, Some(path)))
        } else {
            Ok((Self::default(), None))
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display.precision > MAX_PRECISION {
            return Err(ConfigError::Validation(format!(
                "display.precision must be at most {MAX_PRECISION}, got {}",
                self.display.precision
            )));
        }

        let d = self.input.delimiter.as_str();
        let single_ascii = d.len() == 1 && d.is_ascii();
        if !(single_ascii || matches!(d, "auto" | "tab" | "\\t")) {
            return Err(ConfigError::Validation(format!(
                "input.delimiter must be \"auto\", \"tab\" or a single ASCII character, got {d:?}"
            )));
        }

        let cols = &self.columns;
        for (key, value) in [
            ("service", &cols.service),
            ("ethnicity", &cols.ethnicity),
            ("percentage", &cols.percentage),
            ("rating", &cols.rating),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("columns.{key} must not be empty")));
            }
        }

        Ok(())
    }

    /// Commented default config, as written by `write_default`.
    pub fn default_toml() -> &'static str {
        DEFAULT_CONFIG
    }

    /// Write the commented default config to `path`, creating parent dirs.
    pub fn write_default(path: &Path) -> Result<(), ConfigError> {
        let write_err = |e: std::io::Error| ConfigError::Write {
            path: path.display().to_string(),
            message: e.to_string(),
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, DEFAULT_CONFIG).map_err(write_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_template_matches_defaults() {
        let parsed = Settings::from_toml(Settings::default_toml()).unwrap();
        assert_eq!(parsed, Settings::default());
    }

    #[test]
    fn partial_config_fills_defaults() {
        let settings = Settings::from_toml("[display]\nsort = \"value\"\n").unwrap();
        assert_eq!(settings.display.sort, SortOrder::Value);
        assert_eq!(settings.display.precision, 2);
        assert_eq!(settings.columns.rating, "rating");
        assert_eq!(settings.input.delimiter_byte(), None);
    }

    #[test]
    fn delimiter_forms() {
        let mut input = InputSettings::default();
        input.delimiter = ";".into();
        assert_eq!(input.delimiter_byte(), Some(b';'));
        input.delimiter = "tab".into();
        assert_eq!(input.delimiter_byte(), Some(b'\t'));
    }

    #[test]
    fn rejects_long_delimiter() {
        let err = Settings::from_toml("[input]\ndelimiter = \";;\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)), "{err}");
    }

    #[test]
    fn rejects_large_precision() {
        let err = Settings::from_toml("[display]\nprecision = 11\n").unwrap_err();
        assert!(err.to_string().contains("display.precision"));
    }

    #[test]
    fn rejects_empty_column() {
        let err = Settings::from_toml("[columns]\nrating = \" \"\n").unwrap_err();
        assert!(err.to_string().contains("columns.rating"));
    }

    #[test]
    fn rejects_unknown_sort() {
        let err = Settings::from_toml("[display]\nsort = \"random\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn load_explicit_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        Settings::write_default(&path).unwrap();
        let (settings, used) = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(used.as_deref(), Some(path.as_path()));
    }
}
