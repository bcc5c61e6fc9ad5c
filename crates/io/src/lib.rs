// Observation loading and result export.
//
// Sits between files on disk and the pure engine: everything here may touch the
// filesystem, nothing in dnacompare-engine does.

pub mod csv;
pub mod error;
pub mod export;

pub use crate::csv::{load_observations, parse_observations, ColumnNames, InputOptions};
pub use crate::error::{ExportError, LoadError};
