//! CLI Exit Code Registry
//!
//! Single source of truth for `dnacompare` exit codes. Scripts rely on them.
//!
//! | Code | Meaning                                            |
//! |------|----------------------------------------------------|
//! | 0    | Success                                            |
//! | 1    | General error (unspecified)                        |
//! | 2    | Usage error (bad arguments)                        |
//! | 3    | Input file could not be read                       |
//! | 4    | Input could not be parsed (header, row, number)    |
//! | 5    | Invalid configuration                              |
//! | 6    | Observation failed validation (empty label)        |
//! | 7    | Degenerate aggregation (zero percentage or belief) |
//! | 8    | Output could not be written                        |

use dnacompare_engine::EngineError;
use dnacompare_io::LoadError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, conflicting options.
pub const EXIT_USAGE: u8 = 2;

/// Input file missing or unreadable.
pub const EXIT_INPUT_READ: u8 = 3;

/// Input readable but malformed: missing column, ragged row, bad number.
pub const EXIT_INPUT_PARSE: u8 = 4;

/// Config file unreadable, unparseable or invalid.
pub const EXIT_CONFIG: u8 = 5;

/// An observation has an empty service or ethnicity.
pub const EXIT_VALIDATION: u8 = 6;

/// A service reported a zero percentage total, or the final belief was zero.
pub const EXIT_DEGENERATE: u8 = 7;

/// Writing --output failed.
pub const EXIT_WRITE: u8 = 8;

/// Map a loader error to its exit code.
pub fn load_exit_code(err: &LoadError) -> u8 {
    match err {
        LoadError::Io { .. } => EXIT_INPUT_READ,
        LoadError::Csv { .. } | LoadError::MissingColumn { .. } | LoadError::InvalidNumber { .. } => {
            EXIT_INPUT_PARSE
        }
        LoadError::Validation(e) => engine_exit_code(e),
    }
}

/// Map an engine error to its exit code.
pub fn engine_exit_code(err: &EngineError) -> u8 {
    match err {
        EngineError::EmptyLabel { .. } => EXIT_VALIDATION,
        EngineError::ZeroPercentageTotal { .. } | EngineError::ZeroBeliefTotal { .. } => EXIT_DEGENERATE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dnacompare_engine::LabelField;

    #[test]
    fn codes_are_distinct() {
        let codes = [
            EXIT_SUCCESS,
            EXIT_ERROR,
            EXIT_USAGE,
            EXIT_INPUT_READ,
            EXIT_INPUT_PARSE,
            EXIT_CONFIG,
            EXIT_VALIDATION,
            EXIT_DEGENERATE,
            EXIT_WRITE,
        ];
        let mut sorted = codes.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), codes.len());
    }

    #[test]
    fn validation_wrapped_in_load_error() {
        let err = LoadError::Validation(EngineError::EmptyLabel { index: 0, field: LabelField::Service });
        assert_eq!(load_exit_code(&err), EXIT_VALIDATION);
    }

    #[test]
    fn degenerate_engine_errors() {
        let err = EngineError::ZeroBeliefTotal { ethnicities: 2 };
        assert_eq!(engine_exit_code(&err), EXIT_DEGENERATE);
    }
}
