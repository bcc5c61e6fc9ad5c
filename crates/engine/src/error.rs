use std::fmt;

/// Which label of an observation failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelField {
    Service,
    Ethnicity,
}

impl fmt::Display for LabelField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Service => write!(f, "service"),
            Self::Ethnicity => write!(f, "ethnicity"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// An observation has an empty (or whitespace-only) label.
    #[error("observation {index}: {field} label is empty")]
    EmptyLabel { index: usize, field: LabelField },

    /// A service's percentages sum to zero (or to NaN/infinity), so its local
    /// evidence is undefined.
    #[error("service '{service}': reported percentages sum to zero or a non-finite value, cannot normalize local evidence")]
    ZeroPercentageTotal { service: String },

    /// The final belief total is zero or non-finite.
    #[error("belief total over {ethnicities} ethnicities is zero or non-finite, cannot normalize")]
    ZeroBeliefTotal { ethnicities: usize },
}

impl EngineError {
    /// True for failures raised by the aggregation itself rather than by
    /// record validation.
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::ZeroPercentageTotal { .. } | Self::ZeroBeliefTotal { .. })
    }
}
