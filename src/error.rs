//! Error type shared by the planner, parsing and export code.

use thiserror::Error;

/// Errors that can occur while planning or exporting subnets.
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Input is not a dotted-quad network with a prefix or netmask.
    #[error("Invalid network '{input}': {reason}")]
    InvalidNetwork { input: String, reason: String },

    /// Target prefix is shorter than the base prefix or longer than /32.
    #[error("{reason}: target prefix /{prefix} is outside /{min}../{max}")]
    PrefixOutOfRange {
        prefix: u32,
        min: u8,
        max: u8,
        reason: &'static str,
    },

    /// Requested enumeration window runs past the available subnets.
    #[error(
        "Requested {count} subnets starting at #{start_index} \
         but only {available} subnets are available"
    )]
    RangeExceeded {
        start_index: u64,
        count: u64,
        available: u64,
    },

    /// A numeric argument outside its allowed range (zero count, zero start index, ...).
    #[error("Invalid {name}: {value} ({reason})")]
    InvalidArgument {
        name: &'static str,
        value: u64,
        reason: &'static str,
    },

    /// Reading or writing an exported table failed.
    #[error("Export error: {0}")]
    Export(String),
}

/// Result type for planner operations.
pub type PlannerResult<T> = Result<T, PlannerError>;

impl From<csv::Error> for PlannerError {
    fn from(err: csv::Error) -> Self {
        PlannerError::Export(format!("CSV error: {err}"))
    }
}

impl<W> From<csv::IntoInnerError<W>> for PlannerError {
    fn from(err: csv::IntoInnerError<W>) -> Self {
        PlannerError::Export(format!("CSV writer error: {}", err.error()))
    }
}
