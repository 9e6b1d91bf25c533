use thiserror::Error;

/// Errors that abort a districting run before a plan is produced.
///
/// Numerical edge cases (zero perimeter, empty regions, zero target) are not
/// represented here; they are scored as 0 where they occur.
#[derive(Error, Debug)]
pub enum DistrictError {
    /// Missing or malformed id, geometry, or population for a unit.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// More regions were requested than there are distinct units.
    #[error("requested {requested} regions but only {available} units are available")]
    InsufficientUnits { requested: usize, available: usize },

    /// Region count or tolerance out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] polars::error::PolarsError),
}

/// Convenience alias for results carrying a [`DistrictError`].
pub type Result<T> = std::result::Result<T, DistrictError>;
