//! Error types for the roll operator and its host seams.

use thiserror::Error;

/// Error type for operator setup and sampling.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Input format or bounds cannot be wrapped over.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Invalid parameter value or call argument.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Sampling or requesting before a successful validate.
    #[error("{0} used before validate()")]
    NotValidated(&'static str),

    /// No operator registered under this class name.
    #[error("unknown operator class: {0}")]
    UnknownOperator(String),

    /// A class name was registered twice.
    #[error("operator class already registered: {0}")]
    DuplicateOperator(&'static str),

    /// Error raised by a core buffer type.
    #[error(transparent)]
    Core(#[from] tileroll_core::Error),

    /// Parameter persistence failed to parse or serialize.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for operator setup and sampling.
pub type OpsResult<T> = Result<T, OpsError>;
