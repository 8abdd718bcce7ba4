//! Error types for the simulator and its scenario loader.

use thiserror::Error;

/// Errors raised by the engine and the report renderer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimError {
    /// A caller-supplied argument is outside its domain, e.g. a negative
    /// duration or a zero sampling interval.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Errors raised while turning a scenario file into runtime objects.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScenarioError {
    #[error("object `{object}` references unknown force `{force}`")]
    UnknownForce { object: String, force: String },
}
