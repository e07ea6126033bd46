//! Graph-specific error types.

use dh_core::{DhError, PipeId};
use thiserror::Error;

pub type GraphResult<T> = Result<T, GraphError>;

/// Network construction and lookup errors.
///
/// Data-quality problems (ambiguous pipes, orphaned buildings) are not errors;
/// they are reported through the diagnostics.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// No entity carries the requested identifier.
    #[error("No {what} with id '{id}'")]
    NotFound { what: &'static str, id: String },

    /// The multi-building cleanup was invoked on a pipe without several candidates.
    #[error("Pipe {pipe} has {candidates} candidate building(s); cleanup needs more than one")]
    InvalidResolverState { pipe: PipeId, candidates: usize },

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    Config(#[from] DhError),

    /// A built network broke one of its structural invariants.
    #[error("Invariant violated: {what}")]
    Invariant { what: String },
}
