//! Typed error surface of the registry.
//!
//! Registration and cycle errors are fatal to the calling context.
//! `InsufficientInput` is recoverable: the caller may `provide` more inputs
//! and retry. Recipe errors pass through the executor unchanged.

use thiserror::Error;

/// Violations of the registration rules. The registry is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("artifacts must have a non-empty identifier")]
    EmptyIdentifier,

    #[error("artifacts must have a non-empty suffix")]
    EmptySuffix,

    #[error("duplicated artifact identifier: {0}")]
    DuplicateIdentifier(String),

    #[error("duplicated artifact suffix: {0}")]
    DuplicateSuffix(String),

    #[error("unknown artifact identifier: {0}")]
    UnknownIdentifier(String),
}

/// The union-of-all-recipes graph is not a DAG. The registry is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("artifact dependency graph has a cycle involving: {}", .members.join(", "))]
pub struct CycleError {
    /// Identifiers left unordered by the topological sort, in registration
    /// order.
    pub members: Vec<String>,
}

/// The currently finished artifacts cannot derive the requested target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("inputs [{}] are insufficient to create {}", .finished.join(", "), .target)]
pub struct InsufficientInput {
    /// The target no plan could reach.
    pub target: String,
    /// Identifiers finished at planning time, in registration order.
    pub finished: Vec<String>,
}

/// Failure reported by a recipe callback. The executor neither catches nor
/// retries these; they surface from `make` verbatim.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct RecipeError {
    pub message: String,
}

impl RecipeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for RecipeError {
    fn from(err: std::io::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Everything `make` (or a bare plan query) can fail with.
#[derive(Debug, Error)]
pub enum MakeError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Cycle(#[from] CycleError),

    #[error(transparent)]
    InsufficientInput(#[from] InsufficientInput),

    #[error(transparent)]
    Recipe(#[from] RecipeError),

    #[error("cannot create scratch directory: {0}")]
    Scratch(#[source] std::io::Error),
}
