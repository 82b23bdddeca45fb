use thiserror::Error;

/// Errors produced by the scheduling engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SrsError {
    /// Required input was missing or malformed.
    #[error("{0}")]
    Validation(String),
    /// Plan generation was requested against an empty catalog.
    #[error("the problem catalog is empty, import problems before generating a plan")]
    EmptyCatalog,
    /// A revision session event is not allowed in the session's current state.
    #[error("invalid revision session transition: {0}")]
    InvalidTransition(String),
}

pub type SrsResult<T> = Result<T, SrsError>;
