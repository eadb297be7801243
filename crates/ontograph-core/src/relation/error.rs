use thiserror::Error;

/// Errors raised while interpreting relation codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelationError {
    #[error("No such relation type as {0:?}")]
    UnknownRelation(String),
}
