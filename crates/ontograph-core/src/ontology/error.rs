//! Ontology construction and loading errors.

use std::path::PathBuf;
use thiserror::Error;

use crate::relation::RelationError;

/// Errors that can occur while building or loading an ontology.
#[derive(Debug, Error)]
pub enum OntologyError {
    /// The relation graph is not acyclic.
    #[error("Relation graph is cyclic: {term} has an ancestor path that loops")]
    Cycle { term: String },

    /// An edge was labelled with the wildcard relation.
    #[error("Edge {child} -> {parent} has no relation type")]
    UndefinedRelation { child: String, parent: String },

    /// A term id does not resolve.
    #[error("Unknown term: {0}")]
    UnknownTerm(String),

    /// A term id was registered twice.
    #[error("Duplicate term: {0}")]
    DuplicateTerm(String),

    /// Two terms carry the same codec code.
    #[error("Terms {first} and {second} share code {code}")]
    DuplicateCode {
        code: u32,
        first: String,
        second: String,
    },

    /// Relation code lookup failed.
    #[error(transparent)]
    Relation(#[from] RelationError),

    /// IO error.
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source file row could not be interpreted.
    #[error("Malformed row in {}:{line}: {message}", path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        message: String,
    },
}

impl OntologyError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        OntologyError::Io {
            path: path.into(),
            source,
        }
    }
}
