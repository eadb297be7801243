//! Relation vocabulary: the kinds of edge that connect ontology terms.
//!
//! - [`RelationType`] - the closed set of edge kinds, their codes, polarity and
//!   composition table
//! - [`RelationSet`] - a set of kinds, parsed from and serialized to compact
//!   filter strings such as `"I=PO"`
//! - [`TermRelation`] - a typed edge between two terms

mod edge;
mod error;
mod kind;
mod set;

pub use edge::TermRelation;
pub use error::RelationError;
pub use kind::{Polarity, RelationType};
pub use set::RelationSet;
