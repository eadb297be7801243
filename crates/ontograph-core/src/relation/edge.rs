//! Typed edges between terms.

use serde::{Deserialize, Serialize};

use super::{RelationSet, RelationType};
use crate::ontology::TermIdx;

/// CHILD --relation--> PARENT.
///
/// Endpoints are arena indices into the owning [`crate::Ontology`]. Inside a
/// term's ancestor closure, `child` is always the term itself and `parent` is
/// the ancestor reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TermRelation {
    /// Source term (the more specific one)
    pub child: TermIdx,
    /// Target term (the more general one)
    pub parent: TermIdx,
    pub relation: RelationType,
}

impl TermRelation {
    pub fn new(child: TermIdx, parent: TermIdx, relation: RelationType) -> Self {
        Self {
            child,
            parent,
            relation,
        }
    }

    /// The reflexive edge `term --equals--> term`.
    pub fn identity(term: TermIdx) -> Self {
        Self::new(term, term, RelationType::Identity)
    }

    /// Chain `self` (child to mid) with `next` (mid to ancestor).
    ///
    /// Returns `None` if the edges do not meet at a common term or if their
    /// relation types do not compose.
    pub fn combine(&self, next: &TermRelation) -> Option<TermRelation> {
        if self.parent != next.child {
            return None;
        }
        let relation = self.relation.combine(next.relation)?;
        Some(Self::new(self.child, next.parent, relation))
    }

    pub fn of_type(&self, query: RelationType) -> bool {
        self.relation.of_type(query)
    }

    pub fn of_any_type(&self, types: &RelationSet) -> bool {
        self.relation.of_any_type(types)
    }
}
