//! Ontology terms and their arena handles.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, RwLock};

use crate::relation::{RelationType, TermRelation};

/// Index of a term inside the arena of the [`super::Ontology`] that owns it.
///
/// Handles are only meaningful for the ontology that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TermIdx(u32);

impl TermIdx {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TermIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Input record describing a term before it joins an ontology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermRecord {
    pub id: String,
    pub name: String,
    pub is_obsolete: bool,
    /// Compact integer code used by the term-set codec.
    /// Derived from the numeric part of the id when not given.
    pub code: Option<u32>,
}

impl TermRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_obsolete: false,
            code: None,
        }
    }

    pub fn obsolete(mut self) -> Self {
        self.is_obsolete = true;
        self
    }

    pub fn with_code(mut self, code: u32) -> Self {
        self.code = Some(code);
        self
    }
}

/// Numeric local part of an id such as `GO:0008150`, if it has one.
pub(crate) fn derive_code(id: &str) -> Option<u32> {
    let local = id.rsplit(':').next()?;
    if local.is_empty() || !local.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    local.parse().ok()
}

/// A node of the ontology graph.
///
/// Edges are fixed once the ontology is built. The two memo layers are filled
/// lazily by the closure operations on [`super::Ontology`].
#[derive(Debug)]
pub struct Term {
    idx: TermIdx,
    pub id: String,
    pub name: String,
    pub is_obsolete: bool,
    pub code: Option<u32>,
    pub(crate) parents: Vec<TermRelation>,
    pub(crate) children: Vec<TermRelation>,
    // obsolete term is the child, the suggested replacement the parent
    pub(crate) replacements: Vec<TermRelation>,
    pub(crate) replaces: Vec<TermRelation>,
    pub(crate) ancestors: OnceLock<Vec<TermRelation>>,
    pub(crate) ancestry: RwLock<HashMap<String, Arc<[TermIdx]>>>,
}

impl Term {
    pub(crate) fn new(idx: TermIdx, record: TermRecord) -> Self {
        let code = record.code.or_else(|| derive_code(&record.id));
        Self {
            idx,
            id: record.id,
            name: record.name,
            is_obsolete: record.is_obsolete,
            code,
            parents: Vec::new(),
            children: Vec::new(),
            replacements: Vec::new(),
            replaces: Vec::new(),
            ancestors: OnceLock::new(),
            ancestry: RwLock::new(HashMap::new()),
        }
    }

    pub fn idx(&self) -> TermIdx {
        self.idx
    }

    pub fn is_active(&self) -> bool {
        !self.is_obsolete
    }

    /// Direct outgoing edges, in load order.
    pub fn parents(&self) -> &[TermRelation] {
        &self.parents
    }

    /// Direct incoming edges, unfiltered.
    pub fn child_relations(&self) -> &[TermRelation] {
        &self.children
    }

    /// Replaced-by and consider edges where this term is the obsolete one.
    pub fn replacements(&self) -> &[TermRelation] {
        &self.replacements
    }

    /// Replaced-by and consider edges pointing at this term.
    pub fn replaces(&self) -> &[TermRelation] {
        &self.replaces
    }

    /// Direct is_a parents.
    pub fn is_a(&self) -> impl Iterator<Item = &TermRelation> + '_ {
        self.parents
            .iter()
            .filter(|tr| tr.relation == RelationType::IsA)
    }

    /// Direct parents other than is_a, occurs_in and has_part.
    pub fn other_parents(&self) -> impl Iterator<Item = &TermRelation> + '_ {
        self.parents.iter().filter(|tr| {
            !matches!(
                tr.relation,
                RelationType::IsA | RelationType::OccursIn | RelationType::HasPart
            )
        })
    }

    pub fn replaced_by(&self) -> impl Iterator<Item = TermIdx> + '_ {
        self.replacements_of(RelationType::ReplacedBy)
    }

    pub fn consider(&self) -> impl Iterator<Item = TermIdx> + '_ {
        self.replacements_of(RelationType::Consider)
    }

    fn replacements_of(&self, relation: RelationType) -> impl Iterator<Item = TermIdx> + '_ {
        self.replacements
            .iter()
            .filter(move |tr| tr.relation == relation)
            .map(|tr| tr.parent)
    }

    /// Whether the ancestor closure has been computed yet.
    pub fn has_cached_ancestors(&self) -> bool {
        self.ancestors.get().is_some()
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_code() {
        assert_eq!(derive_code("GO:0008150"), Some(8150));
        assert_eq!(derive_code("GO:0000001"), Some(1));
        assert_eq!(derive_code("ECO:0000269"), Some(269));
        assert_eq!(derive_code("GO:abc"), None);
        assert_eq!(derive_code("GO:"), None);
    }
}
