//! The term registry and relation graph.
//!
//! Terms live in an arena owned by [`Ontology`] and refer to each other by
//! [`TermIdx`]. The graph is immutable once built; see the `closure` module
//! for the memoized ancestor operations.
//!
//! # Example
//!
//! ```ignore
//! use ontograph_core::{OntologyBuilder, RelationType, TermRecord};
//!
//! let mut builder = OntologyBuilder::new("GO");
//! builder.add_term(TermRecord::new("GO:0000001", "root"))?;
//! builder.add_term(TermRecord::new("GO:0000002", "leaf"))?;
//! builder.add_relation("GO:0000002", "GO:0000001", RelationType::PartOf)?;
//! let ontology = builder.build()?;
//!
//! let leaf = ontology.idx_of("GO:0000002").unwrap();
//! let slim = ontology.ancestry(leaf, "I=PO")?;
//! ```

mod builder;
mod closure;
mod error;
mod term;

pub use builder::OntologyBuilder;
pub use error::OntologyError;
pub use term::{Term, TermIdx, TermRecord};

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::AtomicUsize;

use tracing::warn;

use crate::container::TermContainer;
use crate::termset::TermSet;

/// A loaded ontology: every term of one namespace and the edges between them.
#[derive(Debug)]
pub struct Ontology {
    pub(crate) namespace: String,
    pub(crate) terms: Vec<Term>,
    pub(crate) by_id: HashMap<String, TermIdx>,
    pub(crate) by_code: HashMap<u32, TermIdx>,
    pub(crate) subsets: BTreeMap<String, Vec<TermIdx>>,
    pub(crate) closure_computations: AtomicUsize,
}

/// Minimal serializable view of a term.
#[derive(Debug, Clone, Serialize)]
pub struct TermSummary {
    pub id: String,
    pub name: String,
    pub obsolete: bool,
    pub ancestors: Vec<String>,
}

impl Ontology {
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The term behind a handle.
    ///
    /// # Panics
    ///
    /// If `idx` was issued by a different ontology and is out of range.
    pub fn term_at(&self, idx: TermIdx) -> &Term {
        &self.terms[idx.index()]
    }

    pub fn idx_of(&self, id: &str) -> Option<TermIdx> {
        self.by_id.get(id).copied()
    }

    pub fn term_by_code(&self, code: u32) -> Option<&Term> {
        self.by_code.get(&code).map(|idx| self.term_at(*idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Term> + '_ {
        self.terms.iter()
    }

    /// Names of the subsets (slims) defined by the source data.
    pub fn subset_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.subsets.keys().map(String::as_str)
    }

    /// A subset as a term set, or `None` if no subset has that name.
    pub fn subset(&self, name: &str) -> Option<TermSet<'_>> {
        let members = self.subsets.get(name)?;
        let mut set = TermSet::named(self, name);
        for idx in members {
            set.add(self.term_at(*idx));
        }
        Some(set)
    }

    pub fn summary(&self, idx: TermIdx) -> TermSummary {
        let term = self.term_at(idx);
        TermSummary {
            id: term.id.clone(),
            name: term.name.clone(),
            obsolete: term.is_obsolete,
            ancestors: self.lineage(idx).into_iter().map(str::to_string).collect(),
        }
    }
}

impl TermContainer for Ontology {
    type Member = TermRecord;

    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn term_count(&self) -> usize {
        self.terms.len()
    }

    fn terms(&self) -> Vec<&Term> {
        self.terms.iter().collect()
    }

    fn term_ids(&self) -> Vec<&str> {
        self.terms.iter().map(|t| t.id.as_str()).collect()
    }

    fn term(&self, id: &str) -> Option<&Term> {
        self.idx_of(id).map(|idx| self.term_at(idx))
    }

    /// Register a new, unconnected term. Existing ids are left untouched.
    ///
    /// A term whose code is already taken joins without a code, so it is
    /// left out of compressed term sets.
    fn add_term(&mut self, member: TermRecord) {
        if self.by_id.contains_key(&member.id) {
            warn!(id = %member.id, "term already registered, ignoring");
            return;
        }
        let idx = TermIdx::new(self.terms.len());
        let mut term = Term::new(idx, member);
        if let Some(code) = term.code {
            if let Some(owner) = self.by_code.get(&code) {
                warn!(
                    id = %term.id,
                    code,
                    owner = %self.term_at(*owner).id,
                    "code already taken, term will not be encoded"
                );
                term.code = None;
            } else {
                self.by_code.insert(code, idx);
            }
        }
        self.by_id.insert(term.id.clone(), idx);
        self.terms.push(term);
    }
}
