//! Assembles an immutable [`Ontology`] from terms and edges.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::AtomicUsize;

use tracing::debug;

use super::error::OntologyError;
use super::term::{Term, TermIdx, TermRecord};
use super::Ontology;
use crate::relation::{RelationType, TermRelation};

/// Collects terms, edges and subset memberships, then validates them into an
/// [`Ontology`].
///
/// ```ignore
/// let mut builder = OntologyBuilder::new("GO");
/// builder.add_term(TermRecord::new("GO:0000002", "child"))?;
/// builder.add_term(TermRecord::new("GO:0000001", "parent"))?;
/// builder.add_relation("GO:0000002", "GO:0000001", RelationType::IsA)?;
/// let ontology = builder.build()?;
/// ```
#[derive(Debug, Default)]
pub struct OntologyBuilder {
    namespace: String,
    records: Vec<TermRecord>,
    by_id: HashMap<String, TermIdx>,
    edges: Vec<TermRelation>,
    subsets: BTreeMap<String, Vec<TermIdx>>,
}

impl OntologyBuilder {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn term_count(&self) -> usize {
        self.records.len()
    }

    pub fn add_term(&mut self, record: TermRecord) -> Result<TermIdx, OntologyError> {
        if self.by_id.contains_key(&record.id) {
            return Err(OntologyError::DuplicateTerm(record.id));
        }
        let idx = TermIdx::new(self.records.len());
        self.by_id.insert(record.id.clone(), idx);
        self.records.push(record);
        Ok(idx)
    }

    /// Record `child --relation--> parent`.
    ///
    /// Replaced-by and consider edges are kept as obsolescence metadata and
    /// never become parents.
    pub fn add_relation(
        &mut self,
        child: &str,
        parent: &str,
        relation: RelationType,
    ) -> Result<(), OntologyError> {
        if relation == RelationType::Undefined {
            return Err(OntologyError::UndefinedRelation {
                child: child.to_string(),
                parent: parent.to_string(),
            });
        }
        let child_idx = self.resolve(child)?;
        let parent_idx = self.resolve(parent)?;
        self.edges
            .push(TermRelation::new(child_idx, parent_idx, relation));
        Ok(())
    }

    pub fn add_to_subset(&mut self, subset: &str, id: &str) -> Result<(), OntologyError> {
        let idx = self.resolve(id)?;
        let members = self.subsets.entry(subset.to_string()).or_default();
        if !members.contains(&idx) {
            members.push(idx);
        }
        Ok(())
    }

    fn resolve(&self, id: &str) -> Result<TermIdx, OntologyError> {
        self.by_id
            .get(id)
            .copied()
            .ok_or_else(|| OntologyError::UnknownTerm(id.to_string()))
    }

    /// Wire up the edges, check the graph is acyclic and that no two terms
    /// share a code.
    pub fn build(self) -> Result<Ontology, OntologyError> {
        let mut terms: Vec<Term> = self
            .records
            .into_iter()
            .enumerate()
            .map(|(i, record)| Term::new(TermIdx::new(i), record))
            .collect();

        for edge in &self.edges {
            if edge.relation.is_obsolescence() {
                terms[edge.child.index()].replacements.push(*edge);
                terms[edge.parent.index()].replaces.push(*edge);
            } else {
                terms[edge.child.index()].parents.push(*edge);
                terms[edge.parent.index()].children.push(*edge);
            }
        }

        check_acyclic(&terms)?;

        let mut by_code: HashMap<u32, TermIdx> = HashMap::new();
        for term in &terms {
            let Some(code) = term.code else {
                continue;
            };
            if let Some(first) = by_code.insert(code, term.idx()) {
                return Err(OntologyError::DuplicateCode {
                    code,
                    first: terms[first.index()].id.clone(),
                    second: term.id.clone(),
                });
            }
        }

        debug!(
            namespace = %self.namespace,
            terms = terms.len(),
            edges = self.edges.len(),
            "built ontology"
        );

        Ok(Ontology {
            namespace: self.namespace,
            terms,
            by_id: self.by_id,
            by_code,
            subsets: self.subsets,
            closure_computations: AtomicUsize::new(0),
        })
    }
}

/// Kahn's algorithm over parent edges: a term is released once every one of
/// its parents has been released. Anything left over sits on a cycle or below
/// one.
fn check_acyclic(terms: &[Term]) -> Result<(), OntologyError> {
    let mut pending: Vec<usize> = terms.iter().map(|t| t.parents.len()).collect();
    let mut ready: Vec<usize> = pending
        .iter()
        .enumerate()
        .filter(|(_, n)| **n == 0)
        .map(|(i, _)| i)
        .collect();
    let mut released = 0;

    while let Some(i) = ready.pop() {
        released += 1;
        for edge in &terms[i].children {
            let child = edge.child.index();
            pending[child] -= 1;
            if pending[child] == 0 {
                ready.push(child);
            }
        }
    }

    if released == terms.len() {
        return Ok(());
    }

    let stuck = pending
        .iter()
        .position(|n| *n > 0)
        .map(|i| terms[i].id.clone())
        .unwrap_or_default();
    Err(OntologyError::Cycle { term: stuck })
}
