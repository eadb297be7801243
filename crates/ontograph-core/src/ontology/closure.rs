//! Memoized ancestor closure.
//!
//! A term's closure is every `(ancestor, relation)` pair reachable through its
//! parent edges, where the relation is the composition of the edge types along
//! the path. Paths whose types do not compose are dropped; an ancestor reached
//! by several paths keeps every distinct relation that survives.
//!
//! Closures are computed on first request and never change afterwards. A second
//! memo per term maps a filter string to the ancestor terms it selects.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::Ordering;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::info;

use super::term::TermIdx;
use super::Ontology;
use crate::relation::{Polarity, RelationError, RelationSet, TermRelation};

impl Ontology {
    /// The full ancestor closure of a term, including its identity edge.
    pub fn ancestors(&self, idx: TermIdx) -> &[TermRelation] {
        let term = self.term_at(idx);
        term.ancestors.get_or_init(|| self.compute_closure(idx))
    }

    fn compute_closure(&self, idx: TermIdx) -> Vec<TermRelation> {
        self.closure_computations.fetch_add(1, Ordering::Relaxed);

        let identity = TermRelation::identity(idx);
        let mut seen = HashSet::from([identity]);
        let mut closure = vec![identity];

        for edge in &self.term_at(idx).parents {
            for inherited in self.ancestors(edge.parent) {
                if let Some(combined) = edge.combine(inherited) {
                    if seen.insert(combined) {
                        closure.push(combined);
                    }
                }
            }
        }

        closure
    }

    /// Distinct ancestor terms reached through an edge matching `types`.
    ///
    /// Order follows first appearance in the closure, so the term itself comes
    /// first whenever it matches.
    pub fn filtered_ancestors(&self, idx: TermIdx, types: &RelationSet) -> Vec<TermIdx> {
        let mut seen = HashSet::new();
        self.ancestors(idx)
            .iter()
            .filter(|tr| tr.of_any_type(types))
            .map(|tr| tr.parent)
            .filter(|parent| seen.insert(*parent))
            .collect()
    }

    /// Ancestors over is_a, part_of and occurs_in.
    pub fn slim_ancestors(&self, idx: TermIdx) -> Vec<TermIdx> {
        self.filtered_ancestors(idx, &RelationSet::slim_default())
    }

    /// Ancestors over any relation.
    pub fn all_ancestors(&self, idx: TermIdx) -> Vec<TermIdx> {
        self.filtered_ancestors(idx, &RelationSet::any())
    }

    /// Ancestor terms for a compact filter such as `"I=PO"`, cached under the
    /// literal filter string.
    ///
    /// A blank filter selects is_a, part_of and occurs_in. Strings naming the
    /// same set differently get separate cache entries.
    pub fn ancestry(&self, idx: TermIdx, codes: &str) -> Result<Arc<[TermIdx]>, RelationError> {
        let cache = &self.term_at(idx).ancestry;
        if let Some(hit) = read(cache).get(codes) {
            return Ok(Arc::clone(hit));
        }

        let types = if codes.trim().is_empty() {
            RelationSet::slim_default()
        } else {
            RelationSet::parse(codes)?
        };
        let computed: Arc<[TermIdx]> = self.filtered_ancestors(idx, &types).into();

        let mut cache = write(cache);
        let stored = cache.entry(codes.to_string()).or_insert(computed);
        Ok(Arc::clone(stored))
    }

    /// [`Ontology::ancestry`] keyed by the serialized form of `types`.
    ///
    /// Sets the filter string cannot express exactly (the empty set, the
    /// wildcard, has_part and the other unserialized kinds) are computed
    /// without caching.
    pub fn ancestry_for(
        &self,
        idx: TermIdx,
        types: &RelationSet,
    ) -> Result<Arc<[TermIdx]>, RelationError> {
        let codes = types.to_codes();
        if codes.is_empty() || RelationSet::parse(&codes)? != *types {
            return Ok(self.filtered_ancestors(idx, types).into());
        }
        self.ancestry(idx, &codes)
    }

    /// For each candidate, whether it is an ancestor of `idx` under `types`.
    pub fn ancestor_bits(
        &self,
        idx: TermIdx,
        candidates: &[TermIdx],
        types: &RelationSet,
    ) -> Vec<bool> {
        let ancestors: HashSet<TermIdx> =
            self.filtered_ancestors(idx, types).into_iter().collect();
        candidates.iter().map(|c| ancestors.contains(c)).collect()
    }

    /// Whether `candidate` appears anywhere in the closure of `idx`.
    pub fn has_ancestor(&self, idx: TermIdx, candidate: TermIdx) -> bool {
        self.ancestors(idx).iter().any(|tr| tr.parent == candidate)
    }

    /// Direct child edges over is_a, part_of and occurs_in.
    pub fn children(&self, idx: TermIdx) -> Vec<TermRelation> {
        let slim = RelationSet::slim_default();
        self.term_at(idx)
            .children
            .iter()
            .filter(|tr| tr.of_any_type(&slim))
            .copied()
            .collect()
    }

    /// Sorted ids of every ancestor reached through a non-negative relation.
    pub fn lineage(&self, idx: TermIdx) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .ancestors(idx)
            .iter()
            .filter(|tr| tr.relation.polarity() != Polarity::Negative)
            .map(|tr| self.term_at(tr.parent).id.as_str())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Compute every closure up front. Returns how many were computed by
    /// this pass.
    pub fn warm_up(&self) -> usize {
        let before = self.closure_computations();
        for term in &self.terms {
            self.ancestors(term.idx());
        }
        let computed = self.closure_computations() - before;
        info!(
            namespace = %self.namespace,
            terms = self.terms.len(),
            computed,
            "ancestor closures ready"
        );
        computed
    }

    /// Drop every memoized closure and filter result.
    pub fn clear_caches(&mut self) {
        for term in &mut self.terms {
            term.ancestors.take();
            term.ancestry
                .get_mut()
                .unwrap_or_else(PoisonError::into_inner)
                .clear();
        }
    }

    /// Number of closures computed since the ontology was built.
    pub fn closure_computations(&self) -> usize {
        self.closure_computations.load(Ordering::Relaxed)
    }
}

// Cached values are pure functions of the graph, so a poisoned lock still
// holds valid data.
fn read(
    lock: &RwLock<HashMap<String, Arc<[TermIdx]>>>,
) -> RwLockReadGuard<'_, HashMap<String, Arc<[TermIdx]>>> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write(
    lock: &RwLock<HashMap<String, Arc<[TermIdx]>>>,
) -> RwLockWriteGuard<'_, HashMap<String, Arc<[TermIdx]>>> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
