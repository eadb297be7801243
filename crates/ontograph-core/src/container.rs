//! A common view over anything that holds ontology terms.

use crate::ontology::Term;

/// Capability interface shared by whole ontologies and term sets, so that
/// rendering, export and statistics code can be written once.
pub trait TermContainer {
    /// What [`TermContainer::add_term`] accepts.
    type Member;

    /// Namespace of the ontology the terms come from (e.g. `GO`).
    fn namespace(&self) -> &str;

    fn term_count(&self) -> usize;

    fn terms(&self) -> Vec<&Term>;

    fn term_ids(&self) -> Vec<&str>;

    /// Look up a member by id.
    fn term(&self, id: &str) -> Option<&Term>;

    fn add_term(&mut self, member: Self::Member);
}
