//! Named, colour-tagged collections of terms.
//!
//! A [`TermSet`] borrows the [`Ontology`] whose terms it lists; it never owns
//! them. Sets are typically built from loosely formatted user input (bulk id
//! strings) and shipped around as compact codec strings, see [`codec`].

pub mod codec;

pub use codec::CodecError;

use regex::Regex;
use std::collections::BTreeMap;
use std::ptr;
use std::sync::OnceLock;

use tracing::debug;

use crate::container::TermContainer;
use crate::ontology::{Ontology, Term, TermIdx};

/// Runs of anything other than id characters and the `#` colour marker.
pub const ID_SEPARATOR: &str = r"[^-A-Za-z0-9#:]+";

fn separator() -> Option<&'static Regex> {
    static SEPARATOR: OnceLock<Option<Regex>> = OnceLock::new();
    SEPARATOR.get_or_init(|| Regex::new(ID_SEPARATOR).ok()).as_ref()
}

#[derive(Debug, Clone)]
struct Member {
    idx: TermIdx,
    colour: String,
}

/// An ordered, deduplicated set of terms from one ontology.
///
/// Members are kept in id order. Each member carries an opaque colour string
/// (empty unless the input named one).
#[derive(Debug, Clone)]
pub struct TermSet<'o> {
    ontology: &'o Ontology,
    name: Option<String>,
    colour: u32,
    contents: BTreeMap<&'o str, Member>,
}

impl<'o> TermSet<'o> {
    pub fn new(ontology: &'o Ontology) -> Self {
        Self {
            ontology,
            name: None,
            colour: 1,
            contents: BTreeMap::new(),
        }
    }

    pub fn named(ontology: &'o Ontology, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new(ontology)
        }
    }

    pub fn with_colour(mut self, colour: u32) -> Self {
        self.colour = colour;
        self
    }

    pub fn ontology(&self) -> &'o Ontology {
        self.ontology
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set-level colour, used when several sets are displayed together.
    pub fn colour(&self) -> u32 {
        self.colour
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.contents.contains_key(id)
    }

    /// The colour tag of a member, or `None` if `id` is not a member.
    pub fn colour_of(&self, id: &str) -> Option<&str> {
        self.contents.get(id).map(|m| m.colour.as_str())
    }

    /// Members in id order.
    pub fn iter(&self) -> impl Iterator<Item = &'o Term> + '_ {
        self.contents
            .values()
            .map(|m| self.ontology.term_at(m.idx))
    }

    pub fn indices(&self) -> Vec<TermIdx> {
        self.contents.values().map(|m| m.idx).collect()
    }

    /// Add a term with no colour. Re-adding a member clears its colour.
    ///
    /// A term from another ontology is matched to this set's ontology by id,
    /// and skipped if the id is unknown here.
    pub fn add(&mut self, term: &'o Term) {
        match self.own(term) {
            Some(own) => self.insert(own, String::new()),
            None => debug!(id = %term.id, "term belongs to another ontology, skipping"),
        }
    }

    fn own(&self, term: &'o Term) -> Option<&'o Term> {
        let ontology = self.ontology;
        match ontology.terms.get(term.idx().index()) {
            Some(own) if ptr::eq(own, term) => Some(own),
            _ => ontology.term(&term.id),
        }
    }

    pub fn remove(&mut self, term: &Term) -> bool {
        self.contents.remove(term.id.as_str()).is_some()
    }

    /// Add one `id[#colour]` token. Ids unknown to the ontology are skipped.
    pub fn add_id(&mut self, token: &str) {
        self.apply(token, true);
    }

    /// Add the term whose codec code is `code`, if the ontology has one.
    pub fn add_code(&mut self, code: u32) {
        let ontology = self.ontology;
        match ontology.term_by_code(code) {
            Some(term) => self.add(term),
            None => debug!(code, "no term with code, skipping"),
        }
    }

    /// Add every token found in free-form id strings.
    ///
    /// Tokens are separated by anything other than letters, digits, `-`, `:`
    /// and `#`; unknown ids are skipped.
    pub fn add_all<S: AsRef<str>>(&mut self, inputs: &[S]) {
        self.apply_all(inputs, true);
    }

    /// Remove every token found in free-form id strings, tokenized as in
    /// [`TermSet::add_all`].
    pub fn remove_all<S: AsRef<str>>(&mut self, inputs: &[S]) {
        self.apply_all(inputs, false);
    }

    fn apply_all<S: AsRef<str>>(&mut self, inputs: &[S], add: bool) {
        let Some(separator) = separator() else {
            return;
        };
        for input in inputs {
            for token in separator.split(input.as_ref()) {
                if !token.is_empty() {
                    self.apply(token, add);
                }
            }
        }
    }

    fn apply(&mut self, token: &str, add: bool) {
        let mut parts = token.split('#');
        let id = parts.next().unwrap_or_default();
        let ontology = self.ontology;
        let Some(term) = ontology.term(id) else {
            debug!(token, "unresolved term id, skipping");
            return;
        };
        if add {
            let colour = parts.next().unwrap_or_default();
            self.insert(term, colour.to_string());
        } else {
            self.contents.remove(term.id.as_str());
        }
    }

    fn insert(&mut self, term: &'o Term, colour: String) {
        self.contents.insert(
            term.id.as_str(),
            Member {
                idx: term.idx(),
                colour,
            },
        );
    }

    pub fn clear(&mut self) {
        self.contents.clear();
    }

    /// Member ids, each followed by a single space.
    pub fn id_list(&self) -> String {
        self.contents.keys().map(|id| format!("{id} ")).collect()
    }

    /// Decode a compact string (either format) and add the terms it names.
    ///
    /// Nothing is added if the string is malformed.
    pub fn add_compressed(&mut self, encoded: &str) -> Result<(), CodecError> {
        for code in codec::decode(encoded)? {
            self.add_code(code);
        }
        Ok(())
    }

    /// Encode the members in the current compact format.
    ///
    /// Members without a code are left out.
    pub fn compressed(&self) -> Result<String, CodecError> {
        codec::encode(self.iter().filter_map(|t| t.code))
    }
}

impl<'o> TermContainer for TermSet<'o> {
    type Member = &'o Term;

    fn namespace(&self) -> &str {
        self.ontology.namespace()
    }

    fn term_count(&self) -> usize {
        self.contents.len()
    }

    fn terms(&self) -> Vec<&Term> {
        self.iter().collect()
    }

    fn term_ids(&self) -> Vec<&str> {
        self.contents.keys().copied().collect()
    }

    fn term(&self, id: &str) -> Option<&Term> {
        self.contents
            .get(id)
            .map(|m| self.ontology.term_at(m.idx))
    }

    fn add_term(&mut self, member: &'o Term) {
        self.add(member);
    }
}
