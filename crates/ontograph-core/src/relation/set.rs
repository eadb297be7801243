//! Compact sets of relation types and their filter-string form.

use std::fmt;
use std::str::FromStr;

use super::error::RelationError;
use super::RelationType;

/// Kinds emitted by [`RelationSet::to_codes`], in emission order.
///
/// Filter strings already persisted elsewhere were produced from this list,
/// so kinds outside it are dropped when serializing.
const SERIALIZABLE: [RelationType; 8] = [
    RelationType::IsA,
    RelationType::Identity,
    RelationType::PartOf,
    RelationType::OccursIn,
    RelationType::Regulates,
    RelationType::PositivelyRegulates,
    RelationType::NegativelyRegulates,
    RelationType::UsedIn,
];

/// A set of [`RelationType`]s, stored as a bitmask.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RelationSet {
    bits: u16,
}

impl RelationSet {
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// The set used for slim computations and for blank filters:
    /// is_a, part_of and occurs_in.
    pub fn slim_default() -> Self {
        [RelationType::IsA, RelationType::PartOf, RelationType::OccursIn]
            .into_iter()
            .collect()
    }

    /// The wildcard set that matches every edge.
    pub fn any() -> Self {
        Self::of(RelationType::Undefined)
    }

    pub fn of(relation: RelationType) -> Self {
        let mut set = Self::empty();
        set.insert(relation);
        set
    }

    /// Parse a compact filter string, one relation code per character.
    ///
    /// Any character that is not a known code fails the whole parse.
    pub fn parse(codes: &str) -> Result<Self, RelationError> {
        let mut set = Self::empty();
        let mut buf = [0u8; 4];
        for c in codes.chars() {
            set.insert(RelationType::by_code(c.encode_utf8(&mut buf))?);
        }
        Ok(set)
    }

    /// Serialize back to a filter string.
    ///
    /// Only is_a, identity, part_of, occurs_in, the three regulates kinds and
    /// used_in are emitted; any other member is silently omitted.
    pub fn to_codes(&self) -> String {
        SERIALIZABLE
            .iter()
            .filter(|rt| self.contains(**rt))
            .map(|rt| rt.code())
            .collect()
    }

    fn bit(relation: RelationType) -> u16 {
        1 << (relation as u16)
    }

    pub fn contains(&self, relation: RelationType) -> bool {
        self.bits & Self::bit(relation) != 0
    }

    /// Returns true if the relation was not already present.
    pub fn insert(&mut self, relation: RelationType) -> bool {
        let absent = !self.contains(relation);
        self.bits |= Self::bit(relation);
        absent
    }

    pub fn remove(&mut self, relation: RelationType) -> bool {
        let present = self.contains(relation);
        self.bits &= !Self::bit(relation);
        present
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Members in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = RelationType> + '_ {
        RelationType::ALL
            .iter()
            .copied()
            .filter(move |rt| self.contains(*rt))
    }
}

impl FromStr for RelationSet {
    type Err = RelationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl FromIterator<RelationType> for RelationSet {
    fn from_iter<I: IntoIterator<Item = RelationType>>(iter: I) -> Self {
        let mut set = Self::empty();
        set.extend(iter);
        set
    }
}

impl Extend<RelationType> for RelationSet {
    fn extend<I: IntoIterator<Item = RelationType>>(&mut self, iter: I) {
        for relation in iter {
            self.insert(relation);
        }
    }
}

impl fmt::Debug for RelationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
