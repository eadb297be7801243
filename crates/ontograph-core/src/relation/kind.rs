//! The relation-type vocabulary.
//!
//! Every edge in the ontology is labelled with one of these kinds. Each kind
//! has a single-character primary code (used in compact filter strings such as
//! `"I=PO"`), a human description, a formal OBO-style name, and optionally an
//! alternative code accepted on lookup.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::RelationError;
use super::RelationSet;

/// Direction in which a relation may propagate through an ancestor closure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Unidirectional from child to parent
    Positive,
    /// Unidirectional from parent to child
    Negative,
    /// Non-directional
    Neutral,
    /// Bi-directional
    Bipolar,
}

/// A kind of edge between two ontology terms.
///
/// The declaration order is significant: it is the iteration order of
/// [`RelationSet`] and the order in which [`RelationType::by_code`] tries
/// each kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationType {
    /// Wildcard used in queries; never labels a stored edge
    #[serde(rename = "ancestor")]
    Undefined,
    /// A term related to itself (the zero-length path)
    #[serde(rename = "equals")]
    Identity,
    IsA,
    PartOf,
    Regulates,
    PositivelyRegulates,
    NegativelyRegulates,
    /// Obsolescence metadata, not ancestry
    ReplacedBy,
    /// Obsolescence metadata, not ancestry
    Consider,
    HasPart,
    OccursIn,
    UsedIn,
    CapableOf,
    CapableOfPartOf,
}

impl RelationType {
    /// All kinds, in declaration order.
    pub const ALL: [RelationType; 14] = [
        RelationType::Undefined,
        RelationType::Identity,
        RelationType::IsA,
        RelationType::PartOf,
        RelationType::Regulates,
        RelationType::PositivelyRegulates,
        RelationType::NegativelyRegulates,
        RelationType::ReplacedBy,
        RelationType::Consider,
        RelationType::HasPart,
        RelationType::OccursIn,
        RelationType::UsedIn,
        RelationType::CapableOf,
        RelationType::CapableOfPartOf,
    ];

    /// Single-character primary code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Undefined => "?",
            Self::Identity => "=",
            Self::IsA => "I",
            Self::PartOf => "P",
            Self::Regulates => "R",
            Self::PositivelyRegulates => "+",
            Self::NegativelyRegulates => "-",
            Self::ReplacedBy => ">",
            Self::Consider => "~",
            Self::HasPart => "H",
            Self::OccursIn => "O",
            Self::UsedIn => "U",
            Self::CapableOf => "C",
            Self::CapableOfPartOf => "<",
        }
    }

    /// Human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Undefined => "Ancestor",
            Self::Identity => "Identity",
            Self::IsA => "Is a",
            Self::PartOf => "Part of",
            Self::Regulates => "Regulates",
            Self::PositivelyRegulates => "Positively regulates",
            Self::NegativelyRegulates => "Negatively regulates",
            Self::ReplacedBy => "Replaced by",
            Self::Consider => "Consider",
            Self::HasPart => "Has part",
            Self::OccursIn => "Occurs in",
            Self::UsedIn => "Used in",
            Self::CapableOf => "Capable of",
            Self::CapableOfPartOf => "Capable of part of",
        }
    }

    /// Formal (OBO) relation name.
    pub fn formal_name(&self) -> &'static str {
        match self {
            Self::Undefined => "ancestor",
            Self::Identity => "equals",
            Self::IsA => "is_a",
            Self::PartOf => "part_of",
            Self::Regulates => "regulates",
            Self::PositivelyRegulates => "positively_regulates",
            Self::NegativelyRegulates => "negatively_regulates",
            Self::ReplacedBy => "replaced_by",
            Self::Consider => "consider",
            Self::HasPart => "has_part",
            Self::OccursIn => "occurs_in",
            Self::UsedIn => "used_in",
            Self::CapableOf => "capable_of",
            Self::CapableOfPartOf => "capable_of_part_of",
        }
    }

    /// Alternative code accepted by [`RelationType::by_code`], if any.
    pub fn alias(&self) -> Option<&'static str> {
        match self {
            Self::PositivelyRegulates => Some("PR"),
            Self::NegativelyRegulates => Some("NR"),
            Self::ReplacedBy => Some("replaced_by"),
            Self::Consider => Some("consider"),
            Self::OccursIn => Some("OI"),
            Self::UsedIn => Some("UI"),
            Self::CapableOf => Some("CO"),
            Self::CapableOfPartOf => Some("CP"),
            _ => None,
        }
    }

    pub fn polarity(&self) -> Polarity {
        match self {
            Self::HasPart => Polarity::Negative,
            _ => Polarity::Positive,
        }
    }

    /// Whether this kind may take part in an ancestor closure at all.
    pub fn is_ancestry(&self) -> bool {
        !matches!(self, Self::Undefined | Self::ReplacedBy | Self::Consider)
    }

    /// Whether this kind records term obsolescence rather than ancestry.
    pub fn is_obsolescence(&self) -> bool {
        matches!(self, Self::ReplacedBy | Self::Consider)
    }

    /// One of the regulates family (plain or signed).
    pub fn is_regulation(&self) -> bool {
        matches!(
            self,
            Self::Regulates | Self::PositivelyRegulates | Self::NegativelyRegulates
        )
    }

    /// Look up a kind by primary code, description, formal name, or alias.
    pub fn by_code(token: &str) -> Result<RelationType, RelationError> {
        Self::ALL
            .iter()
            .copied()
            .find(|rt| {
                rt.code() == token
                    || rt.description() == token
                    || rt.formal_name() == token
                    || rt.alias() == Some(token)
            })
            .ok_or_else(|| RelationError::UnknownRelation(token.to_string()))
    }

    /// Whether an edge of this kind satisfies a query for `query`.
    ///
    /// `Undefined` matches everything, identity edges match every query, and
    /// a plain `Regulates` query also accepts the signed variants.
    pub fn of_type(&self, query: RelationType) -> bool {
        query == Self::Undefined
            || *self == Self::Identity
            || query == *self
            || (query == Self::Regulates
                && matches!(self, Self::PositivelyRegulates | Self::NegativelyRegulates))
    }

    pub fn of_any_type(&self, types: &RelationSet) -> bool {
        types.iter().any(|query| self.of_type(query))
    }

    /// Compose `self` (child to mid) with `next` (mid to ancestor).
    ///
    /// Returns `None` when the path does not yield a valid ancestry relation.
    pub fn combine(self, next: RelationType) -> Option<RelationType> {
        use RelationType::*;

        if !self.is_ancestry() || !next.is_ancestry() {
            return None;
        }

        match (self, next) {
            (Identity, other) | (other, Identity) => Some(other),

            // has_part never propagates beyond the direct edge
            (HasPart, _) | (_, HasPart) => None,

            (IsA, other) | (other, IsA) => Some(other),

            (PartOf, PartOf) => Some(PartOf),
            (OccursIn, PartOf) => Some(OccursIn),
            (reg, PartOf) if reg.is_regulation() => Some(Regulates),

            (Regulates, reg) | (reg, Regulates) if reg.is_regulation() => Some(Regulates),
            (PositivelyRegulates, PositivelyRegulates)
            | (NegativelyRegulates, NegativelyRegulates) => Some(PositivelyRegulates),
            (PositivelyRegulates, NegativelyRegulates)
            | (NegativelyRegulates, PositivelyRegulates) => Some(NegativelyRegulates),

            _ => None,
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.formal_name())
    }
}

impl FromStr for RelationType {
    type Err = RelationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::by_code(s)
    }
}
