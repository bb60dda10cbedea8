//! Relationship kinds, multiplicities and the edge structure.

use crate::{EdgeId, EntityId, ModelError, ModelResult};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The kind of a relationship edge. Kinds are mutually exclusive per edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationKind {
    /// No ownership or lifecycle dependency.
    Association,
    /// Weak ownership: the part outlives the owner.
    Aggregation,
    /// Strong ownership: the part is destroyed with the owner.
    Composition,
    /// Source is derived from target.
    Inheritance,
    /// One-directional grant of privileged access.
    Friendship,
}

impl RelationKind {
    pub const ALL: [RelationKind; 5] = [
        RelationKind::Association,
        RelationKind::Aggregation,
        RelationKind::Composition,
        RelationKind::Inheritance,
        RelationKind::Friendship,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::Association => "association",
            RelationKind::Aggregation => "aggregation",
            RelationKind::Composition => "composition",
            RelationKind::Inheritance => "inheritance",
            RelationKind::Friendship => "friendship",
        }
    }

    /// Whether edges of this kind carry ownership semantics.
    pub fn is_ownership(&self) -> bool {
        matches!(self, RelationKind::Aggregation | RelationKind::Composition)
    }

    /// Check a supplied multiplicity against this kind and return the one to store.
    ///
    /// Association and Aggregation require one. Composition accepts OneToOne or
    /// OneToMany and defaults to OneToOne. Inheritance and Friendship take none.
    pub fn check_multiplicity(
        &self,
        multiplicity: Option<Multiplicity>,
    ) -> ModelResult<Option<Multiplicity>> {
        match (self, multiplicity) {
            (RelationKind::Association | RelationKind::Aggregation, Some(m)) => Ok(Some(m)),
            (RelationKind::Association | RelationKind::Aggregation, None) => Err(
                ModelError::invalid_multiplicity(*self, None, "multiplicity is required"),
            ),
            (RelationKind::Composition, None) => Ok(Some(Multiplicity::OneToOne)),
            (RelationKind::Composition, Some(m)) if m.is_single_owner() => Ok(Some(m)),
            (RelationKind::Composition, Some(m)) => Err(ModelError::invalid_multiplicity(
                *self,
                Some(m),
                "a composed part belongs to exactly one owner",
            )),
            (RelationKind::Inheritance | RelationKind::Friendship, None) => Ok(None),
            (RelationKind::Inheritance | RelationKind::Friendship, Some(m)) => Err(
                ModelError::invalid_multiplicity(*self, Some(m), "multiplicity is not applicable"),
            ),
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RelationKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown relationship kind: {}", s))
    }
}

/// Edge multiplicity, read from source to target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Multiplicity {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

impl Multiplicity {
    pub const ALL: [Multiplicity; 4] = [
        Multiplicity::OneToOne,
        Multiplicity::OneToMany,
        Multiplicity::ManyToOne,
        Multiplicity::ManyToMany,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Multiplicity::OneToOne => "one-to-one",
            Multiplicity::OneToMany => "one-to-many",
            Multiplicity::ManyToOne => "many-to-one",
            Multiplicity::ManyToMany => "many-to-many",
        }
    }

    /// True when the source side is "one".
    pub fn is_single_owner(&self) -> bool {
        matches!(self, Multiplicity::OneToOne | Multiplicity::OneToMany)
    }
}

impl fmt::Display for Multiplicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Multiplicity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Multiplicity::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown multiplicity: {}", s))
    }
}

/// Client-supplied resolution for a diamond-shaped inheritance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiamondResolution {
    /// One shared instance of the ancestor (virtual base).
    VirtualShared,
    /// One instance of the ancestor per inheritance path.
    Duplicated,
}

impl DiamondResolution {
    pub const ALL: [DiamondResolution; 2] =
        [DiamondResolution::VirtualShared, DiamondResolution::Duplicated];

    pub fn as_str(&self) -> &'static str {
        match self {
            DiamondResolution::VirtualShared => "virtual-shared",
            DiamondResolution::Duplicated => "duplicated",
        }
    }
}

impl fmt::Display for DiamondResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiamondResolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DiamondResolution::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown diamond resolution: {}", s))
    }
}

/// A directed, typed relationship edge between two entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationshipEdge {
    /// Unique identifier for this edge.
    pub id: EdgeId,
    /// Owner, derived type, or grantor.
    pub source: EntityId,
    /// Part, base type, or grantee.
    pub target: EntityId,
    /// Relationship kind.
    pub kind: RelationKind,
    /// Multiplicity (None for Inheritance and Friendship).
    pub multiplicity: Option<Multiplicity>,
}

impl RelationshipEdge {
    pub fn new(
        id: EdgeId,
        source: EntityId,
        target: EntityId,
        kind: RelationKind,
        multiplicity: Option<Multiplicity>,
    ) -> Self {
        Self {
            id,
            source,
            target,
            kind,
            multiplicity,
        }
    }

    /// Check if this edge touches an entity at either end.
    pub fn involves(&self, entity: EntityId) -> bool {
        self.source == entity || self.target == entity
    }

    /// Returns true if the edge points back at its own source.
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}
