//! Entity structures for relmod.
//!
//! An entity is a named type declaration with an ordered list of fields.

use crate::EntityId;
use serde::Serialize;

/// A single field declaration: a name and a semantic type tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDecl {
    /// Field name.
    pub name: String,
    /// Semantic type tag (e.g. "Int", "Engine", "String").
    pub type_tag: String,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, type_tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_tag: type_tag.into(),
        }
    }
}

/// A declared entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// Unique, case-sensitive name.
    pub name: String,
    /// Field declarations in declaration order.
    pub fields: Vec<FieldDecl>,
}

impl Entity {
    /// Create a new entity with the given properties.
    pub fn new(id: EntityId, name: impl Into<String>, fields: Vec<FieldDecl>) -> Self {
        Self {
            id,
            name: name.into(),
            fields,
        }
    }

    /// Get a field declaration by name.
    pub fn get_field(&self, name: &str) -> Option<&FieldDecl> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Check if this entity declares a field.
    pub fn has_field(&self, name: &str) -> bool {
        self.get_field(name).is_some()
    }

    /// Get all field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }
}
