//! relmod Core Types
//!
//! This crate provides the foundational types used throughout relmod:
//! - Identity types (EntityId, EdgeId)
//! - Entity declarations (Entity, FieldDecl)
//! - Relationship kinds, multiplicities and edges
//! - Common error types

mod entity;
mod error;
mod id;
mod relation;

pub use entity::*;
pub use error::*;
pub use id::*;
pub use relation::*;
