//! relmod Relationship Graph
//!
//! This crate provides the relationship graph with indexed access:
//! - Entity declarations (through the owned registry)
//! - Typed, directed edge storage in insertion order
//! - Adjacency index: edges from/to an entity
//! - Kind index: edges of one relationship kind
//! - Diamond resolution markers

mod graph;
mod index;

pub use graph::*;
