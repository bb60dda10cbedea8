//! relmod Lifecycle
//!
//! Derive ownership and destruction obligations from a relationship graph.
//!
//! Responsibilities:
//! - Map Composition/Aggregation edges to ownership records
//! - Order construction and destruction along inheritance lineages
//! - Flag diamond-shaped inheritance without resolving it
//! - Compute composition destruction cascades

mod lineage;
mod ownership;

pub use lineage::{ConstructionOrder, DiamondDetected, Lineage};
pub use ownership::{derive_ownership, destruction_cascade, Ownership, OwnershipRecord};
