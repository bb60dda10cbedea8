//! relmod Registry
//!
//! Stores named entity type declarations and their fields.

mod registry;

pub use registry::EntityRegistry;
