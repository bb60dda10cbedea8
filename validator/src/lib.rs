//! relmod Validator
//!
//! Consistency checks over a relationship graph.
//!
//! Responsibilities:
//! - Detect composition and inheritance cycles
//! - Reject self-aggregation
//! - Note one-way friendship when mutual friendship is requested
//! - Require a resolution for every diamond the lifecycle rules flag
//! - Collect everything into a cumulative report

mod checker;
mod config;
mod finding;

pub use checker::{validate, Validator};
pub use config::ValidatorConfig;
pub use finding::{Finding, FindingCode, Severity, ValidationReport};
