//! relmod Session
//!
//! The owned model callers build, validate and snapshot:
//! - `Model`: construction API plus the Draft/Validated state machine
//! - `SharedModel`: the same model behind a reader/writer lock
//! - `Script`: line-oriented textual model loading

mod error;
mod model;
mod script;
mod shared;

pub use error::{ScriptError, ScriptResult};
pub use model::{Model, ModelState, ValidatedModel};
pub use script::{Script, Statement};
pub use shared::SharedModel;
