//! Lock-guarded model handle for concurrent callers.

use parking_lot::{RwLock, RwLockReadGuard};
use relmod_core::{
    DiamondResolution, EdgeId, Entity, EntityId, FieldDecl, ModelResult, Multiplicity,
    RelationKind, RelationshipEdge,
};
use relmod_lifecycle::Ownership;
use relmod_validator::ValidationReport;
use std::sync::Arc;

use crate::model::{Model, ModelState, ValidatedModel};

/// A cloneable handle to one model behind a single reader/writer lock.
///
/// Each mutation holds the write lock for its whole duration. Validation and
/// other read-only passes share the read lock, so they always observe a
/// consistent snapshot and never run alongside a mutation.
#[derive(Debug, Clone, Default)]
pub struct SharedModel {
    inner: Arc<RwLock<Model>>,
}

impl SharedModel {
    pub fn new(model: Model) -> Self {
        Self {
            inner: Arc::new(RwLock::new(model)),
        }
    }

    /// Hold the read lock for a batch of read-only calls.
    pub fn read(&self) -> RwLockReadGuard<'_, Model> {
        self.inner.read()
    }

    pub fn declare(&self, name: impl Into<String>, fields: Vec<FieldDecl>) -> ModelResult<EntityId> {
        self.inner.write().declare(name, fields)
    }

    pub fn remove(&self, name: &str) -> ModelResult<Entity> {
        self.inner.write().remove(name)
    }

    pub fn lookup(&self, name: &str) -> ModelResult<Entity> {
        self.inner.read().lookup(name).cloned()
    }

    pub fn add_edge(
        &self,
        source: &str,
        target: &str,
        kind: RelationKind,
        multiplicity: Option<Multiplicity>,
    ) -> ModelResult<EdgeId> {
        self.inner
            .write()
            .add_edge(source, target, kind, multiplicity)
    }

    pub fn remove_edge(&self, id: EdgeId) -> ModelResult<RelationshipEdge> {
        self.inner.write().remove_edge(id)
    }

    pub fn resolve_diamond(&self, ancestor: &str, resolution: DiamondResolution) -> ModelResult<()> {
        self.inner.write().resolve_diamond(ancestor, resolution)
    }

    pub fn reset(&self) {
        self.inner.write().reset();
    }

    pub fn validate(&self) -> ValidationReport {
        self.inner.read().validate()
    }

    pub fn derive_ownership(&self) -> Ownership {
        self.inner.read().derive_ownership()
    }

    pub fn snapshot(&self) -> Result<ValidatedModel, ValidationReport> {
        self.inner.read().snapshot()
    }

    pub fn state(&self) -> ModelState {
        self.inner.read().state()
    }
}
