//! The owned model and its Draft/Validated state machine.

use relmod_core::{
    DiamondResolution, EdgeId, Entity, EntityId, FieldDecl, ModelResult, Multiplicity,
    RelationKind, RelationshipEdge,
};
use relmod_graph::{Edges, RelationshipGraph};
use relmod_lifecycle::{derive_ownership, destruction_cascade, Ownership};
use relmod_validator::{validate, ValidationReport, ValidatorConfig};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Model state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelState {
    /// Entities and edges may be added or removed.
    Draft,
    /// The current revision passed validation with zero errors.
    Validated,
}

/// An owned relationship model: entities, edges, resolutions and the
/// configuration used to validate them.
///
/// Every successful mutation starts a new revision and returns the model to
/// `Draft`. A `validate()` with zero errors marks the current revision as
/// `Validated`; the model stays mutable.
#[derive(Debug)]
pub struct Model {
    graph: RelationshipGraph,
    config: ValidatorConfig,
    revision: u64,
    /// Revision + 1 of the last clean validation, 0 if none.
    validated_at: AtomicU64,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// Create an empty model with the default validator configuration.
    pub fn new() -> Self {
        Self::with_config(ValidatorConfig::default())
    }

    /// Create an empty model with a validator configuration.
    pub fn with_config(config: ValidatorConfig) -> Self {
        Self {
            graph: RelationshipGraph::new(),
            config,
            revision: 0,
            validated_at: AtomicU64::new(0),
        }
    }

    /// Get the validator configuration.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Replace the validator configuration. The model returns to Draft.
    pub fn set_config(&mut self, config: ValidatorConfig) {
        self.config = config;
        self.touch();
    }

    /// Get a reference to the graph.
    pub fn graph(&self) -> &RelationshipGraph {
        &self.graph
    }

    /// Current revision; bumped by every successful mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // ==================== Construction ====================

    pub fn declare(
        &mut self,
        name: impl Into<String>,
        fields: Vec<FieldDecl>,
    ) -> ModelResult<EntityId> {
        let id = self.graph.declare(name, fields)?;
        self.touch();
        Ok(id)
    }

    pub fn remove(&mut self, name: &str) -> ModelResult<Entity> {
        let entity = self.graph.remove(name)?;
        self.touch();
        Ok(entity)
    }

    pub fn lookup(&self, name: &str) -> ModelResult<&Entity> {
        self.graph.lookup(name)
    }

    pub fn add_edge(
        &mut self,
        source: &str,
        target: &str,
        kind: RelationKind,
        multiplicity: Option<Multiplicity>,
    ) -> ModelResult<EdgeId> {
        let id = self.graph.add_edge(source, target, kind, multiplicity)?;
        self.touch();
        Ok(id)
    }

    pub fn remove_edge(&mut self, id: EdgeId) -> ModelResult<RelationshipEdge> {
        let edge = self.graph.remove_edge(id)?;
        self.touch();
        Ok(edge)
    }

    pub fn resolve_diamond(
        &mut self,
        ancestor: &str,
        resolution: DiamondResolution,
    ) -> ModelResult<()> {
        self.graph.resolve_diamond(ancestor, resolution)?;
        self.touch();
        Ok(())
    }

    pub fn clear_resolution(&mut self, ancestor: &str) -> ModelResult<Option<DiamondResolution>> {
        let previous = self.graph.clear_resolution(ancestor)?;
        self.touch();
        Ok(previous)
    }

    pub fn edges_from(&self, name: &str) -> Edges<'_> {
        self.graph.edges_from(name)
    }

    pub fn edges_to(&self, name: &str) -> Edges<'_> {
        self.graph.edges_to(name)
    }

    /// Drop every entity, edge and resolution. The configuration is kept.
    pub fn reset(&mut self) {
        self.graph.clear();
        self.touch();
        debug!(revision = self.revision, "model reset");
    }

    // ==================== Derived views ====================

    pub fn derive_ownership(&self) -> Ownership {
        derive_ownership(&self.graph)
    }

    pub fn destruction_cascade(&self, name: &str) -> ModelResult<Vec<String>> {
        destruction_cascade(&self.graph, name)
    }

    /// Validate the current state. Always re-evaluates; never reuses a report.
    pub fn validate(&self) -> ValidationReport {
        let report = validate(&self.graph, &self.config);
        let stamp = if report.is_valid() { self.revision + 1 } else { 0 };
        self.validated_at.store(stamp, Ordering::Release);
        report
    }

    pub fn state(&self) -> ModelState {
        if self.validated_at.load(Ordering::Acquire) == self.revision + 1 {
            ModelState::Validated
        } else {
            ModelState::Draft
        }
    }

    pub fn is_validated(&self) -> bool {
        self.state() == ModelState::Validated
    }

    /// Validate and, when there are zero errors, take a read-only snapshot.
    pub fn snapshot(&self) -> Result<ValidatedModel, ValidationReport> {
        let report = self.validate();
        if report.has_errors() {
            return Err(report);
        }
        Ok(ValidatedModel {
            ownership: derive_ownership(&self.graph),
            graph: self.graph.clone(),
            report,
            revision: self.revision,
        })
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}

/// Read-only snapshot of a model that validated with zero errors.
#[derive(Debug, Clone)]
pub struct ValidatedModel {
    graph: RelationshipGraph,
    ownership: Ownership,
    report: ValidationReport,
    revision: u64,
}

impl ValidatedModel {
    pub fn graph(&self) -> &RelationshipGraph {
        &self.graph
    }

    pub fn ownership(&self) -> &Ownership {
        &self.ownership
    }

    /// The report that accepted this snapshot; may hold Info findings.
    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    /// Model revision the snapshot was taken at.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
