//! Relationship graph storage.

use crate::index::{AdjacencyIndex, KindIndex};
use relmod_core::{
    DiamondResolution, EdgeId, Entity, EntityId, FieldDecl, ModelError, ModelResult,
    Multiplicity, RelationKind, RelationshipEdge,
};
use relmod_registry::EntityRegistry;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// The in-memory relationship graph.
///
/// Owns the entity registry so that every edge endpoint is a declared entity
/// and removing an entity can cascade to the edges touching it.
#[derive(Debug, Clone)]
pub struct RelationshipGraph {
    /// Entity declarations
    registry: EntityRegistry,
    /// Edge storage (ordered by id, which is insertion order)
    edges: BTreeMap<EdgeId, RelationshipEdge>,
    /// Next edge ID to allocate
    next_edge_id: u64,
    /// Adjacency index
    adj_index: AdjacencyIndex,
    /// Kind index
    kind_index: KindIndex,
    /// Diamond resolutions by ancestor
    resolutions: HashMap<EntityId, DiamondResolution>,
}

impl Default for RelationshipGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl RelationshipGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self {
            registry: EntityRegistry::new(),
            edges: BTreeMap::new(),
            next_edge_id: 1,
            adj_index: AdjacencyIndex::new(),
            kind_index: KindIndex::new(),
            resolutions: HashMap::new(),
        }
    }

    /// Get the entity registry.
    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    // ==================== Entity Operations ====================

    /// Declare a new entity.
    pub fn declare(
        &mut self,
        name: impl Into<String>,
        fields: Vec<FieldDecl>,
    ) -> ModelResult<EntityId> {
        self.registry.declare(name, fields)
    }

    /// Get an entity by name.
    pub fn lookup(&self, name: &str) -> ModelResult<&Entity> {
        self.registry.lookup(name)
    }

    /// Get the name of an entity by ID.
    pub fn entity_name(&self, id: EntityId) -> Option<&str> {
        self.registry.name_of(id)
    }

    /// Remove an entity, all edges touching it, and any resolution recorded for it.
    pub fn remove(&mut self, name: &str) -> ModelResult<Entity> {
        let id = self
            .registry
            .get_id(name)
            .ok_or_else(|| ModelError::unknown_entity(name))?;

        let edges_to_delete = self.adj_index.edges_involving(id);
        if !edges_to_delete.is_empty() {
            warn!(entity = %name, edges = edges_to_delete.len(), "cascading edge removal");
        }
        for edge_id in edges_to_delete {
            self.remove_edge(edge_id)?;
        }
        self.resolutions.remove(&id);

        self.registry.remove(name)
    }

    // ==================== Edge Operations ====================

    /// Create a new edge between two declared entities.
    ///
    /// Fails with `UnknownEntity` when an endpoint is undeclared and with
    /// `InvalidMultiplicity` when the multiplicity does not fit the kind.
    pub fn add_edge(
        &mut self,
        source: &str,
        target: &str,
        kind: RelationKind,
        multiplicity: Option<Multiplicity>,
    ) -> ModelResult<EdgeId> {
        let source_id = self.registry.lookup(source)?.id;
        let target_id = self.registry.lookup(target)?.id;
        let multiplicity = kind.check_multiplicity(multiplicity)?;

        let id = EdgeId::new(self.next_edge_id);
        self.next_edge_id += 1;
        let edge = RelationshipEdge::new(id, source_id, target_id, kind, multiplicity);

        self.adj_index.insert(&edge);
        self.kind_index.insert(kind, id);
        self.edges.insert(id, edge);

        debug!(edge = %id, %source, %target, %kind, "added edge");
        Ok(id)
    }

    /// Remove an edge by ID.
    pub fn remove_edge(&mut self, id: EdgeId) -> ModelResult<RelationshipEdge> {
        let edge = self.edges.remove(&id).ok_or(ModelError::UnknownEdge(id))?;

        self.adj_index.remove(&edge);
        self.kind_index.remove(edge.kind, id);

        debug!(edge = %id, kind = %edge.kind, "removed edge");
        Ok(edge)
    }

    /// Get an edge by ID.
    pub fn edge(&self, id: EdgeId) -> Option<&RelationshipEdge> {
        self.edges.get(&id)
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &RelationshipEdge> {
        self.edges.values()
    }

    /// Edges of one kind in insertion order.
    pub fn edges_of_kind(&self, kind: RelationKind) -> impl Iterator<Item = &RelationshipEdge> {
        self.kind_index
            .get(kind)
            .filter_map(move |id| self.edges.get(&id))
    }

    /// Edges leaving the named entity, in insertion order.
    ///
    /// An undeclared name yields an empty sequence.
    pub fn edges_from(&self, name: &str) -> Edges<'_> {
        match self.registry.get_id(name) {
            Some(id) => self.outgoing(id),
            None => Edges::empty(&self.edges),
        }
    }

    /// Edges arriving at the named entity, in insertion order.
    pub fn edges_to(&self, name: &str) -> Edges<'_> {
        match self.registry.get_id(name) {
            Some(id) => self.incoming(id),
            None => Edges::empty(&self.edges),
        }
    }

    /// Edges leaving an entity by ID.
    pub fn outgoing(&self, id: EntityId) -> Edges<'_> {
        Edges::new(&self.edges, self.adj_index.outbound(id))
    }

    /// Edges arriving at an entity by ID.
    pub fn incoming(&self, id: EntityId) -> Edges<'_> {
        Edges::new(&self.edges, self.adj_index.inbound(id))
    }

    // ==================== Diamond Resolutions ====================

    /// Record how a diamond on `ancestor` is to be resolved.
    pub fn resolve_diamond(
        &mut self,
        ancestor: &str,
        resolution: DiamondResolution,
    ) -> ModelResult<()> {
        let id = self.registry.lookup(ancestor)?.id;
        self.resolutions.insert(id, resolution);
        debug!(%ancestor, %resolution, "recorded diamond resolution");
        Ok(())
    }

    /// Drop the resolution recorded for `ancestor`, returning it.
    pub fn clear_resolution(&mut self, ancestor: &str) -> ModelResult<Option<DiamondResolution>> {
        let id = self.registry.lookup(ancestor)?.id;
        Ok(self.resolutions.remove(&id))
    }

    /// Resolution recorded for an ancestor, by name.
    pub fn resolution(&self, ancestor: &str) -> Option<DiamondResolution> {
        self.registry
            .get_id(ancestor)
            .and_then(|id| self.resolution_for(id))
    }

    /// Resolution recorded for an ancestor, by ID.
    pub fn resolution_for(&self, ancestor: EntityId) -> Option<DiamondResolution> {
        self.resolutions.get(&ancestor).copied()
    }

    // ==================== Statistics ====================

    /// Get the number of entities.
    pub fn entity_count(&self) -> usize {
        self.registry.len()
    }

    /// Get the number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Drop every entity, edge and resolution.
    pub fn clear(&mut self) {
        self.registry.clear();
        self.edges.clear();
        self.adj_index.clear();
        self.kind_index.clear();
        self.resolutions.clear();
    }
}

/// Lazy, restartable sequence of edges in insertion order.
///
/// Cloning the iterator restarts it from the clone point.
#[derive(Debug, Clone)]
pub struct Edges<'g> {
    edges: &'g BTreeMap<EdgeId, RelationshipEdge>,
    ids: std::slice::Iter<'g, EdgeId>,
}

impl<'g> Edges<'g> {
    fn new(edges: &'g BTreeMap<EdgeId, RelationshipEdge>, ids: &'g [EdgeId]) -> Self {
        Self {
            edges,
            ids: ids.iter(),
        }
    }

    fn empty(edges: &'g BTreeMap<EdgeId, RelationshipEdge>) -> Self {
        Self::new(edges, &[])
    }
}

impl<'g> Iterator for Edges<'g> {
    type Item = &'g RelationshipEdge;

    fn next(&mut self) -> Option<Self::Item> {
        let edges = self.edges;
        self.ids.by_ref().find_map(|id| edges.get(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.ids.len()))
    }
}
