//! Indexes for efficient edge lookups.

use relmod_core::{EdgeId, EntityId, RelationKind, RelationshipEdge};
use std::collections::{BTreeSet, HashMap};

/// Adjacency index: EntityId -> { outbound: [EdgeId], inbound: [EdgeId] }
///
/// Edge ids are pushed as edges are created, so each list stays in insertion order.
#[derive(Debug, Default, Clone)]
pub struct AdjacencyIndex {
    /// Edges where the entity is the source.
    outbound: HashMap<EntityId, Vec<EdgeId>>,
    /// Edges where the entity is the target.
    inbound: HashMap<EntityId, Vec<EdgeId>>,
}

impl AdjacencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, edge: &RelationshipEdge) {
        self.outbound.entry(edge.source).or_default().push(edge.id);
        self.inbound.entry(edge.target).or_default().push(edge.id);
    }

    pub fn remove(&mut self, edge: &RelationshipEdge) {
        remove_from(&mut self.outbound, edge.source, edge.id);
        remove_from(&mut self.inbound, edge.target, edge.id);
    }

    /// Edge ids leaving an entity, in insertion order.
    pub fn outbound(&self, entity: EntityId) -> &[EdgeId] {
        self.outbound.get(&entity).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Edge ids arriving at an entity, in insertion order.
    pub fn inbound(&self, entity: EntityId) -> &[EdgeId] {
        self.inbound.get(&entity).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All edge ids touching an entity, deduplicated, ascending.
    pub fn edges_involving(&self, entity: EntityId) -> Vec<EdgeId> {
        let mut ids: Vec<EdgeId> = self
            .outbound(entity)
            .iter()
            .chain(self.inbound(entity))
            .copied()
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    pub fn clear(&mut self) {
        self.outbound.clear();
        self.inbound.clear();
    }
}

fn remove_from(index: &mut HashMap<EntityId, Vec<EdgeId>>, entity: EntityId, edge_id: EdgeId) {
    if let Some(list) = index.get_mut(&entity) {
        list.retain(|id| *id != edge_id);
        if list.is_empty() {
            index.remove(&entity);
        }
    }
}

/// Kind index: RelationKind -> ordered set of EdgeId
#[derive(Debug, Default, Clone)]
pub struct KindIndex {
    index: HashMap<RelationKind, BTreeSet<EdgeId>>,
}

impl KindIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: RelationKind, edge_id: EdgeId) {
        self.index.entry(kind).or_default().insert(edge_id);
    }

    pub fn remove(&mut self, kind: RelationKind, edge_id: EdgeId) {
        if let Some(set) = self.index.get_mut(&kind) {
            set.remove(&edge_id);
            if set.is_empty() {
                self.index.remove(&kind);
            }
        }
    }

    pub fn get(&self, kind: RelationKind) -> impl Iterator<Item = EdgeId> + '_ {
        self.index
            .get(&kind)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    pub fn clear(&mut self) {
        self.index.clear();
    }
}
