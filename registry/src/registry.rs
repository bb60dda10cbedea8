//! The Entity Registry - named entity declarations.

use indexmap::IndexMap;
use relmod_core::{Entity, EntityId, FieldDecl, ModelError, ModelResult};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// The Registry stores entity declarations by name, in declaration order.
///
/// Names are case-sensitive and compared by exact string equality.
#[derive(Debug, Clone)]
pub struct EntityRegistry {
    /// Entity definitions by name (declaration order).
    entities: IndexMap<String, Entity>,
    /// Name lookup by ID.
    names_by_id: HashMap<EntityId, String>,
    /// Next entity ID to allocate.
    next_entity_id: u64,
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entities: IndexMap::new(),
            names_by_id: HashMap::new(),
            next_entity_id: 1,
        }
    }

    // ==================== Mutation ====================

    /// Declare a new entity.
    ///
    /// Fails with `DuplicateEntity` if the name is taken; the registry is
    /// unchanged on any failure.
    pub fn declare(
        &mut self,
        name: impl Into<String>,
        fields: Vec<FieldDecl>,
    ) -> ModelResult<EntityId> {
        let name = name.into();
        check_name(&name)?;
        if self.entities.contains_key(&name) {
            return Err(ModelError::DuplicateEntity(name));
        }

        let mut seen = HashSet::new();
        for field in &fields {
            check_name(&field.name)?;
            if !seen.insert(field.name.as_str()) {
                return Err(ModelError::duplicate_field(&name, &field.name));
            }
        }

        let id = EntityId::new(self.next_entity_id);
        self.next_entity_id += 1;

        debug!(entity = %name, %id, fields = fields.len(), "declared entity");
        self.names_by_id.insert(id, name.clone());
        self.entities.insert(name.clone(), Entity::new(id, name, fields));
        Ok(id)
    }

    /// Remove an entity by name, returning its declaration.
    ///
    /// Edges are not tracked here; the graph cascades them.
    pub fn remove(&mut self, name: &str) -> ModelResult<Entity> {
        let entity = self
            .entities
            .shift_remove(name)
            .ok_or_else(|| ModelError::unknown_entity(name))?;
        self.names_by_id.remove(&entity.id);

        debug!(entity = %name, id = %entity.id, "removed entity");
        Ok(entity)
    }

    /// Remove every entity. Ids are not reused afterwards.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.names_by_id.clear();
    }

    // ==================== Lookups ====================

    /// Get an entity by name.
    pub fn lookup(&self, name: &str) -> ModelResult<&Entity> {
        self.entities
            .get(name)
            .ok_or_else(|| ModelError::unknown_entity(name))
    }

    /// Get an entity by ID.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.names_by_id
            .get(&id)
            .and_then(|name| self.entities.get(name))
    }

    /// Get an entity ID by name.
    pub fn get_id(&self, name: &str) -> Option<EntityId> {
        self.entities.get(name).map(|e| e.id)
    }

    /// Get the name of an entity by ID.
    pub fn name_of(&self, id: EntityId) -> Option<&str> {
        self.names_by_id.get(&id).map(|s| s.as_str())
    }

    /// Check if an entity is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.entities.contains_key(name)
    }

    /// All entities in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Get the number of entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

fn check_name(name: &str) -> ModelResult<()> {
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(ModelError::InvalidName(name.to_string()));
    }
    Ok(())
}
