//! Ownership derivation: destruction obligations from the relationship graph.

use crate::lineage::{ConstructionOrder, DiamondDetected, Lineage};
use relmod_core::{EdgeId, EntityId, ModelResult, RelationKind};
use relmod_graph::RelationshipGraph;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::fmt;
use tracing::debug;

/// Derived ownership for one Composition or Aggregation edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnershipRecord {
    pub edge: EdgeId,
    pub owner: String,
    pub part: String,
    pub kind: RelationKind,
    /// Whether destroying the owner destroys the part.
    pub owns: bool,
}

/// Everything the lifecycle rules derive from a graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Ownership {
    /// Ownership records by edge. Association and Friendship edges are absent.
    pub records: BTreeMap<EdgeId, OwnershipRecord>,
    /// Construction orders for every entity with at least one base.
    pub construction_orders: Vec<ConstructionOrder>,
    /// Unresolved by design; resolution is left to the client.
    pub diamonds: Vec<DiamondDetected>,
}

impl Ownership {
    /// Whether the edge's source owns its target. None for non-ownership edges.
    pub fn owns(&self, edge: EdgeId) -> Option<bool> {
        self.records.get(&edge).map(|r| r.owns)
    }

    /// Construction order for one entity, if it derives from anything.
    pub fn construction_order(&self, entity: &str) -> Option<&ConstructionOrder> {
        self.construction_orders.iter().find(|o| o.entity == entity)
    }

    pub fn has_diamonds(&self) -> bool {
        !self.diamonds.is_empty()
    }
}

impl fmt::Display for Ownership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for record in self.records.values() {
            writeln!(
                f,
                "{} {} {} -> {} owns={}",
                record.edge, record.kind, record.owner, record.part, record.owns
            )?;
        }
        for order in &self.construction_orders {
            writeln!(
                f,
                "construct {}: {}",
                order.entity,
                order.construction.join(" -> ")
            )?;
            writeln!(
                f,
                "destruct {}: {}",
                order.entity,
                order.destruction.join(" -> ")
            )?;
        }
        for diamond in &self.diamonds {
            writeln!(
                f,
                "diamond {} at {}: [{}] [{}]",
                diamond.derived,
                diamond.ancestor,
                diamond.left_path.join(" -> "),
                diamond.right_path.join(" -> ")
            )?;
        }
        Ok(())
    }
}

/// Derive ownership records, construction orders and diamonds.
///
/// Pure: reads the graph and owns no state, so two calls on an unchanged graph
/// produce equal results.
pub fn derive_ownership(graph: &RelationshipGraph) -> Ownership {
    let lineage = Lineage::new(graph);
    let mut ownership = Ownership::default();

    for edge in graph.edges() {
        let owns = match edge.kind {
            RelationKind::Composition => true,
            RelationKind::Aggregation => false,
            _ => continue,
        };
        ownership.records.insert(
            edge.id,
            OwnershipRecord {
                edge: edge.id,
                owner: lineage.name(edge.source),
                part: lineage.name(edge.target),
                kind: edge.kind,
                owns,
            },
        );
    }

    for entity in graph.registry().iter() {
        if lineage.bases(entity.id).next().is_none() {
            continue;
        }
        let construction: Vec<String> = lineage
            .construction_order(entity.id)
            .into_iter()
            .map(|id| lineage.name(id))
            .collect();
        let destruction = construction.iter().rev().cloned().collect();
        ownership.construction_orders.push(ConstructionOrder {
            entity: entity.name.clone(),
            construction,
            destruction,
        });
        ownership.diamonds.extend(lineage.diamonds(entity.id));
    }

    debug!(
        records = ownership.records.len(),
        orders = ownership.construction_orders.len(),
        diamonds = ownership.diamonds.len(),
        "derived ownership"
    );
    ownership
}

/// Entities destroyed, transitively through Composition edges, when `name` is destroyed.
///
/// The destroyed entity itself is not included. Aggregated parts survive.
pub fn destruction_cascade(graph: &RelationshipGraph, name: &str) -> ModelResult<Vec<String>> {
    let start = graph.lookup(name)?.id;
    let lineage = Lineage::new(graph);

    let mut seen: HashSet<EntityId> = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    let mut destroyed = Vec::new();

    while let Some(current) = queue.pop_front() {
        for edge in graph.outgoing(current) {
            if edge.kind == RelationKind::Composition && seen.insert(edge.target) {
                destroyed.push(lineage.name(edge.target));
                queue.push_back(edge.target);
            }
        }
    }
    Ok(destroyed)
}
