//! Inheritance lineage walks: ancestors, construction order, diamonds.

use relmod_core::{DiamondResolution, EntityId, RelationKind};
use relmod_graph::RelationshipGraph;
use serde::Serialize;
use std::collections::{HashMap, HashSet, VecDeque};

/// Construction and destruction order for one derived entity.
///
/// Bases are constructed before the entities derived from them; destruction
/// runs in exactly the reverse order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstructionOrder {
    pub entity: String,
    pub construction: Vec<String>,
    pub destruction: Vec<String>,
}

/// Two inheritance paths from `derived` that reconverge on `ancestor`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiamondDetected {
    pub derived: String,
    pub ancestor: String,
    #[serde(skip)]
    pub ancestor_id: EntityId,
    /// Path from `derived` to `ancestor`, both ends included.
    pub left_path: Vec<String>,
    /// Second path from `derived` to `ancestor`, both ends included.
    pub right_path: Vec<String>,
}

/// Read-only view over the inheritance edges of a graph.
pub struct Lineage<'g> {
    graph: &'g RelationshipGraph,
}

impl<'g> Lineage<'g> {
    pub fn new(graph: &'g RelationshipGraph) -> Self {
        Self { graph }
    }

    /// Direct bases of an entity, in edge insertion order.
    pub fn bases(&self, id: EntityId) -> impl Iterator<Item = EntityId> + 'g {
        self.graph
            .outgoing(id)
            .filter(|e| e.kind == RelationKind::Inheritance)
            .map(|e| e.target)
    }

    /// All entities reachable through at least one inheritance edge.
    pub fn ancestors(&self, id: EntityId) -> HashSet<EntityId> {
        let mut seen = HashSet::new();
        let mut stack: Vec<EntityId> = self.bases(id).collect();
        while let Some(next) = stack.pop() {
            if seen.insert(next) {
                stack.extend(self.bases(next));
            }
        }
        seen
    }

    /// Shortest inheritance path from `from` up to `to`, both ends included.
    pub fn shortest_path(&self, from: EntityId, to: EntityId) -> Option<Vec<EntityId>> {
        let mut parent: HashMap<EntityId, EntityId> = HashMap::new();
        let mut queue = VecDeque::from([from]);
        let mut seen = HashSet::from([from]);

        while let Some(current) = queue.pop_front() {
            if current == to {
                let mut path = vec![current];
                let mut cursor = current;
                while let Some(&prev) = parent.get(&cursor) {
                    path.push(prev);
                    cursor = prev;
                }
                path.reverse();
                return Some(path);
            }
            for base in self.bases(current) {
                if seen.insert(base) {
                    parent.insert(base, current);
                    queue.push_back(base);
                }
            }
        }
        None
    }

    /// Base-first construction order ending with the entity itself.
    ///
    /// A shared ancestor is constructed once, unless it is resolved as
    /// `duplicated`, in which case it is constructed once per path. Cycles are
    /// cut at the first repeated entity on the current path.
    pub fn construction_order(&self, id: EntityId) -> Vec<EntityId> {
        let mut out = Vec::new();
        let mut on_path = HashSet::new();
        let mut emitted = HashSet::new();
        self.visit(id, &mut on_path, &mut emitted, &mut out);
        out
    }

    fn visit(
        &self,
        id: EntityId,
        on_path: &mut HashSet<EntityId>,
        emitted: &mut HashSet<EntityId>,
        out: &mut Vec<EntityId>,
    ) {
        if on_path.contains(&id) {
            return;
        }
        let duplicated =
            self.graph.resolution_for(id) == Some(DiamondResolution::Duplicated);
        if emitted.contains(&id) && !duplicated {
            return;
        }

        on_path.insert(id);
        for base in self.bases(id) {
            self.visit(base, on_path, emitted, out);
        }
        on_path.remove(&id);

        emitted.insert(id);
        out.push(id);
    }

    /// Every diamond rooted at `derived`, one per reconverging ancestor.
    ///
    /// A common ancestor is left out when one side only reaches it through
    /// another common ancestor; that diamond is reported at the nearer one.
    /// Two common ancestors on one inheritance cycle never hide each other:
    /// whichever a side reaches first is reachable without the other.
    pub fn diamonds(&self, derived: EntityId) -> Vec<DiamondDetected> {
        let bases: Vec<EntityId> = self.bases(derived).collect();
        let mut found = Vec::new();
        let mut reported = HashSet::new();

        for i in 0..bases.len() {
            for j in (i + 1)..bases.len() {
                let (left, right) = (bases[i], bases[j]);
                let left_reach = self.reach(left);
                let right_reach = self.reach(right);
                let common: HashSet<EntityId> = left_reach
                    .intersection(&right_reach)
                    .copied()
                    .filter(|a| *a != derived)
                    .collect();

                // Declaration order keeps the output deterministic.
                for entity in self.graph.registry().iter() {
                    let ancestor = entity.id;
                    if !common.contains(&ancestor) || reported.contains(&ancestor) {
                        continue;
                    }
                    let shadowed = common.iter().any(|c| {
                        *c != ancestor
                            && (!self.reaches_avoiding(left, ancestor, *c)
                                || !self.reaches_avoiding(right, ancestor, *c))
                    });
                    if shadowed {
                        continue;
                    }
                    let (Some(left_path), Some(right_path)) = (
                        self.shortest_path(left, ancestor),
                        self.shortest_path(right, ancestor),
                    ) else {
                        continue;
                    };
                    reported.insert(ancestor);
                    found.push(DiamondDetected {
                        derived: self.name(derived),
                        ancestor: self.name(ancestor),
                        ancestor_id: ancestor,
                        left_path: self.path_names(derived, &left_path),
                        right_path: self.path_names(derived, &right_path),
                    });
                }
            }
        }
        found
    }

    /// Whether `to` is reachable from `from` without passing through `avoid`.
    fn reaches_avoiding(&self, from: EntityId, to: EntityId, avoid: EntityId) -> bool {
        if from == avoid {
            return false;
        }
        let mut seen = HashSet::from([from]);
        let mut stack = vec![from];
        while let Some(current) = stack.pop() {
            if current == to {
                return true;
            }
            for base in self.bases(current) {
                if base != avoid && seen.insert(base) {
                    stack.push(base);
                }
            }
        }
        false
    }

    fn reach(&self, id: EntityId) -> HashSet<EntityId> {
        let mut set = self.ancestors(id);
        set.insert(id);
        set
    }

    fn path_names(&self, derived: EntityId, path: &[EntityId]) -> Vec<String> {
        std::iter::once(derived)
            .chain(path.iter().copied())
            .map(|id| self.name(id))
            .collect()
    }

    pub(crate) fn name(&self, id: EntityId) -> String {
        self.graph
            .entity_name(id)
            .map(str::to_string)
            .unwrap_or_else(|| id.to_string())
    }
}
