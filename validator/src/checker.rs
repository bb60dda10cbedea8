//! Model validation checks.

use relmod_core::{EntityId, RelationKind};
use relmod_graph::RelationshipGraph;
use relmod_lifecycle::{derive_ownership, Ownership};
use std::collections::{HashMap, HashSet};
use tracing::info;

use crate::config::ValidatorConfig;
use crate::finding::{Finding, FindingCode, ValidationReport};

/// Validate a graph with the given configuration.
///
/// Never fails: every check runs and all findings are collected.
pub fn validate(graph: &RelationshipGraph, config: &ValidatorConfig) -> ValidationReport {
    Validator::new(graph, config).check_all()
}

/// Model validator.
pub struct Validator<'g> {
    graph: &'g RelationshipGraph,
    config: ValidatorConfig,
}

impl<'g> Validator<'g> {
    /// Create a new validator.
    pub fn new(graph: &'g RelationshipGraph, config: &ValidatorConfig) -> Self {
        Self {
            graph,
            config: *config,
        }
    }

    /// Run every check, in order, without short-circuiting.
    pub fn check_all(&self) -> ValidationReport {
        let ownership = derive_ownership(self.graph);

        let mut report = ValidationReport::new();
        report.merge(self.check_composition_cycles());
        report.merge(self.check_self_aggregation());
        report.merge(self.check_friendship_symmetry());
        report.merge(self.check_unresolved_diamonds(&ownership));
        report.merge(self.check_inheritance_cycles());

        info!(
            entities = self.graph.entity_count(),
            edges = self.graph.edge_count(),
            errors = report.errors().count(),
            infos = report.infos().count(),
            "validated model"
        );
        report
    }

    /// No entity may own itself through Composition edges.
    pub fn check_composition_cycles(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        for cycle in self.find_cycles(RelationKind::Composition) {
            let names = self.names(&cycle);
            report.push(Finding::error(
                FindingCode::CompositionCycle,
                format!("composition cycle: {}", cycle_text(&names)),
                names,
            ));
        }
        report
    }

    /// An Aggregation edge may not point back at its source.
    pub fn check_self_aggregation(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        for edge in self.graph.edges_of_kind(RelationKind::Aggregation) {
            if edge.is_self_loop() {
                let name = self.name(edge.source);
                report.push(Finding::error(
                    FindingCode::SelfAggregation,
                    format!("{} aggregates itself ({})", name, edge.id),
                    vec![name],
                ));
            }
        }
        report
    }

    /// One-way friendship is informational, and only reported when requested.
    pub fn check_friendship_symmetry(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        if !self.config.require_mutual_friendship {
            return report;
        }
        for edge in self.graph.edges_of_kind(RelationKind::Friendship) {
            let reciprocated = self
                .graph
                .outgoing(edge.target)
                .any(|back| back.kind == RelationKind::Friendship && back.target == edge.source);
            if !reciprocated {
                let (grantor, grantee) = (self.name(edge.source), self.name(edge.target));
                report.push(Finding::info(
                    FindingCode::FriendshipAsymmetric,
                    format!("{} befriends {} without a reverse grant", grantor, grantee),
                    vec![grantor, grantee],
                ));
            }
        }
        report
    }

    /// Every diamond needs a resolution tag on its shared ancestor.
    pub fn check_unresolved_diamonds(&self, ownership: &Ownership) -> ValidationReport {
        let mut report = ValidationReport::new();
        for diamond in &ownership.diamonds {
            if self.graph.resolution_for(diamond.ancestor_id).is_some() {
                continue;
            }
            report.push(Finding::error(
                FindingCode::UnresolvedDiamond,
                format!(
                    "{} reaches {} twice ({} / {}) with no resolution",
                    diamond.derived,
                    diamond.ancestor,
                    diamond.left_path.join(" -> "),
                    diamond.right_path.join(" -> ")
                ),
                vec![diamond.derived.clone(), diamond.ancestor.clone()],
            ));
        }
        report
    }

    /// No entity may be its own ancestor.
    pub fn check_inheritance_cycles(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        for cycle in self.find_cycles(RelationKind::Inheritance) {
            let names = self.names(&cycle);
            report.push(Finding::error(
                FindingCode::InheritanceCycle,
                format!("inheritance cycle: {}", cycle_text(&names)),
                names,
            ));
        }
        report
    }

    // ========== Internal helpers ==========

    /// Every elementary cycle over edges of one kind.
    ///
    /// Entities are ranked by name. A search rooted at each entity only walks
    /// through higher-ranked entities, so each cycle is found exactly once,
    /// already starting at its smallest name. Parallel edges collapse to one
    /// successor. Output order depends on names only, never on insertion.
    fn find_cycles(&self, kind: RelationKind) -> Vec<Vec<EntityId>> {
        let mut ranked: Vec<(&str, EntityId)> = self
            .graph
            .registry()
            .iter()
            .map(|e| (e.name.as_str(), e.id))
            .collect();
        ranked.sort();
        let rank: HashMap<EntityId, usize> = ranked
            .iter()
            .enumerate()
            .map(|(i, (_, id))| (*id, i))
            .collect();

        let successors: HashMap<EntityId, Vec<EntityId>> = ranked
            .iter()
            .map(|(_, id)| {
                let mut next: Vec<EntityId> = self
                    .graph
                    .outgoing(*id)
                    .filter(|e| e.kind == kind)
                    .map(|e| e.target)
                    .collect();
                next.sort_by_key(|t| rank.get(t).copied());
                next.dedup();
                (*id, next)
            })
            .collect();

        let mut search = CycleSearch {
            successors: &successors,
            rank: &rank,
            cycles: Vec::new(),
        };
        for (root_rank, (_, root)) in ranked.iter().enumerate() {
            let mut path = vec![*root];
            let mut on_path = HashSet::from([*root]);
            search.extend(*root, root_rank, &mut path, &mut on_path);
        }
        search.cycles
    }

    fn name(&self, id: EntityId) -> String {
        self.graph
            .entity_name(id)
            .map(str::to_string)
            .unwrap_or_else(|| id.to_string())
    }

    fn names(&self, ids: &[EntityId]) -> Vec<String> {
        ids.iter().map(|id| self.name(*id)).collect()
    }
}

struct CycleSearch<'a> {
    successors: &'a HashMap<EntityId, Vec<EntityId>>,
    rank: &'a HashMap<EntityId, usize>,
    cycles: Vec<Vec<EntityId>>,
}

impl CycleSearch<'_> {
    /// Extend `path` (rooted at `path[0]`) through entities ranked above the root.
    fn extend(
        &mut self,
        root: EntityId,
        root_rank: usize,
        path: &mut Vec<EntityId>,
        on_path: &mut HashSet<EntityId>,
    ) {
        let Some(current) = path.last().copied() else {
            return;
        };
        let successors = self.successors;
        let Some(next) = successors.get(&current) else {
            return;
        };
        for &target in next {
            if target == root {
                self.cycles.push(path.clone());
                continue;
            }
            let above_root = self.rank.get(&target).is_some_and(|r| *r > root_rank);
            if !above_root || on_path.contains(&target) {
                continue;
            }
            path.push(target);
            on_path.insert(target);
            self.extend(root, root_rank, path, on_path);
            on_path.remove(&target);
            path.pop();
        }
    }
}

/// "A -> B -> C -> A"
fn cycle_text(names: &[String]) -> String {
    let mut parts: Vec<&str> = names.iter().map(String::as_str).collect();
    if let Some(first) = names.first() {
        parts.push(first);
    }
    parts.join(" -> ")
}
