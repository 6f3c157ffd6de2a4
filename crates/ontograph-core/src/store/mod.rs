//! The immutable, queryable ontology snapshot.
//!
//! A [`TermGraphStore`] is only ever produced by
//! [`GraphLoader::finish`](crate::loader::GraphLoader::finish). Once built it
//! is never mutated, so it can be shared across threads behind an `Arc`
//! without locking. All accessors are plain map lookups and return an empty
//! or absent result for unknown ids.

mod stats;

pub use stats::StoreStats;

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};

use crate::model::{NodeId, NodePath, Term, TermId};
use crate::query::{AncestryResolver, DescendantGraphResolver, OverlayAccessor};

static NO_NODES: BTreeSet<NodeId> = BTreeSet::new();
static NO_IDS: BTreeSet<String> = BTreeSet::new();

/// Node/term registries, closure tables and overlay maps for one ontology.
#[derive(Debug, Clone)]
pub struct TermGraphStore {
    pub(crate) terms: HashMap<TermId, Term>,
    pub(crate) node_to_term: HashMap<NodeId, TermId>,
    pub(crate) term_to_nodes: HashMap<TermId, Vec<NodeId>>,
    pub(crate) ancestors: HashMap<NodeId, BTreeSet<NodeId>>,
    pub(crate) parents: HashMap<NodeId, BTreeSet<NodeId>>,
    pub(crate) fullpaths: HashMap<NodeId, Vec<NodePath>>,
    pub(crate) synonyms: HashMap<TermId, Vec<String>>,
    pub(crate) alternate_ids: HashMap<TermId, BTreeSet<String>>,
    pub(crate) alternate_to_term: HashMap<String, TermId>,
    /// Target ontology label -> source term -> mapped terms.
    pub(crate) cross_mappings: HashMap<String, HashMap<TermId, Vec<TermId>>>,
    pub(crate) ontology: String,
    pub(crate) root_term: TermId,
    pub(crate) default_target: String,
    pub(crate) stats: StoreStats,
    pub(crate) fingerprint: Option<String>,
    pub(crate) loaded_at: DateTime<Utc>,
}

impl TermGraphStore {
    /// The registered term with this id. The root sentinel is never registered.
    pub fn term(&self, id: &str) -> Option<&Term> {
        self.terms.get(id)
    }

    pub fn contains_term(&self, id: &str) -> bool {
        self.terms.contains_key(id)
    }

    /// All registered terms, in no particular order.
    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        self.terms.values()
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    pub fn node_count(&self) -> usize {
        self.node_to_term.len()
    }

    /// Nodes owned by a term, in load order.
    pub fn nodes_of(&self, term_id: &str) -> &[NodeId] {
        self.term_to_nodes
            .get(term_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The term owning a node. Defined for every node the store knows.
    pub fn term_of(&self, node: NodeId) -> Option<&str> {
        self.node_to_term.get(&node).map(String::as_str)
    }

    /// Ancestor nodes of a node, excluding the node itself.
    pub fn ancestors_of(&self, node: NodeId) -> &BTreeSet<NodeId> {
        self.ancestors.get(&node).unwrap_or(&NO_NODES)
    }

    /// Direct parent nodes, as read off the backtrace paths.
    pub fn parents_of(&self, node: NodeId) -> &BTreeSet<NodeId> {
        self.parents.get(&node).unwrap_or(&NO_NODES)
    }

    /// Parsed fullpaths starting at a node, in row order.
    pub fn fullpaths_from(&self, node: NodeId) -> &[NodePath] {
        self.fullpaths.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn synonyms_of(&self, term_id: &str) -> &[String] {
        self.synonyms
            .get(term_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Alternate ids from both the terms table and the alternate-id table.
    pub fn alternate_ids_of(&self, term_id: &str) -> &BTreeSet<String> {
        self.alternate_ids.get(term_id).unwrap_or(&NO_IDS)
    }

    /// Mappings into the default target ontology.
    pub fn cross_mapping_of(&self, term_id: &str) -> &[TermId] {
        self.cross_mapping_for(&self.default_target, term_id)
    }

    /// Mappings into the ontology with the given label.
    pub fn cross_mapping_for(&self, label: &str, term_id: &str) -> &[TermId] {
        self.cross_mappings
            .get(label)
            .and_then(|by_term| by_term.get(term_id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Labels of all loaded target ontologies.
    pub fn mapping_targets(&self) -> BTreeSet<&str> {
        self.cross_mappings.keys().map(String::as_str).collect()
    }

    /// Short name of the ontology, e.g. `MP`.
    pub fn ontology(&self) -> &str {
        &self.ontology
    }

    pub fn root_term(&self) -> &str {
        &self.root_term
    }

    pub fn default_target(&self) -> &str {
        &self.default_target
    }

    pub fn stats(&self) -> &StoreStats {
        &self.stats
    }

    /// Digest of the tables this store was built from, when the source provides one.
    pub fn fingerprint(&self) -> Option<&str> {
        self.fingerprint.as_deref()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn ancestry(&self) -> AncestryResolver<'_> {
        AncestryResolver::new(self)
    }

    pub fn descendants(&self) -> DescendantGraphResolver<'_> {
        DescendantGraphResolver::new(self)
    }

    pub fn overlay(&self) -> OverlayAccessor<'_> {
        OverlayAccessor::new(self)
    }
}
