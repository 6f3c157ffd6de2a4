//! Term records.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::{NodeId, TermId};

/// An ontology term as registered from the terms table.
///
/// Synonyms and cross-ontology mappings are kept in the store's overlay maps
/// and merged in by [`TermView`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// Ontology accession.
    pub id: TermId,
    /// Display name.
    pub name: String,
    /// Free-text definition.
    pub definition: String,
    /// Ids that were merged into this term, as carried on the term row.
    pub alternate_ids: BTreeSet<String>,
}

impl Term {
    pub fn new(id: impl Into<TermId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            definition: String::new(),
            alternate_ids: BTreeSet::new(),
        }
    }

    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = definition.into();
        self
    }

    /// Whether two records for the same id carry the same descriptive data.
    pub(crate) fn agrees_with(&self, other: &Term) -> bool {
        self.id == other.id && self.name == other.name && self.definition == other.definition
    }
}

/// A term with every overlay merged in, as handed to indexing and display code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermView {
    pub id: TermId,
    pub name: String,
    pub definition: String,
    pub synonyms: Vec<String>,
    pub alternate_ids: BTreeSet<String>,
    pub nodes: Vec<NodeId>,
    /// Top-level terms at or above this one.
    #[serde(default)]
    pub top_levels: BTreeSet<TermId>,
    /// Ancestors that are not top-level.
    #[serde(default)]
    pub intermediates: BTreeSet<TermId>,
    /// Target ontology label -> mapped term ids.
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub cross_mappings: BTreeMap<String, Vec<TermId>>,
}
