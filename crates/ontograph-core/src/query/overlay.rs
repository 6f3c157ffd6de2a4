use std::collections::{BTreeMap, BTreeSet};

use crate::model::{TermId, TermView};
use crate::store::TermGraphStore;

/// Synonyms, alternate ids and cross-ontology mappings layered on the store.
///
/// Cross mappings were already filtered by target label (and joined against
/// the target term infos) at load time; nothing is re-derived here.
#[derive(Debug, Clone, Copy)]
pub struct OverlayAccessor<'a> {
    store: &'a TermGraphStore,
}

impl<'a> OverlayAccessor<'a> {
    pub fn new(store: &'a TermGraphStore) -> Self {
        Self { store }
    }

    pub fn synonyms_of(&self, term_id: &str) -> &'a [String] {
        self.store.synonyms_of(term_id)
    }

    pub fn alternate_ids_of(&self, term_id: &str) -> &'a BTreeSet<String> {
        self.store.alternate_ids_of(term_id)
    }

    /// Mapped ids in the default target ontology (e.g. MP -> MA).
    pub fn cross_mapping_of(&self, term_id: &str) -> &'a [TermId] {
        self.store.cross_mapping_of(term_id)
    }

    pub fn cross_mapping_for(&self, label: &str, term_id: &str) -> &'a [TermId] {
        self.store.cross_mapping_for(label, term_id)
    }

    /// The term that absorbed a merged id.
    pub fn term_for_alternate_id(&self, alt_id: &str) -> Option<&'a str> {
        self.store.alternate_to_term.get(alt_id).map(String::as_str)
    }

    /// The registered term for an id that may be an alternate id.
    pub fn resolve_id(&self, id: &str) -> Option<&'a str> {
        match self.store.term(id) {
            Some(term) => Some(term.id.as_str()),
            None => self.term_for_alternate_id(id),
        }
    }

    /// The term record with every overlay merged in.
    pub fn term_view(&self, term_id: &str) -> Option<TermView> {
        let term = self.store.term(term_id)?;
        let ancestry = self.store.ancestry();

        let cross_mappings: BTreeMap<String, Vec<TermId>> = self
            .store
            .mapping_targets()
            .into_iter()
            .filter_map(|label| {
                let mapped = self.store.cross_mapping_for(label, term_id);
                (!mapped.is_empty()).then(|| (label.to_string(), mapped.to_vec()))
            })
            .collect();

        Some(TermView {
            id: term.id.clone(),
            name: term.name.clone(),
            definition: term.definition.clone(),
            synonyms: self.synonyms_of(term_id).to_vec(),
            alternate_ids: self.alternate_ids_of(term_id).clone(),
            nodes: self.store.nodes_of(term_id).to_vec(),
            top_levels: ancestry.top_levels_of_term(term_id),
            intermediates: ancestry.intermediates_of_term(term_id),
            cross_mappings,
        })
    }
}
