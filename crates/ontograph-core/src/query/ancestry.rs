use std::collections::BTreeSet;

use tracing::debug;

use crate::model::{NodeId, TermId};
use crate::store::TermGraphStore;

/// Answers "which terms are above X" from the precomputed ancestor sets.
///
/// Lookups never traverse the graph: each result is bounded by the ancestor
/// rows loaded for the term's nodes, so cyclic input cannot loop.
#[derive(Debug, Clone, Copy)]
pub struct AncestryResolver<'a> {
    store: &'a TermGraphStore,
}

impl<'a> AncestryResolver<'a> {
    pub fn new(store: &'a TermGraphStore) -> Self {
        Self { store }
    }

    /// Ancestor terms of a term, over every node it owns.
    ///
    /// Never contains the term itself or the root sentinel. A term with no
    /// nodes, including an unknown id, yields an empty set.
    pub fn ancestors_of_term(&self, term_id: &str) -> BTreeSet<TermId> {
        let nodes = self.store.nodes_of(term_id);
        self.resolve_terms(term_id, nodes.iter().flat_map(|node| self.store.ancestors_of(*node)))
    }

    /// Direct parent terms, read off the backtrace paths.
    pub fn parents_of_term(&self, term_id: &str) -> BTreeSet<TermId> {
        let nodes = self.store.nodes_of(term_id);
        self.resolve_terms(term_id, nodes.iter().flat_map(|node| self.store.parents_of(*node)))
    }

    /// Whether the term is a direct child of the root.
    ///
    /// A term with several positions is top-level as soon as one of them
    /// hangs directly under the root, even if others sit deeper.
    pub fn is_top_level(&self, term_id: &str) -> bool {
        let root = self.store.root_term();
        self.store.nodes_of(term_id).iter().any(|node| {
            self.store
                .parents_of(*node)
                .iter()
                .any(|parent| self.store.term_of(*parent) == Some(root))
        })
    }

    /// All top-level terms, sorted by id.
    pub fn top_level_terms(&self) -> BTreeSet<TermId> {
        self.store
            .terms()
            .filter(|term| self.is_top_level(&term.id))
            .map(|term| term.id.clone())
            .collect()
    }

    /// The top-level terms the term falls under, including the term itself
    /// when it is top-level.
    pub fn top_levels_of_term(&self, term_id: &str) -> BTreeSet<TermId> {
        let mut top_levels: BTreeSet<TermId> = self
            .ancestors_of_term(term_id)
            .into_iter()
            .filter(|ancestor| self.is_top_level(ancestor))
            .collect();
        if self.is_top_level(term_id) {
            top_levels.insert(term_id.to_string());
        }
        top_levels
    }

    /// Ancestors between the term and its top-level terms.
    pub fn intermediates_of_term(&self, term_id: &str) -> BTreeSet<TermId> {
        self.ancestors_of_term(term_id)
            .into_iter()
            .filter(|ancestor| !self.is_top_level(ancestor))
            .collect()
    }

    fn resolve_terms<'n>(
        &self,
        term_id: &str,
        nodes: impl Iterator<Item = &'n NodeId>,
    ) -> BTreeSet<TermId> {
        let root = self.store.root_term();
        let mut terms = BTreeSet::new();

        for node in nodes {
            match self.store.term_of(*node) {
                Some(term) if term == term_id || term == root => {}
                Some(term) => {
                    terms.insert(term.to_string());
                }
                None => debug!(term = term_id, node = %node, "Ancestor node has no term, skipping"),
            }
        }

        terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::GraphLoader;
    use crate::model::{BacktraceRow, TermRow};

    /// root(1) > A(2) > B(3); B also sits under C(4) as node 5.
    fn store() -> TermGraphStore {
        let mut loader = GraphLoader::with_root("MP:0");
        loader
            .load_terms(vec![
                TermRow::new("MP:0", "1"),
                TermRow::new("MP:A", "2"),
                TermRow::new("MP:B", "3,5"),
                TermRow::new("MP:C", "4"),
            ])
            .unwrap();
        loader
            .load_ancestors(vec![
                BacktraceRow::new(2, "1 2"),
                BacktraceRow::new(3, "1 2 3"),
                BacktraceRow::new(4, "1 4"),
                BacktraceRow::new(5, "1 4 5"),
            ])
            .unwrap();
        loader.finish().unwrap()
    }

    #[test]
    fn test_ancestors_union_over_nodes() {
        let store = store();
        let ancestors = store.ancestry().ancestors_of_term("MP:B");
        assert_eq!(ancestors, BTreeSet::from(["MP:A".to_string(), "MP:C".to_string()]));
    }

    #[test]
    fn test_top_level() {
        let store = store();
        let resolver = store.ancestry();
        assert!(resolver.is_top_level("MP:A"));
        assert!(!resolver.is_top_level("MP:B"));
        assert_eq!(
            resolver.top_level_terms(),
            BTreeSet::from(["MP:A".to_string(), "MP:C".to_string()])
        );
    }

    #[test]
    fn test_top_levels_and_intermediates() {
        let store = store();
        let resolver = store.ancestry();
        assert_eq!(
            resolver.top_levels_of_term("MP:B"),
            BTreeSet::from(["MP:A".to_string(), "MP:C".to_string()])
        );
        assert!(resolver.intermediates_of_term("MP:B").is_empty());
        assert_eq!(
            resolver.top_levels_of_term("MP:A"),
            BTreeSet::from(["MP:A".to_string()])
        );
        assert!(resolver.top_levels_of_term("MP:NOPE").is_empty());
    }

    #[test]
    fn test_one_position_under_root_is_enough() {
        let mut loader = GraphLoader::with_root("MP:0");
        loader
            .load_terms(vec![
                TermRow::new("MP:0", "1"),
                TermRow::new("MP:A", "2"),
                TermRow::new("MP:X", "3,4"),
            ])
            .unwrap();
        loader
            .load_ancestors(vec![
                BacktraceRow::new(2, "1 2"),
                BacktraceRow::new(3, "1 3"),
                BacktraceRow::new(4, "1 2 4"),
            ])
            .unwrap();
        let store = loader.finish().unwrap();
        let resolver = store.ancestry();

        assert!(resolver.is_top_level("MP:X"));
        assert_eq!(
            resolver.top_levels_of_term("MP:X"),
            BTreeSet::from(["MP:A".to_string(), "MP:X".to_string()])
        );
        assert!(resolver.intermediates_of_term("MP:X").is_empty());
    }

    #[test]
    fn test_parents() {
        let store = store();
        let parents = store.ancestry().parents_of_term("MP:B");
        assert_eq!(parents, BTreeSet::from(["MP:A".to_string(), "MP:C".to_string()]));
        assert!(store.ancestry().parents_of_term("MP:A").is_empty());
    }
}
