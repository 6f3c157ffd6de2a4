use std::collections::{BTreeSet, HashSet};

use tracing::{debug, warn};

use crate::model::{DescendantPath, NodePath, TermId};
use crate::store::TermGraphStore;

use super::QueryError;

/// Rebuilds descendant graphs from the fullpath rows parsed at load time.
#[derive(Debug, Clone, Copy)]
pub struct DescendantGraphResolver<'a> {
    store: &'a TermGraphStore,
}

impl<'a> DescendantGraphResolver<'a> {
    pub fn new(store: &'a TermGraphStore) -> Self {
        Self { store }
    }

    /// Descendant paths rooted at any node of the term, resolved to term ids.
    ///
    /// Returns [`QueryError::NoGraph`] when the term owns no nodes, and an
    /// empty list when it does but no fullpath starts at them. Paths with a
    /// node that has no term are dropped. Identical term paths are reported
    /// once, ordered by input row, then length, then term ids.
    pub fn descendant_graphs(&self, term_id: &str) -> Result<Vec<DescendantPath>, QueryError> {
        let nodes = self.store.nodes_of(term_id);
        if nodes.is_empty() {
            return Err(QueryError::NoGraph(term_id.to_string()));
        }

        let mut matched: Vec<&NodePath> = nodes
            .iter()
            .flat_map(|node| self.store.fullpaths_from(*node))
            .collect();
        matched.sort_by_key(|path| path.row);

        let mut resolved: Vec<(usize, Vec<TermId>)> = Vec::with_capacity(matched.len());
        for path in matched {
            match self.resolve(path) {
                Some(term_ids) => resolved.push((path.row, term_ids)),
                None => warn!(
                    term = term_id,
                    row = path.row,
                    "Descendant path contains a node without a term, dropping"
                ),
            }
        }

        resolved.sort_by(|(row_a, a), (row_b, b)| {
            row_a
                .cmp(row_b)
                .then(a.len().cmp(&b.len()))
                .then_with(|| a.cmp(b))
        });

        let mut seen = HashSet::new();
        let graphs: Vec<DescendantPath> = resolved
            .into_iter()
            .filter(|(_, term_ids)| seen.insert(term_ids.clone()))
            .map(|(_, term_ids)| DescendantPath::new(term_ids))
            .collect();

        debug!(term = term_id, paths = graphs.len(), "Resolved descendant graphs");
        Ok(graphs)
    }

    /// Every term below the term, flattened out of its descendant graphs.
    pub fn descendant_term_ids(&self, term_id: &str) -> Result<BTreeSet<TermId>, QueryError> {
        let graphs = self.descendant_graphs(term_id)?;
        Ok(graphs
            .into_iter()
            .flat_map(|path| path.term_ids)
            .filter(|id| id != term_id)
            .collect())
    }

    fn resolve(&self, path: &NodePath) -> Option<Vec<TermId>> {
        path.nodes
            .iter()
            .map(|node| self.store.term_of(*node).map(str::to_string))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::GraphLoader;
    use crate::model::{FullpathRow, Node2TermRow, TermRow};

    fn ids(path: &DescendantPath) -> Vec<&str> {
        path.iter().collect()
    }

    /// A(1) has children B(2) and C(3); D is reachable below both, as nodes 4 and 5.
    fn store() -> TermGraphStore {
        let mut loader = GraphLoader::with_root("MP:0");
        loader
            .load_terms(vec![
                TermRow::new("MP:A", "1"),
                TermRow::new("MP:B", "2"),
                TermRow::new("MP:C", "3"),
                TermRow::new("MP:D", "4,5"),
                TermRow::new("MP:E", "6"),
            ])
            .unwrap();
        loader
            .load_descendants(vec![
                FullpathRow::new(1, "1 2"),
                FullpathRow::new(1, "1 2 4"),
                FullpathRow::new(1, "1 3"),
                FullpathRow::new(1, "1 3 5"),
                FullpathRow::new(2, "2 4"),
                FullpathRow::new(4, "4 99"),
            ])
            .unwrap();
        loader.finish().unwrap()
    }

    #[test]
    fn test_paths_in_row_order() {
        let store = store();
        let graphs = store.descendants().descendant_graphs("MP:A").unwrap();
        let got: Vec<Vec<&str>> = graphs.iter().map(ids).collect();
        assert_eq!(
            got,
            vec![
                vec!["MP:A", "MP:B"],
                vec!["MP:A", "MP:B", "MP:D"],
                vec!["MP:A", "MP:C"],
                vec!["MP:A", "MP:C", "MP:D"],
            ]
        );
    }

    #[test]
    fn test_unresolved_path_is_dropped() {
        let store = store();
        let graphs = store.descendants().descendant_graphs("MP:D").unwrap();
        assert!(graphs.is_empty());
    }

    #[test]
    fn test_node2term_resolves_extra_nodes() {
        let mut loader = GraphLoader::with_root("MP:0");
        loader.load_terms(vec![TermRow::new("MP:D", "4")]).unwrap();
        loader
            .load_node2term(vec![Node2TermRow::new(99, "MP:Z")])
            .unwrap();
        loader.load_descendants(vec![FullpathRow::new(4, "4 99")]).unwrap();
        let store = loader.finish().unwrap();

        let graphs = store.descendants().descendant_graphs("MP:D").unwrap();
        assert_eq!(graphs.len(), 1);
        assert_eq!(ids(&graphs[0]), vec!["MP:D", "MP:Z"]);
    }

    #[test]
    fn test_no_graph_vs_no_descendants() {
        let store = store();
        let resolver = store.descendants();
        assert_eq!(
            resolver.descendant_graphs("MP:NOPE"),
            Err(QueryError::NoGraph("MP:NOPE".to_string()))
        );
        assert_eq!(resolver.descendant_graphs("MP:E"), Ok(vec![]));
    }

    #[test]
    fn test_descendant_term_ids() {
        let store = store();
        let below = store.descendants().descendant_term_ids("MP:A").unwrap();
        assert_eq!(
            below,
            BTreeSet::from(["MP:B".to_string(), "MP:C".to_string(), "MP:D".to_string()])
        );
    }
}
