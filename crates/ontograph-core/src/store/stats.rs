use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Statistics about a loaded store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    /// Number of registered terms (root excluded).
    pub terms: usize,
    /// Number of nodes with a known term.
    pub nodes: usize,
    /// Backtrace rows read.
    pub backtrace_rows: usize,
    /// Node -> ancestor node pairs.
    pub ancestor_links: usize,
    /// Parsed descendant fullpaths.
    pub fullpaths: usize,
    /// Synonym entries.
    pub synonyms: usize,
    /// Alternate id entries.
    pub alternate_ids: usize,
    /// Mapping entries per target ontology label.
    pub cross_mappings: BTreeMap<String, usize>,
    /// Rows skipped for missing or partial data.
    pub skipped_rows: usize,
}
