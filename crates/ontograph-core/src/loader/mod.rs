//! Bulk ingestion of exported ontology tables.
//!
//! [`GraphLoader`] accumulates rows into private maps and publishes an
//! immutable [`TermGraphStore`] from [`GraphLoader::finish`]. Malformed input
//! aborts the whole load with a [`LoadError`]; rows with merely partial data
//! are logged and skipped.
//!
//! # Example
//!
//! ```
//! use ontograph_core::loader::GraphLoader;
//! use ontograph_core::model::{BacktraceRow, TermRow};
//!
//! let mut loader = GraphLoader::with_root("MP:0000001");
//! loader.load_terms(vec![
//!     TermRow::new("MP:0000001", "1"),
//!     TermRow::new("MP:0005375", "2").with_name("adipose tissue phenotype"),
//! ])?;
//! loader.load_ancestors(vec![BacktraceRow::new(2, "1 2")])?;
//! let store = loader.finish()?;
//!
//! assert_eq!(store.nodes_of("MP:0005375").len(), 1);
//! # Ok::<(), ontograph_core::loader::LoadError>(())
//! ```

mod error;
mod parse;
mod source;

pub use error::LoadError;
pub use source::{Table, TableSource, TsvDirectory};

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::Utc;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::config::{
    Config, DEFAULT_CROSS_MAPPING_TARGET, DEFAULT_LIST_SEPARATORS, DEFAULT_ONTOLOGY_NAME,
    DEFAULT_ROOT_TERM,
};
use crate::model::{
    AltIdRow, BacktraceRow, CrossMappingRow, FullpathRow, Node2TermRow, NodeId, NodePath,
    SynonymRow, TargetTermRow, Term, TermId, TermRow,
};
use crate::store::{StoreStats, TermGraphStore};

use parse::{clean, parse_node_id, parse_node_ids, split_list};

/// Builds a [`TermGraphStore`] from tabular input.
#[derive(Debug)]
pub struct GraphLoader {
    ontology: String,
    root_term: TermId,
    default_target: String,
    separators: Vec<char>,
    terms: HashMap<TermId, Term>,
    node_to_term: HashMap<NodeId, TermId>,
    term_to_nodes: HashMap<TermId, Vec<NodeId>>,
    ancestors: HashMap<NodeId, BTreeSet<NodeId>>,
    parents: HashMap<NodeId, BTreeSet<NodeId>>,
    fullpaths: HashMap<NodeId, Vec<NodePath>>,
    synonyms: HashMap<TermId, Vec<String>>,
    alternate_ids: HashMap<TermId, BTreeSet<String>>,
    cross_mappings: HashMap<String, HashMap<TermId, Vec<TermId>>>,
    backtrace_rows: usize,
    fullpath_rows: usize,
    skipped_rows: usize,
    fingerprint: Option<String>,
}

impl Default for GraphLoader {
    fn default() -> Self {
        Self::with_root(DEFAULT_ROOT_TERM)
    }
}

impl GraphLoader {
    /// Creates a loader using the ontology and list settings from `config`.
    pub fn new(config: &Config) -> Self {
        let mut loader = Self::with_root(config.ontology.root_term.trim());
        loader.ontology = config.ontology.name.clone();
        loader.default_target = config.ontology.cross_mapping_target.clone();
        loader.separators = config.source.separators();
        loader
    }

    /// Creates a loader with default settings and the given root sentinel.
    pub fn with_root(root_term: impl Into<TermId>) -> Self {
        Self {
            ontology: DEFAULT_ONTOLOGY_NAME.to_string(),
            root_term: root_term.into(),
            default_target: DEFAULT_CROSS_MAPPING_TARGET.to_string(),
            separators: DEFAULT_LIST_SEPARATORS.chars().collect(),
            terms: HashMap::new(),
            node_to_term: HashMap::new(),
            term_to_nodes: HashMap::new(),
            ancestors: HashMap::new(),
            parents: HashMap::new(),
            fullpaths: HashMap::new(),
            synonyms: HashMap::new(),
            alternate_ids: HashMap::new(),
            cross_mappings: HashMap::new(),
            backtrace_rows: 0,
            fullpath_rows: 0,
            skipped_rows: 0,
            fingerprint: None,
        }
    }

    /// Sets the target label `cross_mapping_of` answers for.
    pub fn with_default_target(mut self, label: impl Into<String>) -> Self {
        self.default_target = label.into();
        self
    }

    /// Records the digest of the input the store is built from.
    pub fn with_fingerprint(mut self, fingerprint: Option<String>) -> Self {
        self.fingerprint = fingerprint;
        self
    }

    /// Runs a complete load from a table source.
    ///
    /// Tables are read in a fixed order: terms, node2term, backtrace,
    /// fullpath, synonyms, alternate ids, cross mappings. Terms and backtrace
    /// are required; the rest load as empty when absent.
    pub fn load_from<S: TableSource>(source: &S, config: &Config) -> Result<TermGraphStore, LoadError> {
        let tables = Self::tables_for(config);
        let fingerprint = source.fingerprint(&tables)?;
        let mut loader = Self::new(config).with_fingerprint(fingerprint);

        loader.load_terms(required::<TermRow, _>(source, Table::Terms)?)?;
        if let Some(rows) = optional::<Node2TermRow, _>(source, Table::Node2Term)? {
            loader.load_node2term(rows)?;
        }
        loader.load_ancestors(required::<BacktraceRow, _>(source, Table::Backtrace)?)?;
        if let Some(rows) = optional::<FullpathRow, _>(source, Table::Fullpath)? {
            loader.load_descendants(rows)?;
        }
        if let Some(rows) = optional::<SynonymRow, _>(source, Table::Synonyms)? {
            loader.load_synonyms(rows)?;
        }
        if let Some(rows) = optional::<AltIdRow, _>(source, Table::AltIds)? {
            loader.load_alternate_ids(rows)?;
        }
        if let Some(rows) = optional::<CrossMappingRow, _>(source, Table::CrossMappings)? {
            for label in config.ontology.mapping_targets() {
                let targets = if config.ontology.join_target_terms {
                    optional::<TargetTermRow, _>(source, Table::TargetTerms(label.clone()))?
                } else {
                    None
                };
                match targets {
                    Some(targets) => loader.load_cross_ontology_mapping_joined(
                        rows.iter().cloned(),
                        targets,
                        &label,
                    )?,
                    None => loader.load_cross_ontology_mapping(rows.iter().cloned(), &label)?,
                }
            }
        }

        loader.finish()
    }

    /// Every table a load from `config` may read.
    pub fn tables_for(config: &Config) -> Vec<Table> {
        let mut tables = vec![
            Table::Terms,
            Table::Node2Term,
            Table::Backtrace,
            Table::Fullpath,
            Table::Synonyms,
            Table::AltIds,
            Table::CrossMappings,
        ];
        if config.ontology.join_target_terms {
            tables.extend(
                config
                    .ontology
                    .mapping_targets()
                    .into_iter()
                    .map(Table::TargetTerms),
            );
        }
        tables
    }

    /// Registers terms and their nodes.
    ///
    /// Each row carries a term id, its comma-concatenated node ids, name,
    /// definition and alternate ids. The root sentinel's nodes are mapped but
    /// the root itself is not registered as a term.
    pub fn load_terms<I>(&mut self, rows: I) -> Result<(), LoadError>
    where
        I: IntoIterator<Item = TermRow>,
    {
        let table = Table::Terms;
        let mut loaded = 0usize;

        for (idx, row) in rows.into_iter().enumerate() {
            let row_no = idx + 1;
            let term_id = clean(row.term_id.as_deref())
                .ok_or(LoadError::MissingTermId {
                    table: table.clone(),
                    row: row_no,
                })?
                .to_string();
            let nodes = parse_node_ids(row.nodes.as_deref(), &self.separators, &table, row_no)?;

            if term_id == self.root_term {
                for node in nodes {
                    self.map_node(node, &term_id)?;
                }
                debug!(term = %term_id, "Mapped root sentinel nodes");
                continue;
            }

            if nodes.is_empty() {
                warn!(term = %term_id, row = row_no, "Term has no nodes, skipping");
                self.skipped_rows += 1;
                continue;
            }

            let mut term = Term::new(term_id.clone(), clean(row.name.as_deref()).unwrap_or_default())
                .with_definition(clean(row.definition.as_deref()).unwrap_or_default());
            term.alternate_ids = split_list(row.alt_ids.as_deref(), &self.separators)
                .map(str::to_string)
                .collect();

            match self.terms.entry(term_id.clone()) {
                Entry::Occupied(mut existing) => {
                    if !existing.get().agrees_with(&term) {
                        return Err(LoadError::ConflictingTerm(term_id));
                    }
                    existing.get_mut().alternate_ids.extend(term.alternate_ids);
                }
                Entry::Vacant(slot) => {
                    slot.insert(term);
                }
            }

            for node in nodes {
                self.map_node(node, &term_id)?;
                self.own_node(&term_id, node);
            }
            loaded += 1;
        }

        info!(rows = loaded, terms = self.terms.len(), "Loaded terms");
        Ok(())
    }

    /// Adds node to term pairs for nodes not already known from the term rows.
    ///
    /// A node mapped to an already registered term becomes one of that
    /// term's positions. Call after [`load_terms`](Self::load_terms).
    pub fn load_node2term<I>(&mut self, rows: I) -> Result<(), LoadError>
    where
        I: IntoIterator<Item = Node2TermRow>,
    {
        let table = Table::Node2Term;
        let before = self.node_to_term.len();

        for (idx, row) in rows.into_iter().enumerate() {
            let row_no = idx + 1;
            let node = self.required_node(row.node_id.as_deref(), &table, row_no)?;
            let term_id = clean(row.term_id.as_deref()).ok_or(LoadError::MissingTermId {
                table: table.clone(),
                row: row_no,
            })?;
            self.map_node(node, term_id)?;
            if self.terms.contains_key(term_id) {
                self.own_node(term_id, node);
            }
        }

        info!(
            added = self.node_to_term.len() - before,
            nodes = self.node_to_term.len(),
            "Loaded node to term mappings"
        );
        Ok(())
    }

    /// Reads backtrace paths into per-node ancestor sets.
    ///
    /// Every node on a row's path other than the row's own node becomes one
    /// of its ancestors. Rows for the same node accumulate.
    pub fn load_ancestors<I>(&mut self, rows: I) -> Result<(), LoadError>
    where
        I: IntoIterator<Item = BacktraceRow>,
    {
        let table = Table::Backtrace;
        let mut read = 0usize;

        for (idx, row) in rows.into_iter().enumerate() {
            let row_no = idx + 1;
            let node = self.required_node(row.node_id.as_deref(), &table, row_no)?;
            let mut path = parse_node_ids(row.path.as_deref(), &self.separators, &table, row_no)?;
            read += 1;

            if path.last() == Some(&node) {
                path.pop();
            }
            if let Some(parent) = path.last().copied() {
                if parent != node {
                    self.parents.entry(node).or_default().insert(parent);
                }
            }

            let ancestors = self.ancestors.entry(node).or_default();
            ancestors.extend(path.into_iter().filter(|ancestor| *ancestor != node));
        }

        self.backtrace_rows += read;
        info!(rows = read, nodes = self.ancestors.len(), "Loaded ancestor backtraces");
        Ok(())
    }

    /// Parses descendant fullpaths once and files them under their start node.
    pub fn load_descendants<I>(&mut self, rows: I) -> Result<(), LoadError>
    where
        I: IntoIterator<Item = FullpathRow>,
    {
        let table = Table::Fullpath;
        let mut read = 0usize;

        for (idx, row) in rows.into_iter().enumerate() {
            let row_no = idx + 1;
            let start = self.required_node(row.node_id.as_deref(), &table, row_no)?;
            let mut nodes =
                parse_node_ids(row.fullpath.as_deref(), &self.separators, &table, row_no)?;

            if nodes.is_empty() {
                warn!(node = %start, row = row_no, "Fullpath row has an empty path, skipping");
                self.skipped_rows += 1;
                continue;
            }
            if nodes[0] != start {
                nodes.insert(0, start);
            }

            self.fullpaths.entry(start).or_default().push(NodePath {
                row: self.fullpath_rows,
                nodes,
            });
            self.fullpath_rows += 1;
            read += 1;
        }

        info!(rows = read, start_nodes = self.fullpaths.len(), "Loaded descendant fullpaths");
        Ok(())
    }

    /// Accumulates synonyms per term, keeping first-seen order.
    pub fn load_synonyms<I>(&mut self, rows: I) -> Result<(), LoadError>
    where
        I: IntoIterator<Item = SynonymRow>,
    {
        let table = Table::Synonyms;
        let mut added = 0usize;

        for (idx, row) in rows.into_iter().enumerate() {
            let row_no = idx + 1;
            let term_id = clean(row.term_id.as_deref()).ok_or(LoadError::MissingTermId {
                table: table.clone(),
                row: row_no,
            })?;
            let Some(synonym) = clean(row.syn_name.as_deref()) else {
                debug!(term = %term_id, row = row_no, "Empty synonym, skipping");
                self.skipped_rows += 1;
                continue;
            };

            let synonyms = self.synonyms.entry(term_id.to_string()).or_default();
            if !synonyms.iter().any(|s| s == synonym) {
                synonyms.push(synonym.to_string());
                added += 1;
            }
        }

        info!(synonyms = added, terms = self.synonyms.len(), "Loaded synonyms");
        Ok(())
    }

    /// Accumulates alternate ids per term.
    pub fn load_alternate_ids<I>(&mut self, rows: I) -> Result<(), LoadError>
    where
        I: IntoIterator<Item = AltIdRow>,
    {
        let table = Table::AltIds;
        let mut added = 0usize;

        for (idx, row) in rows.into_iter().enumerate() {
            let row_no = idx + 1;
            let term_id = clean(row.term_id.as_deref()).ok_or(LoadError::MissingTermId {
                table: table.clone(),
                row: row_no,
            })?;
            let Some(alt_id) = clean(row.alt_id.as_deref()) else {
                debug!(term = %term_id, row = row_no, "Empty alternate id, skipping");
                self.skipped_rows += 1;
                continue;
            };

            if self
                .alternate_ids
                .entry(term_id.to_string())
                .or_default()
                .insert(alt_id.to_string())
            {
                added += 1;
            }
        }

        info!(alternate_ids = added, "Loaded alternate ids");
        Ok(())
    }

    /// Loads cross-ontology mappings whose `ontology` column equals `target_label`.
    pub fn load_cross_ontology_mapping<I>(&mut self, rows: I, target_label: &str) -> Result<(), LoadError>
    where
        I: IntoIterator<Item = CrossMappingRow>,
    {
        self.accumulate_mappings(rows, target_label, None)
    }

    /// Like [`load_cross_ontology_mapping`](Self::load_cross_ontology_mapping),
    /// but also drops mappings whose target is missing from the target
    /// ontology's term-info table.
    pub fn load_cross_ontology_mapping_joined<I, T>(
        &mut self,
        rows: I,
        target_terms: T,
        target_label: &str,
    ) -> Result<(), LoadError>
    where
        I: IntoIterator<Item = CrossMappingRow>,
        T: IntoIterator<Item = TargetTermRow>,
    {
        let known: HashSet<String> = target_terms
            .into_iter()
            .filter_map(|row| clean(row.term_id.as_deref()).map(str::to_string))
            .collect();
        debug!(label = target_label, targets = known.len(), "Joining mappings against target terms");
        self.accumulate_mappings(rows, target_label, Some(&known))
    }

    fn accumulate_mappings<I>(
        &mut self,
        rows: I,
        target_label: &str,
        known_targets: Option<&HashSet<String>>,
    ) -> Result<(), LoadError>
    where
        I: IntoIterator<Item = CrossMappingRow>,
    {
        let table = Table::CrossMappings;
        let mut added = 0usize;
        let mut unjoined = 0usize;
        let by_term = self.cross_mappings.entry(target_label.to_string()).or_default();

        for (idx, row) in rows.into_iter().enumerate() {
            let row_no = idx + 1;
            if clean(row.ontology.as_deref()) != Some(target_label) {
                continue;
            }
            let term_id = clean(row.term_id.as_deref()).ok_or(LoadError::MissingTermId {
                table: table.clone(),
                row: row_no,
            })?;
            let Some(mapped) = clean(row.mapped_term_id.as_deref()) else {
                warn!(term = %term_id, row = row_no, "Mapping without target id, skipping");
                self.skipped_rows += 1;
                continue;
            };
            if let Some(known) = known_targets {
                if !known.contains(mapped) {
                    unjoined += 1;
                    continue;
                }
            }

            let targets = by_term.entry(term_id.to_string()).or_default();
            if !targets.iter().any(|t| t == mapped) {
                targets.push(mapped.to_string());
                added += 1;
            }
        }

        info!(
            label = target_label,
            mappings = added,
            unjoined,
            "Loaded cross-ontology mappings"
        );
        Ok(())
    }

    /// Validates the accumulated maps and publishes the store.
    pub fn finish(mut self) -> Result<TermGraphStore, LoadError> {
        for (term_id, nodes) in &self.term_to_nodes {
            if nodes.is_empty() {
                return Err(LoadError::Invariant(format!("term {} owns no nodes", term_id)));
            }
            for node in nodes {
                if self.node_to_term.get(node) != Some(term_id) {
                    return Err(LoadError::Invariant(format!(
                        "node {} of term {} maps elsewhere",
                        node, term_id
                    )));
                }
            }
        }
        if let Some(orphan) = self.terms.keys().find(|id| !self.term_to_nodes.contains_key(*id)) {
            return Err(LoadError::Invariant(format!("term {} has no node entry", orphan)));
        }
        for (node, term_id) in &self.node_to_term {
            if !self.terms.contains_key(term_id) {
                continue;
            }
            let owned = self.term_to_nodes.get(term_id).map(Vec::as_slice).unwrap_or(&[]);
            if !owned.contains(node) {
                return Err(LoadError::Invariant(format!(
                    "node {} maps to term {} but is not one of its nodes",
                    node, term_id
                )));
            }
        }

        for term in self.terms.values() {
            if !term.alternate_ids.is_empty() {
                self.alternate_ids
                    .entry(term.id.clone())
                    .or_default()
                    .extend(term.alternate_ids.iter().cloned());
            }
        }

        let mut alternate_to_term = HashMap::new();
        let mut owners: Vec<&TermId> = self.alternate_ids.keys().collect();
        owners.sort();
        for owner in owners {
            for alt in &self.alternate_ids[owner] {
                match alternate_to_term.entry(alt.clone()) {
                    Entry::Vacant(slot) => {
                        slot.insert(owner.clone());
                    }
                    Entry::Occupied(existing) => {
                        warn!(alt = %alt, first = %existing.get(), second = %owner, "Alternate id claimed by two terms");
                    }
                }
            }
        }

        let stats = StoreStats {
            terms: self.terms.len(),
            nodes: self.node_to_term.len(),
            backtrace_rows: self.backtrace_rows,
            ancestor_links: self.ancestors.values().map(BTreeSet::len).sum(),
            fullpaths: self.fullpath_rows,
            synonyms: self.synonyms.values().map(Vec::len).sum(),
            alternate_ids: self.alternate_ids.values().map(BTreeSet::len).sum(),
            cross_mappings: self
                .cross_mappings
                .iter()
                .map(|(label, by_term)| (label.clone(), by_term.values().map(Vec::len).sum()))
                .collect(),
            skipped_rows: self.skipped_rows,
        };

        info!(
            ontology = %self.ontology,
            terms = stats.terms,
            nodes = stats.nodes,
            fullpaths = stats.fullpaths,
            skipped = stats.skipped_rows,
            "Ontology store built"
        );

        Ok(TermGraphStore {
            terms: self.terms,
            node_to_term: self.node_to_term,
            term_to_nodes: self.term_to_nodes,
            ancestors: self.ancestors,
            parents: self.parents,
            fullpaths: self.fullpaths,
            synonyms: self.synonyms,
            alternate_ids: self.alternate_ids,
            alternate_to_term,
            cross_mappings: self.cross_mappings,
            ontology: self.ontology,
            root_term: self.root_term,
            default_target: self.default_target,
            stats,
            fingerprint: self.fingerprint,
            loaded_at: Utc::now(),
        })
    }

    fn required_node(&self, raw: Option<&str>, table: &Table, row: usize) -> Result<NodeId, LoadError> {
        let token = clean(raw).ok_or(LoadError::MissingNodeId {
            table: table.clone(),
            row,
        })?;
        parse_node_id(token, table, row)
    }

    fn own_node(&mut self, term_id: &str, node: NodeId) {
        let owned = self.term_to_nodes.entry(term_id.to_string()).or_default();
        if !owned.contains(&node) {
            owned.push(node);
        }
    }

    fn map_node(&mut self, node: NodeId, term_id: &str) -> Result<(), LoadError> {
        match self.node_to_term.entry(node) {
            Entry::Occupied(existing) if existing.get() != term_id => Err(LoadError::ConflictingNode {
                node,
                existing: existing.get().clone(),
                conflicting: term_id.to_string(),
            }),
            Entry::Occupied(_) => Ok(()),
            Entry::Vacant(slot) => {
                slot.insert(term_id.to_string());
                Ok(())
            }
        }
    }
}

fn required<R, S>(source: &S, table: Table) -> Result<Vec<R>, LoadError>
where
    R: DeserializeOwned,
    S: TableSource,
{
    Ok(optional(source, table)?.unwrap_or_default())
}

/// Reads a table, failing only when a required one is absent.
fn optional<R, S>(source: &S, table: Table) -> Result<Option<Vec<R>>, LoadError>
where
    R: DeserializeOwned,
    S: TableSource,
{
    match source.rows::<R>(&table)? {
        Some(rows) => Ok(Some(rows)),
        None if table.is_required() => Err(LoadError::MissingTable {
            path: source.location(&table),
            table,
        }),
        None => {
            info!(table = %table, path = %source.location(&table).display(), "Optional table absent, treating as empty");
            Ok(None)
        }
    }
}
