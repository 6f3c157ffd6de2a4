use std::fmt;
use std::fs::{self, File};
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};

use crate::config::{ConfigError, SourceConfig};

use super::error::LoadError;

/// The exported tables the loader knows about.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Table {
    Terms,
    Node2Term,
    Backtrace,
    Fullpath,
    Synonyms,
    AltIds,
    CrossMappings,
    /// Term-info table of the target ontology with this label.
    TargetTerms(String),
}

impl Table {
    /// Tables without which no store can be built.
    pub fn is_required(&self) -> bool {
        matches!(self, Table::Terms | Table::Backtrace)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Table::Terms => write!(f, "terms"),
            Table::Node2Term => write!(f, "node2term"),
            Table::Backtrace => write!(f, "backtrace"),
            Table::Fullpath => write!(f, "fullpath"),
            Table::Synonyms => write!(f, "synonyms"),
            Table::AltIds => write!(f, "alt_ids"),
            Table::CrossMappings => write!(f, "cross_mappings"),
            Table::TargetTerms(label) => write!(f, "target_terms[{}]", label),
        }
    }
}

/// Trait for row sources.
///
/// Implementations hand out the rows of one exported table at a time, in
/// table order. A table that does not exist yields `Ok(None)`; whether that
/// is fatal is the loader's decision.
pub trait TableSource {
    /// Reads all rows of a table.
    fn rows<R: DeserializeOwned>(&self, table: &Table) -> Result<Option<Vec<R>>, LoadError>;

    /// Where a table lives, for error messages.
    fn location(&self, table: &Table) -> PathBuf;

    /// A digest of the given tables' contents, if the source can compute one.
    fn fingerprint(&self, _tables: &[Table]) -> Result<Option<String>, LoadError> {
        Ok(None)
    }
}

/// Tab-separated tables in one directory.
///
/// ```text
/// data/
///   terms.tsv
///   node2term.tsv
///   node_backtrace_fullpath.tsv
///   node_subsumption_fullpath_concat.tsv
///   synonyms.tsv
///   alt_ids.tsv
///   mappings.tsv
///   ma_term_infos.tsv
/// ```
#[derive(Debug, Clone)]
pub struct TsvDirectory {
    config: SourceConfig,
    delimiter: u8,
}

impl TsvDirectory {
    /// Creates a source reading from the configured data directory.
    pub fn from_config(config: &SourceConfig) -> Result<Self, ConfigError> {
        let delimiter = config.field_delimiter_byte()?;
        Ok(Self {
            config: config.clone(),
            delimiter,
        })
    }

    /// Creates a source for `dir` with default table names.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let config = SourceConfig {
            data_dir: dir.into().to_string_lossy().to_string(),
            ..SourceConfig::default()
        };
        Self {
            config,
            delimiter: b'\t',
        }
    }

    fn file_name(&self, table: &Table) -> String {
        let tables = &self.config.tables;
        match table {
            Table::Terms => tables.terms.clone(),
            Table::Node2Term => tables.node2term.clone(),
            Table::Backtrace => tables.backtrace.clone(),
            Table::Fullpath => tables.fullpath.clone(),
            Table::Synonyms => tables.synonyms.clone(),
            Table::AltIds => tables.alt_ids.clone(),
            Table::CrossMappings => tables.cross_mappings.clone(),
            Table::TargetTerms(label) => tables.target_terms_for(label),
        }
    }
}

impl TableSource for TsvDirectory {
    fn rows<R: DeserializeOwned>(&self, table: &Table) -> Result<Option<Vec<R>>, LoadError> {
        let path = self.location(table);
        if !path.exists() {
            return Ok(None);
        }

        let file = File::open(&path).map_err(|e| LoadError::io(&path, e))?;
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .quoting(false)
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut rows = Vec::new();
        for (idx, result) in reader.deserialize().enumerate() {
            let row: R = result.map_err(|e| LoadError::Decode {
                table: table.clone(),
                row: idx + 1,
                source: e,
            })?;
            rows.push(row);
        }

        Ok(Some(rows))
    }

    fn location(&self, table: &Table) -> PathBuf {
        self.config.data_path().join(self.file_name(table))
    }

    fn fingerprint(&self, tables: &[Table]) -> Result<Option<String>, LoadError> {
        let mut hasher = Sha256::new();

        for table in tables {
            let path = self.location(table);
            hasher.update(table.to_string().as_bytes());
            if !path.exists() {
                hasher.update(b"\0absent\0");
                continue;
            }
            let bytes = fs::read(&path).map_err(|e| LoadError::io(&path, e))?;
            hasher.update((bytes.len() as u64).to_le_bytes());
            hasher.update(&bytes);
        }

        Ok(Some(hex::encode(hasher.finalize())))
    }
}
