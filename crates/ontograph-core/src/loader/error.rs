use std::path::PathBuf;
use thiserror::Error;

use super::source::Table;
use crate::model::NodeId;

/// Fatal errors that abort a load. A store is never published after one.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode {table} row {row}: {source}")]
    Decode {
        table: Table,
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("Required table {table} not found at {}", path.display())]
    MissingTable { table: Table, path: PathBuf },

    #[error("{table} row {row}: missing term id")]
    MissingTermId { table: Table, row: usize },

    #[error("{table} row {row}: missing node id")]
    MissingNodeId { table: Table, row: usize },

    #[error("{table} row {row}: invalid node id {value:?}")]
    InvalidNodeId {
        table: Table,
        row: usize,
        value: String,
    },

    #[error("Node {node} is mapped to both {existing} and {conflicting}")]
    ConflictingNode {
        node: NodeId,
        existing: String,
        conflicting: String,
    },

    #[error("Term {0} appears more than once with conflicting data")]
    ConflictingTerm(String),

    #[error("Store invariant violated: {0}")]
    Invariant(String),
}

impl LoadError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }
}
