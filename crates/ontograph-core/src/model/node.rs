//! Node ids and the paths built from them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::TermId;

/// One DAG position of a term.
///
/// Node ids come from the upstream closure tables, where they are integer
/// surrogate keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NodeId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(NodeId)
    }
}

impl From<u32> for NodeId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// A fullpath row after parsing: the node sequence from a start node down to
/// one descendant, tagged with its position in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePath {
    /// Zero-based index of the row across the whole fullpath table.
    pub row: usize,
    /// Node ids, start node first.
    pub nodes: Vec<NodeId>,
}

impl NodePath {
    pub fn start(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }
}

/// A descendant path resolved to term ids, start term first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DescendantPath {
    pub term_ids: Vec<TermId>,
}

impl DescendantPath {
    pub fn new(term_ids: Vec<TermId>) -> Self {
        Self { term_ids }
    }

    /// Number of terms on the path, including the start term.
    pub fn len(&self) -> usize {
        self.term_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.term_ids.is_empty()
    }

    /// The term the path starts from.
    pub fn start(&self) -> Option<&str> {
        self.term_ids.first().map(String::as_str)
    }

    /// The deepest term on the path.
    pub fn leaf(&self) -> Option<&str> {
        self.term_ids.last().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.term_ids.iter().map(String::as_str)
    }
}

impl fmt::Display for DescendantPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.term_ids.join(" > "))
    }
}
