//! Data models for the ontology term graph.
//!
//! Two disjoint id spaces are used: [`TermId`] for ontology concepts and
//! [`NodeId`] for DAG positions. A term reachable through several `is_a`
//! paths owns one node per position.

mod node;
mod rows;
mod term;

pub use node::{DescendantPath, NodeId, NodePath};
pub use rows::{
    AltIdRow, BacktraceRow, CrossMappingRow, FullpathRow, Node2TermRow, SynonymRow, TargetTermRow,
    TermRow,
};
pub use term::{Term, TermView};

/// Ontology accession, e.g. `MP:0001186`.
pub type TermId = String;
