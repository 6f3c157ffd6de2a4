//! Raw input rows, one struct per exported table.
//!
//! Fields are kept as optional strings: the loader decides which gaps are
//! fatal and which are skipped, and reports invalid node ids itself.
//! Column aliases accept the names used by the relational exports
//! (`termId`, `termName`, ...).

use serde::Deserialize;

/// `(term_id, nodes, name, definition, alt_ids)` with comma-concatenated lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TermRow {
    #[serde(default, alias = "termId")]
    pub term_id: Option<String>,
    #[serde(default, alias = "node_ids")]
    pub nodes: Option<String>,
    #[serde(default, alias = "termName")]
    pub name: Option<String>,
    #[serde(default, alias = "termDefinition")]
    pub definition: Option<String>,
    #[serde(default, alias = "alt_id")]
    pub alt_ids: Option<String>,
}

impl TermRow {
    pub fn new(term_id: impl Into<String>, nodes: impl Into<String>) -> Self {
        Self {
            term_id: Some(term_id.into()),
            nodes: Some(nodes.into()),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = Some(definition.into());
        self
    }

    pub fn with_alt_ids(mut self, alt_ids: impl Into<String>) -> Self {
        self.alt_ids = Some(alt_ids.into());
        self
    }
}

/// `(node_id, term_id)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Node2TermRow {
    #[serde(default)]
    pub node_id: Option<String>,
    #[serde(default)]
    pub term_id: Option<String>,
}

impl Node2TermRow {
    pub fn new(node_id: impl ToString, term_id: impl Into<String>) -> Self {
        Self {
            node_id: Some(node_id.to_string()),
            term_id: Some(term_id.into()),
        }
    }
}

/// `(node_id, path)`: the path from the root down to the node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BacktraceRow {
    #[serde(default)]
    pub node_id: Option<String>,
    #[serde(default, alias = "fullpath")]
    pub path: Option<String>,
}

impl BacktraceRow {
    pub fn new(node_id: impl ToString, path: impl Into<String>) -> Self {
        Self {
            node_id: Some(node_id.to_string()),
            path: Some(path.into()),
        }
    }
}

/// `(node_id, child_node_id, fullpath)`: one path from a start node down to
/// one descendant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FullpathRow {
    #[serde(default)]
    pub node_id: Option<String>,
    #[serde(default)]
    pub child_node_id: Option<String>,
    #[serde(default, alias = "path")]
    pub fullpath: Option<String>,
}

impl FullpathRow {
    pub fn new(node_id: impl ToString, fullpath: impl Into<String>) -> Self {
        Self {
            node_id: Some(node_id.to_string()),
            child_node_id: None,
            fullpath: Some(fullpath.into()),
        }
    }
}

/// `(term_id, syn_name)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SynonymRow {
    #[serde(default)]
    pub term_id: Option<String>,
    #[serde(default, alias = "synonym")]
    pub syn_name: Option<String>,
}

impl SynonymRow {
    pub fn new(term_id: impl Into<String>, syn_name: impl Into<String>) -> Self {
        Self {
            term_id: Some(term_id.into()),
            syn_name: Some(syn_name.into()),
        }
    }
}

/// `(term_id, alt_id)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AltIdRow {
    #[serde(default)]
    pub term_id: Option<String>,
    #[serde(default)]
    pub alt_id: Option<String>,
}

impl AltIdRow {
    pub fn new(term_id: impl Into<String>, alt_id: impl Into<String>) -> Self {
        Self {
            term_id: Some(term_id.into()),
            alt_id: Some(alt_id.into()),
        }
    }
}

/// `(term_id, mapped_term_id, ontology)`: a cross-reference from a source
/// term to a term of the ontology named by the label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CrossMappingRow {
    #[serde(default)]
    pub term_id: Option<String>,
    #[serde(default)]
    pub mapped_term_id: Option<String>,
    #[serde(default)]
    pub ontology: Option<String>,
}

impl CrossMappingRow {
    pub fn new(
        term_id: impl Into<String>,
        mapped_term_id: impl Into<String>,
        ontology: impl Into<String>,
    ) -> Self {
        Self {
            term_id: Some(term_id.into()),
            mapped_term_id: Some(mapped_term_id.into()),
            ontology: Some(ontology.into()),
        }
    }
}

/// A row of a target ontology's term-info table. Only the id is used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TargetTermRow {
    #[serde(default)]
    pub term_id: Option<String>,
}

impl TargetTermRow {
    pub fn new(term_id: impl Into<String>) -> Self {
        Self {
            term_id: Some(term_id.into()),
        }
    }
}
