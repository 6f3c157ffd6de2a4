//! Default values for ontograph configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

// ============================================================================
// Source Defaults
// ============================================================================

/// Default directory holding the exported tables.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Default field delimiter of the exported tables (tab, as written by `mysql -B`).
pub const DEFAULT_FIELD_DELIMITER: &str = "\t";

/// Characters separating ids inside list columns (`nodes`, `alt_ids`, `path`).
pub const DEFAULT_LIST_SEPARATORS: &str = ", ";

/// Default terms table file.
pub const DEFAULT_TERMS_FILE: &str = "terms.tsv";

/// Default node to term table file.
pub const DEFAULT_NODE2TERM_FILE: &str = "node2term.tsv";

/// Default ancestor backtrace table file.
pub const DEFAULT_BACKTRACE_FILE: &str = "node_backtrace_fullpath.tsv";

/// Default descendant fullpath table file.
pub const DEFAULT_FULLPATH_FILE: &str = "node_subsumption_fullpath_concat.tsv";

/// Default synonyms table file.
pub const DEFAULT_SYNONYMS_FILE: &str = "synonyms.tsv";

/// Default alternate ids table file.
pub const DEFAULT_ALT_IDS_FILE: &str = "alt_ids.tsv";

/// Default cross-ontology mappings table file.
pub const DEFAULT_CROSS_MAPPINGS_FILE: &str = "mappings.tsv";

/// Default target term-info file pattern. `{label}` is replaced by the
/// lowercased target ontology label.
pub const DEFAULT_TARGET_TERMS_FILE: &str = "{label}_term_infos.tsv";

/// Placeholder substituted in [`DEFAULT_TARGET_TERMS_FILE`].
pub const TARGET_LABEL_PLACEHOLDER: &str = "{label}";

// ============================================================================
// Ontology Defaults
// ============================================================================

/// Default ontology name.
pub const DEFAULT_ONTOLOGY_NAME: &str = "MP";

/// Root term of the Mammalian Phenotype ontology. Not a queryable term.
pub const DEFAULT_ROOT_TERM: &str = "MP:0000001";

/// Default target ontology for cross mappings (adult mouse anatomy).
pub const DEFAULT_CROSS_MAPPING_TARGET: &str = "MA";

// ============================================================================
// Config File Locations
// ============================================================================

/// Project-local config file name.
pub const LOCAL_CONFIG_FILE: &str = "ontograph.toml";

/// Directory under the user config dir.
pub const USER_CONFIG_DIR: &str = "ontograph";

/// File name inside [`USER_CONFIG_DIR`].
pub const USER_CONFIG_FILE: &str = "config.toml";
