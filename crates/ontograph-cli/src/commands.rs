//! Subcommand handlers. Each one queries a published snapshot and prints
//! either plain text or JSON.

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::info;

use ontograph_core::{ConfigError, ManagerError, QueryError, TermGraphStore, TermId};

/// Errors surfaced by the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Manager(#[from] ManagerError),

    #[error("{0}")]
    Query(#[from] QueryError),

    #[error("Loader task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// 2 for lookups that found nothing, 1 for everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Query(_) => 2,
            _ => 1,
        }
    }
}

pub fn stats(store: &TermGraphStore, json: bool) -> Result<(), CliError> {
    let stats = store.stats();
    if json {
        return print_json(&json!({
            "ontology": store.ontology(),
            "root_term": store.root_term(),
            "default_target": store.default_target(),
            "fingerprint": store.fingerprint(),
            "loaded_at": store.loaded_at().to_rfc3339(),
            "stats": stats,
        }));
    }

    println!(
        "{} ontology loaded at {}",
        store.ontology(),
        store.loaded_at().format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("  Root term:       {}", store.root_term());
    println!("  Terms:           {}", stats.terms);
    println!("  Nodes:           {}", stats.nodes);
    println!("  Backtrace rows:  {}", stats.backtrace_rows);
    println!("  Ancestor links:  {}", stats.ancestor_links);
    println!("  Fullpaths:       {}", stats.fullpaths);
    println!("  Synonyms:        {}", stats.synonyms);
    println!("  Alternate ids:   {}", stats.alternate_ids);
    for (label, count) in &stats.cross_mappings {
        println!("  Mappings {:<7} {}", format!("{}:", label), count);
    }
    if stats.skipped_rows > 0 {
        println!("  Skipped rows:    {}", stats.skipped_rows);
    }
    if let Some(fingerprint) = store.fingerprint() {
        println!("  Fingerprint:     {}", fingerprint);
    }
    Ok(())
}

pub fn term(store: &TermGraphStore, id: &str, json: bool) -> Result<(), CliError> {
    let term_id = resolve(store, id)?;
    let view = store
        .overlay()
        .term_view(term_id)
        .ok_or_else(|| QueryError::UnknownTerm(id.to_string()))?;

    if json {
        return print_json(&view);
    }

    println!("{}  {}", view.id, view.name);
    if !view.definition.is_empty() {
        println!("  Definition: {}", view.definition);
    }
    let nodes: Vec<String> = view.nodes.iter().map(ToString::to_string).collect();
    println!("  Nodes: {}", nodes.join(", "));
    if !view.synonyms.is_empty() {
        println!("  Synonyms:");
        for synonym in &view.synonyms {
            println!("    - {}", synonym);
        }
    }
    if !view.alternate_ids.is_empty() {
        let alts: Vec<&str> = view.alternate_ids.iter().map(String::as_str).collect();
        println!("  Alternate ids: {}", alts.join(", "));
    }
    if !view.top_levels.is_empty() {
        let top: Vec<&str> = view.top_levels.iter().map(String::as_str).collect();
        println!("  Top levels: {}", top.join(", "));
    }
    for (label, mapped) in &view.cross_mappings {
        println!("  {} mappings: {}", label, mapped.join(", "));
    }
    Ok(())
}

pub fn ancestors(store: &TermGraphStore, id: &str, json: bool) -> Result<(), CliError> {
    let term_id = resolve(store, id)?;
    let ancestors = store.ancestry().ancestors_of_term(term_id);
    print_terms(store, term_id, "ancestors", &ancestors, json)
}

pub fn parents(store: &TermGraphStore, id: &str, json: bool) -> Result<(), CliError> {
    let term_id = resolve(store, id)?;
    let parents = store.ancestry().parents_of_term(term_id);
    print_terms(store, term_id, "parents", &parents, json)
}

pub fn descendants(store: &TermGraphStore, id: &str, flat: bool, json: bool) -> Result<(), CliError> {
    let term_id = resolve(store, id)?;
    let resolver = store.descendants();

    if flat {
        let below = resolver.descendant_term_ids(term_id)?;
        return print_terms(store, term_id, "descendants", &below, json);
    }

    let graphs = resolver.descendant_graphs(term_id)?;
    if json {
        return print_json(&json!({ "term": term_id, "paths": graphs }));
    }

    if graphs.is_empty() {
        println!("{} has no descendants.", term_id);
    }
    for path in &graphs {
        println!("{}", path);
    }
    Ok(())
}

pub fn mappings(
    store: &TermGraphStore,
    id: &str,
    ontology: Option<&str>,
    json: bool,
) -> Result<(), CliError> {
    let term_id = resolve(store, id)?;
    let label = ontology.unwrap_or_else(|| store.default_target());
    let mapped = store.overlay().cross_mapping_for(label, term_id);

    if json {
        return print_json(&json!({ "term": term_id, "ontology": label, "mappings": mapped }));
    }

    if mapped.is_empty() {
        println!("No {} mappings for {}.", label, term_id);
    }
    for target in mapped {
        println!("{}", target);
    }
    Ok(())
}

pub fn top_level(store: &TermGraphStore, json: bool) -> Result<(), CliError> {
    let terms = store.ancestry().top_level_terms();
    let root = store.root_term();
    print_terms(store, root, "top_level", &terms, json)
}

/// Accepts registered ids and alternate ids; anything else is unknown.
fn resolve<'a>(store: &'a TermGraphStore, id: &str) -> Result<&'a str, QueryError> {
    let requested = id.trim();
    let resolved = store
        .overlay()
        .resolve_id(requested)
        .ok_or_else(|| QueryError::UnknownTerm(requested.to_string()))?;
    if resolved != requested {
        info!(requested, resolved, "Resolved alternate id");
    }
    Ok(resolved)
}

#[derive(Serialize)]
struct NamedTerm<'a> {
    id: &'a str,
    name: &'a str,
}

fn print_terms(
    store: &TermGraphStore,
    term_id: &str,
    key: &str,
    ids: &BTreeSet<TermId>,
    json: bool,
) -> Result<(), CliError> {
    let named: Vec<NamedTerm<'_>> = ids
        .iter()
        .map(|id| NamedTerm {
            id,
            name: store.term(id).map(|t| t.name.as_str()).unwrap_or_default(),
        })
        .collect();

    if json {
        let mut out = serde_json::Map::new();
        out.insert("term".to_string(), json!(term_id));
        out.insert(key.to_string(), serde_json::to_value(&named)?);
        return print_json(&out);
    }

    if named.is_empty() {
        println!("None.");
    }
    for term in named {
        println!("{}  {}", term.id, term.name);
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ontograph_core::model::TermRow;
    use ontograph_core::GraphLoader;

    fn store() -> TermGraphStore {
        let mut loader = GraphLoader::with_root("MP:0000001");
        loader
            .load_terms(vec![TermRow::new("MP:0000266", "4").with_alt_ids("MP:0002126")])
            .unwrap();
        loader.finish().unwrap()
    }

    #[test]
    fn test_resolve_trims_padding() {
        let store = store();
        assert_eq!(resolve(&store, "  MP:0000266 ").unwrap(), "MP:0000266");
        assert_eq!(resolve(&store, " MP:0002126").unwrap(), "MP:0000266");
    }

    #[test]
    fn test_resolve_unknown_id() {
        let store = store();
        let err = resolve(&store, " MP:9999999 ").unwrap_err();
        assert_eq!(err, QueryError::UnknownTerm("MP:9999999".to_string()));
        assert_eq!(CliError::from(err).exit_code(), 2);
    }
}
