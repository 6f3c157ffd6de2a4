//! Stateless query facades over a published [`TermGraphStore`](crate::store::TermGraphStore).
//!
//! - [`AncestryResolver`] - ancestors, parents and top-level terms
//! - [`DescendantGraphResolver`] - descendant paths rebuilt from fullpath rows
//! - [`OverlayAccessor`] - synonyms, alternate ids and cross-ontology mappings

mod ancestry;
mod descendants;
mod overlay;

pub use ancestry::AncestryResolver;
pub use descendants::DescendantGraphResolver;
pub use overlay::OverlayAccessor;

use thiserror::Error;

/// Errors reported by queries. Unknown ids are signalled, never panicked on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The term owns no nodes, so no graph can be built from it.
    #[error("No graph available for {0}: the term owns no nodes")]
    NoGraph(String),

    /// The id is neither a registered term nor a known alternate id.
    #[error("Unknown term: {0}")]
    UnknownTerm(String),
}
