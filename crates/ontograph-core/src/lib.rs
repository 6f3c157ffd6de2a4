pub mod config;
pub mod loader;
pub mod manager;
pub mod model;
pub mod query;
pub mod store;

pub use config::{Config, ConfigError, OntologyConfig, SourceConfig};
pub use loader::{GraphLoader, LoadError, Table, TableSource, TsvDirectory};
pub use manager::{ManagerError, OntologyManager, ReloadOutcome};
pub use model::{DescendantPath, NodeId, Term, TermId, TermView};
pub use query::{AncestryResolver, DescendantGraphResolver, OverlayAccessor, QueryError};
pub use store::{StoreStats, TermGraphStore};
