use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;
use crate::loader::{GraphLoader, LoadError, TableSource};
use crate::store::TermGraphStore;

/// Owns the published ontology snapshot and replaces it on reload.
///
/// Readers call [`snapshot`](Self::snapshot) and query the returned `Arc`;
/// the lock is held only long enough to clone or swap that pointer. A reload
/// builds a complete new store first, so readers never observe a partial
/// one, and those still holding the previous snapshot keep their results.
pub struct OntologyManager<S: TableSource> {
    source: S,
    config: Config,
    current: RwLock<Arc<TermGraphStore>>,
    generation: AtomicU64,
    writer: Mutex<()>,
}

/// What a conditional reload did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// A new store was published with this generation.
    Reloaded(u64),
    /// The source fingerprint matched the published store; nothing was rebuilt.
    Unchanged,
}

impl<S: TableSource> OntologyManager<S> {
    /// Loads the initial snapshot. Nothing is published if this fails.
    pub fn load(source: S, config: Config) -> Result<Self, ManagerError> {
        let store = GraphLoader::load_from(&source, &config)?;
        info!(terms = store.term_count(), "Initial ontology snapshot published");

        Ok(Self {
            source,
            config,
            current: RwLock::new(Arc::new(store)),
            generation: AtomicU64::new(1),
            writer: Mutex::new(()),
        })
    }

    /// The currently published store.
    pub fn snapshot(&self) -> Arc<TermGraphStore> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Number of snapshots published so far, starting at 1.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Rebuilds the store from the source and publishes it.
    ///
    /// On failure the previous snapshot stays published.
    pub fn reload(&self) -> Result<u64, ManagerError> {
        let _writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        self.rebuild()
    }

    /// Reloads only when the source fingerprint differs from the published one.
    pub fn reload_if_changed(&self) -> Result<ReloadOutcome, ManagerError> {
        let _writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());

        let tables = GraphLoader::tables_for(&self.config);
        let fingerprint = self.source.fingerprint(&tables)?;
        let current = self.snapshot();
        if fingerprint.is_some() && fingerprint.as_deref() == current.fingerprint() {
            info!("Ontology source unchanged, keeping current snapshot");
            return Ok(ReloadOutcome::Unchanged);
        }

        self.rebuild().map(ReloadOutcome::Reloaded)
    }

    fn rebuild(&self) -> Result<u64, ManagerError> {
        let store = match GraphLoader::load_from(&self.source, &self.config) {
            Ok(store) => store,
            Err(e) => {
                warn!(error = %e, "Reload failed, previous snapshot stays published");
                return Err(e.into());
            }
        };

        let fresh = Arc::new(store);
        {
            let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
            *guard = fresh;
        }
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;

        info!(generation, "Ontology snapshot reloaded");
        Ok(generation)
    }
}

impl<S> OntologyManager<S>
where
    S: TableSource + Send + Sync + 'static,
{
    /// Runs [`reload`](Self::reload) on the blocking thread pool.
    pub async fn reload_in_background(self: Arc<Self>) -> Result<u64, ManagerError> {
        tokio::task::spawn_blocking(move || self.reload()).await?
    }
}

/// Errors that can occur in OntologyManager operations.
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    #[error("Background reload did not complete: {0}")]
    Join(#[from] tokio::task::JoinError),
}
