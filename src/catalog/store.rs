use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One retrievable record: trigger keywords plus a free-form payload that
/// gets rendered into the prompt context block when a keyword matches.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    pub keywords: Vec<String>,
    pub data: Value,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    products: Vec<CatalogEntry>,
}

/// In-memory catalog, loaded once at startup. Read-only afterwards.
#[derive(Debug, Default)]
pub struct CatalogStore {
    entries: Vec<CatalogEntry>,
}

impl CatalogStore {
    /// Load and validate the catalog file. A missing or unparseable file is an
    /// error for the caller to degrade on; individually malformed entries are
    /// skipped with a warning rather than failing the whole load.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let file: CatalogFile = serde_json::from_str(&raw)?;

        let total = file.products.len();
        let entries: Vec<CatalogEntry> = file
            .products
            .into_iter()
            .filter(|entry| {
                let valid = !entry.keywords.is_empty()
                    && entry.keywords.iter().all(|k| !k.trim().is_empty());
                if !valid {
                    warn!("Skipping catalog entry with empty keyword list: {}", entry.data);
                }
                valid
            })
            .collect();

        info!(
            "Catalog loaded from {}: {} of {} entries valid",
            path.display(),
            entries.len(),
            total
        );

        Ok(Self { entries })
    }

    /// Load, degrading to an empty catalog on failure. The server keeps
    /// running either way; retrieval over an empty catalog just finds nothing.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        match Self::load(&path) {
            Ok(store) => store,
            Err(e) => {
                warn!(
                    "Failed to load catalog from {}: {}. Continuing with empty catalog.",
                    path.as_ref().display(),
                    e
                );
                Self::default()
            }
        }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }
}
