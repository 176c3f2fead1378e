//! Prize catalog seed files.
//!
//! A catalog file is a JSON array of `{ "name", "rarity", "quantity" }`
//! objects, loaded in order.

use std::path::{Path, PathBuf};

use lootforge_shared::CreatePrizeTypeRequest;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read prize catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse prize catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read and parse a catalog file.
pub async fn load_catalog(path: &Path) -> Result<Vec<CreatePrizeTypeRequest>, CatalogError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
