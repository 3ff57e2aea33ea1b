//! Startup seeding for the album store

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::types::{Album, AlbumPayload};
use crate::Result;

use super::AlbumStore;

/// Where the initial set of albums comes from
#[derive(Debug, Clone, PartialEq)]
pub enum SeedSource {
    /// A JSON array of albums on disk
    File { path: PathBuf },
    /// The built-in catalogue
    Builtin,
    /// Start with no albums
    Empty,
}

impl SeedSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        SeedSource::File { path: path.into() }
    }

    /// Resolve the seed albums.
    ///
    /// A missing or unreadable seed file yields an empty list; the failure is
    /// only logged.
    pub async fn load(&self) -> Vec<Album> {
        match self {
            SeedSource::File { path } => match read_seed_file(path).await {
                Ok(albums) => {
                    tracing::info!(path = %path.display(), count = albums.len(), "Loaded seed file");
                    albums
                }
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %err,
                        "Could not load seed file; starting with an empty store"
                    );
                    Vec::new()
                }
            },
            SeedSource::Builtin => builtin_albums(),
            SeedSource::Empty => Vec::new(),
        }
    }

    /// Build a store populated from this source
    pub async fn build_store(&self) -> AlbumStore {
        AlbumStore::with_albums(self.load().await)
    }
}

/// Read a JSON array of albums from `path`
pub async fn read_seed_file(path: &Path) -> Result<Vec<Album>> {
    let data = fs::read(path).await?;
    let albums = serde_json::from_slice(&data)?;
    Ok(albums)
}

/// The catalogue used when no seed file is configured
pub fn builtin_albums() -> Vec<Album> {
    vec![
        Album::from_payload(
            "001",
            AlbumPayload::new("Blue Train", "John Coltrane", 1957, 56.99),
        ),
        Album::from_payload("002", AlbumPayload::new("Jeru", "Gerry Mulligan", 1962, 17.99)),
        Album::from_payload(
            "003",
            AlbumPayload::new("Sarah Vaughan and Clifford Brown", "Sarah Vaughan", 1954, 39.99),
        ),
    ]
}
