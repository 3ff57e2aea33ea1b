//! Album store
//!
//! The store is the only stateful component. It keeps albums in insertion
//! order and hands out sequential, zero-padded IDs from a counter it owns.
//! All state sits behind one lock so that the duplicate check, ID assignment
//! and append of a create happen as a single step.

use tokio::sync::RwLock;

use crate::types::{Album, AlbumId, AlbumPayload};
use crate::{Error, Result};

pub mod seed;

pub use seed::SeedSource;

/// Ordered in-memory album collection
pub struct AlbumStore {
    inner: RwLock<StoreInner>,
}

struct StoreInner {
    albums: Vec<Album>,
    /// Next numeric ID to hand out; never decreases. `None` once the
    /// counter has passed `u64::MAX`.
    next_id: Option<u64>,
}

impl StoreInner {
    fn position(&self, id: &str) -> Option<usize> {
        self.albums.iter().position(|album| album.id == id)
    }

    fn allocate_id(&mut self) -> Result<AlbumId> {
        loop {
            let value = self.next_id.ok_or(Error::IdsExhausted)?;
            self.next_id = value.checked_add(1);
            let id = format_id(value);
            // Only a hand-written seed ID such as "7" vs "007" can collide
            if self.position(&id).is_none() {
                return Ok(id);
            }
        }
    }
}

impl AlbumStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::with_albums(Vec::new())
    }

    /// Create a store holding `albums` in the given order.
    ///
    /// Later records reusing an ID already seen are dropped. The ID counter
    /// starts one past the largest numeric ID present.
    pub fn with_albums(albums: Vec<Album>) -> Self {
        let mut unique: Vec<Album> = Vec::with_capacity(albums.len());
        for album in albums {
            if unique.iter().any(|existing| existing.id == album.id) {
                tracing::warn!(id = %album.id, "Dropping seed album with duplicate ID");
                continue;
            }
            unique.push(album);
        }

        let next_id = unique
            .iter()
            .filter_map(|album| album.id.parse::<u64>().ok())
            .max()
            .map_or(Some(1), |max| max.checked_add(1));

        Self {
            inner: RwLock::new(StoreInner {
                albums: unique,
                next_id,
            }),
        }
    }

    /// All albums in display order
    pub async fn list(&self) -> Vec<Album> {
        self.inner.read().await.albums.clone()
    }

    /// Fetch a single album by ID
    pub async fn get(&self, id: &str) -> Result<Album> {
        let inner = self.inner.read().await;
        inner
            .albums
            .iter()
            .find(|album| album.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found(id))
    }

    /// Validate and append a new album, returning it with its assigned ID
    pub async fn create(&self, payload: AlbumPayload) -> Result<Album> {
        if payload.title.trim().is_empty() || payload.artist.trim().is_empty() {
            return Err(Error::validation("missing artist or title"));
        }

        let mut inner = self.inner.write().await;

        if let Some(existing) = inner
            .albums
            .iter()
            .find(|album| album.same_work(&payload.title, &payload.artist))
        {
            return Err(Error::Duplicate {
                id: existing.id.clone(),
            });
        }

        let id = inner.allocate_id()?;
        let album = Album::from_payload(id, payload);
        inner.albums.push(album.clone());

        tracing::debug!(id = %album.id, title = %album.title, "Album created");
        Ok(album)
    }

    /// Replace every field except the ID, returning the album as it was
    /// before the change.
    pub async fn update(&self, id: &str, payload: AlbumPayload) -> Result<Album> {
        let mut inner = self.inner.write().await;
        let index = inner.position(id).ok_or_else(|| Error::not_found(id))?;

        let replacement = Album::from_payload(id, payload);
        let previous = std::mem::replace(&mut inner.albums[index], replacement);

        tracing::debug!(id, "Album updated");
        Ok(previous)
    }

    /// Remove an album, keeping the order of the rest
    pub async fn delete(&self, id: &str) -> Result<Album> {
        let mut inner = self.inner.write().await;
        let index = inner.position(id).ok_or_else(|| Error::not_found(id))?;
        let removed = inner.albums.remove(index);

        tracing::debug!(id, "Album deleted");
        Ok(removed)
    }

    /// Number of albums currently stored
    pub async fn len(&self) -> usize {
        self.inner.read().await.albums.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.albums.is_empty()
    }
}

impl Default for AlbumStore {
    fn default() -> Self {
        Self::new()
    }
}

fn format_id(value: u64) -> AlbumId {
    format!("{:03}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn album(id: &str, title: &str, artist: &str) -> Album {
        Album::from_payload(id, AlbumPayload::new(title, artist, 2000, 9.99))
    }

    fn ids(albums: &[Album]) -> Vec<&str> {
        albums.iter().map(|a| a.id.as_str()).collect()
    }

    #[tokio::test]
    async fn create_assigns_next_padded_id() {
        let store = AlbumStore::with_albums(vec![album("001", "A", "X")]);

        let created = store
            .create(AlbumPayload::new("B", "Y", 1999, 12.5))
            .await
            .unwrap();

        assert_eq!(created.id, "002");
        assert_eq!(ids(&store.list().await), vec!["001", "002"]);
    }

    #[tokio::test]
    async fn create_into_empty_store_starts_at_one() {
        let store = AlbumStore::new();

        let created = store.create(AlbumPayload::new("A", "X", 0, 0.0)).await.unwrap();

        assert_eq!(created.id, "001");
    }

    #[tokio::test]
    async fn ids_keep_increasing_across_creates() {
        let store = AlbumStore::with_albums(vec![album("007", "A", "X"), album("003", "B", "Y")]);

        let mut previous = 7;
        for n in 0..5 {
            let created = store
                .create(AlbumPayload::new(format!("T{n}"), "Z", 0, 0.0))
                .await
                .unwrap();
            let value: u64 = created.id.parse().unwrap();
            assert!(value > previous);
            previous = value;
        }
        assert_eq!(previous, 12);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = AlbumStore::with_albums(vec![album("001", "A", "X"), album("002", "B", "Y")]);

        store.delete("002").await.unwrap();
        let created = store.create(AlbumPayload::new("C", "Z", 0, 0.0)).await.unwrap();

        assert_eq!(created.id, "003");
    }

    #[tokio::test]
    async fn ids_wider_than_three_digits_are_not_truncated() {
        let store = AlbumStore::with_albums(vec![album("999", "A", "X")]);

        let created = store.create(AlbumPayload::new("B", "Y", 0, 0.0)).await.unwrap();

        assert_eq!(created.id, "1000");
    }

    #[tokio::test]
    async fn seed_id_at_u64_max_exhausts_counter_without_panicking() {
        let store = AlbumStore::with_albums(vec![album(&u64::MAX.to_string(), "A", "X")]);

        let err = store.create(AlbumPayload::new("B", "Y", 0, 0.0)).await.unwrap_err();

        assert!(matches!(err, Error::IdsExhausted));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn last_id_below_u64_max_is_still_assigned() {
        let store = AlbumStore::with_albums(vec![album(&(u64::MAX - 1).to_string(), "A", "X")]);

        let created = store.create(AlbumPayload::new("B", "Y", 0, 0.0)).await.unwrap();
        assert_eq!(created.id, u64::MAX.to_string());

        let err = store.create(AlbumPayload::new("C", "Z", 0, 0.0)).await.unwrap_err();
        assert!(matches!(err, Error::IdsExhausted));
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn non_numeric_seed_ids_do_not_break_allocation() {
        let store = AlbumStore::with_albums(vec![album("abc", "A", "X"), album("2", "B", "Y")]);

        let first = store.create(AlbumPayload::new("C", "Z", 0, 0.0)).await.unwrap();

        assert_eq!(first.id, "003");
    }

    #[tokio::test]
    async fn duplicate_title_and_artist_conflicts() {
        let store = AlbumStore::with_albums(vec![album("001", "A", "X")]);

        let err = store
            .create(AlbumPayload::new(" a ", "x", 0, 0.0))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Duplicate { ref id } if id == "001"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn create_requires_title_and_artist() {
        let store = AlbumStore::new();

        let err = store.create(AlbumPayload::new("", "X", 0, 0.0)).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let err = store.create(AlbumPayload::new("A", "   ", 0, 0.0)).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn get_returns_matching_album() {
        let store = AlbumStore::with_albums(vec![album("001", "A", "X"), album("002", "B", "Y")]);

        let found = store.get("002").await.unwrap();
        assert_eq!(found.title, "B");

        assert!(matches!(store.get("404").await, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn update_replaces_fields_and_keeps_id() {
        let store = AlbumStore::with_albums(vec![album("001", "A", "X"), album("002", "B", "Y")]);

        let previous = store
            .update("001", AlbumPayload::new("New", "Artist", 2024, 1.0))
            .await
            .unwrap();
        assert_eq!(previous.title, "A");

        let current = store.get("001").await.unwrap();
        assert_eq!(
            current,
            Album {
                id: "001".to_string(),
                title: "New".to_string(),
                artist: "Artist".to_string(),
                year: 2024,
                price: 1.0,
            }
        );
        assert_eq!(ids(&store.list().await), vec!["001", "002"]);
    }

    #[tokio::test]
    async fn update_unknown_id_leaves_store_unchanged() {
        let store = AlbumStore::with_albums(vec![album("001", "A", "X")]);
        let before = store.list().await;

        let err = store
            .update("002", AlbumPayload::new("New", "Artist", 0, 0.0))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(store.list().await, before);
    }

    #[tokio::test]
    async fn delete_preserves_order_of_remaining() {
        let store = AlbumStore::with_albums(vec![
            album("001", "A", "X"),
            album("002", "B", "Y"),
            album("003", "C", "Z"),
        ]);

        let removed = store.delete("002").await.unwrap();

        assert_eq!(removed.title, "B");
        assert_eq!(ids(&store.list().await), vec!["001", "003"]);
    }

    #[tokio::test]
    async fn delete_unknown_id_leaves_store_unchanged() {
        let store = AlbumStore::with_albums(vec![album("001", "A", "X")]);

        assert!(matches!(store.delete("009").await, Err(Error::NotFound(_))));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn seeding_drops_repeated_ids() {
        let store = AlbumStore::with_albums(vec![album("001", "A", "X"), album("001", "B", "Y")]);

        let albums = store.list().await;
        assert_eq!(albums.len(), 1);
        assert_eq!(albums[0].title, "A");
    }

    #[tokio::test]
    async fn concurrent_creates_get_distinct_ids() {
        let store = std::sync::Arc::new(AlbumStore::new());

        let handles: Vec<_> = (0..16)
            .map(|n| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .create(AlbumPayload::new(format!("Title {n}"), "Artist", 0, 0.0))
                        .await
                        .unwrap()
                        .id
                })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 16);
    }
}
