//! JSON-file record store
//!
//! One pretty-printed JSON file per collection under the data directory.
//! Every operation re-reads the full collection from disk and mutations
//! rewrite the whole file; a per-collection mutex serializes each
//! load-mutate-save cycle so concurrent writers cannot drop each other's
//! changes. Records carry their own identifiers - the store never
//! assigns them.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::warn;

use crate::{Error, Result};

pub mod albums;
pub mod concerts;
pub mod contacts;
pub mod models;
pub mod seed;
pub mod songs;
pub mod users;

/// Users collection name
pub const USERS: &str = "users";
/// Concerts collection name
pub const CONCERTS: &str = "concerts";
/// Songs collection name
pub const SONGS: &str = "songs";
/// Albums collection name
pub const ALBUMS: &str = "albums";
/// Contact submissions collection name
pub const CONTACTS: &str = "contacts";

const COLLECTIONS: [&str; 5] = [USERS, CONCERTS, SONGS, ALBUMS, CONTACTS];

/// JSON-file record store with per-collection write locking
#[derive(Clone)]
pub struct Store {
    data_dir: PathBuf,
    locks: Arc<HashMap<&'static str, Mutex<()>>>,
}

impl Store {
    /// Open a store rooted at `data_dir`, creating the directory if missing
    pub async fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        tokio::fs::create_dir_all(&data_dir).await?;

        let locks = COLLECTIONS
            .iter()
            .map(|name| (*name, Mutex::new(())))
            .collect();

        Ok(Self {
            data_dir,
            locks: Arc::new(locks),
        })
    }

    /// Backing file for a collection
    pub fn collection_path(&self, collection: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", collection))
    }

    /// Whether the backing file for a collection exists yet
    pub async fn collection_exists(&self, collection: &str) -> bool {
        tokio::fs::try_exists(self.collection_path(collection))
            .await
            .unwrap_or(false)
    }

    /// Load all records of a collection.
    ///
    /// A missing, unreadable or corrupt file yields an empty collection;
    /// the condition is logged and never fails the caller.
    pub async fn load<T: DeserializeOwned>(&self, collection: &str) -> Vec<T> {
        let path = self.collection_path(collection);

        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!("Corrupt collection file {}: {}", path.display(), e);
                Vec::new()
            }
        }
    }

    /// Replace the stored contents of a collection.
    ///
    /// This is a full overwrite, not an append. Write failures propagate
    /// to the caller.
    pub async fn save<T: Serialize>(&self, collection: &str, records: &[T]) -> Result<()> {
        let path = self.collection_path(collection);
        let json = serde_json::to_string_pretty(records)?;

        tokio::fs::write(&path, json)
            .await
            .map_err(|e| Error::Internal(format!("Failed to write {}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Run a read-modify-write cycle over a collection under its lock.
    ///
    /// The closure receives the loaded records; on `Ok` the (possibly
    /// mutated) records are saved back and the closure's value returned.
    /// On `Err` nothing is written.
    pub async fn mutate<T, R, F>(&self, collection: &str, f: F) -> Result<R>
    where
        T: DeserializeOwned + Serialize,
        F: FnOnce(&mut Vec<T>) -> Result<R>,
    {
        let lock = self
            .locks
            .get(collection)
            .ok_or_else(|| Error::Internal(format!("Unknown collection: {}", collection)))?;
        let _guard = lock.lock().await;

        let mut records: Vec<T> = self.load(collection).await;
        let out = f(&mut records)?;
        self.save(collection, &records).await?;

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::models::Song;
    use super::*;

    async fn test_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = Store::open(dir.path()).await.expect("Failed to open store");
        (dir, store)
    }

    fn song(title: &str) -> Song {
        Song::new(
            title.to_string(),
            "Indie Rock".to_string(),
            "2024-01-01".parse().unwrap(),
            None,
            None,
        )
    }

    #[tokio::test]
    async fn test_load_missing_collection_is_empty() {
        let (_dir, store) = test_store().await;
        let songs: Vec<Song> = store.load(SONGS).await;
        assert!(songs.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        let (_dir, store) = test_store().await;
        let records = vec![song("First"), song("Second")];

        store.save(SONGS, &records).await.unwrap();
        let loaded: Vec<Song> = store.load(SONGS).await;

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].title, "First");
        assert_eq!(loaded[0].id, records[0].id);
    }

    #[tokio::test]
    async fn test_saved_file_is_pretty_printed() {
        let (_dir, store) = test_store().await;
        store.save(SONGS, &[song("Only")]).await.unwrap();

        let raw = std::fs::read_to_string(store.collection_path(SONGS)).unwrap();
        assert!(raw.contains('\n'));
        assert!(raw.trim_start().starts_with('['));
    }

    #[tokio::test]
    async fn test_corrupt_file_degrades_to_empty() {
        let (_dir, store) = test_store().await;
        std::fs::write(store.collection_path(SONGS), "{ not json").unwrap();

        let songs: Vec<Song> = store.load(SONGS).await;
        assert!(songs.is_empty());
    }

    #[tokio::test]
    async fn test_mutate_error_leaves_file_untouched() {
        let (_dir, store) = test_store().await;
        store.save(SONGS, &[song("Keep me")]).await.unwrap();

        let result: Result<()> = store
            .mutate::<Song, _, _>(SONGS, |songs| {
                songs.clear();
                Err(Error::NotFound("nothing here".to_string()))
            })
            .await;

        assert!(result.is_err());
        let songs: Vec<Song> = store.load(SONGS).await;
        assert_eq!(songs.len(), 1);
    }

    #[tokio::test]
    async fn test_mutate_unknown_collection_rejected() {
        let (_dir, store) = test_store().await;
        let result = store
            .mutate::<Song, _, _>("bogus", |_| Ok(()))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_concurrent_mutations_are_not_lost() {
        let (_dir, store) = test_store().await;

        let mut handles = Vec::new();
        for i in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .mutate::<Song, _, _>(SONGS, move |songs| {
                        songs.push(song(&format!("Track {}", i)));
                        Ok(())
                    })
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let songs: Vec<Song> = store.load(SONGS).await;
        assert_eq!(songs.len(), 8, "every concurrent insert must survive");
    }
}
