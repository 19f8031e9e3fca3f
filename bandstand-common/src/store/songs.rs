//! Song collection operations

use chrono::NaiveDate;
use uuid::Uuid;

use crate::store::models::Song;
use crate::store::{Store, SONGS};
use crate::{Error, Result};

/// Fields that may be merged onto an existing song
#[derive(Debug, Default, Clone)]
pub struct SongPatch {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub spotify_url: Option<String>,
    pub description: Option<String>,
}

/// All songs, descending by release date (newest first)
pub async fn list(store: &Store) -> Vec<Song> {
    let mut songs = store.load::<Song>(SONGS).await;
    songs.sort_by(|a, b| b.release_date.cmp(&a.release_date));
    songs
}

/// Append a new song
pub async fn insert(store: &Store, song: Song) -> Result<Song> {
    store
        .mutate::<Song, _, _>(SONGS, move |songs| {
            songs.push(song.clone());
            Ok(song)
        })
        .await
}

/// Merge the provided fields onto a song; the identifier never changes
pub async fn update(store: &Store, id: Uuid, patch: SongPatch) -> Result<Song> {
    store
        .mutate::<Song, _, _>(SONGS, move |songs| {
            let song = songs
                .iter_mut()
                .find(|s| s.id == id)
                .ok_or_else(|| Error::NotFound("Song not found".to_string()))?;

            if let Some(title) = patch.title {
                song.title = title;
            }
            if let Some(genre) = patch.genre {
                song.genre = genre;
            }
            if let Some(release_date) = patch.release_date {
                song.release_date = release_date;
            }
            if let Some(spotify_url) = patch.spotify_url {
                song.spotify_url = Some(spotify_url);
            }
            if let Some(description) = patch.description {
                song.description = Some(description);
            }

            Ok(song.clone())
        })
        .await
}

/// Delete a song by identifier
pub async fn remove(store: &Store, id: Uuid) -> Result<()> {
    store
        .mutate::<Song, _, _>(SONGS, move |songs| {
            let before = songs.len();
            songs.retain(|s| s.id != id);
            if songs.len() == before {
                return Err(Error::NotFound("Song not found".to_string()));
            }
            Ok(())
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = Store::open(dir.path()).await.expect("Failed to open store");
        (dir, store)
    }

    fn song(title: &str, release_date: &str) -> Song {
        Song::new(
            title.to_string(),
            "Indie Rock".to_string(),
            release_date.parse().unwrap(),
            None,
            None,
        )
    }

    #[tokio::test]
    async fn test_list_sorted_descending_by_release_date() {
        let (_dir, store) = test_store().await;
        insert(&store, song("Oldest", "2022-03-01")).await.unwrap();
        insert(&store, song("Newest", "2025-01-10")).await.unwrap();
        insert(&store, song("Middle", "2023-07-22")).await.unwrap();

        let titles: Vec<String> = list(&store).await.into_iter().map(|s| s.title).collect();
        assert_eq!(titles, vec!["Newest", "Middle", "Oldest"]);
    }

    #[tokio::test]
    async fn test_update_merges_only_provided_fields() {
        let (_dir, store) = test_store().await;
        let created = insert(&store, song("Track", "2024-05-01")).await.unwrap();

        let patch = SongPatch {
            spotify_url: Some("https://open.spotify.com/track/x".to_string()),
            ..SongPatch::default()
        };
        let updated = update(&store, created.id, patch).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Track");
        assert_eq!(updated.genre, "Indie Rock");
        assert_eq!(
            updated.spotify_url.as_deref(),
            Some("https://open.spotify.com/track/x")
        );
    }

    #[tokio::test]
    async fn test_remove_missing_song_not_found() {
        let (_dir, store) = test_store().await;
        insert(&store, song("Track", "2024-05-01")).await.unwrap();

        let result = remove(&store, Uuid::new_v4()).await;
        assert!(matches!(result, Err(Error::NotFound(_))));
        assert_eq!(list(&store).await.len(), 1);
    }
}
