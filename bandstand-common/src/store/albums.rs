//! Album collection operations
//!
//! Photo lists keep insertion order and allow duplicates; removal is by
//! exact value and drops every occurrence.

use uuid::Uuid;

use crate::store::models::Album;
use crate::store::{Store, ALBUMS};
use crate::{Error, Result};

/// Fields that may be merged onto an existing album
#[derive(Debug, Default, Clone)]
pub struct AlbumPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub cover_image: Option<String>,
}

/// All albums, in insertion order
pub async fn list(store: &Store) -> Vec<Album> {
    store.load::<Album>(ALBUMS).await
}

/// Append a new album
pub async fn insert(store: &Store, album: Album) -> Result<Album> {
    store
        .mutate::<Album, _, _>(ALBUMS, move |albums| {
            albums.push(album.clone());
            Ok(album)
        })
        .await
}

/// Merge the provided fields onto an album; the identifier and photo
/// list never change here
pub async fn update(store: &Store, id: Uuid, patch: AlbumPatch) -> Result<Album> {
    store
        .mutate::<Album, _, _>(ALBUMS, move |albums| {
            let album = albums
                .iter_mut()
                .find(|a| a.id == id)
                .ok_or_else(|| Error::NotFound("Album not found".to_string()))?;

            if let Some(title) = patch.title {
                album.title = title;
            }
            if let Some(description) = patch.description {
                album.description = Some(description);
            }
            if let Some(cover_image) = patch.cover_image {
                album.cover_image = Some(cover_image);
            }

            Ok(album.clone())
        })
        .await
}

/// Delete an album by identifier
pub async fn remove(store: &Store, id: Uuid) -> Result<()> {
    store
        .mutate::<Album, _, _>(ALBUMS, move |albums| {
            let before = albums.len();
            albums.retain(|a| a.id != id);
            if albums.len() == before {
                return Err(Error::NotFound("Album not found".to_string()));
            }
            Ok(())
        })
        .await
}

/// Append a photo path to an album
pub async fn add_photo(store: &Store, id: Uuid, photo_path: String) -> Result<Album> {
    store
        .mutate::<Album, _, _>(ALBUMS, move |albums| {
            let album = albums
                .iter_mut()
                .find(|a| a.id == id)
                .ok_or_else(|| Error::NotFound("Album not found".to_string()))?;
            album.photos.push(photo_path);
            Ok(album.clone())
        })
        .await
}

/// Remove every occurrence of a photo path from an album
pub async fn remove_photo(store: &Store, id: Uuid, photo_path: String) -> Result<Album> {
    store
        .mutate::<Album, _, _>(ALBUMS, move |albums| {
            let album = albums
                .iter_mut()
                .find(|a| a.id == id)
                .ok_or_else(|| Error::NotFound("Album not found".to_string()))?;
            album.photos.retain(|p| p != &photo_path);
            Ok(album.clone())
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

    fn album(title: &str) -> Album {
        Album::new(title.to_string(), None, None)
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let (_dir, store) = test_store().await;
        insert(&store, album("B")).await.unwrap();
        insert(&store, album("A")).await.unwrap();

        let titles: Vec<String> = list(&store).await.into_iter().map(|a| a.title).collect();
        assert_eq!(titles, vec!["B", "A"]);
    }

    #[tokio::test]
    async fn test_photos_keep_order_and_duplicates() {
        let (_dir, store) = test_store().await;
        let created = insert(&store, album("Live")).await.unwrap();

        add_photo(&store, created.id, "/img/one.jpg".to_string()).await.unwrap();
        add_photo(&store, created.id, "/img/two.jpg".to_string()).await.unwrap();
        let updated = add_photo(&store, created.id, "/img/one.jpg".to_string()).await.unwrap();

        assert_eq!(updated.photos, vec!["/img/one.jpg", "/img/two.jpg", "/img/one.jpg"]);
    }

    #[tokio::test]
    async fn test_remove_photo_drops_all_occurrences() {
        let (_dir, store) = test_store().await;
        let created = insert(&store, album("Live")).await.unwrap();
        add_photo(&store, created.id, "/img/one.jpg".to_string()).await.unwrap();
        add_photo(&store, created.id, "/img/two.jpg".to_string()).await.unwrap();
        add_photo(&store, created.id, "/img/one.jpg".to_string()).await.unwrap();

        let updated = remove_photo(&store, created.id, "/img/one.jpg".to_string())
            .await
            .unwrap();

        assert_eq!(updated.photos, vec!["/img/two.jpg"]);
    }

    #[tokio::test]
    async fn test_photo_ops_on_missing_album_not_found() {
        let (_dir, store) = test_store().await;
        let result = add_photo(&store, Uuid::new_v4(), "/img/one.jpg".to_string()).await;
        assert!(matches!(result, Err(Error::NotFound(_))));

        let result = remove_photo(&store, Uuid::new_v4(), "/img/one.jpg".to_string()).await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_merges_only_provided_fields() {
        let (_dir, store) = test_store().await;
        let created = insert(
            &store,
            Album::new("Live".to_string(), Some("desc".to_string()), None),
        )
        .await
        .unwrap();

        let patch = AlbumPatch {
            cover_image: Some("/img/cover.jpg".to_string()),
            ..AlbumPatch::default()
        };
        let updated = update(&store, created.id, patch).await.unwrap();

        assert_eq!(updated.title, "Live");
        assert_eq!(updated.description.as_deref(), Some("desc"));
        assert_eq!(updated.cover_image.as_deref(), Some("/img/cover.jpg"));
    }
}
