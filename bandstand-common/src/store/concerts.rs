//! Concert collection operations

use chrono::NaiveDate;
use uuid::Uuid;

use crate::store::models::Concert;
use crate::store::{Store, CONCERTS};
use crate::{Error, Result};

/// Fields that may be merged onto an existing concert
#[derive(Debug, Default, Clone)]
pub struct ConcertPatch {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub venue: Option<String>,
    pub description: Option<String>,
    pub ticket_url: Option<String>,
}

/// All concerts, ascending by date
pub async fn list(store: &Store) -> Vec<Concert> {
    let mut concerts = store.load::<Concert>(CONCERTS).await;
    concerts.sort_by_key(|c| c.date);
    concerts
}

/// Append a new concert
pub async fn insert(store: &Store, concert: Concert) -> Result<Concert> {
    store
        .mutate::<Concert, _, _>(CONCERTS, move |concerts| {
            concerts.push(concert.clone());
            Ok(concert)
        })
        .await
}

/// Merge the provided fields onto a concert; the identifier never changes
pub async fn update(store: &Store, id: Uuid, patch: ConcertPatch) -> Result<Concert> {
    store
        .mutate::<Concert, _, _>(CONCERTS, move |concerts| {
            let concert = concerts
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| Error::NotFound("Concert not found".to_string()))?;

            if let Some(title) = patch.title {
                concert.title = title;
            }
            if let Some(date) = patch.date {
                concert.date = date;
            }
            if let Some(venue) = patch.venue {
                concert.venue = venue;
            }
            if let Some(description) = patch.description {
                concert.description = Some(description);
            }
            if let Some(ticket_url) = patch.ticket_url {
                concert.ticket_url = Some(ticket_url);
            }

            Ok(concert.clone())
        })
        .await
}

/// Delete a concert by identifier
pub async fn remove(store: &Store, id: Uuid) -> Result<()> {
    store
        .mutate::<Concert, _, _>(CONCERTS, move |concerts| {
            let before = concerts.len();
            concerts.retain(|c| c.id != id);
            if concerts.len() == before {
                return Err(Error::NotFound("Concert not found".to_string()));
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

    fn concert(title: &str, date: &str) -> Concert {
        Concert::new(
            title.to_string(),
            date.parse().unwrap(),
            "Hall".to_string(),
            None,
            None,
        )
    }

    #[tokio::test]
    async fn test_list_sorted_ascending_by_date() {
        let (_dir, store) = test_store().await;
        insert(&store, concert("Later", "2025-09-01")).await.unwrap();
        insert(&store, concert("Earliest", "2025-01-15")).await.unwrap();
        insert(&store, concert("Middle", "2025-06-01")).await.unwrap();

        let titles: Vec<String> = list(&store).await.into_iter().map(|c| c.title).collect();
        assert_eq!(titles, vec!["Earliest", "Middle", "Later"]);
    }

    #[tokio::test]
    async fn test_update_merges_only_provided_fields() {
        let (_dir, store) = test_store().await;
        let created = insert(&store, concert("Show", "2025-06-01")).await.unwrap();

        let patch = ConcertPatch {
            venue: Some("Bigger Hall".to_string()),
            ..ConcertPatch::default()
        };
        let updated = update(&store, created.id, patch).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.venue, "Bigger Hall");
        assert_eq!(updated.title, created.title);
        assert_eq!(updated.date, created.date);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_concert_not_found() {
        let (_dir, store) = test_store().await;
        let result = update(&store, Uuid::new_v4(), ConcertPatch::default()).await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_remove_deletes_and_missing_id_is_not_found() {
        let (_dir, store) = test_store().await;
        let created = insert(&store, concert("Show", "2025-06-01")).await.unwrap();

        remove(&store, created.id).await.unwrap();
        assert!(list(&store).await.is_empty());

        let result = remove(&store, created.id).await;
        assert!(matches!(result, Err(Error::NotFound(_))));
        assert!(list(&store).await.is_empty());
    }
}
