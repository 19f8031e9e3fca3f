//! First-run collection seeding
//!
//! Each collection file is created with default content only when it
//! does not exist yet, so existing data always survives a restart. The
//! admin password comes from configuration; when unset a random one is
//! generated and logged once.

use tracing::{info, warn};

use crate::auth;
use crate::config::{self, Settings};
use crate::store::models::{Album, Concert, ContactMessage, Role, Song, User};
use crate::store::{Store, ALBUMS, CONCERTS, CONTACTS, SONGS, USERS};
use crate::Result;

/// Seed every missing collection file with its default records
pub async fn seed_defaults(store: &Store, settings: &Settings) -> Result<()> {
    if !store.collection_exists(USERS).await {
        let password = match &settings.admin_password {
            Some(password) => password.clone(),
            None => {
                let generated = config::random_secret(16);
                warn!(
                    "No admin password configured; generated one for {}: {}",
                    settings.admin_email, generated
                );
                generated
            }
        };

        let admin = User::new(
            "Admin".to_string(),
            settings.admin_email.clone(),
            auth::hash_password(&password)?,
            Role::Admin,
            false,
        );
        store.save(USERS, &[admin]).await?;
        info!("Seeded users with admin account {}", settings.admin_email);
    }

    if !store.collection_exists(CONCERTS).await {
        store.save(CONCERTS, &sample_concerts()).await?;
        info!("Seeded concerts");
    }

    if !store.collection_exists(SONGS).await {
        store.save(SONGS, &sample_songs()).await?;
        info!("Seeded songs");
    }

    if !store.collection_exists(ALBUMS).await {
        store.save(ALBUMS, &sample_albums()).await?;
        info!("Seeded albums");
    }

    if !store.collection_exists(CONTACTS).await {
        store.save::<ContactMessage>(CONTACTS, &[]).await?;
        info!("Seeded contacts");
    }

    Ok(())
}

fn sample_concerts() -> Vec<Concert> {
    vec![
        Concert::new(
            "Riverside Summer Festival".to_string(),
            "2025-06-15".parse().expect("valid seed date"),
            "Riverside Park Main Stage".to_string(),
            Some("Open-air festival set, all ages".to_string()),
            None,
        ),
        Concert::new(
            "Acoustic Night".to_string(),
            "2025-08-10".parse().expect("valid seed date"),
            "The Old Ballroom".to_string(),
            None,
            None,
        ),
    ]
}

fn sample_songs() -> Vec<Song> {
    vec![
        Song::new(
            "Opening Act".to_string(),
            "Indie Pop".to_string(),
            "2024-11-01".parse().expect("valid seed date"),
            None,
            None,
        ),
        Song::new(
            "Late Train Home".to_string(),
            "Indie Rock".to_string(),
            "2025-02-14".parse().expect("valid seed date"),
            None,
            Some("First single from the upcoming record".to_string()),
        ),
    ]
}

fn sample_albums() -> Vec<Album> {
    let mut on_stage = Album::new(
        "On Stage".to_string(),
        Some("Moments from our live shows".to_string()),
        Some("/assets/img/on-stage-cover.jpg".to_string()),
    );
    on_stage.photos = vec![
        "/assets/img/on-stage-1.jpg".to_string(),
        "/assets/img/on-stage-2.jpg".to_string(),
    ];

    let in_the_studio = Album::new(
        "In the Studio".to_string(),
        Some("Behind the scenes while recording".to_string()),
        None,
    );

    vec![on_stage, in_the_studio]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::users;
    use std::path::PathBuf;

    fn settings(data_dir: PathBuf, admin_password: Option<&str>) -> Settings {
        Settings {
            bind_address: "127.0.0.1:0".to_string(),
            data_dir,
            token_secret: "test-secret".to_string(),
            admin_email: "admin@test.local".to_string(),
            admin_password: admin_password.map(str::to_string),
            mail: None,
        }
    }

    #[tokio::test]
    async fn test_first_run_seeds_every_collection() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).await.unwrap();
        let settings = settings(dir.path().to_path_buf(), Some("admin-pw"));

        seed_defaults(&store, &settings).await.unwrap();

        for collection in [USERS, CONCERTS, SONGS, ALBUMS, CONTACTS] {
            assert!(
                store.collection_exists(collection).await,
                "{} should exist after seeding",
                collection
            );
        }

        let admin = users::find_by_email(&store, "admin@test.local")
            .await
            .expect("admin should be seeded");
        assert_eq!(admin.role, Role::Admin);
        assert!(auth::verify_password("admin-pw", &admin.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_reseeding_preserves_existing_data() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).await.unwrap();
        let settings = settings(dir.path().to_path_buf(), Some("admin-pw"));

        seed_defaults(&store, &settings).await.unwrap();
        let registered = users::insert(
            &store,
            User::new(
                "Fan".to_string(),
                "fan@x.com".to_string(),
                "$argon2id$hash".to_string(),
                Role::User,
                true,
            ),
        )
        .await
        .unwrap();

        // Second run must not overwrite the users file
        seed_defaults(&store, &settings).await.unwrap();
        assert!(users::find_by_id(&store, registered.id).await.is_some());
    }

    #[tokio::test]
    async fn test_missing_admin_password_generates_one() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).await.unwrap();
        let settings = settings(dir.path().to_path_buf(), None);

        seed_defaults(&store, &settings).await.unwrap();

        let admin = users::find_by_email(&store, "admin@test.local")
            .await
            .expect("admin should be seeded");
        // Some password was set; it is just unknown to this test
        assert!(admin.password_hash.starts_with("$argon2id$"));
    }
}
