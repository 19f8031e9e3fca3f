//! Entity records held in the collection files
//!
//! All records serialize camelCase to match the on-disk file format and
//! the HTTP surface. Identifiers are assigned by the constructors; the
//! store itself never generates them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User role; gates content mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

/// Registered site user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    /// Unique, case-sensitive as stored
    pub email: String,
    /// PHC-format hash; never exposed through the API
    pub password_hash: String,
    pub role: Role,
    pub newsletter_subscribed: bool,
    pub joined_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh identifier and join date
    pub fn new(
        name: String,
        email: String,
        password_hash: String,
        role: Role,
        newsletter_subscribed: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            role,
            newsletter_subscribed,
            joined_at: Utc::now(),
        }
    }
}

/// Upcoming or past concert
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Concert {
    pub id: Uuid,
    pub title: String,
    pub date: NaiveDate,
    pub venue: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Concert {
    pub fn new(
        title: String,
        date: NaiveDate,
        venue: String,
        description: Option<String>,
        ticket_url: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            date,
            venue,
            description,
            ticket_url,
            created_at: Utc::now(),
        }
    }
}

/// Released track
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: Uuid,
    pub title: String,
    pub genre: String,
    pub release_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spotify_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Song {
    pub fn new(
        title: String,
        genre: String,
        release_date: NaiveDate,
        spotify_url: Option<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            genre,
            release_date,
            spotify_url,
            description,
        }
    }
}

/// Photo album
///
/// `photos` keeps insertion order and allows duplicate paths; removal is
/// by exact value and drops every occurrence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub photos: Vec<String>,
}

impl Album {
    pub fn new(title: String, description: Option<String>, cover_image: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            cover_image,
            photos: Vec::new(),
        }
    }
}

/// Contact form submission; write-once, never updated
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl ContactMessage {
    pub fn new(name: String, email: String, message: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            message,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_serializes_camel_case() {
        let user = User::new(
            "A".to_string(),
            "a@x.com".to_string(),
            "$argon2id$hash".to_string(),
            Role::User,
            true,
        );

        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("\"passwordHash\""));
        assert!(json.contains("\"newsletterSubscribed\""));
        assert!(json.contains("\"joinedAt\""));
        assert!(json.contains("\"role\":\"user\""));
    }

    #[test]
    fn test_concert_optional_fields_omitted() {
        let concert = Concert::new(
            "Show".to_string(),
            "2025-06-01".parse().unwrap(),
            "Hall".to_string(),
            None,
            None,
        );

        let json = serde_json::to_string(&concert).unwrap();
        assert!(!json.contains("description"));
        assert!(!json.contains("ticketUrl"));
        assert!(json.contains("\"date\":\"2025-06-01\""));
    }

    #[test]
    fn test_album_photos_default_on_missing_field() {
        let json = r#"{"id":"7f2c1c4e-54d2-4e36-9a3e-1df1f4b0a001","title":"Live"}"#;
        let album: Album = serde_json::from_str(json).unwrap();
        assert!(album.photos.is_empty());
    }
}
