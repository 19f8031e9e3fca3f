//! HTTP API handlers

pub mod albums;
pub mod auth;
pub mod concerts;
pub mod contact;
pub mod error;
pub mod health;
pub mod newsletter;
pub mod songs;
pub mod users;

pub use albums::{
    add_album_photo, create_album, delete_album, list_albums, remove_album_photo, update_album,
};
pub use auth::{require_admin, AuthUser};
pub use concerts::{create_concert, delete_concert, list_concerts, update_concert};
pub use contact::submit_contact;
pub use error::{ApiError, ApiResult};
pub use health::health;
pub use newsletter::send_newsletter;
pub use songs::{create_song, delete_song, list_songs, update_song};
pub use users::{login, newsletter_preference, register, verify_token};

use bandstand_common::Error;

/// Pull a required string field out of a request, trimming whitespace
pub(crate) fn require_field(value: Option<String>, name: &str) -> Result<String, ApiError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::from(Error::InvalidInput(format!(
            "{} is required",
            name
        )))),
    }
}

/// Normalize an optional string field; blank values become `None`
pub(crate) fn optional_field(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a `YYYY-MM-DD` calendar date field
pub(crate) fn parse_date(value: &str, name: &str) -> Result<chrono::NaiveDate, ApiError> {
    value.parse().map_err(|_| {
        ApiError::from(Error::InvalidInput(format!(
            "{} must be a YYYY-MM-DD date",
            name
        )))
    })
}
