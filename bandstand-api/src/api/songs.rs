//! Song endpoints
//!
//! Listing is public; mutation requires an admin token. A song without a
//! release date gets the creation date, keeping the descending sort total.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use bandstand_common::store::models::Song;
use bandstand_common::store::songs::{self, SongPatch};

use crate::api::concerts::DeleteResponse;
use crate::api::error::ApiResult;
use crate::api::{optional_field, parse_date, require_admin, require_field, AuthUser};
use crate::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongRequest {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub release_date: Option<String>,
    pub spotify_url: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SongListResponse {
    pub success: bool,
    pub songs: Vec<Song>,
}

#[derive(Debug, Serialize)]
pub struct SongResponse {
    pub success: bool,
    pub song: Song,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/songs
pub async fn list_songs(State(state): State<AppState>) -> ApiResult<SongListResponse> {
    let songs = songs::list(&state.store).await;
    Ok(Json(SongListResponse {
        success: true,
        songs,
    }))
}

/// POST /api/songs (admin)
pub async fn create_song(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<SongRequest>,
) -> ApiResult<SongResponse> {
    require_admin(&state, &auth).await?;

    let title = require_field(req.title, "title")?;
    let genre = require_field(req.genre, "genre")?;
    let release_date = match optional_field(req.release_date) {
        Some(raw) => parse_date(&raw, "releaseDate")?,
        None => Utc::now().date_naive(),
    };

    let song = Song::new(
        title,
        genre,
        release_date,
        optional_field(req.spotify_url),
        optional_field(req.description),
    );
    let song = songs::insert(&state.store, song).await?;
    info!("Song created: {}", song.title);

    Ok(Json(SongResponse {
        success: true,
        song,
    }))
}

/// PUT /api/songs/:id (admin)
pub async fn update_song(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    auth: AuthUser,
    Json(req): Json<SongRequest>,
) -> ApiResult<SongResponse> {
    require_admin(&state, &auth).await?;

    let release_date = match optional_field(req.release_date) {
        Some(raw) => Some(parse_date(&raw, "releaseDate")?),
        None => None,
    };
    let patch = SongPatch {
        title: optional_field(req.title),
        genre: optional_field(req.genre),
        release_date,
        spotify_url: optional_field(req.spotify_url),
        description: optional_field(req.description),
    };

    let song = songs::update(&state.store, id, patch).await?;
    Ok(Json(SongResponse {
        success: true,
        song,
    }))
}

/// DELETE /api/songs/:id (admin)
pub async fn delete_song(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    auth: AuthUser,
) -> ApiResult<DeleteResponse> {
    require_admin(&state, &auth).await?;

    songs::remove(&state.store, id).await?;
    info!("Song deleted: {}", id);

    Ok(Json(DeleteResponse {
        success: true,
        message: "Song deleted".to_string(),
    }))
}
