//! Album endpoints
//!
//! Listing is public; album and photo mutation requires an admin token.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use bandstand_common::store::albums::{self, AlbumPatch};
use bandstand_common::store::models::Album;

use crate::api::concerts::DeleteResponse;
use crate::api::error::ApiResult;
use crate::api::{optional_field, require_admin, require_field, AuthUser};
use crate::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub cover_image: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRequest {
    pub photo_path: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AlbumListResponse {
    pub success: bool,
    pub albums: Vec<Album>,
}

#[derive(Debug, Serialize)]
pub struct AlbumResponse {
    pub success: bool,
    pub album: Album,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/albums
pub async fn list_albums(State(state): State<AppState>) -> ApiResult<AlbumListResponse> {
    let albums = albums::list(&state.store).await;
    Ok(Json(AlbumListResponse {
        success: true,
        albums,
    }))
}

/// POST /api/albums (admin)
pub async fn create_album(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<AlbumRequest>,
) -> ApiResult<AlbumResponse> {
    require_admin(&state, &auth).await?;

    let title = require_field(req.title, "title")?;
    let album = Album::new(
        title,
        optional_field(req.description),
        optional_field(req.cover_image),
    );
    let album = albums::insert(&state.store, album).await?;
    info!("Album created: {}", album.title);

    Ok(Json(AlbumResponse {
        success: true,
        album,
    }))
}

/// PUT /api/albums/:id (admin)
pub async fn update_album(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    auth: AuthUser,
    Json(req): Json<AlbumRequest>,
) -> ApiResult<AlbumResponse> {
    require_admin(&state, &auth).await?;

    let patch = AlbumPatch {
        title: optional_field(req.title),
        description: optional_field(req.description),
        cover_image: optional_field(req.cover_image),
    };

    let album = albums::update(&state.store, id, patch).await?;
    Ok(Json(AlbumResponse {
        success: true,
        album,
    }))
}

/// DELETE /api/albums/:id (admin)
pub async fn delete_album(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    auth: AuthUser,
) -> ApiResult<DeleteResponse> {
    require_admin(&state, &auth).await?;

    albums::remove(&state.store, id).await?;
    info!("Album deleted: {}", id);

    Ok(Json(DeleteResponse {
        success: true,
        message: "Album deleted".to_string(),
    }))
}

/// POST /api/albums/:id/photos (admin)
pub async fn add_album_photo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    auth: AuthUser,
    Json(req): Json<PhotoRequest>,
) -> ApiResult<AlbumResponse> {
    require_admin(&state, &auth).await?;

    let photo_path = require_field(req.photo_path, "photoPath")?;
    let album = albums::add_photo(&state.store, id, photo_path).await?;

    Ok(Json(AlbumResponse {
        success: true,
        album,
    }))
}

/// DELETE /api/albums/:id/photos (admin)
///
/// Removes every occurrence of the given path from the album.
pub async fn remove_album_photo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    auth: AuthUser,
    Json(req): Json<PhotoRequest>,
) -> ApiResult<AlbumResponse> {
    require_admin(&state, &auth).await?;

    let photo_path = require_field(req.photo_path, "photoPath")?;
    let album = albums::remove_photo(&state.store, id, photo_path).await?;

    Ok(Json(AlbumResponse {
        success: true,
        album,
    }))
}
