//! Concert endpoints
//!
//! Listing is public; mutation requires an admin token. A successful
//! creation fans out the newsletter announcement to subscribers.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use bandstand_common::store::concerts::{self, ConcertPatch};
use bandstand_common::store::models::Concert;

use crate::api::error::ApiResult;
use crate::api::{optional_field, parse_date, require_admin, require_field, AuthUser};
use crate::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcertRequest {
    pub title: Option<String>,
    pub date: Option<String>,
    pub venue: Option<String>,
    pub description: Option<String>,
    pub ticket_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ConcertListResponse {
    pub success: bool,
    pub concerts: Vec<Concert>,
}

#[derive(Debug, Serialize)]
pub struct ConcertResponse {
    pub success: bool,
    pub concert: Concert,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/concerts
pub async fn list_concerts(State(state): State<AppState>) -> ApiResult<ConcertListResponse> {
    let concerts = concerts::list(&state.store).await;
    Ok(Json(ConcertListResponse {
        success: true,
        concerts,
    }))
}

/// POST /api/concerts (admin)
pub async fn create_concert(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ConcertRequest>,
) -> ApiResult<ConcertResponse> {
    require_admin(&state, &auth).await?;

    let title = require_field(req.title, "title")?;
    let date = parse_date(&require_field(req.date, "date")?, "date")?;
    let venue = require_field(req.venue, "venue")?;

    let concert = Concert::new(
        title,
        date,
        venue,
        optional_field(req.description),
        optional_field(req.ticket_url),
    );
    let concert = concerts::insert(&state.store, concert).await?;
    info!("Concert created: {}", concert.title);

    // Announce to subscribers; a delivery problem never fails the request
    match state
        .mailer
        .broadcast_new_concert(&state.store, &concert)
        .await
    {
        Ok(sent) => info!("Concert announcement reached {} subscriber(s)", sent),
        Err(e) => warn!("Concert announcement failed: {}", e),
    }

    Ok(Json(ConcertResponse {
        success: true,
        concert,
    }))
}

/// PUT /api/concerts/:id (admin)
pub async fn update_concert(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    auth: AuthUser,
    Json(req): Json<ConcertRequest>,
) -> ApiResult<ConcertResponse> {
    require_admin(&state, &auth).await?;

    let date = match optional_field(req.date) {
        Some(raw) => Some(parse_date(&raw, "date")?),
        None => None,
    };
    let patch = ConcertPatch {
        title: optional_field(req.title),
        date,
        venue: optional_field(req.venue),
        description: optional_field(req.description),
        ticket_url: optional_field(req.ticket_url),
    };

    let concert = concerts::update(&state.store, id, patch).await?;
    Ok(Json(ConcertResponse {
        success: true,
        concert,
    }))
}

/// DELETE /api/concerts/:id (admin)
pub async fn delete_concert(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    auth: AuthUser,
) -> ApiResult<DeleteResponse> {
    require_admin(&state, &auth).await?;

    concerts::remove(&state.store, id).await?;
    info!("Concert deleted: {}", id);

    Ok(Json(DeleteResponse {
        success: true,
        message: "Concert deleted".to_string(),
    }))
}
