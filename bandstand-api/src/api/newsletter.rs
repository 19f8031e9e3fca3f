//! Admin newsletter broadcast endpoint

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::error::ApiResult;
use crate::api::{require_admin, require_field, AuthUser};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct NewsletterRequest {
    pub subject: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterResponse {
    pub success: bool,
    pub subscriber_count: usize,
}

/// POST /api/send-newsletter (admin)
pub async fn send_newsletter(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<NewsletterRequest>,
) -> ApiResult<NewsletterResponse> {
    require_admin(&state, &auth).await?;

    let subject = require_field(req.subject, "subject")?;
    let message = require_field(req.message, "message")?;

    let subscriber_count = state
        .mailer
        .broadcast_message(&state.store, &subject, &message)
        .await?;
    info!(
        "Newsletter \"{}\" dispatched to {} subscriber(s)",
        subject, subscriber_count
    );

    Ok(Json(NewsletterResponse {
        success: true,
        subscriber_count,
    }))
}
