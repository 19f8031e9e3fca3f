//! Contact form endpoint

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use bandstand_common::store::contacts;
use bandstand_common::store::models::ContactMessage;

use crate::api::error::ApiResult;
use crate::api::require_field;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
}

/// POST /api/contact
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(req): Json<ContactRequest>,
) -> ApiResult<ContactResponse> {
    let name = require_field(req.name, "name")?;
    let email = require_field(req.email, "email")?;
    let message = require_field(req.message, "message")?;

    let submission = ContactMessage::new(name, email, message);
    let submission = contacts::insert(&state.store, submission).await?;
    info!("Contact form submitted by {}", submission.email);

    Ok(Json(ContactResponse {
        success: true,
        message: "Contact form submitted".to_string(),
    }))
}
