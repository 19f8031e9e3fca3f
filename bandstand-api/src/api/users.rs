//! Registration, login and account endpoints

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use bandstand_common::auth;
use bandstand_common::store::models::{Role, User};
use bandstand_common::store::users;
use bandstand_common::Error;

use crate::api::error::ApiResult;
use crate::api::{require_field, AuthUser};
use crate::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(default)]
    pub newsletter_opt_in: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub success: bool,
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: UserInfo,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyTokenResponse {
    pub success: bool,
    pub user: UserInfo,
}

#[derive(Debug, Deserialize)]
pub struct NewsletterPreferenceRequest {
    pub subscribed: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct NewsletterPreferenceResponse {
    pub success: bool,
    pub message: String,
}

/// Public view of a user; the password hash never leaves the store
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub newsletter_subscribed: bool,
    pub joined_at: DateTime<Utc>,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            newsletter_subscribed: user.newsletter_subscribed,
            joined_at: user.joined_at,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<RegisterResponse> {
    let name = require_field(req.name, "name")?;
    let email = require_field(req.email, "email")?;
    let password = require_field(req.password, "password")?;

    let password_hash = auth::hash_password(&password)?;
    let user = User::new(name, email, password_hash, Role::User, req.newsletter_opt_in);
    let user = users::insert(&state.store, user).await?;

    info!("Registered user {}", user.email);
    Ok(Json(RegisterResponse {
        success: true,
        user_id: user.id,
    }))
}

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let email = require_field(req.email, "email")?;
    let password = require_field(req.password, "password")?;

    // Same response for unknown email and wrong password
    let user = users::find_by_email(&state.store, &email)
        .await
        .ok_or_else(|| Error::Unauthorized("Invalid credentials".to_string()))?;

    if !auth::verify_password(&password, &user.password_hash)? {
        return Err(Error::Unauthorized("Invalid credentials".to_string()).into());
    }

    let token = auth::issue_token(&state.settings.token_secret, &user)?;

    info!("Login successful: {}", user.email);
    Ok(Json(LoginResponse {
        success: true,
        user: UserInfo::from(&user),
        token,
    }))
}

/// GET /api/verify-token
pub async fn verify_token(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<VerifyTokenResponse> {
    let user = users::find_by_id(&state.store, auth.user_id)
        .await
        .ok_or_else(|| Error::Unauthorized("User not found".to_string()))?;

    Ok(Json(VerifyTokenResponse {
        success: true,
        user: UserInfo::from(&user),
    }))
}

/// POST /api/newsletter-preference
pub async fn newsletter_preference(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<NewsletterPreferenceRequest>,
) -> ApiResult<NewsletterPreferenceResponse> {
    let subscribed = req
        .subscribed
        .ok_or_else(|| Error::InvalidInput("subscribed is required".to_string()))?;

    users::set_newsletter(&state.store, auth.user_id, subscribed).await?;

    Ok(Json(NewsletterPreferenceResponse {
        success: true,
        message: "Newsletter preference updated".to_string(),
    }))
}
