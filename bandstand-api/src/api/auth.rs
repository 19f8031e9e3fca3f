//! Bearer-token extraction and role checks
//!
//! A missing Authorization header is 401; a present but invalid or
//! expired token is 403, as is a valid token without the admin role.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use uuid::Uuid;

use bandstand_common::auth::verify_token;
use bandstand_common::store::models::{Role, User};
use bandstand_common::store::users;
use bandstand_common::Error;

use crate::api::error::ApiError;
use crate::AppState;

/// Authenticated caller, extracted from the Authorization header
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(|| {
                ApiError::from(Error::Unauthorized("Access token required".to_string()))
            })?;

        let claims = verify_token(&state.settings.token_secret, token)?;

        Ok(Self {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
        })
    }
}

/// Role gate for content mutation routes.
///
/// Checks the stored user record rather than the token claim alone, so a
/// role change takes effect before the token expires.
pub async fn require_admin(state: &AppState, auth: &AuthUser) -> Result<User, ApiError> {
    let user = users::find_by_id(&state.store, auth.user_id)
        .await
        .ok_or_else(|| ApiError::from(Error::Forbidden("Admin access required".to_string())))?;

    if user.role != Role::Admin {
        return Err(ApiError::from(Error::Forbidden(
            "Admin access required".to_string(),
        )));
    }

    Ok(user)
}
