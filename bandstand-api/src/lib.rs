//! bandstand-api library - band website HTTP backend
//!
//! One consolidated service: registration/login, admin-gated content
//! management for concerts, songs and albums, a public contact form and
//! the newsletter mailer. All state lives in the JSON-file record store.

use std::sync::Arc;

use axum::Router;
use chrono::{DateTime, Utc};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use bandstand_common::config::Settings;
use bandstand_common::store::Store;

pub mod api;
pub mod mailer;

use mailer::Mailer;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// JSON-file record store
    pub store: Store,
    /// Resolved runtime settings
    pub settings: Arc<Settings>,
    /// Newsletter mail client (no-op when unconfigured)
    pub mailer: Arc<Mailer>,
    /// Service start time, for health reporting
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create new application state
    pub fn new(store: Store, settings: Settings) -> Self {
        let mailer = Mailer::from_settings(settings.mail.as_ref());
        Self {
            store,
            settings: Arc::new(settings),
            mailer: Arc::new(mailer),
            started_at: Utc::now(),
        }
    }
}

/// Build application router
///
/// Listing endpoints and the contact form are public; content mutation
/// requires an admin bearer token, checked in the handlers.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post, put};

    Router::new()
        .route("/api/health", get(api::health))
        .route("/api/register", post(api::register))
        .route("/api/login", post(api::login))
        .route("/api/verify-token", get(api::verify_token))
        .route("/api/newsletter-preference", post(api::newsletter_preference))
        .route("/api/concerts", get(api::list_concerts).post(api::create_concert))
        .route(
            "/api/concerts/:id",
            put(api::update_concert).delete(api::delete_concert),
        )
        .route("/api/songs", get(api::list_songs).post(api::create_song))
        .route("/api/songs/:id", put(api::update_song).delete(api::delete_song))
        .route("/api/albums", get(api::list_albums).post(api::create_album))
        .route(
            "/api/albums/:id",
            put(api::update_album).delete(api::delete_album),
        )
        .route(
            "/api/albums/:id/photos",
            post(api::add_album_photo).delete(api::remove_album_photo),
        )
        .route("/api/contact", post(api::submit_contact))
        .route("/api/send-newsletter", post(api::send_newsletter))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
