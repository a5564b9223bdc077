use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post},
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, CatalogService, FavoriteService, MessageService, ProfileService,
};
use crate::state::SharedState;

pub mod auth;
mod error;
mod favorites;
mod messages;
mod movies;
mod observability;
mod profile;
mod system;
mod types;
mod validation;

pub use auth::CurrentUser;
pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,
    pub start_time: std::time::Instant,
    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.shared.store
    }

    #[must_use]
    pub fn auth(&self) -> &Arc<dyn AuthService> {
        &self.shared.auth_service
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<dyn CatalogService> {
        &self.shared.catalog_service
    }

    #[must_use]
    pub fn favorites(&self) -> &Arc<dyn FavoriteService> {
        &self.shared.favorite_service
    }

    #[must_use]
    pub fn messages(&self) -> &Arc<dyn MessageService> {
        &self.shared.message_service
    }

    #[must_use]
    pub fn profiles(&self) -> &Arc<dyn ProfileService> {
        &self.shared.profile_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub fn router(state: Arc<AppState>) -> Router {
    let server = &state.config().server;

    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(server.secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            server.session_inactivity_minutes,
        )));

    let cors_layer = if server.cors_allowed_origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = server
            .cors_allowed_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        // Credentialed requests cannot use wildcard methods/headers.
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_credentials(true)
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
                axum::http::HeaderName::from_static("x-api-key"),
            ])
    };

    let api_router = Router::new()
        .merge(create_protected_router(state.clone()))
        .route("/movies", get(movies::list_movies).post(movies::create_movie))
        .route("/movies/genres", get(movies::list_genres))
        .route("/movies/{id}", get(movies::get_movie))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/health", get(system::health))
        .route("/metrics", get(observability::get_metrics))
        .layer(session_layer)
        .with_state(state);

    Router::new()
        .nest("/api", api_router)
        .layer(middleware::from_fn(observability::security_headers_middleware))
        .layer(cors_layer)
        // Innermost span: the auth middleware records `user_id` on it.
        .layer(middleware::from_fn(observability::logging_middleware))
        .layer(TraceLayer::new_for_http())
}

fn create_protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/movies/favorites",
            get(favorites::list_favorites).post(favorites::toggle_favorite),
        )
        .route(
            "/messages",
            get(messages::list_messages).post(messages::send_message),
        )
        .route(
            "/profile",
            get(profile::get_profile).put(profile::update_profile),
        )
        .route("/stats", get(profile::get_stats))
        .route("/history", post(profile::record_watch))
        .route("/users", get(profile::list_users))
        .route("/auth/me", get(auth::me))
        .route_layer(middleware::from_fn_with_state(state, auth::auth_middleware))
}
