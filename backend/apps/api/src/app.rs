//! Router Assembly

use std::sync::Arc;

use ads::{PgAdRepository, ads_router};
use auth::{AuthConfig, PgUserRepository, auth_router};
use axum::{
    Json, Router,
    http::{HeaderValue, Method, StatusCode, header},
    routing::get,
};
use serde_json::{Value, json};
use sqlx::PgPool;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;

/// Build the full HTTP application
///
/// Both domain routers share one user repository and one token config.
pub fn build_router(pool: PgPool, config: &AppConfig) -> Router {
    let users = Arc::new(PgUserRepository::new(pool.clone()));
    let ads = Arc::new(PgAdRepository::new(pool));
    let auth_config = Arc::new(AuthConfig::new(config.jwt_secret.clone(), config.jwt_ttl));

    let v1 = Router::new()
        .route("/health", get(health))
        .merge(auth_router(users.clone(), auth_config.clone()))
        .merge(ads_router(ads, users, auth_config));

    Router::new()
        .nest("/v1", v1)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// No origin is allowed when the list is empty
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
}
