//! Ads Router

use auth::AuthConfig;
use auth::domain::repository::UserRepository;
use auth::middleware::{AuthMiddlewareState, optional_auth, require_auth};
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use std::sync::Arc;

use crate::domain::repository::AdRepository;
use crate::presentation::handlers::{self, AdsAppState};

/// Create the Ads router
///
/// Reads resolve the caller when a token is present; creation requires one.
pub fn ads_router<A, U>(ads: Arc<A>, users: Arc<U>, auth_config: Arc<AuthConfig>) -> Router
where
    A: AdRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let auth_state = AuthMiddlewareState {
        repo: users.clone(),
        config: auth_config,
    };
    let state = AdsAppState { ads, users };

    let public = Router::new()
        .route("/ads", get(handlers::list_ads::<A, U>))
        .route("/ads/{id}", get(handlers::get_ad::<A, U>))
        .route_layer(from_fn_with_state(auth_state.clone(), optional_auth::<U>));

    let protected = Router::new()
        .route("/ads", post(handlers::create_ad::<A, U>))
        .route_layer(from_fn_with_state(auth_state, require_auth::<U>));

    public.merge(protected).with_state(state)
}
