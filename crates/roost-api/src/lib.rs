pub mod admin;
pub mod chirps;
pub mod error;
pub mod middleware;
pub mod profanity;
pub mod tokens;
pub mod users;
pub mod webhooks;

use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post, put},
};

use roost_store::Store;

pub struct AppStateInner {
    pub store: Store,
    pub jwt_secret: String,
    pub webhook_key: String,
    pub hits: AtomicU64,
}

pub type AppState = Arc<AppStateInner>;

/// Assemble the API router. Static assets and the outer layers (trace,
/// CORS) are the binary's concern.
pub fn router(state: AppState) -> Router {
    let public = Router::new()
        .route("/api/users", post(users::create_user))
        .route("/api/login", post(users::login))
        .route("/api/chirps", get(chirps::list_chirps))
        .route("/api/chirps/{chirp_id}", get(chirps::get_chirp))
        .route("/api/refresh", post(tokens::refresh))
        .route("/api/revoke", post(tokens::revoke))
        .route("/api/webhooks", post(webhooks::privilege_upgrade))
        .route("/api/validate_chirp", post(chirps::validate_chirp))
        .route("/api/healthz", get(admin::healthz))
        .route("/api/reset", get(admin::reset_hits))
        .route("/admin/metrics", get(admin::metrics));

    let protected = Router::new()
        .route("/api/users", put(users::update_user))
        .route("/api/chirps", post(chirps::create_chirp))
        .route("/api/chirps/{chirp_id}", delete(chirps::delete_chirp))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_auth,
        ));

    public.merge(protected).with_state(state)
}
