use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use roost_api::{AppState, AppStateInner, admin};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roost=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let jwt_secret =
        std::env::var("ROOST_JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".into());
    let webhook_key =
        std::env::var("ROOST_WEBHOOK_KEY").unwrap_or_else(|_| "dev-webhook-key".into());
    let db_path = std::env::var("ROOST_DB_PATH").unwrap_or_else(|_| "roost.json".into());
    let asset_dir = std::env::var("ROOST_ASSET_DIR").unwrap_or_else(|_| "app".into());
    let host = std::env::var("ROOST_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("ROOST_PORT")
        .unwrap_or_else(|_| "8080".into())
        .parse()?;

    // The single shared document store
    let store = roost_store::Store::open(db_path)?;

    let state: AppState = Arc::new(AppStateInner {
        store,
        jwt_secret,
        webhook_key,
        hits: AtomicU64::new(0),
    });

    // Static assets, counted by the visit middleware
    let assets = Router::new()
        .nest_service("/app", ServeDir::new(asset_dir))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            admin::track_hits,
        ));

    let app = roost_api::router(state)
        .merge(assets)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    info!("roost listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
