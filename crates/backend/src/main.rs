use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, Method};
use axum::middleware;
use contracts::domain::a004_activity::aggregate::Actor;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use backend::shared::config;
use backend::shared::data::FileStorage;
use backend::system::middleware::request_logger::request_logger;
use backend::system::state::{AppState, SharedState};
use backend::{routes, system};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    system::tracing::initialize()?;

    let config = config::load_config()?;
    let storage_path = config::get_storage_path(&config);
    let upload_path = config::get_upload_path(&config);
    tracing::info!("Storage directory: {}", storage_path.display());
    tracing::info!("Upload directory: {}", upload_path.display());

    let storage = FileStorage::open(&storage_path)?;
    tokio::fs::create_dir_all(&upload_path).await?;

    let actor = config.app.actor_name.clone().map(Actor::named);
    let app_state = AppState::load(Arc::new(storage), actor);
    let state = SharedState::new(app_state, upload_path);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let app = routes::configure_routes(state, config.upload.max_body_bytes())
        .layer(middleware::from_fn(request_logger))
        .layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
