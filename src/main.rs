// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use axum::{Router, routing::get};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;

use crate::application::catalog_service::CatalogService;
use crate::application::freshness::{AlwaysFresh, FreshnessPolicy, MaxAge};
use crate::infrastructure::config::{load_gallery_config, load_product_table};
use crate::infrastructure::fs_image_store::FsImageStore;
use crate::infrastructure::thumbnailer::Thumbnailer;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    gallery_page, health_check, list_products, radar_image, radar_thumbnail,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = load_gallery_config()?;
    let products = load_product_table()?;

    // Create the image store and freshness policy (infrastructure layer)
    let store = Arc::new(FsImageStore);
    let policy: Arc<dyn FreshnessPolicy> = if config.gallery.enforce_expiration {
        Arc::new(MaxAge::new(config.gallery.image_expiration_secs))
    } else {
        Arc::new(AlwaysFresh)
    };

    // Create services (application layer)
    let thumbnailer = Thumbnailer::new(config.gallery.image_directory.clone());
    let server = config.server;
    let catalog = CatalogService::new(config.gallery, products, store, policy);

    // Create application state
    let state = Arc::new(AppState {
        catalog,
        thumbnailer,
        server,
    });

    // Build router (presentation layer)
    let addr: SocketAddr = state.server.listen_addr.parse()?;
    let router = Router::new()
        .route("/", get(gallery_page))
        .route("/healthz", get(health_check))
        .route("/products", get(list_products))
        .route("/radar/:filename", get(radar_image))
        .route("/thumbs/:filename", get(radar_thumbnail))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    println!("Starting radar-gallery service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
