//! Main entry point for the fitting-room service

use fitroom::{
    backend::{FitModelBackend, HttpModelBackend},
    catalog::Catalog,
    config::Settings,
    store::FsImageStore,
    AppState,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();

    info!("Starting fitting-room service");

    // Load configuration
    let settings = Settings::load()?;
    info!(
        "Loaded configuration: server={}:{}",
        settings.server.host, settings.server.port
    );

    // Load the catalog once; it stays read-only from here on
    let catalog = match &settings.catalog.products_file {
        Some(path) => Catalog::from_file(path)?,
        None => Catalog::seed(),
    };
    info!(products = catalog.len(), "Loaded product catalog");

    let image_store = Arc::new(FsImageStore::new(settings.catalog.assets_root.clone()));

    let model_backend: Option<Arc<dyn FitModelBackend>> = if settings.generation.enabled {
        info!(endpoint = %settings.generation.endpoint, "Generation backend enabled");
        Some(Arc::new(HttpModelBackend::new(&settings.generation)?))
    } else {
        None
    };

    let addr = format!("{}:{}", settings.server.host, settings.server.port);

    let app_state = Arc::new(AppState {
        settings,
        catalog: Arc::new(catalog),
        image_store,
        model_backend,
    });

    let app = fitroom::api::create_router(app_state);

    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
