use std::sync::Arc;

use sar_catalog_api::{
    app,
    config::{AppConfig, StoreBackend},
    services::{audio_probe::LoftyProbe, catalog::Catalog, media_store::LocalMediaStore},
    store::{CatalogStore, MemoryStore, SurrealStore},
    AppState, Error, Result,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    init_tracing();

    tracing::info!("Starting SAR catalog API...");

    let config = AppConfig::from_env()?;

    let store: Arc<dyn CatalogStore> = match config.store {
        StoreBackend::Surreal => {
            let database = config
                .database
                .as_ref()
                .ok_or_else(|| Error::EnvVarError("database configuration missing".to_string()))?;
            Arc::new(SurrealStore::connect(database).await?)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory catalog, nothing will be persisted");
            Arc::new(MemoryStore::new())
        }
    };

    tokio::fs::create_dir_all(&config.media.dir).await?;
    let media = Arc::new(LocalMediaStore::new(
        config.media.dir.clone(),
        config.media.public_url.clone(),
    ));
    tracing::info!(
        "Media stored in {} and served from {}",
        config.media.dir.display(),
        config.media.public_url
    );

    let app_state = AppState {
        catalog: Catalog::new(store, media, Arc::new(LoftyProbe)),
        auth_config: config.auth.clone(),
    };

    let routes_all = app(app_state, &config.media.dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;

    tracing::info!("Listening on http://{}", config.bind_addr);

    axum::serve(listener, routes_all).await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sar_catalog_api=debug,tower_http=info,info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_file(true)
                .with_line_number(true)
                .compact(),
        )
        .init();
}
