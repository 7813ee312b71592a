use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pacific_api::{
    api,
    config::Settings,
    service::ServiceContext,
    store::{DocumentStore, MongoStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pacific_api=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let settings = Settings::new().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config: {}. Using defaults.", e);
        Settings::default()
    });

    tracing::info!("Starting Pacific Christian School API on {}:{}", settings.server.host, settings.server.port);

    // Initialize database
    let store: Option<Arc<dyn DocumentStore>> = match settings.database.target() {
        Some((url, name)) => match MongoStore::connect(url, name, &settings.database).await {
            Ok(store) => {
                tracing::info!("Using MongoDB database {}", name);
                Some(Arc::new(store))
            }
            Err(e) => {
                tracing::warn!("Failed to set up MongoDB client: {}. Running without a database.", e);
                None
            }
        },
        None => {
            tracing::warn!("DATABASE_URL or DATABASE_NAME not set. Running without a database.");
            None
        }
    };

    let service_context = Arc::new(ServiceContext::new(store));
    let app = api::create_app(service_context, Arc::new(settings.clone()));

    let listener = tokio::net::TcpListener::bind(
        format!("{}:{}", settings.server.host, settings.server.port)
    ).await?;

    tracing::info!("Server listening on http://{}:{}", settings.server.host, settings.server.port);

    axum::serve(listener, app).await?;

    Ok(())
}
