use aroya_api::{app, AppState};
use aroya_catalog::FlightDataset;
use aroya_store::ReservationStore;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aroya_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = aroya_store::Config::load().expect("Failed to load config");
    tracing::info!("Starting Aroya Air API on port {}", config.server.port);

    let dataset = FlightDataset::load(config.dataset.flights_path.as_deref().map(Path::new));
    tracing::info!("Flight dataset loaded: {} flights", dataset.flights().len());

    let store = if config.store.reservations_path.is_empty() {
        ReservationStore::in_memory()
    } else {
        ReservationStore::with_path(&config.store.reservations_path)
    };

    let app_state = AppState {
        store: Arc::new(store),
        dataset: Arc::new(dataset),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind server address");
    axum::serve(listener, app).await.expect("Server error");
}
