use aroya_catalog::FlightDataset;
use aroya_store::ReservationStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ReservationStore>,
    pub dataset: Arc<FlightDataset>,
}
