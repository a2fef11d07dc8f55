pub mod app_config;
pub mod gateway;
pub mod reservations;

pub use app_config::Config;
pub use gateway::StoreGateway;
pub use reservations::{ReservationStore, StoreError};
