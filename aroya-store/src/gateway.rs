use crate::reservations::{ReservationStore, StoreError};
use aroya_cabin::gateway::{GatewayError, ReservationDetail, ReservationGateway};
use async_trait::async_trait;
use std::sync::Arc;

/// The in-process reservation gateway: the seat-selection controller's
/// data-access contract served straight from the reservation store
#[derive(Clone)]
pub struct StoreGateway {
    store: Arc<ReservationStore>,
}

impl StoreGateway {
    pub fn new(store: Arc<ReservationStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ReservationGateway for StoreGateway {
    async fn fetch_reservation(
        &self,
        reservation_id: &str,
    ) -> Result<ReservationDetail, GatewayError> {
        let trimmed = reservation_id.trim();
        if trimmed.is_empty() {
            return Err(GatewayError::id_required());
        }
        match self.store.get(trimmed) {
            Some(reservation) => Ok(ReservationDetail::from_reservation(reservation)),
            None => Err(GatewayError::not_found(trimmed)),
        }
    }

    async fn update_seat_selection(
        &self,
        reservation_id: &str,
        seats: &[String],
    ) -> Result<ReservationDetail, GatewayError> {
        let trimmed = reservation_id.trim();
        if trimmed.is_empty() {
            return Err(GatewayError::id_required());
        }
        match self.store.update_seats(trimmed, seats) {
            Ok(reservation) => Ok(ReservationDetail::from_reservation(reservation)),
            Err(StoreError::NotFound(id)) => Err(GatewayError::not_found(&id)),
        }
    }
}
