use crate::seatmap::{build_seat_map, SeatMap};
use aroya_core::envelope::ResponseCode;
use aroya_core::reservation::{Bill, Reservation, SeatSelectionRecord};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A typed gateway failure: the envelope code plus a human-readable message
/// the controller can surface directly
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct GatewayError {
    pub code: ResponseCode,
    pub message: String,
}

impl GatewayError {
    pub fn new(code: ResponseCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn id_required() -> Self {
        Self::new(
            ResponseCode::ReservationIdRequired,
            "A reservation id is required.",
        )
    }

    pub fn not_found(reservation_id: &str) -> Self {
        Self::new(
            ResponseCode::ReservationNotFound,
            format!("Reservation {} was not found.", reservation_id),
        )
    }

    pub fn fetch_failed(message: impl Into<String>) -> Self {
        Self::new(ResponseCode::ReservationFetchFailed, message)
    }

    pub fn update_failed(message: impl Into<String>) -> Self {
        Self::new(ResponseCode::SeatSelectionUpdateFailed, message)
    }
}

/// The normalized reservation payload every gateway operation answers with:
/// the reservation record, its bill, the confirmed seat selection, and the
/// regenerated cabin map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationDetail {
    pub reservation: Reservation,
    pub bill: Bill,
    pub seat_selection: SeatSelectionRecord,
    pub seat_map: SeatMap,
}

impl ReservationDetail {
    /// Derive the full payload from a reservation record
    pub fn from_reservation(reservation: Reservation) -> Self {
        let bill = Bill::for_reservation(&reservation);
        let seat_selection = reservation.selection_record();
        let seat_map = build_seat_map(&reservation);
        Self {
            reservation,
            bill,
            seat_selection,
            seat_map,
        }
    }
}

/// Data access contract for reservation state. The seat-selection
/// controller only ever talks to this trait; the store-backed
/// implementation lives in `aroya-store`
#[async_trait]
pub trait ReservationGateway: Send + Sync {
    /// Fetch the current reservation detail by identifier
    async fn fetch_reservation(
        &self,
        reservation_id: &str,
    ) -> Result<ReservationDetail, GatewayError>;

    /// Persist a seat selection and return the updated detail. The server
    /// may reconcile the submitted list; the returned record wins
    async fn update_seat_selection(
        &self,
        reservation_id: &str,
        seats: &[String],
    ) -> Result<ReservationDetail, GatewayError>;
}
