use crate::error::AppError;
use crate::state::AppState;
use aroya_booking::{create_reservation, CreateOutcome, CreateReservationRequest};
use aroya_cabin::gateway::{ReservationDetail, ReservationGateway};
use aroya_core::envelope::{ResponseCode, ResponseEnvelope};
use aroya_store::StoreGateway;
use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
struct SeatSelectionUpdateRequest {
    #[serde(default)]
    seats: Vec<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/reservations", post(create))
        .route("/api/reservations/{reservation_id}", get(detail))
        .route("/api/reservations/{reservation_id}/seats", put(update_seats))
}

/// POST /api/reservations
/// Preview or confirm a reservation against the flight catalog
async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateReservationRequest>,
) -> Result<Json<ResponseEnvelope>, AppError> {
    match create_reservation(&state.dataset, request) {
        CreateOutcome::Envelope(envelope) => Ok(Json(envelope)),
        CreateOutcome::Confirmed(reservation) => {
            let reservation_id = reservation.reservation_id.clone();
            state.store.insert(reservation.clone());
            info!("Reservation confirmed: {}", reservation_id);
            let detail = ReservationDetail::from_reservation(reservation);
            Ok(Json(ResponseEnvelope::success(
                ResponseCode::ReservationConfirmed,
                "Your reservation is confirmed.",
                serde_json::to_value(detail)?,
            )))
        }
    }
}

/// GET /api/reservations/{reservation_id}
async fn detail(
    State(state): State<AppState>,
    Path(reservation_id): Path<String>,
) -> Result<Json<ResponseEnvelope>, AppError> {
    let gateway = StoreGateway::new(state.store.clone());
    let detail = gateway
        .fetch_reservation(&reservation_id)
        .await
        .map_err(AppError::gateway)?;
    Ok(Json(ResponseEnvelope::success(
        ResponseCode::ReservationFound,
        "Reservation retrieved.",
        serde_json::to_value(detail)?,
    )))
}

/// PUT /api/reservations/{reservation_id}/seats
/// Persist a seat selection and return the regenerated cabin map
async fn update_seats(
    State(state): State<AppState>,
    Path(reservation_id): Path<String>,
    Json(request): Json<SeatSelectionUpdateRequest>,
) -> Result<Json<ResponseEnvelope>, AppError> {
    let gateway = StoreGateway::new(state.store.clone());
    let detail = gateway
        .update_seat_selection(&reservation_id, &request.seats)
        .await
        .map_err(AppError::gateway)?;
    info!(
        "Seat selection updated for {}: {:?}",
        reservation_id, detail.seat_selection.selected_seats
    );
    Ok(Json(ResponseEnvelope::success(
        ResponseCode::SeatSelectionUpdated,
        "Seat selection updated.",
        serde_json::to_value(detail)?,
    )))
}
