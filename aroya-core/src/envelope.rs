use serde::{Deserialize, Serialize};

/// Outcome codes carried on every API and gateway response
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseCode {
    ReservationIdRequired,
    ReservationNotFound,
    ReservationFound,
    ReservationFetchFailed,
    ReservationPreview,
    ReservationConfirmed,
    ReservationValidationFailed,
    ReservationFlightNotFound,
    ReservationUnbookable,
    ReservationClassNotAvailable,
    ReservationNoSeats,
    SeatSelectionUpdated,
    SeatSelectionUpdateFailed,
    FlightSearchOk,
    FlightSearchPartialOk,
    FlightSearchExplore,
    FlightSearchInvalidInput,
}

/// The uniform response wrapper: every operation answers with
/// `{ ok, code, message, data }` whether it succeeded or not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub ok: bool,
    pub code: ResponseCode,
    pub message: String,
    pub data: serde_json::Value,
}

impl ResponseEnvelope {
    pub fn success(code: ResponseCode, message: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            ok: true,
            code,
            message: message.into(),
            data,
        }
    }

    pub fn failure(code: ResponseCode, message: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            ok: false,
            code,
            message: message.into(),
            data,
        }
    }
}
