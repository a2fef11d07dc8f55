use crate::state::AppState;
use aroya_catalog::calendar::{build_calendar, ArrivalCalendar};
use axum::{extract::State, routing::get, Json, Router};

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/arrivals", get(get_arrival_calendar))
}

/// GET /api/arrivals
/// The arrivals board: flights grouped by local arrival date
async fn get_arrival_calendar(State(state): State<AppState>) -> Json<ArrivalCalendar> {
    Json(build_calendar(&state.dataset))
}
