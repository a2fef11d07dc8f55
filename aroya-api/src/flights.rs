use crate::state::AppState;
use aroya_catalog::search::{search, SearchQuery};
use aroya_core::envelope::{ResponseCode, ResponseEnvelope};
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/flights", get(search_flights))
}

/// GET /api/flights
/// Flight search with facets for the explore flow
async fn search_flights(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<ResponseEnvelope> {
    let criteria = match query.into_criteria() {
        Ok(criteria) => criteria,
        Err(e) => {
            return Json(ResponseEnvelope::failure(
                ResponseCode::FlightSearchInvalidInput,
                "Invalid search criteria.",
                serde_json::json!({"error": e.to_string()}),
            ))
        }
    };
    Json(search(&state.dataset, criteria).into_envelope())
}
