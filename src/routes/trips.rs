use axum::{routing::get, Router};

use crate::handlers::trip::{create_trip, delete_trip, get_trip, list_trips, trip_summary, update_trip};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    // the static segment wins over `{id}` in axum's router
    Router::new()
        .route("/trips", get(list_trips).post(create_trip))
        .route("/trips/summary", get(trip_summary))
        .route("/trips/{id}", get(get_trip).put(update_trip).delete(delete_trip))
}
