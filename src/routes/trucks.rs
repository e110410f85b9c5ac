use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::truck::{
    clear_mileage, create_truck, delete_truck, get_truck, list_reminders, list_trucks, record_service,
    update_truck,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/trucks", get(list_trucks).post(create_truck))
        .route("/trucks/{id}", get(get_truck).put(update_truck).delete(delete_truck))
        .route("/trucks/{id}/service", post(record_service))
        .route("/reminders", get(list_reminders))
        .route("/clearMileage", post(clear_mileage))
}
