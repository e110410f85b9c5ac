use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::driver::{
    add_driver_payment, create_driver, delete_driver, get_driver, get_driver_ledger, list_drivers,
    update_driver,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/drivers", get(list_drivers).post(create_driver))
        .route("/drivers/{id}", get(get_driver).put(update_driver).delete(delete_driver))
        .route("/drivers/{id}/ledger", get(get_driver_ledger))
        .route("/drivers/{id}/payments", post(add_driver_payment))
}
