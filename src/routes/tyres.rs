use axum::{routing::get, Router};

use crate::handlers::tyre::{create_tyre, delete_tyre, get_tyre, list_tyres, update_tyre};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tyres", get(list_tyres).post(create_tyre))
        .route("/tyres/{id}", get(get_tyre).put(update_tyre).delete(delete_tyre))
}
