use axum::{routing::delete, Router};

use crate::handlers::payment::delete_payment;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/payments/{id}", delete(delete_payment))
}
