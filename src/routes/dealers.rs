use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::dealer::{
    add_dealer_payment, create_dealer, delete_dealer, get_dealer, get_dealer_ledger, list_dealers,
    update_dealer,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dealers", get(list_dealers).post(create_dealer))
        .route("/dealers/{id}", get(get_dealer).put(update_dealer).delete(delete_dealer))
        .route("/dealers/{id}/ledger", get(get_dealer_ledger))
        .route("/dealers/{id}/payments", post(add_dealer_payment))
}
