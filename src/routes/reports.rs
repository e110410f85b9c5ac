use axum::{routing::get, Router};

use crate::handlers::reports::{breakdown_ledger, day_ledger, get_stats, monthly_ledger};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(get_stats))
        .route("/ledger", get(day_ledger))
        .route("/ledger/monthly", get(monthly_ledger))
        .route("/ledger/breakdown", get(breakdown_ledger))
}
