// src/handlers/payment.rs
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::dtos::payment::PaymentRequest;
use crate::error::AppError;
use crate::models::payment::{Party, Payment};
use crate::repository::{parse_id, Document, Record};
use crate::state::AppState;

/// Persists a payment against an already-resolved party. `amount` comes from
/// [`PaymentRequest::validated_amount`].
pub async fn record_payment(
    state: &AppState,
    party: Party,
    party_id: Uuid,
    amount: f64,
    req: PaymentRequest,
) -> Result<Record<Payment>, AppError> {
    let payment = Payment {
        party,
        party_id,
        date: req.date.unwrap_or_else(|| Utc::now().date_naive()),
        amount,
        note: req.note.trim().to_string(),
    };
    let payment = state.repo::<Payment>().insert(payment).await?;
    info!(id = %payment.id, ?party, %party_id, amount = payment.data.amount, "payment recorded");
    Ok(payment)
}

// DELETE /payments/{id}
#[instrument(skip(state))]
pub async fn delete_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id, Payment::LABEL)?;
    state.repo::<Payment>().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
