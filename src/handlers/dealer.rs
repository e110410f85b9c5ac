// src/handlers/dealer.rs
use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::dtos::dealer::{DealerRequest, DealerResponse};
use crate::dtos::payment::{PartyLedgerResponse, PaymentRequest};
use crate::error::AppError;
use crate::extract::JsonBody;
use crate::handlers::payment::record_payment;
use crate::ledger::{self, GroupBy, LedgerSummary};
use crate::models::dealer::Dealer;
use crate::models::payment::{Party, Payment};
use crate::models::trip::Trip;
use crate::repository::{parse_id, Document, Record};
use crate::state::AppState;

async fn dealer_totals(state: &AppState) -> Result<HashMap<Uuid, LedgerSummary>, AppError> {
    let trips = state.repo::<Trip>().list().await?;
    Ok(ledger::breakdown(trips.iter().map(|t| &t.data), GroupBy::Dealer))
}

// GET /dealers
#[instrument(skip(state))]
pub async fn list_dealers(State(state): State<AppState>) -> Result<Json<Vec<DealerResponse>>, AppError> {
    let dealers = state.repo::<Dealer>().list().await?;
    let totals = dealer_totals(&state).await?;
    Ok(Json(
        dealers
            .into_iter()
            .map(|d| {
                let summary = totals.get(&d.id);
                DealerResponse::new(d, summary)
            })
            .collect(),
    ))
}

// GET /dealers/{id}
#[instrument(skip(state))]
pub async fn get_dealer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DealerResponse>, AppError> {
    let id = parse_id(&id, Dealer::LABEL)?;
    let dealer = state.repo::<Dealer>().require(id).await?;
    let totals = dealer_totals(&state).await?;
    Ok(Json(DealerResponse::new(dealer, totals.get(&id))))
}

// POST /dealers
#[instrument(skip(state, req))]
pub async fn create_dealer(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<DealerRequest>,
) -> Result<(StatusCode, Json<DealerResponse>), AppError> {
    let dealer = state.repo::<Dealer>().insert(req.into_dealer()?).await?;
    info!(id = %dealer.id, "dealer created");
    Ok((StatusCode::CREATED, Json(DealerResponse::new(dealer, None))))
}

// PUT /dealers/{id}
#[instrument(skip(state, req))]
pub async fn update_dealer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<DealerRequest>,
) -> Result<Json<DealerResponse>, AppError> {
    let id = parse_id(&id, Dealer::LABEL)?;
    let dealer = state.repo::<Dealer>().replace(id, req.into_dealer()?).await?;
    let totals = dealer_totals(&state).await?;
    Ok(Json(DealerResponse::new(dealer, totals.get(&id))))
}

// DELETE /dealers/{id}
// Trips keep their dangling dealer reference.
#[instrument(skip(state))]
pub async fn delete_dealer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id, Dealer::LABEL)?;
    state.repo::<Dealer>().delete(id).await?;
    info!(%id, "dealer deleted");
    Ok(StatusCode::NO_CONTENT)
}

// GET /dealers/{id}/ledger
#[instrument(skip(state))]
pub async fn get_dealer_ledger(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PartyLedgerResponse<Dealer>>, AppError> {
    let id = parse_id(&id, Dealer::LABEL)?;
    let dealer = state.repo::<Dealer>().require(id).await?;
    Ok(Json(build_ledger(&state, dealer).await?))
}

// POST /dealers/{id}/payments
#[instrument(skip(state, req))]
pub async fn add_dealer_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<PaymentRequest>,
) -> Result<(StatusCode, Json<Record<Payment>>), AppError> {
    let id = parse_id(&id, Dealer::LABEL)?;
    state.repo::<Dealer>().require(id).await?;
    let amount = req.validated_amount()?;
    let payment = record_payment(&state, Party::Dealer, id, amount, req).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

async fn build_ledger(state: &AppState, dealer: Record<Dealer>) -> Result<PartyLedgerResponse<Dealer>, AppError> {
    let trips = state.repo::<Trip>().list().await?;
    let payments = state.repo::<Payment>().find_by("party_id", &dealer.id.to_string()).await?;
    let ledger = ledger::dealer_ledger(dealer.id, &trips, &payments);
    Ok(PartyLedgerResponse { party: dealer, ledger })
}
