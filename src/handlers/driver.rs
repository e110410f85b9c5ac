// src/handlers/driver.rs
use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::dtos::driver::{DriverRequest, DriverResponse};
use crate::dtos::payment::{PartyLedgerResponse, PaymentRequest};
use crate::error::AppError;
use crate::extract::JsonBody;
use crate::handlers::payment::record_payment;
use crate::ledger::{self, GroupBy, LedgerSummary};
use crate::models::driver::Driver;
use crate::models::payment::{Party, Payment};
use crate::models::trip::Trip;
use crate::repository::{parse_id, Document, Record};
use crate::state::AppState;

async fn driver_totals(state: &AppState) -> Result<HashMap<Uuid, LedgerSummary>, AppError> {
    let trips = state.repo::<Trip>().list().await?;
    Ok(ledger::breakdown(trips.iter().map(|t| &t.data), GroupBy::Driver))
}

// GET /drivers
#[instrument(skip(state))]
pub async fn list_drivers(State(state): State<AppState>) -> Result<Json<Vec<DriverResponse>>, AppError> {
    let drivers = state.repo::<Driver>().list().await?;
    let totals = driver_totals(&state).await?;
    Ok(Json(
        drivers
            .into_iter()
            .map(|d| {
                let summary = totals.get(&d.id);
                DriverResponse::new(d, summary)
            })
            .collect(),
    ))
}

// GET /drivers/{id}
#[instrument(skip(state))]
pub async fn get_driver(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DriverResponse>, AppError> {
    let id = parse_id(&id, Driver::LABEL)?;
    let driver = state.repo::<Driver>().require(id).await?;
    let totals = driver_totals(&state).await?;
    Ok(Json(DriverResponse::new(driver, totals.get(&id))))
}

// POST /drivers
#[instrument(skip(state, req))]
pub async fn create_driver(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<DriverRequest>,
) -> Result<(StatusCode, Json<DriverResponse>), AppError> {
    let driver = state.repo::<Driver>().insert(req.into_driver()?).await?;
    info!(id = %driver.id, "driver created");
    Ok((StatusCode::CREATED, Json(DriverResponse::new(driver, None))))
}

// PUT /drivers/{id}
#[instrument(skip(state, req))]
pub async fn update_driver(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<DriverRequest>,
) -> Result<Json<DriverResponse>, AppError> {
    let id = parse_id(&id, Driver::LABEL)?;
    let driver = state.repo::<Driver>().replace(id, req.into_driver()?).await?;
    let totals = driver_totals(&state).await?;
    Ok(Json(DriverResponse::new(driver, totals.get(&id))))
}

// DELETE /drivers/{id}
#[instrument(skip(state))]
pub async fn delete_driver(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id, Driver::LABEL)?;
    state.repo::<Driver>().delete(id).await?;
    info!(%id, "driver deleted");
    Ok(StatusCode::NO_CONTENT)
}

// GET /drivers/{id}/ledger
#[instrument(skip(state))]
pub async fn get_driver_ledger(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PartyLedgerResponse<Driver>>, AppError> {
    let id = parse_id(&id, Driver::LABEL)?;
    let driver = state.repo::<Driver>().require(id).await?;
    Ok(Json(build_ledger(&state, driver).await?))
}

// POST /drivers/{id}/payments
#[instrument(skip(state, req))]
pub async fn add_driver_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<PaymentRequest>,
) -> Result<(StatusCode, Json<Record<Payment>>), AppError> {
    let id = parse_id(&id, Driver::LABEL)?;
    let driver = state.repo::<Driver>().require(id).await?;
    let amount = req.validated_amount()?;

    // Read-then-insert: two concurrent payouts can together pass this check.
    let current = build_ledger(&state, driver).await?.ledger;
    if amount > current.balance {
        return Err(AppError::validation(format!(
            "Cannot pay more than outstanding amount ({:.2})",
            current.balance
        )));
    }

    let payment = record_payment(&state, Party::Driver, id, amount, req).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

async fn build_ledger(state: &AppState, driver: Record<Driver>) -> Result<PartyLedgerResponse<Driver>, AppError> {
    let trips = state.repo::<Trip>().list().await?;
    let payments = state.repo::<Payment>().find_by("party_id", &driver.id.to_string()).await?;
    let ledger = ledger::driver_ledger(driver.id, &trips, &payments);
    Ok(PartyLedgerResponse { party: driver, ledger })
}
