// src/handlers/tyre.rs
use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::dtos::tyre::{TyreRequest, TyreResponse};
use crate::error::AppError;
use crate::extract::JsonBody;
use crate::models::truck::Truck;
use crate::models::tyre::Tyre;
use crate::repository::{parse_id, Document, Record};
use crate::state::AppState;

async fn truck_labels(state: &AppState) -> Result<HashMap<Uuid, (String, String)>, AppError> {
    let trucks = state.repo::<Truck>().list().await?;
    Ok(trucks
        .into_iter()
        .map(|t| (t.id, (t.data.number, t.data.model)))
        .collect())
}

fn with_truck(tyre: Record<Tyre>, trucks: &HashMap<Uuid, (String, String)>) -> TyreResponse {
    let (truck_number, truck_model) = trucks.get(&tyre.data.truck_id).cloned().unwrap_or_default();
    TyreResponse { tyre, truck_number, truck_model }
}

// GET /tyres
#[instrument(skip(state))]
pub async fn list_tyres(State(state): State<AppState>) -> Result<Json<Vec<TyreResponse>>, AppError> {
    let tyres = state.repo::<Tyre>().list().await?;
    let trucks = truck_labels(&state).await?;
    Ok(Json(tyres.into_iter().map(|t| with_truck(t, &trucks)).collect()))
}

// GET /tyres/{id}
#[instrument(skip(state))]
pub async fn get_tyre(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TyreResponse>, AppError> {
    let id = parse_id(&id, Tyre::LABEL)?;
    let tyre = state.repo::<Tyre>().require(id).await?;
    let trucks = truck_labels(&state).await?;
    Ok(Json(with_truck(tyre, &trucks)))
}

// POST /tyres
#[instrument(skip(state, req))]
pub async fn create_tyre(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<TyreRequest>,
) -> Result<(StatusCode, Json<TyreResponse>), AppError> {
    let tyre = req.into_tyre(state.ledger.tyre_lifespan_km)?;
    state.repo::<Truck>().require(tyre.truck_id).await?;

    let tyre = state.repo::<Tyre>().insert(tyre).await?;
    info!(id = %tyre.id, serial = %tyre.data.serial, "tyre created");
    let trucks = truck_labels(&state).await?;
    Ok((StatusCode::CREATED, Json(with_truck(tyre, &trucks))))
}

// PUT /tyres/{id}
#[instrument(skip(state, req))]
pub async fn update_tyre(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<TyreRequest>,
) -> Result<Json<TyreResponse>, AppError> {
    let id = parse_id(&id, Tyre::LABEL)?;
    let tyre = req.into_tyre(state.ledger.tyre_lifespan_km)?;
    state.repo::<Truck>().require(tyre.truck_id).await?;

    let tyre = state.repo::<Tyre>().replace(id, tyre).await?;
    let trucks = truck_labels(&state).await?;
    Ok(Json(with_truck(tyre, &trucks)))
}

// DELETE /tyres/{id}
#[instrument(skip(state))]
pub async fn delete_tyre(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id, Tyre::LABEL)?;
    state.repo::<Tyre>().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
