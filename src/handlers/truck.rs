// src/handlers/truck.rs
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{Map, Value};
use tracing::{debug, info, instrument};

use crate::dtos::truck::{
    ClearMileageRequest, ClearMileageResponse, ReminderResponse, ServiceRequest, TruckRequest,
};
use crate::error::AppError;
use crate::extract::JsonBody;
use crate::maintenance;
use crate::models::truck::{Truck, MILEAGE_FIELDS};
use crate::repository::{parse_id, Document, Record};
use crate::state::AppState;

// GET /trucks
#[instrument(skip(state))]
pub async fn list_trucks(State(state): State<AppState>) -> Result<Json<Vec<Record<Truck>>>, AppError> {
    Ok(Json(state.repo::<Truck>().list().await?))
}

// GET /trucks/{id}
#[instrument(skip(state))]
pub async fn get_truck(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Record<Truck>>, AppError> {
    let id = parse_id(&id, Truck::LABEL)?;
    Ok(Json(state.repo::<Truck>().require(id).await?))
}

// POST /trucks
#[instrument(skip(state, req))]
pub async fn create_truck(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<TruckRequest>,
) -> Result<(StatusCode, Json<Record<Truck>>), AppError> {
    let truck = state.repo::<Truck>().insert(req.into_truck()?).await?;
    info!(id = %truck.id, number = %truck.data.number, "truck created");
    Ok((StatusCode::CREATED, Json(truck)))
}

// PUT /trucks/{id}
#[instrument(skip(state, req))]
pub async fn update_truck(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<TruckRequest>,
) -> Result<Json<Record<Truck>>, AppError> {
    let id = parse_id(&id, Truck::LABEL)?;
    Ok(Json(state.repo::<Truck>().replace(id, req.into_truck()?).await?))
}

// DELETE /trucks/{id}
// Trips and tyres keep their dangling truck reference.
#[instrument(skip(state))]
pub async fn delete_truck(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id, Truck::LABEL)?;
    state.repo::<Truck>().delete(id).await?;
    info!(%id, "truck deleted");
    Ok(StatusCode::NO_CONTENT)
}

// POST /trucks/{id}/service
#[instrument(skip(state, req))]
pub async fn record_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<ServiceRequest>,
) -> Result<Json<Record<Truck>>, AppError> {
    let id = parse_id(&id, Truck::LABEL)?;
    let repo = state.repo::<Truck>();
    let mut truck = repo.require(id).await?.data;
    maintenance::record_service(&mut truck, req.kind);
    let truck = repo.replace(id, truck).await?;
    info!(%id, kind = ?req.kind, mileage = truck.data.current_mileage, "service recorded");
    Ok(Json(truck))
}

// GET /reminders
#[instrument(skip(state))]
pub async fn list_reminders(State(state): State<AppState>) -> Result<Json<Vec<ReminderResponse>>, AppError> {
    let threshold = state.ledger.maintenance_threshold_km;
    let trucks = state.repo::<Truck>().list().await?;
    let reminders: Vec<ReminderResponse> = trucks
        .into_iter()
        .map(|t| ReminderResponse {
            check: maintenance::check(&t.data, threshold),
            truck_id: t.id,
            number: t.data.number,
            model: t.data.model,
            current_mileage: t.data.current_mileage,
        })
        .collect();
    let due = reminders.iter().filter(|r| r.check.any_due()).count();
    debug!(trucks = reminders.len(), due, "maintenance checked");
    Ok(Json(reminders))
}

// POST /clearMileage
// Body is optional: `{"truck_id": ...}` resets one truck, no body resets all.
#[instrument(skip(state, body))]
pub async fn clear_mileage(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ClearMileageResponse>, AppError> {
    let req: ClearMileageRequest = if body.iter().all(u8::is_ascii_whitespace) {
        ClearMileageRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| AppError::validation(format!("Invalid request body: {e}")))?
    };

    if let Some(id) = req.truck_id {
        state.repo::<Truck>().require(id).await?;
    }

    let zeroed: Map<String, Value> = MILEAGE_FIELDS
        .iter()
        .map(|field| (field.to_string(), Value::from(0.0)))
        .collect();
    let trucks_reset = state.store.merge_fields(Truck::COLLECTION, req.truck_id, zeroed).await?;
    info!(trucks_reset, truck_id = ?req.truck_id, "mileage cleared");

    Ok(Json(ClearMileageResponse {
        message: "Mileage cleared successfully".to_string(),
        trucks_reset,
    }))
}
