// src/handlers/trip.rs
use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::dtos::trip::{DayBucketResponse, TripRequest, TripResponse, TripSummaryResponse};
use crate::error::AppError;
use crate::extract::{JsonBody, QueryParams};
use crate::ledger::{self, LedgerSummary, TripFilter};
use crate::models::dealer::Dealer;
use crate::models::driver::Driver;
use crate::models::trip::Trip;
use crate::models::truck::Truck;
use crate::repository::{parse_id, Document, Record};
use crate::state::AppState;

/// Display names of every record a trip can reference.
pub struct Labels {
    pub drivers: HashMap<Uuid, String>,
    pub trucks: HashMap<Uuid, String>,
    pub dealers: HashMap<Uuid, String>,
}

impl Labels {
    pub async fn load(state: &AppState) -> Result<Self, AppError> {
        let drivers = state.repo::<Driver>().list().await?;
        let trucks = state.repo::<Truck>().list().await?;
        let dealers = state.repo::<Dealer>().list().await?;
        Ok(Self {
            drivers: drivers.into_iter().map(|d| (d.id, d.data.full_name)).collect(),
            trucks: trucks.into_iter().map(|t| (t.id, t.data.number)).collect(),
            dealers: dealers.into_iter().map(|d| (d.id, d.data.name)).collect(),
        })
    }

    fn label(map: &HashMap<Uuid, String>, id: Option<Uuid>) -> String {
        id.and_then(|id| map.get(&id).cloned()).unwrap_or_default()
    }

    pub fn expand(&self, trip: Record<Trip>) -> TripResponse {
        TripResponse {
            driver_name: Self::label(&self.drivers, Some(trip.data.driver_id)),
            truck_number: Self::label(&self.trucks, Some(trip.data.truck_id)),
            dealer_name: Self::label(&self.dealers, trip.data.dealer_id),
            trip,
        }
    }
}

/// Resolves the references of a trip being written. The dealer is optional
/// but must exist when given.
async fn ensure_references(state: &AppState, trip: &Trip) -> Result<(), AppError> {
    state.repo::<Driver>().require(trip.driver_id).await?;
    state.repo::<Truck>().require(trip.truck_id).await?;
    if let Some(dealer_id) = trip.dealer_id {
        state.repo::<Dealer>().require(dealer_id).await?;
    }
    Ok(())
}

async fn filtered_trips(state: &AppState, filter: &TripFilter) -> Result<Vec<Record<Trip>>, AppError> {
    filter.validate()?;
    let trips = state.repo::<Trip>().list().await?;
    Ok(filter.apply(trips))
}

// GET /trips
#[instrument(skip(state))]
pub async fn list_trips(
    State(state): State<AppState>,
    QueryParams(filter): QueryParams<TripFilter>,
) -> Result<Json<Vec<TripResponse>>, AppError> {
    let trips = filtered_trips(&state, &filter).await?;
    let labels = Labels::load(&state).await?;
    Ok(Json(trips.into_iter().map(|t| labels.expand(t)).collect()))
}

// GET /trips/summary
#[instrument(skip(state))]
pub async fn trip_summary(
    State(state): State<AppState>,
    QueryParams(filter): QueryParams<TripFilter>,
) -> Result<Json<TripSummaryResponse>, AppError> {
    let trips = filtered_trips(&state, &filter).await?;
    let summary = LedgerSummary::of(trips.iter().map(|t| &t.data));
    let labels = Labels::load(&state).await?;

    let days = ledger::group_by_day(trips)
        .into_iter()
        .map(|bucket| DayBucketResponse {
            day: bucket.day,
            summary: bucket.summary,
            trips: bucket.trips.into_iter().map(|t| labels.expand(t)).collect(),
        })
        .collect();

    Ok(Json(TripSummaryResponse { summary, days }))
}

// GET /trips/{id}
#[instrument(skip(state))]
pub async fn get_trip(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TripResponse>, AppError> {
    let id = parse_id(&id, Trip::LABEL)?;
    let trip = state.repo::<Trip>().require(id).await?;
    let labels = Labels::load(&state).await?;
    Ok(Json(labels.expand(trip)))
}

// POST /trips
#[instrument(skip(state, req))]
pub async fn create_trip(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<TripRequest>,
) -> Result<(StatusCode, Json<TripResponse>), AppError> {
    let trip = req.into_trip(&state.ledger, Utc::now().date_naive())?;
    ensure_references(&state, &trip).await?;

    let trip = state.repo::<Trip>().insert(trip).await?;
    info!(
        id = %trip.id,
        total_sale = trip.data.total_sale,
        commission = trip.data.driver_commission,
        "trip created"
    );
    let labels = Labels::load(&state).await?;
    Ok((StatusCode::CREATED, Json(labels.expand(trip))))
}

// PUT /trips/{id}
#[instrument(skip(state, req))]
pub async fn update_trip(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<TripRequest>,
) -> Result<Json<TripResponse>, AppError> {
    let id = parse_id(&id, Trip::LABEL)?;
    let repo = state.repo::<Trip>();
    // a trip edited without a date keeps the one it was recorded on
    let existing = repo.require(id).await?;
    let trip = req.into_trip(&state.ledger, existing.data.date)?;
    ensure_references(&state, &trip).await?;

    let trip = repo.replace(id, trip).await?;
    let labels = Labels::load(&state).await?;
    Ok(Json(labels.expand(trip)))
}

// DELETE /trips/{id}
#[instrument(skip(state))]
pub async fn delete_trip(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id, Trip::LABEL)?;
    state.repo::<Trip>().delete(id).await?;
    info!(%id, "trip deleted");
    Ok(StatusCode::NO_CONTENT)
}
