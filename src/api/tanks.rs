//! Tank API endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use super::{created, ok, ApiJson, ApiResponse, ApiResult};
use crate::db::MAX_TANKS;
use crate::errors::AppError;
use crate::models::{parse_id, CreateTankRequest, Tank, TankUpdate};
use crate::AppState;

/// GET /tank - List up to 1000 tanks in insertion order.
pub async fn list_tanks(State(state): State<AppState>) -> ApiResult<Vec<Tank>> {
    let tanks = state.repo.list_tanks(MAX_TANKS).await?;

    if tanks.len() as i64 == MAX_TANKS {
        let total = state.repo.count_tanks().await?;
        if total > MAX_TANKS {
            tracing::warn!("Listing truncated: {} of {} tanks returned", MAX_TANKS, total);
        }
    }

    ok(tanks)
}

/// GET /tank/:id - Get a single tank.
pub async fn get_tank(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Tank> {
    let id = parse_id(&id).ok_or_else(AppError::tank_not_found)?;

    match state.repo.get_tank(&id).await? {
        Some(tank) => ok(tank),
        None => Err(AppError::tank_not_found()),
    }
}

/// POST /tank - Create a new tank.
pub async fn create_tank(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateTankRequest>,
) -> ApiResult<Tank> {
    request.validate()?;

    let tank = state.repo.create_tank(&request).await?;
    tracing::info!("Created tank {} at {}", tank.id, tank.location);
    created(tank)
}

/// PATCH /tank/:id - Apply a partial update to a tank.
pub async fn update_tank(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(update): ApiJson<TankUpdate>,
) -> ApiResult<Tank> {
    update.validate()?;
    let id = parse_id(&id).ok_or_else(AppError::tank_not_found)?;

    let tank = state.repo.update_tank(&id, &update).await?;
    ok(tank)
}

/// DELETE /tank/:id - Delete a tank.
pub async fn delete_tank(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    let id = parse_id(&id).ok_or_else(AppError::tank_not_found)?;

    state.repo.delete_tank(&id).await?;
    tracing::info!("Deleted tank {}", id);
    Ok(ApiResponse::empty(StatusCode::ACCEPTED))
}
