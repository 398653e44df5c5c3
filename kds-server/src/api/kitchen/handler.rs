//! Kitchen Display API Handlers
//!
//! Projections are recomputed per request from current store state; the
//! WebSocket notifications only tell clients *when* to call these, never
//! *what* changed.
//!
//! Command endpoints answer with [`CommandResponse`]: a guard rejection
//! (order not finishable, bad input) is a successful HTTP exchange carrying
//! `success: false`, while a missing resource is a 404.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};

use shared::kitchen::{DishGroup, StationView, TableGroup};
use shared::models::{ItemStatus, Order, OrderDraft};
use shared::CommandResponse;

use crate::core::ServerState;
use crate::live::ConnectedDisplay;
use crate::utils::{AppError, AppResult};

/// A body that fails to deserialize is a validation failure, not a
/// transport error
fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::Validation(rejection.body_text()))
}

/// Guard rejections travel as `success: false` payloads, not HTTP errors
fn command_outcome(result: AppResult<CommandResponse>) -> AppResult<Json<CommandResponse>> {
    match result {
        Ok(resp) => Ok(Json(resp)),
        Err(AppError::Precondition { code, message }) => {
            Ok(Json(CommandResponse::rejected(code, message)))
        }
        Err(AppError::Validation(message)) => Ok(Json(CommandResponse::rejected(
            shared::ErrorCode::ValidationFailed,
            message,
        ))),
        Err(other) => Err(other),
    }
}

// ==================== Projections ====================

/// GET /api/kitchen/tables - expeditor by-table view
pub async fn by_table(State(state): State<ServerState>) -> AppResult<Json<Vec<TableGroup>>> {
    Ok(Json(state.kitchen.orders_by_table().await?))
}

/// GET /api/kitchen/dishes - by-dish batching view
pub async fn by_dish(State(state): State<ServerState>) -> AppResult<Json<Vec<DishGroup>>> {
    Ok(Json(state.kitchen.items_by_dish().await?))
}

/// GET /api/kitchen/stations/:category - one station's items
pub async fn by_station(
    State(state): State<ServerState>,
    Path(category): Path<String>,
) -> AppResult<Json<StationView>> {
    Ok(Json(state.kitchen.station_items(&category).await?))
}

// ==================== Filter option sources ====================

/// GET /api/kitchen/course-types
pub async fn course_types(State(state): State<ServerState>) -> AppResult<Json<Vec<String>>> {
    Ok(Json(state.kitchen.course_types().await?))
}

/// GET /api/kitchen/categories
pub async fn categories(State(state): State<ServerState>) -> AppResult<Json<Vec<String>>> {
    Ok(Json(state.kitchen.station_categories().await?))
}

/// GET /api/kitchen/displays - connected display clients
pub async fn displays(State(state): State<ServerState>) -> Json<Vec<ConnectedDisplay>> {
    Json(state.hub.connected_displays())
}

// ==================== Commands ====================

/// Body for POST /items/:id/status
#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: ItemStatus,
}

/// POST /api/kitchen/items/:id/status - set an item's preparation status
pub async fn set_item_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<StatusRequest>, JsonRejection>,
) -> AppResult<Json<CommandResponse>> {
    command_outcome(async {
        let req = parse_body(payload)?;
        let item = state.kitchen.set_item_status(&id, req.status).await?;
        Ok(CommandResponse::ok_with_item("status updated", item))
    }
    .await)
}

/// Body for POST /items/:id/urgent
#[derive(Debug, Deserialize)]
pub struct UrgentRequest {
    pub urgent: bool,
}

/// POST /api/kitchen/items/:id/urgent - flip the urgent flag
pub async fn set_urgent(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<UrgentRequest>, JsonRejection>,
) -> AppResult<Json<CommandResponse>> {
    command_outcome(async {
        let req = parse_body(payload)?;
        let item = state.kitchen.set_urgent(&id, req.urgent).await?;
        Ok(CommandResponse::ok_with_item("urgent flag updated", item))
    }
    .await)
}

/// POST /api/kitchen/orders/:id/complete - the completion gate
pub async fn complete_order(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<CommandResponse>> {
    command_outcome(
        state
            .kitchen
            .complete_order(&id)
            .await
            .map(|()| CommandResponse::ok("order completed")),
    )
}

/// POST /api/kitchen/orders - submit a new order
pub async fn submit_order(
    State(state): State<ServerState>,
    payload: Result<Json<OrderDraft>, JsonRejection>,
) -> AppResult<Json<Order>> {
    let draft = parse_body(payload)?;
    Ok(Json(state.kitchen.submit_order(draft).await?))
}

/// Response for the fire-dish bulk action
#[derive(Debug, Serialize)]
pub struct FireResponse {
    pub success: bool,
    /// Items moved from Pending to Cooking
    pub fired: usize,
}

/// POST /api/kitchen/dishes/:dish_id/fire - start all pending items of a dish
pub async fn fire_dish(
    State(state): State<ServerState>,
    Path(dish_id): Path<String>,
) -> AppResult<Json<FireResponse>> {
    let fired = state.kitchen.fire_dish(&dish_id).await?;
    Ok(Json(FireResponse {
        success: true,
        fired,
    }))
}
