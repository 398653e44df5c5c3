//! Kitchen Display API Module
//!
//! Read-side projections for the three screen layouts plus the preparation
//! commands the screens issue.

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/kitchen", kitchen_routes())
}

fn kitchen_routes() -> Router<ServerState> {
    Router::new()
        // Projections
        .route("/tables", get(handler::by_table))
        .route("/dishes", get(handler::by_dish))
        .route("/stations/{category}", get(handler::by_station))
        // Filter option sources
        .route("/course-types", get(handler::course_types))
        .route("/categories", get(handler::categories))
        // Hub registry
        .route("/displays", get(handler::displays))
        // Commands
        .route("/orders", post(handler::submit_order))
        .route("/orders/{id}/complete", post(handler::complete_order))
        .route("/items/{id}/status", post(handler::set_item_status))
        .route("/items/{id}/urgent", post(handler::set_urgent))
        .route("/dishes/{dish_id}/fire", post(handler::fire_dish))
}
