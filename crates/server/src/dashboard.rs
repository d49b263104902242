use api_types::{dashboard::Dashboard, health::Health};
use axum::{Extension, Json, extract::State};
use chrono::Utc;
use engine::Capability;

use crate::{ServerError, bookings::booking_view, server::ServerState, token::Identity};

/// `GET /dashboard`, counted for the current UTC day.
pub async fn get(
    Extension(identity): Extension<Identity>,
    State(state): State<ServerState>,
) -> Result<Json<Dashboard>, ServerError> {
    identity.require(Capability::ViewDashboard)?;
    let overview = state.engine.dashboard(Utc::now().date_naive()).await?;
    Ok(Json(Dashboard {
        total_rooms: overview.total_rooms,
        total_bookings: overview.total_bookings,
        booked_count: overview.booked_count,
        available_count: overview.available_count,
        recent_bookings: overview
            .recent_bookings
            .into_iter()
            .map(booking_view)
            .collect(),
    }))
}

/// `GET /health`
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
        time: Utc::now(),
    })
}
