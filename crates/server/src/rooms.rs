//! Room endpoints. All of them are public.

use api_types::{
    booking::Booking,
    room::{AvailabilityQuery, Room, RoomAvailability},
};
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};
use engine::DateRange;

use crate::{ServerError, bookings::booking_view, server::ServerState};

fn room_view(room: engine::Room) -> Room {
    Room {
        rid: room.rid,
        rname: room.name,
        rcategory: room.category,
        rprice: room.price,
        is_booked: room.is_booked,
    }
}

/// `POST /rooms/check`
pub async fn check(
    State(state): State<ServerState>,
    payload: Result<Json<AvailabilityQuery>, JsonRejection>,
) -> Result<Json<Vec<RoomAvailability>>, ServerError> {
    let Json(payload) = payload?;
    let range = DateRange::parse(payload.start_date.as_deref(), payload.end_date.as_deref())?;

    let rooms = state.engine.check_availability(range).await?;
    Ok(Json(
        rooms
            .into_iter()
            .map(|entry| RoomAvailability {
                rid: entry.room.rid,
                rname: entry.room.name,
                rcategory: entry.room.category,
                rprice: entry.room.price,
                available: entry.available,
            })
            .collect(),
    ))
}

/// `GET /rooms`
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Room>>, ServerError> {
    let rooms = state.engine.rooms().await?;
    Ok(Json(rooms.into_iter().map(room_view).collect()))
}

/// `GET /rooms/bookings/{rid}`
pub async fn bookings(
    State(state): State<ServerState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<Booking>>, ServerError> {
    let Path(rid) = path?;
    let bookings = state.engine.room_bookings(rid).await?;
    Ok(Json(bookings.into_iter().map(booking_view).collect()))
}
