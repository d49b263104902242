//! Booking API endpoints.

use api_types::{
    Amount,
    booking::{Booking, BookingCreated, BookingDeleted, BookingNew, BookingUpdate},
};
use axum::{
    Extension, Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};
use chrono::Utc;
use engine::{BookingPatch, Capability, DateRange, NewBookingCmd, parse_date};

use crate::{ServerError, server::ServerState, token::Identity};

pub(crate) fn booking_view(booking: engine::Booking) -> Booking {
    Booking {
        bid: booking.id,
        rid: booking.room_id,
        cname: booking.customer_name,
        ccontact: booking.customer_contact,
        start_date: booking.range.start(),
        end_date: booking.range.end(),
        advance: booking.advance,
        advance_receiver: booking.advance_receiver,
        due: booking.due,
        due_receiver: booking.due_receiver,
        is_deleted: booking.deleted,
        created_by: booking.created_by,
        created_at: booking.created_at,
        updated_at: booking.updated_at,
    }
}

fn amount(value: Option<&Amount>, label: &str) -> Result<Option<i64>, ServerError> {
    value
        .map(|raw| {
            raw.value()
                .ok_or_else(|| ServerError::Generic(format!("{label} must be a number")))
        })
        .transpose()
}

fn date(value: Option<&str>, label: &str) -> Result<Option<chrono::NaiveDate>, ServerError> {
    value
        .map(|raw| {
            parse_date(raw)
                .ok_or_else(|| ServerError::Generic(format!("{label} '{raw}' is not a date")))
        })
        .transpose()
}

/// `POST /rooms/book/{rid}`
pub async fn book_room(
    Extension(identity): Extension<Identity>,
    State(state): State<ServerState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<BookingNew>, JsonRejection>,
) -> Result<Json<BookingCreated>, ServerError> {
    identity.require(Capability::BookRooms)?;
    let Path(rid) = path?;
    let Json(payload) = payload?;

    let range = DateRange::parse(payload.start_date.as_deref(), payload.end_date.as_deref())?;
    let cmd = NewBookingCmd::new(
        rid,
        payload.cname.unwrap_or_default(),
        payload.ccontact.unwrap_or_default(),
        range,
    )
    .advance(
        amount(payload.advance.as_ref(), "advance")?.unwrap_or(0),
        payload.advance_receiver.unwrap_or_default(),
    )
    .due(
        amount(payload.due.as_ref(), "due")?.unwrap_or(0),
        payload.due_receiver.unwrap_or_default(),
    )
    .created_by(identity.uid.to_string());

    let booking = state.engine.create_booking(cmd, Utc::now()).await?;
    Ok(Json(BookingCreated {
        message: "Room booked successfully".to_string(),
        booking: booking_view(booking),
    }))
}

/// `GET /bookings`
pub async fn list(
    Extension(identity): Extension<Identity>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<Booking>>, ServerError> {
    identity.require(Capability::ViewBookings)?;
    let bookings = state.engine.active_bookings().await?;
    Ok(Json(bookings.into_iter().map(booking_view).collect()))
}

/// `GET /bookings/{id}`
pub async fn get(
    Extension(identity): Extension<Identity>,
    State(state): State<ServerState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Booking>, ServerError> {
    identity.require(Capability::ViewBookings)?;
    let Path(bid) = path?;
    let booking = state.engine.booking(bid).await?;
    Ok(Json(booking_view(booking)))
}

/// `PUT /bookings/{id}`
pub async fn update(
    Extension(identity): Extension<Identity>,
    State(state): State<ServerState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<BookingUpdate>, JsonRejection>,
) -> Result<Json<Booking>, ServerError> {
    identity.require(Capability::AmendBookings)?;
    let Path(bid) = path?;
    let Json(payload) = payload?;

    let patch = BookingPatch {
        customer_name: payload.cname,
        customer_contact: payload.ccontact,
        start_date: date(payload.start_date.as_deref(), "start date")?,
        end_date: date(payload.end_date.as_deref(), "end date")?,
        advance: amount(payload.advance.as_ref(), "advance")?,
        advance_receiver: payload.advance_receiver,
        due: amount(payload.due.as_ref(), "due")?,
        due_receiver: payload.due_receiver,
    };

    let booking = state.engine.update_booking(bid, patch, Utc::now()).await?;
    Ok(Json(booking_view(booking)))
}

/// `PATCH /bookings/{id}/delete`
pub async fn soft_delete(
    Extension(identity): Extension<Identity>,
    State(state): State<ServerState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<BookingDeleted>, ServerError> {
    identity.require(Capability::AmendBookings)?;
    let Path(bid) = path?;

    let booking = state.engine.soft_delete_booking(bid, Utc::now()).await?;
    let updated_room = booking.room_id;
    Ok(Json(BookingDeleted {
        message: "Booking soft deleted successfully".to_string(),
        booking: booking_view(booking),
        updated_room,
    }))
}
