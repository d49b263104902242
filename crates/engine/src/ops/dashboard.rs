use std::collections::HashSet;

use chrono::NaiveDate;
use sea_orm::{PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait, prelude::*};
use serde::Serialize;

use crate::{Booking, DateRange, ResultEngine, bookings, rooms};

use super::{Engine, availability::overlapping, with_tx};

const RECENT_BOOKINGS: u64 = 5;

/// Occupancy overview for a given day, computed from the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub total_rooms: u64,
    /// Active bookings, any date.
    pub total_bookings: u64,
    /// Rooms with an active booking containing the day.
    pub booked_count: u64,
    pub available_count: u64,
    pub recent_bookings: Vec<Booking>,
}

impl Engine {
    pub async fn dashboard(&self, today: NaiveDate) -> ResultEngine<Dashboard> {
        with_tx!(self, |db_tx| {
            let total_rooms = rooms::Entity::find().count(&db_tx).await?;
            let total_bookings = bookings::Entity::find()
                .filter(bookings::Column::IsDeleted.eq(false))
                .count(&db_tx)
                .await?;

            let booked_rooms: HashSet<i64> = bookings::Entity::find()
                .select_only()
                .column(bookings::Column::Rid)
                .filter(overlapping(DateRange::day(today)))
                .into_tuple::<i64>()
                .all(&db_tx)
                .await?
                .into_iter()
                .collect();
            let booked_count = booked_rooms.len() as u64;

            let recent_bookings = bookings::Entity::find()
                .filter(bookings::Column::IsDeleted.eq(false))
                .order_by_desc(bookings::Column::StartDate)
                .order_by_desc(bookings::Column::Bid)
                .limit(RECENT_BOOKINGS)
                .all(&db_tx)
                .await?
                .into_iter()
                .map(Booking::try_from)
                .collect::<ResultEngine<Vec<_>>>()?;

            Ok(Dashboard {
                total_rooms,
                total_bookings,
                booked_count,
                available_count: total_rooms.saturating_sub(booked_count),
                recent_bookings,
            })
        })
    }
}
