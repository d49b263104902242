use chrono::NaiveDate;
use sea_orm::{
    ConnectionTrait, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
    sea_query::Expr,
};

use crate::{EngineError, ResultEngine, Room, bookings, rooms};

use super::{Engine, with_tx};

impl Engine {
    /// All rooms, ordered by room id.
    pub async fn rooms(&self) -> ResultEngine<Vec<Room>> {
        let models = rooms::Entity::find()
            .order_by_asc(rooms::Column::Rid)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Room::from).collect())
    }

    pub async fn room(&self, rid: i64) -> ResultEngine<Room> {
        rooms::Entity::find_by_id(rid)
            .one(&self.database)
            .await?
            .map(Room::from)
            .ok_or_else(|| EngineError::KeyNotFound(format!("room {rid}")))
    }

    /// Register a room. Used by the seed tooling, not by the HTTP surface.
    pub async fn new_room(
        &self,
        rid: i64,
        name: &str,
        category: &str,
        price: i64,
    ) -> ResultEngine<Room> {
        let room = Room::new(rid, name, category, price)?;
        with_tx!(self, |db_tx| {
            if rooms::Entity::find_by_id(rid).one(&db_tx).await?.is_some() {
                return Err(EngineError::ExistingKey(format!("room {rid}")));
            }
            rooms::ActiveModel::from(&room).insert(&db_tx).await?;
            Ok(room)
        })
    }

    /// Recompute and persist the cached `is_booked` flag of a room.
    ///
    /// Returns the new flag value.
    pub async fn refresh_room_flag(&self, rid: i64, today: NaiveDate) -> ResultEngine<bool> {
        recompute_room_flag(&self.database, rid, today).await
    }

    /// Flag refresh after a committed booking write. A failure here leaves a
    /// stale cache, which range queries never read, so it is only logged.
    pub(super) async fn refresh_room_flag_after_write(&self, rid: i64, today: NaiveDate) {
        match recompute_room_flag(&self.database, rid, today).await {
            Ok(is_booked) => tracing::debug!(rid, is_booked, "room flag refreshed"),
            Err(err) => tracing::warn!(rid, "failed to refresh room flag: {err}"),
        }
    }
}

/// `is_booked` is true iff an active booking of the room contains `today`.
async fn recompute_room_flag<C>(db: &C, rid: i64, today: NaiveDate) -> ResultEngine<bool>
where
    C: ConnectionTrait,
{
    let active_today = bookings::Entity::find()
        .filter(bookings::Column::Rid.eq(rid))
        .filter(bookings::Column::IsDeleted.eq(false))
        .filter(bookings::Column::StartDate.lte(today))
        .filter(bookings::Column::EndDate.gte(today))
        .count(db)
        .await?;
    let is_booked = active_today > 0;

    let res = rooms::Entity::update_many()
        .col_expr(rooms::Column::IsBooked, Expr::value(is_booked))
        .filter(rooms::Column::Rid.eq(rid))
        .exec(db)
        .await?;
    if res.rows_affected == 0 {
        return Err(EngineError::KeyNotFound(format!("room {rid}")));
    }
    Ok(is_booked)
}
