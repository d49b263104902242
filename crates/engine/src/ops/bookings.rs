use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue, DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
    sea_query::{Expr, SimpleExpr},
};

use crate::commands::{non_negative, required_text};
use crate::{
    Booking, BookingPatch, DateRange, EngineError, NewBookingCmd, ResultEngine, bookings, rooms,
};

use super::{Engine, availability::overlapping, with_tx};

impl Engine {
    /// Take the write lock on the room row before reading the ledger.
    ///
    /// Two creates for the same room serialize here: the second one only
    /// reads bookings after the first has committed. Also fails with
    /// `KeyNotFound` if the room does not exist.
    async fn claim_room(&self, db: &DatabaseTransaction, rid: i64) -> ResultEngine<()> {
        let res = rooms::Entity::update_many()
            .col_expr(
                rooms::Column::IsBooked,
                SimpleExpr::from(Expr::col(rooms::Column::IsBooked)),
            )
            .filter(rooms::Column::Rid.eq(rid))
            .exec(db)
            .await?;
        if res.rows_affected == 0 {
            return Err(EngineError::KeyNotFound(format!("room {rid}")));
        }
        Ok(())
    }

    /// First active booking of `rid` overlapping `range`, other than `except`.
    async fn find_overlapping(
        &self,
        db: &DatabaseTransaction,
        rid: i64,
        range: DateRange,
        except: Option<i64>,
    ) -> ResultEngine<Option<bookings::Model>> {
        let mut query = bookings::Entity::find()
            .filter(bookings::Column::Rid.eq(rid))
            .filter(overlapping(range))
            .order_by_asc(bookings::Column::StartDate);
        if let Some(bid) = except {
            query = query.filter(bookings::Column::Bid.ne(bid));
        }
        query.one(db).await.map_err(Into::into)
    }

    async fn require_active_booking(
        &self,
        db: &DatabaseTransaction,
        bid: i64,
    ) -> ResultEngine<bookings::Model> {
        bookings::Entity::find_by_id(bid)
            .filter(bookings::Column::IsDeleted.eq(false))
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(format!("booking {bid}")))
    }

    /// Create a booking (nonexistent → active).
    ///
    /// Fails with `AlreadyBooked` when an active booking of the same room
    /// overlaps the requested range; nothing is written in that case. The
    /// room's cached flag is refreshed after the commit, relative to `now`.
    pub async fn create_booking(
        &self,
        cmd: NewBookingCmd,
        now: DateTime<Utc>,
    ) -> ResultEngine<Booking> {
        let cmd = cmd.normalized()?;
        let booking = with_tx!(self, |db_tx| {
            self.claim_room(&db_tx, cmd.room_id).await?;

            if let Some(existing) = self
                .find_overlapping(&db_tx, cmd.room_id, cmd.range, None)
                .await?
            {
                return Err(EngineError::AlreadyBooked(format!(
                    "room {} is held by booking {} from {} to {}",
                    cmd.room_id, existing.bid, existing.start_date, existing.end_date
                )));
            }

            let model = bookings::ActiveModel::new_booking(&cmd, now)
                .insert(&db_tx)
                .await?;
            Booking::try_from(model)
        })?;

        tracing::info!(
            bid = booking.id,
            rid = booking.room_id,
            range = %booking.range,
            created_by = %booking.created_by,
            "booking created"
        );
        self.refresh_room_flag_after_write(booking.room_id, now.date_naive())
            .await;
        Ok(booking)
    }

    /// Update an active booking in place (active → active).
    ///
    /// Date changes are not checked against other bookings of the room. When
    /// an update makes two active bookings overlap, it is applied anyway and
    /// a warning names both bookings.
    pub async fn update_booking(
        &self,
        bid: i64,
        patch: BookingPatch,
        now: DateTime<Utc>,
    ) -> ResultEngine<Booking> {
        if patch.is_empty() {
            return Err(EngineError::InvalidField(
                "provide at least one field to update".to_string(),
            ));
        }
        let touches_dates = patch.touches_dates();

        let booking = with_tx!(self, |db_tx| {
            let current = self.require_active_booking(&db_tx, bid).await?;
            let range = DateRange::new(
                patch.start_date.unwrap_or(current.start_date),
                patch.end_date.unwrap_or(current.end_date),
            )?;

            let mut active = bookings::ActiveModel {
                bid: ActiveValue::Unchanged(bid),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            };
            if let Some(name) = patch.customer_name.as_deref() {
                active.customer_name = ActiveValue::Set(required_text(name, "customer name")?);
            }
            if let Some(contact) = patch.customer_contact.as_deref() {
                active.customer_contact =
                    ActiveValue::Set(required_text(contact, "customer contact")?);
            }
            if touches_dates {
                active.start_date = ActiveValue::Set(range.start());
                active.end_date = ActiveValue::Set(range.end());
            }
            if let Some(amount) = patch.advance {
                non_negative(amount, "advance")?;
                active.advance = ActiveValue::Set(amount);
            }
            if let Some(receiver) = patch.advance_receiver.as_deref() {
                active.advance_receiver = ActiveValue::Set(receiver.trim().to_string());
            }
            if let Some(amount) = patch.due {
                non_negative(amount, "due")?;
                active.due = ActiveValue::Set(amount);
            }
            if let Some(receiver) = patch.due_receiver.as_deref() {
                active.due_receiver = ActiveValue::Set(receiver.trim().to_string());
            }

            let model = active.update(&db_tx).await?;

            if touches_dates
                && let Some(other) = self
                    .find_overlapping(&db_tx, model.rid, range, Some(bid))
                    .await?
            {
                tracing::warn!(
                    bid,
                    other_bid = other.bid,
                    rid = model.rid,
                    "updated booking overlaps another active booking of the same room"
                );
            }

            Booking::try_from(model)
        })?;

        tracing::info!(bid, rid = booking.room_id, "booking updated");
        if touches_dates {
            self.refresh_room_flag_after_write(booking.room_id, now.date_naive())
                .await;
        }
        Ok(booking)
    }

    /// Soft-delete a booking (active → soft-deleted).
    ///
    /// A booking that is missing or already soft-deleted fails with
    /// `KeyNotFound`, so a second call never succeeds.
    pub async fn soft_delete_booking(
        &self,
        bid: i64,
        now: DateTime<Utc>,
    ) -> ResultEngine<Booking> {
        let booking = with_tx!(self, |db_tx| {
            // Conditional update: of two racing deletes only one flips the flag.
            let res = bookings::Entity::update_many()
                .col_expr(bookings::Column::IsDeleted, Expr::value(true))
                .col_expr(bookings::Column::UpdatedAt, Expr::value(now))
                .filter(bookings::Column::Bid.eq(bid))
                .filter(bookings::Column::IsDeleted.eq(false))
                .exec(&db_tx)
                .await?;
            if res.rows_affected == 0 {
                return Err(EngineError::KeyNotFound(format!("booking {bid}")));
            }

            let model = bookings::Entity::find_by_id(bid)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound(format!("booking {bid}")))?;
            Booking::try_from(model)
        })?;

        tracing::info!(bid, rid = booking.room_id, "booking soft-deleted");
        self.refresh_room_flag_after_write(booking.room_id, now.date_naive())
            .await;
        Ok(booking)
    }

    /// An active booking.
    pub async fn booking(&self, bid: i64) -> ResultEngine<Booking> {
        let model = bookings::Entity::find_by_id(bid)
            .filter(bookings::Column::IsDeleted.eq(false))
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(format!("booking {bid}")))?;
        Booking::try_from(model)
    }

    /// All active bookings, latest start date first.
    pub async fn active_bookings(&self) -> ResultEngine<Vec<Booking>> {
        let models = bookings::Entity::find()
            .filter(bookings::Column::IsDeleted.eq(false))
            .order_by_desc(bookings::Column::StartDate)
            .order_by_desc(bookings::Column::Bid)
            .all(&self.database)
            .await?;
        models.into_iter().map(Booking::try_from).collect()
    }

    /// Active bookings of one room, earliest start date first.
    pub async fn room_bookings(&self, rid: i64) -> ResultEngine<Vec<Booking>> {
        let models = bookings::Entity::find()
            .filter(bookings::Column::Rid.eq(rid))
            .filter(bookings::Column::IsDeleted.eq(false))
            .order_by_asc(bookings::Column::StartDate)
            .all(&self.database)
            .await?;
        models.into_iter().map(Booking::try_from).collect()
    }
}
