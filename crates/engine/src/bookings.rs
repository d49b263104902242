//! Booking ledger records.
//!
//! A `Booking` reserves one room for an inclusive range of days. Bookings are
//! never physically removed: a soft-deleted booking keeps its row and stops
//! taking part in overlap checks.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::{DateRange, NewBookingCmd, ResultEngine};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Ledger identifier, assigned by the store on insert.
    pub id: i64,
    pub room_id: i64,
    pub customer_name: String,
    pub customer_contact: String,
    pub range: DateRange,
    pub advance: i64,
    pub advance_receiver: String,
    pub due: i64,
    pub due_receiver: String,
    /// User id of the creator, or `"system"`.
    pub created_by: String,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub bid: i64,
    pub rid: i64,
    pub customer_name: String,
    pub customer_contact: String,
    pub start_date: Date,
    pub end_date: Date,
    pub advance: i64,
    pub advance_receiver: String,
    pub due: i64,
    pub due_receiver: String,
    pub created_by: String,
    pub is_deleted: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::rooms::Entity",
        from = "Column::Rid",
        to = "super::rooms::Column::Rid",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Rooms,
}

impl Related<super::rooms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rooms.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    /// Row for a fresh booking. `bid` is left to the store's sequence.
    pub(crate) fn new_booking(cmd: &NewBookingCmd, now: DateTime<Utc>) -> Self {
        Self {
            bid: ActiveValue::NotSet,
            rid: ActiveValue::Set(cmd.room_id),
            customer_name: ActiveValue::Set(cmd.customer_name.clone()),
            customer_contact: ActiveValue::Set(cmd.customer_contact.clone()),
            start_date: ActiveValue::Set(cmd.range.start()),
            end_date: ActiveValue::Set(cmd.range.end()),
            advance: ActiveValue::Set(cmd.advance.amount),
            advance_receiver: ActiveValue::Set(cmd.advance.receiver.clone()),
            due: ActiveValue::Set(cmd.due.amount),
            due_receiver: ActiveValue::Set(cmd.due.receiver.clone()),
            created_by: ActiveValue::Set(cmd.created_by.clone()),
            is_deleted: ActiveValue::Set(false),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
    }
}

impl Model {
    pub(crate) fn range(&self) -> ResultEngine<DateRange> {
        DateRange::new(self.start_date, self.end_date)
    }
}

impl TryFrom<Model> for Booking {
    type Error = crate::EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let range = model.range()?;
        Ok(Self {
            id: model.bid,
            room_id: model.rid,
            customer_name: model.customer_name,
            customer_contact: model.customer_contact,
            range,
            advance: model.advance,
            advance_receiver: model.advance_receiver,
            due: model.due,
            due_receiver: model.due_receiver,
            created_by: model.created_by,
            deleted: model.is_deleted,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone};

    use super::*;
    use crate::EngineError;

    fn model(start: &str, end: &str) -> Model {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        Model {
            bid: 7,
            rid: 101,
            customer_name: "Ada".to_string(),
            customer_contact: "555-0100".to_string(),
            start_date: NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap(),
            end_date: NaiveDate::parse_from_str(end, "%Y-%m-%d").unwrap(),
            advance: 100,
            advance_receiver: "front desk".to_string(),
            due: 250,
            due_receiver: String::new(),
            created_by: "1".to_string(),
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn model_converts_to_booking() {
        let booking = Booking::try_from(model("2024-01-10", "2024-01-12")).unwrap();
        assert_eq!(booking.id, 7);
        assert_eq!(booking.room_id, 101);
        assert_eq!(booking.range.to_string(), "2024-01-10 to 2024-01-12");
        assert!(!booking.deleted);
    }

    #[test]
    fn stored_inverted_range_is_rejected() {
        let err = Booking::try_from(model("2024-01-12", "2024-01-10")).unwrap_err();
        assert!(matches!(err, EngineError::InvalidRange(_)));
    }
}
