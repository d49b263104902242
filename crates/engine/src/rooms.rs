//! The module contains `Room`, the unit the booking core hands out.

use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

/// A room of the property.
///
/// `is_booked` is a cache of "does the room have an active booking today".
/// It is refreshed after every booking mutation but it is never used to
/// answer availability questions: those always go to the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub rid: i64,
    pub name: String,
    pub category: String,
    /// Nightly price in whole currency units.
    pub price: i64,
    pub is_booked: bool,
}

impl Room {
    pub fn new(rid: i64, name: &str, category: &str, price: i64) -> ResultEngine<Self> {
        if rid <= 0 {
            return Err(EngineError::InvalidField(
                "room id must be > 0".to_string(),
            ));
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::InvalidField(
                "room name must not be empty".to_string(),
            ));
        }
        let category = category.trim();
        if category.is_empty() {
            return Err(EngineError::InvalidField(
                "room category must not be empty".to_string(),
            ));
        }
        if price < 0 {
            return Err(EngineError::InvalidField(
                "room price must be >= 0".to_string(),
            ));
        }
        Ok(Self {
            rid,
            name: name.to_string(),
            category: category.to_string(),
            price,
            is_booked: false,
        })
    }
}

/// A room annotated with its availability for a queried date range.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomAvailability {
    pub room: Room,
    pub available: bool,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "rooms")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub rid: i64,
    pub name: String,
    pub category: String,
    pub price: i64,
    pub is_booked: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::bookings::Entity")]
    Bookings,
}

impl Related<super::bookings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Room> for ActiveModel {
    fn from(value: &Room) -> Self {
        Self {
            rid: ActiveValue::Set(value.rid),
            name: ActiveValue::Set(value.name.clone()),
            category: ActiveValue::Set(value.category.clone()),
            price: ActiveValue::Set(value.price),
            is_booked: ActiveValue::Set(value.is_booked),
        }
    }
}

impl From<Model> for Room {
    fn from(model: Model) -> Self {
        Self {
            rid: model.rid,
            name: model.name,
            category: model.category,
            price: model.price,
            is_booked: model.is_booked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_room_trims_and_starts_unbooked() {
        let room = Room::new(101, " Garden ", " Deluxe", 3500).unwrap();
        assert_eq!(room.name, "Garden");
        assert_eq!(room.category, "Deluxe");
        assert!(!room.is_booked);
    }

    #[test]
    fn new_room_rejects_bad_fields() {
        assert_eq!(
            Room::new(0, "Garden", "Deluxe", 10).unwrap_err(),
            EngineError::InvalidField("room id must be > 0".to_string())
        );
        assert_eq!(
            Room::new(101, "  ", "Deluxe", 10).unwrap_err(),
            EngineError::InvalidField("room name must not be empty".to_string())
        );
        assert_eq!(
            Room::new(101, "Garden", "", 10).unwrap_err(),
            EngineError::InvalidField("room category must not be empty".to_string())
        );
        assert_eq!(
            Room::new(101, "Garden", "Deluxe", -1).unwrap_err(),
            EngineError::InvalidField("room price must be >= 0".to_string())
        );
    }
}
