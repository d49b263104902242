//! Back-office users, their role and what the role allows.
//!
//! The engine never checks roles itself: the HTTP layer asks
//! [`Role::allows`] once per request, before calling into the engine.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Role attached to a verified identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Manager,
    Customer,
}

/// Operations gated by role.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    /// List and read active bookings.
    ViewBookings,
    /// Create bookings.
    BookRooms,
    /// Update and soft-delete bookings.
    AmendBookings,
    ViewDashboard,
}

impl Role {
    /// Returns the canonical role string used by the database and tokens.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Customer => "customer",
        }
    }

    pub fn allows(self, capability: Capability) -> bool {
        match self {
            Self::Admin => true,
            Self::Manager => matches!(
                capability,
                Capability::ViewBookings | Capability::BookRooms | Capability::ViewDashboard
            ),
            Self::Customer => false,
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "customer" => Ok(Self::Customer),
            other => Err(EngineError::InvalidRole(format!("unknown role: {other}"))),
        }
    }
}

/// A user as seen by the rest of the system (no credentials).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub uid: i64,
    pub email: String,
    pub role: Role,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub uid: i64,
    #[sea_orm(unique)]
    pub email: String,
    pub password: String,
    pub role: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for User {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            uid: model.uid,
            email: model.email,
            role: Role::try_from(model.role.as_str())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Capability; 4] = [
        Capability::ViewBookings,
        Capability::BookRooms,
        Capability::AmendBookings,
        Capability::ViewDashboard,
    ];

    #[test]
    fn admin_can_do_everything() {
        assert!(ALL.iter().all(|c| Role::Admin.allows(*c)));
    }

    #[test]
    fn manager_cannot_amend() {
        assert!(Role::Manager.allows(Capability::BookRooms));
        assert!(Role::Manager.allows(Capability::ViewBookings));
        assert!(Role::Manager.allows(Capability::ViewDashboard));
        assert!(!Role::Manager.allows(Capability::AmendBookings));
    }

    #[test]
    fn customer_has_no_back_office_capability() {
        assert!(ALL.iter().all(|c| !Role::Customer.allows(*c)));
    }

    #[test]
    fn role_round_trips_through_str() {
        for role in [Role::Admin, Role::Manager, Role::Customer] {
            assert_eq!(Role::try_from(role.as_str()).unwrap(), role);
        }
        assert_eq!(
            Role::try_from("owner").unwrap_err(),
            EngineError::InvalidRole("unknown role: owner".to_string())
        );
    }
}
