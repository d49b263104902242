//! JSON wire types of the back-office API.
//!
//! Field names follow what the dashboard sends and expects (`rid`, `cname`,
//! `startDate`, ...), so they differ from the engine's Rust names.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Role of an authenticated user.
///
/// - `admin`: full access, including updates and soft-deletes of bookings.
/// - `manager`: can list and create bookings and read the dashboard.
/// - `customer`: no back-office access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Manager,
    Customer,
}

/// An amount as sent by HTML forms: a JSON number or a numeric string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(i64),
    Text(String),
}

impl Amount {
    /// The numeric value. Blank text counts as zero; other text must parse.
    pub fn value(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) if s.trim().is_empty() => Some(0),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

pub mod auth {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Login {
        pub uemail: String,
        pub upassword: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginResponse {
        pub token: String,
        pub role: Role,
    }
}

pub mod room {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Room {
        pub rid: i64,
        pub rname: String,
        pub rcategory: String,
        pub rprice: i64,
        pub is_booked: bool,
    }

    /// Body of `POST /rooms/check`. Dates are kept raw so a missing or
    /// malformed one can be reported as a client error.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AvailabilityQuery {
        pub start_date: Option<String>,
        pub end_date: Option<String>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct RoomAvailability {
        pub rid: i64,
        pub rname: String,
        pub rcategory: String,
        pub rprice: i64,
        pub available: bool,
    }
}

pub mod booking {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Booking {
        pub bid: i64,
        pub rid: i64,
        pub cname: String,
        pub ccontact: String,
        pub start_date: NaiveDate,
        pub end_date: NaiveDate,
        pub advance: i64,
        pub advance_receiver: String,
        pub due: i64,
        pub due_receiver: String,
        pub is_deleted: bool,
        #[serde(rename = "bcreatedByUid")]
        pub created_by: String,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    /// Body of `POST /rooms/book/:rid`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BookingNew {
        pub cname: Option<String>,
        pub ccontact: Option<String>,
        pub start_date: Option<String>,
        pub end_date: Option<String>,
        pub advance: Option<Amount>,
        pub advance_receiver: Option<String>,
        pub due: Option<Amount>,
        pub due_receiver: Option<String>,
    }

    /// Body of `PUT /bookings/:id`. Absent fields are left unchanged.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BookingUpdate {
        pub cname: Option<String>,
        pub ccontact: Option<String>,
        pub start_date: Option<String>,
        pub end_date: Option<String>,
        pub advance: Option<Amount>,
        pub advance_receiver: Option<String>,
        pub due: Option<Amount>,
        pub due_receiver: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BookingCreated {
        pub message: String,
        pub booking: Booking,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BookingDeleted {
        pub message: String,
        pub booking: Booking,
        /// Room whose cached flag was refreshed.
        pub updated_room: i64,
    }
}

pub mod dashboard {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Dashboard {
        pub total_rooms: u64,
        pub total_bookings: u64,
        pub booked_count: u64,
        pub available_count: u64,
        pub recent_bookings: Vec<booking::Booking>,
    }
}

pub mod health {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Health {
        pub status: String,
        pub time: DateTime<Utc>,
    }
}
