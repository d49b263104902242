//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`KeyNotFound`] thrown when a room, booking or user does not exist (a
//!   soft-deleted booking counts as missing).
//! - [`AlreadyBooked`] thrown when a booking would overlap an active booking
//!   of the same room.
//! - [`InvalidRange`] and [`InvalidField`] thrown on malformed input.
//!
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`AlreadyBooked`]: EngineError::AlreadyBooked
//!  [`InvalidRange`]: EngineError::InvalidRange
//!  [`InvalidField`]: EngineError::InvalidField
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Not found: {0}")]
    KeyNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Room already booked for given dates: {0}")]
    AlreadyBooked(String),
    #[error("Invalid date range: {0}")]
    InvalidRange(String),
    #[error("Invalid field: {0}")]
    InvalidField(String),
    #[error("Invalid role: {0}")]
    InvalidRole(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::AlreadyBooked(a), Self::AlreadyBooked(b)) => a == b,
            (Self::InvalidRange(a), Self::InvalidRange(b)) => a == b,
            (Self::InvalidField(a), Self::InvalidField(b)) => a == b,
            (Self::InvalidRole(a), Self::InvalidRole(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
