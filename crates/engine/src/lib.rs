//! Booking core of the back-office: room registry, booking ledger,
//! availability engine and the booking state machine.
//!
//! The [`Engine`] is stateless over a sea-orm `DatabaseConnection`; every
//! write runs in its own database transaction.

pub use bookings::Booking;
pub use commands::{BookingPatch, NewBookingCmd, Payment};
pub use error::EngineError;
pub use ops::{Dashboard, Engine, EngineBuilder};
pub use range::{DateRange, parse_date};
pub use rooms::{Room, RoomAvailability};
pub use users::{Capability, Role, User};

mod bookings;
mod commands;
mod error;
mod ops;
mod range;
mod rooms;
mod users;

type ResultEngine<T> = Result<T, EngineError>;
