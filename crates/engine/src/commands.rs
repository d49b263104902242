//! Command structs for booking writes.
//!
//! These types group the parameters of create/update so call sites stay
//! readable and the engine gets a single place to validate them.

use chrono::NaiveDate;

use crate::{DateRange, EngineError, ResultEngine};

/// An amount and who took it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Payment {
    pub amount: i64,
    pub receiver: String,
}

impl Payment {
    pub fn new(amount: i64, receiver: impl Into<String>) -> Self {
        Self {
            amount,
            receiver: receiver.into(),
        }
    }
}

/// Create a booking for one room.
#[derive(Clone, Debug)]
pub struct NewBookingCmd {
    pub room_id: i64,
    pub customer_name: String,
    pub customer_contact: String,
    pub range: DateRange,
    pub advance: Payment,
    pub due: Payment,
    pub created_by: String,
}

impl NewBookingCmd {
    #[must_use]
    pub fn new(
        room_id: i64,
        customer_name: impl Into<String>,
        customer_contact: impl Into<String>,
        range: DateRange,
    ) -> Self {
        Self {
            room_id,
            customer_name: customer_name.into(),
            customer_contact: customer_contact.into(),
            range,
            advance: Payment::default(),
            due: Payment::default(),
            created_by: "system".to_string(),
        }
    }

    #[must_use]
    pub fn advance(mut self, amount: i64, receiver: impl Into<String>) -> Self {
        self.advance = Payment::new(amount, receiver);
        self
    }

    #[must_use]
    pub fn due(mut self, amount: i64, receiver: impl Into<String>) -> Self {
        self.due = Payment::new(amount, receiver);
        self
    }

    #[must_use]
    pub fn created_by(mut self, user_id: impl Into<String>) -> Self {
        self.created_by = user_id.into();
        self
    }

    /// Trims text fields and checks the required ones.
    pub(crate) fn normalized(mut self) -> ResultEngine<Self> {
        self.customer_name = required_text(&self.customer_name, "customer name")?;
        self.customer_contact = required_text(&self.customer_contact, "customer contact")?;
        self.advance.receiver = self.advance.receiver.trim().to_string();
        self.due.receiver = self.due.receiver.trim().to_string();
        non_negative(self.advance.amount, "advance")?;
        non_negative(self.due.amount, "due")?;
        if self.created_by.trim().is_empty() {
            self.created_by = "system".to_string();
        }
        Ok(self)
    }
}

/// Partial update of a booking. `None` leaves the field untouched.
#[derive(Clone, Debug, Default)]
pub struct BookingPatch {
    pub customer_name: Option<String>,
    pub customer_contact: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub advance: Option<i64>,
    pub advance_receiver: Option<String>,
    pub due: Option<i64>,
    pub due_receiver: Option<String>,
}

impl BookingPatch {
    #[must_use]
    pub fn customer_name(mut self, value: impl Into<String>) -> Self {
        self.customer_name = Some(value.into());
        self
    }

    #[must_use]
    pub fn customer_contact(mut self, value: impl Into<String>) -> Self {
        self.customer_contact = Some(value.into());
        self
    }

    #[must_use]
    pub fn start_date(mut self, value: NaiveDate) -> Self {
        self.start_date = Some(value);
        self
    }

    #[must_use]
    pub fn end_date(mut self, value: NaiveDate) -> Self {
        self.end_date = Some(value);
        self
    }

    #[must_use]
    pub fn advance(mut self, amount: i64, receiver: Option<String>) -> Self {
        self.advance = Some(amount);
        self.advance_receiver = receiver;
        self
    }

    #[must_use]
    pub fn due(mut self, amount: i64, receiver: Option<String>) -> Self {
        self.due = Some(amount);
        self.due_receiver = receiver;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.customer_name.is_none()
            && self.customer_contact.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.advance.is_none()
            && self.advance_receiver.is_none()
            && self.due.is_none()
            && self.due_receiver.is_none()
    }

    pub fn touches_dates(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }
}

pub(crate) fn required_text(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidField(format!("{label} is required")));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn non_negative(amount: i64, label: &str) -> ResultEngine<()> {
    if amount < 0 {
        return Err(EngineError::InvalidField(format!("{label} must be >= 0")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range() -> DateRange {
        DateRange::parse(Some("2024-01-10"), Some("2024-01-12")).unwrap()
    }

    #[test]
    fn normalized_trims_and_defaults_creator() {
        let cmd = NewBookingCmd::new(101, "  Ada ", " 555-0100", range())
            .advance(100, " desk ")
            .created_by(" ")
            .normalized()
            .unwrap();
        assert_eq!(cmd.customer_name, "Ada");
        assert_eq!(cmd.customer_contact, "555-0100");
        assert_eq!(cmd.advance, Payment::new(100, "desk"));
        assert_eq!(cmd.created_by, "system");
    }

    #[test]
    fn normalized_requires_customer_fields() {
        let err = NewBookingCmd::new(101, "", "555", range())
            .normalized()
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidField("customer name is required".to_string())
        );
        let err = NewBookingCmd::new(101, "Ada", " ", range())
            .normalized()
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidField("customer contact is required".to_string())
        );
    }

    #[test]
    fn normalized_rejects_negative_amounts() {
        let err = NewBookingCmd::new(101, "Ada", "555", range())
            .due(-5, "")
            .normalized()
            .unwrap_err();
        assert_eq!(err, EngineError::InvalidField("due must be >= 0".to_string()));
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(BookingPatch::default().is_empty());
        assert!(!BookingPatch::default().due(10, None).is_empty());
        assert!(!BookingPatch::default().customer_name("x").touches_dates());
    }
}
