//! Booking entity: date-range validation, nights/amount derivation, and the
//! overlap predicate the availability checker is built on.

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;

/// Guest names are short display strings.
pub const MAX_GUEST_NAME_LEN: usize = 50;

// Same pattern the account system applies to guest emails.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$").expect("email pattern is valid")
});

/// Lifecycle status of a booking.
///
/// Created as `Confirmed`; the only transition the core performs is
/// `Confirmed -> Cancelled`. `Cancelled` and `Completed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

/// Payment state. Carried on the record, never consulted by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Refunded,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    /// Account that placed the booking. Immutable after creation.
    pub user_id: Uuid,
    /// Room being booked. Immutable after creation.
    pub room_id: Uuid,
    pub guest_name: String,
    pub guest_email: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_nights: i64,
    /// Snapshot of `total_nights * room.price` at creation time; never
    /// recomputed if the room price later changes.
    pub total_amount: Decimal,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Whether this booking blocks the room: status is confirmed or pending.
    pub fn is_active(&self) -> bool {
        matches!(self.status, BookingStatus::Confirmed | BookingStatus::Pending)
    }

    /// Closed-interval overlap test against a requested range.
    ///
    /// Two ranges conflict when `existing.check_in <= new.check_out` and
    /// `existing.check_out >= new.check_in`. Boundary-inclusive: a booking
    /// ending on the day another starts still conflicts.
    pub fn overlaps(&self, check_in: NaiveDate, check_out: NaiveDate) -> bool {
        self.check_in <= check_out && self.check_out >= check_in
    }

    /// Nights between check-in and check-out. At least 1 whenever
    /// `check_out > check_in` holds.
    pub fn nights(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
        (check_out - check_in).num_days()
    }
}

/// Guest-supplied fields for creating a booking.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub room_id: Uuid,
    pub guest_name: String,
    pub guest_email: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl BookingRequest {
    /// Field and date validation, steps 1–2 of booking creation.
    ///
    /// Check-in must be today or later (date-only comparison) and check-out
    /// strictly after check-in.
    pub fn validate(&self, today: NaiveDate) -> Result<(), Error> {
        if self.guest_name.trim().is_empty() || self.guest_email.trim().is_empty() {
            return Err(Error::Validation(
                "Please provide all required fields".into(),
            ));
        }
        if self.guest_name.len() > MAX_GUEST_NAME_LEN {
            return Err(Error::Validation(format!(
                "Guest name cannot exceed {MAX_GUEST_NAME_LEN} characters"
            )));
        }
        if !EMAIL_RE.is_match(&self.guest_email) {
            return Err(Error::Validation("Please enter a valid email".into()));
        }
        if self.check_in < today {
            return Err(Error::Validation(
                "Check-in date cannot be in the past".into(),
            ));
        }
        if self.check_out <= self.check_in {
            return Err(Error::Validation(
                "Check-out date must be after check-in date".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn request(check_in: NaiveDate, check_out: NaiveDate) -> BookingRequest {
        BookingRequest {
            room_id: Uuid::new_v4(),
            guest_name: "Ada Lovelace".into(),
            guest_email: "ada@example.com".into(),
            check_in,
            check_out,
        }
    }

    #[test]
    fn nights_counts_whole_days() {
        assert_eq!(Booking::nights(date(2030, 1, 10), date(2030, 1, 12)), 2);
        assert_eq!(Booking::nights(date(2030, 1, 10), date(2030, 1, 11)), 1);
        assert_eq!(Booking::nights(date(2030, 1, 31), date(2030, 2, 2)), 2);
    }

    #[test]
    fn email_format() {
        for good in ["a@b.co", "first.last@mail.example.com", "x_1@host.org"] {
            assert!(EMAIL_RE.is_match(good), "{good} should be accepted");
        }
        for bad in ["not-an-email", "a@b", "a b@c.com", "@host.com"] {
            assert!(!EMAIL_RE.is_match(bad), "{bad} should be rejected");
        }
    }

    #[test]
    fn checkout_must_follow_checkin() {
        let today = date(2025, 1, 1);
        let err = request(date(2025, 2, 10), date(2025, 2, 10))
            .validate(today)
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let err = request(date(2025, 2, 10), date(2025, 2, 9))
            .validate(today)
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn past_checkin_rejected_same_day_allowed() {
        let today = date(2025, 1, 10);
        assert!(request(date(2025, 1, 9), date(2025, 1, 12))
            .validate(today)
            .is_err());
        assert!(request(today, date(2025, 1, 12)).validate(today).is_ok());
    }

    #[test]
    fn blank_fields_rejected() {
        let mut req = request(date(2025, 2, 1), date(2025, 2, 3));
        req.guest_name = " ".into();
        assert!(req.validate(date(2025, 1, 1)).is_err());

        let mut req = request(date(2025, 2, 1), date(2025, 2, 3));
        req.guest_name = "g".repeat(MAX_GUEST_NAME_LEN + 1);
        assert!(req.validate(date(2025, 1, 1)).is_err());
    }

    #[test]
    fn overlap_rule_is_boundary_inclusive() {
        let booking = Booking {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            room_id: Uuid::new_v4(),
            guest_name: "A".into(),
            guest_email: "a@b.co".into(),
            check_in: date(2025, 1, 10),
            check_out: date(2025, 1, 15),
            total_nights: 5,
            total_amount: Decimal::from(500),
            status: BookingStatus::Confirmed,
            payment_status: PaymentStatus::Pending,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        // Plain overlap
        assert!(booking.overlaps(date(2025, 1, 14), date(2025, 1, 18)));
        // Back-to-back: existing check-out equals requested check-in
        assert!(booking.overlaps(date(2025, 1, 15), date(2025, 1, 18)));
        // Back-to-back the other way round
        assert!(booking.overlaps(date(2025, 1, 5), date(2025, 1, 10)));
        // Fully enclosing
        assert!(booking.overlaps(date(2025, 1, 1), date(2025, 1, 31)));
        // Clear of the range
        assert!(!booking.overlaps(date(2025, 1, 16), date(2025, 1, 20)));
        assert!(!booking.overlaps(date(2025, 1, 1), date(2025, 1, 9)));
    }
}
