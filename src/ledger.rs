//! Booking ledger: the system of record for bookings.
//!
//! Owns creation (validation, nights and amount derivation, price
//! snapshotting), user and admin listings, analytics, and the cancellation
//! rules. The ledger never touches room state; flipping a room to `booked`
//! is the lifecycle controller's job.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::Principal;
use crate::clock::Clock;
use crate::error::Error;
use crate::model::{Booking, BookingRequest, BookingStatus, PaymentStatus, Room};
use crate::store::Store;

/// Aggregates over the whole ledger, reported alongside the admin listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingAnalytics {
    pub total_bookings: u64,
    pub confirmed_bookings: u64,
    /// Sum of `total_amount` over confirmed bookings only.
    pub total_revenue: Decimal,
}

/// One page of the admin booking listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPage {
    pub bookings: Vec<Booking>,
    /// Count of the status-filtered set, not just this page.
    pub total: u64,
    pub analytics: BookingAnalytics,
}

#[derive(Clone)]
pub struct BookingLedger {
    store: Arc<dyn Store>,
    clock: Arc<dyn Clock>,
}

impl BookingLedger {
    pub fn new(store: Arc<dyn Store>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Record a booking for `room` with the price snapshotted now.
    ///
    /// Validates the request, derives `total_nights` and `total_amount`,
    /// and persists the booking as `confirmed`. Overlap checking happens
    /// upstream in the controller; the ledger assumes the range is free.
    pub fn create_booking(
        &self,
        room: &Room,
        user_id: Uuid,
        request: &BookingRequest,
    ) -> Result<Booking, Error> {
        request.validate(self.clock.today())?;

        let nights = Booking::nights(request.check_in, request.check_out);
        let amount = Decimal::from(nights) * room.price;

        let now = self.clock.now();
        let booking = Booking {
            id: Uuid::new_v4(),
            user_id,
            room_id: room.id,
            guest_name: request.guest_name.clone(),
            guest_email: request.guest_email.clone(),
            check_in: request.check_in,
            check_out: request.check_out,
            total_nights: nights,
            total_amount: amount,
            status: BookingStatus::Confirmed,
            payment_status: PaymentStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        self.store.insert_booking(booking.clone())?;
        log::info!(
            "booked room {} for {} nights ({} -> {}), amount {}",
            room.number,
            nights,
            request.check_in,
            request.check_out,
            amount
        );
        Ok(booking)
    }

    pub fn get_booking(&self, id: Uuid) -> Result<Booking, Error> {
        self.store
            .booking(id)?
            .ok_or_else(|| Error::NotFound("Booking not found".into()))
    }

    /// All bookings placed by a user, newest first.
    pub fn bookings_for_user(&self, user_id: Uuid) -> Result<Vec<Booking>, Error> {
        Ok(self.store.bookings_for_user(user_id)?)
    }

    /// One page of bookings plus ledger-wide analytics.
    ///
    /// `page` is 1-based. Analytics ignore the status filter: total count is
    /// over every booking, and revenue sums confirmed bookings only.
    pub fn list_all(
        &self,
        status: Option<BookingStatus>,
        page: u64,
        limit: u64,
    ) -> Result<BookingPage, Error> {
        let offset = page.saturating_sub(1) * limit;
        let bookings = self.store.bookings_page(status, offset, limit)?;
        let total = self.store.count_bookings(status)?;
        let analytics = self.analytics()?;
        Ok(BookingPage {
            bookings,
            total,
            analytics,
        })
    }

    pub fn analytics(&self) -> Result<BookingAnalytics, Error> {
        Ok(BookingAnalytics {
            total_bookings: self.store.count_bookings(None)?,
            confirmed_bookings: self.store.count_bookings(Some(BookingStatus::Confirmed))?,
            total_revenue: self.store.booking_revenue(BookingStatus::Confirmed)?,
        })
    }

    /// Cancel a booking on behalf of `requester`.
    ///
    /// Only the owning user or an admin may cancel. Cancellation is refused
    /// once the booking is cancelled or completed, and from the check-in day
    /// onward. No payment or room-state compensation is triggered.
    pub fn cancel(&self, booking_id: Uuid, requester: &Principal) -> Result<Booking, Error> {
        let mut booking = self.get_booking(booking_id)?;

        if !requester.is_admin() && booking.user_id != requester.user_id {
            return Err(Error::Forbidden(
                "You can only cancel your own bookings".into(),
            ));
        }
        if booking.status == BookingStatus::Cancelled {
            return Err(Error::InvalidState("Booking is already cancelled".into()));
        }
        if booking.status == BookingStatus::Completed {
            return Err(Error::InvalidState("Cannot cancel completed booking".into()));
        }
        if booking.check_in <= self.clock.today() {
            return Err(Error::InvalidState(
                "Cannot cancel booking after check-in date".into(),
            ));
        }

        booking.status = BookingStatus::Cancelled;
        booking.updated_at = self.clock.now();
        self.store.save_booking(&booking)?;
        log::info!("cancelled booking {booking_id}");
        Ok(booking)
    }
}

/// Split bookings into current (`check_out >= today`) and past stays.
pub fn partition_by_checkout(
    bookings: &[Booking],
    today: NaiveDate,
) -> (Vec<Booking>, Vec<Booking>) {
    bookings
        .iter()
        .cloned()
        .partition(|b| b.check_out >= today)
}
