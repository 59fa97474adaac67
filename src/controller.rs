//! Booking lifecycle controller.
//!
//! Orchestrates booking creation across the room registry, the availability
//! checker, and the booking ledger, and delegates cancellation to the
//! ledger.
//!
//! Known weakness, kept deliberately: the availability check and the
//! booking insert are two separate store operations with no transaction
//! around them, so two concurrent requests for overlapping ranges on the
//! same room can both pass the check and both insert. Closing the window
//! needs either a store-level exclusion constraint on (room, range) or a
//! serializable transaction spanning the check and the writes.

use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::{Authenticator, Principal};
use crate::availability::AvailabilityChecker;
use crate::clock::Clock;
use crate::error::Error;
use crate::ledger::BookingLedger;
use crate::model::{Booking, BookingRequest, RoomStatus, RoomSummary, UserSummary};
use crate::registry::RoomRegistry;
use crate::store::Store;

/// Booking enriched with room and account summaries.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetails {
    #[serde(flatten)]
    pub booking: Booking,
    pub room: RoomSummary,
    /// Absent when the account can no longer be resolved.
    pub user: Option<UserSummary>,
}

#[derive(Clone)]
pub struct BookingController {
    store: Arc<dyn Store>,
    clock: Arc<dyn Clock>,
    registry: RoomRegistry,
    checker: AvailabilityChecker,
    ledger: BookingLedger,
}

impl BookingController {
    pub fn new(
        store: Arc<dyn Store>,
        clock: Arc<dyn Clock>,
        registry: RoomRegistry,
        checker: AvailabilityChecker,
        ledger: BookingLedger,
    ) -> Self {
        Self {
            store,
            clock,
            registry,
            checker,
            ledger,
        }
    }

    /// Create a booking for the authenticated caller.
    ///
    /// In order: validate the request fields and dates (`Validation`),
    /// load the room (`NotFound`), gate on the room-level status
    /// flag (`Conflict` unless `available`), check date-range overlap
    /// against active bookings (`Conflict`), record the booking, then flip
    /// the room status to `booked`. The flip is unconditional and not
    /// date-scoped, matching the ledger's historical behavior; see the
    /// availability checker for per-range bookability.
    pub fn create_booking(
        &self,
        requester: &Principal,
        request: &BookingRequest,
        auth: &dyn Authenticator,
    ) -> Result<BookingDetails, Error> {
        request.validate(self.clock.today())?;

        let room = self.registry.get_room(request.room_id)?;

        if room.status != RoomStatus::Available {
            return Err(Error::Conflict("Room is not available for booking".into()));
        }

        if self
            .checker
            .has_conflict(room.id, request.check_in, request.check_out)?
        {
            return Err(Error::Conflict(
                "Room is already booked for the selected dates".into(),
            ));
        }

        let booking = self.ledger.create_booking(&room, requester.user_id, request)?;

        // Room status flip is a second write; a failure here leaves the
        // booking recorded against an `available` room.
        let mut room = room;
        room.status = RoomStatus::Booked;
        self.store.save_room(&room)?;

        Ok(BookingDetails {
            room: room.summary(),
            user: auth.user_summary(booking.user_id),
            booking,
        })
    }

    /// Cancel a booking. Room status is not reverted; the room stays
    /// `booked` after cancellation.
    pub fn cancel_booking(
        &self,
        requester: &Principal,
        booking_id: Uuid,
    ) -> Result<Booking, Error> {
        self.ledger.cancel(booking_id, requester)
    }
}
