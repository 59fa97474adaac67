//! Date-range availability checking.
//!
//! A room is unavailable for a requested range when any of its active
//! (confirmed or pending) bookings overlaps it under the closed-interval
//! rule: `existing.check_in <= requested.check_out` and
//! `existing.check_out >= requested.check_in`. The rule is
//! boundary-inclusive, so back-to-back stays sharing a date conflict.
//! Cancelled and completed bookings never block a room.

use chrono::NaiveDate;
use std::sync::Arc;

use crate::error::Error;
use crate::model::Room;
use crate::store::Store;

#[derive(Clone)]
pub struct AvailabilityChecker {
    store: Arc<dyn Store>,
}

impl AvailabilityChecker {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Whether any active booking for the room overlaps the requested range.
    pub fn has_conflict(
        &self,
        room_id: uuid::Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<bool, Error> {
        let bookings = self.store.bookings_for_room(room_id)?;
        Ok(bookings
            .iter()
            .any(|b| b.is_active() && b.overlaps(check_in, check_out)))
    }

    /// Drop rooms that have a conflicting active booking for the range.
    ///
    /// Used by the available-rooms listing; the room's own `status` field is
    /// deliberately not consulted here.
    pub fn filter_available(
        &self,
        rooms: Vec<Room>,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Vec<Room>, Error> {
        let mut free = Vec::with_capacity(rooms.len());
        for room in rooms {
            if !self.has_conflict(room.id, check_in, check_out)? {
                free.push(room);
            }
        }
        Ok(free)
    }
}
