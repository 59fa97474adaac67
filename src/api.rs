//! Request boundary.
//!
//! One method per exposed operation. Each method authenticates the caller's
//! credential where the route requires it, applies the role gate, and
//! delegates to the owning component. Errors from anywhere below surface
//! here as [`Error`]; the transport maps them with [`Error::status_code`]
//! and [`Error::to_body`].
//!
//! | Operation | Auth |
//! |-----------|------|
//! | `create_room`, `update_room`, `delete_room`, `list_bookings` | admin |
//! | `create_booking`, `my_bookings`, `cancel_booking` | any authenticated user |
//! | `list_rooms`, `get_room` | public |

use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::Authenticator;
use crate::availability::AvailabilityChecker;
use crate::clock::Clock;
use crate::config::AppConfig;
use crate::controller::{BookingController, BookingDetails};
use crate::error::Error;
use crate::ledger::{partition_by_checkout, BookingLedger, BookingPage};
use crate::model::{Booking, BookingRequest, BookingStatus, NewRoom, Room, RoomFilter, RoomPatch};
use crate::registry::RoomRegistry;
use crate::store::Store;

/// Room listing response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomList {
    pub count: usize,
    pub rooms: Vec<Room>,
}

/// The caller's bookings, split by checkout date.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MyBookings {
    pub count: usize,
    pub current_bookings: Vec<Booking>,
    pub past_bookings: Vec<Booking>,
    pub all_bookings: Vec<Booking>,
}

/// The assembled booking core behind one typed surface.
pub struct Api {
    auth: Arc<dyn Authenticator>,
    clock: Arc<dyn Clock>,
    config: AppConfig,
    registry: RoomRegistry,
    checker: AvailabilityChecker,
    ledger: BookingLedger,
    controller: BookingController,
}

impl Api {
    pub fn new(
        store: Arc<dyn Store>,
        auth: Arc<dyn Authenticator>,
        clock: Arc<dyn Clock>,
        config: AppConfig,
    ) -> Self {
        let registry = RoomRegistry::new(store.clone(), clock.clone());
        let checker = AvailabilityChecker::new(store.clone());
        let ledger = BookingLedger::new(store.clone(), clock.clone());
        let controller = BookingController::new(
            store,
            clock.clone(),
            registry.clone(),
            checker.clone(),
            ledger.clone(),
        );
        Self {
            auth,
            clock,
            config,
            registry,
            checker,
            ledger,
            controller,
        }
    }

    // Rooms

    /// `POST /room/create` (admin)
    pub fn create_room(&self, credential: &str, new_room: NewRoom) -> Result<Room, Error> {
        let principal = self.auth.authenticate(credential)?;
        principal.require_admin()?;
        self.registry.create_room(new_room)
    }

    /// `PUT /room/update/:id` (admin)
    pub fn update_room(
        &self,
        credential: &str,
        id: Uuid,
        patch: RoomPatch,
    ) -> Result<Room, Error> {
        let principal = self.auth.authenticate(credential)?;
        principal.require_admin()?;
        self.registry.update_room(id, patch)
    }

    /// `DELETE /room/delete/:id` (admin)
    pub fn delete_room(&self, credential: &str, id: Uuid) -> Result<(), Error> {
        let principal = self.auth.authenticate(credential)?;
        principal.require_admin()?;
        self.registry.delete_room(id)
    }

    /// `GET /room/get` (public)
    ///
    /// With a complete `check_in`/`check_out` pair, rooms with a conflicting
    /// active booking are excluded regardless of their own status flag. The
    /// pair must be a valid range; a single end applies no date filtering.
    pub fn list_rooms(
        &self,
        filter: &RoomFilter,
        check_in: Option<NaiveDate>,
        check_out: Option<NaiveDate>,
    ) -> Result<RoomList, Error> {
        let rooms = self.registry.list_rooms(filter)?;
        let rooms = match (check_in, check_out) {
            (Some(check_in), Some(check_out)) => {
                if check_in >= check_out {
                    return Err(Error::Validation(
                        "Check-out date must be after check-in date".into(),
                    ));
                }
                self.checker.filter_available(rooms, check_in, check_out)?
            }
            _ => rooms,
        };
        Ok(RoomList {
            count: rooms.len(),
            rooms,
        })
    }

    /// `GET /room/get/:id` (public)
    pub fn get_room(&self, id: Uuid) -> Result<Room, Error> {
        self.registry.get_room(id)
    }

    // Bookings

    /// `POST /booking/create` (authenticated)
    pub fn create_booking(
        &self,
        credential: &str,
        request: &BookingRequest,
    ) -> Result<BookingDetails, Error> {
        let principal = self.auth.authenticate(credential)?;
        self.controller
            .create_booking(&principal, request, self.auth.as_ref())
    }

    /// `GET /booking/my-bookings` (authenticated)
    pub fn my_bookings(&self, credential: &str) -> Result<MyBookings, Error> {
        let principal = self.auth.authenticate(credential)?;
        let all = self.ledger.bookings_for_user(principal.user_id)?;
        let (current, past) = partition_by_checkout(&all, self.clock.today());
        Ok(MyBookings {
            count: all.len(),
            current_bookings: current,
            past_bookings: past,
            all_bookings: all,
        })
    }

    /// `GET /booking/get` (admin)
    ///
    /// `page` is 1-based and defaults to 1; `limit` defaults from
    /// configuration and is clamped to the configured maximum.
    pub fn list_bookings(
        &self,
        credential: &str,
        status: Option<BookingStatus>,
        page: Option<u64>,
        limit: Option<u64>,
    ) -> Result<BookingPage, Error> {
        let principal = self.auth.authenticate(credential)?;
        principal.require_admin()?;
        let page = page.unwrap_or(1).max(1);
        let limit = self.config.resolve_limit(limit);
        self.ledger.list_all(status, page, limit)
    }

    /// `POST /booking/cancel/:id` (authenticated)
    pub fn cancel_booking(&self, credential: &str, id: Uuid) -> Result<Booking, Error> {
        let principal = self.auth.authenticate(credential)?;
        self.controller.cancel_booking(&principal, id)
    }
}
