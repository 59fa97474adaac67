//! Durable store abstraction.
//!
//! The [`Store`] trait is the single persistence seam: components hold an
//! explicitly passed `Arc<dyn Store>` instead of a shared global connection,
//! and any backend that can answer these queries can sit behind it. The
//! in-memory backend lives in [`memory`].
//!
//! Each method is a single read or write against the backend; no method
//! spans a transaction. The lifecycle controller documents the consequences
//! for concurrent booking creation.

pub mod memory;

use rust_decimal::Decimal;
use std::fmt;
use uuid::Uuid;

use crate::model::{Booking, BookingStatus, Room, RoomFilter};

pub use memory::MemoryStore;

/// Store failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// UPDATE/DELETE matched no record
    RecordNotFound,
    /// Backend failure (connection, lock, corruption)
    Backend(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::RecordNotFound => write!(f, "Record not found (no rows affected)"),
            StoreError::Backend(msg) => write!(f, "Backend error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Persistence operations the booking core relies on.
///
/// Listing methods return records newest-created first.
pub trait Store: Send + Sync {
    // Rooms

    fn insert_room(&self, room: Room) -> Result<(), StoreError>;

    fn room(&self, id: Uuid) -> Result<Option<Room>, StoreError>;

    /// Lookup by the unique human-facing room number.
    fn room_by_number(&self, number: &str) -> Result<Option<Room>, StoreError>;

    /// Replace an existing room record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::RecordNotFound`] if no room has this id.
    fn save_room(&self, room: &Room) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError::RecordNotFound`] if no room has this id.
    fn remove_room(&self, id: Uuid) -> Result<(), StoreError>;

    /// Rooms matching the filter, newest first. Date-range availability is
    /// not the store's concern; callers layer the availability checker on
    /// top.
    fn rooms(&self, filter: &RoomFilter) -> Result<Vec<Room>, StoreError>;

    // Bookings

    fn insert_booking(&self, booking: Booking) -> Result<(), StoreError>;

    fn booking(&self, id: Uuid) -> Result<Option<Booking>, StoreError>;

    /// Replace an existing booking record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::RecordNotFound`] if no booking has this id.
    fn save_booking(&self, booking: &Booking) -> Result<(), StoreError>;

    /// All bookings placed by a user, newest first.
    fn bookings_for_user(&self, user_id: Uuid) -> Result<Vec<Booking>, StoreError>;

    /// All bookings referencing a room, any status, newest first.
    fn bookings_for_room(&self, room_id: Uuid) -> Result<Vec<Booking>, StoreError>;

    /// One page of bookings, optionally status-filtered, newest first.
    fn bookings_page(
        &self,
        status: Option<BookingStatus>,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Booking>, StoreError>;

    /// Count of bookings, optionally status-filtered.
    fn count_bookings(&self, status: Option<BookingStatus>) -> Result<u64, StoreError>;

    /// Sum of `total_amount` over bookings with the given status.
    fn booking_revenue(&self, status: BookingStatus) -> Result<Decimal, StoreError>;
}
