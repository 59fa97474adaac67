//! # Innkeeper
//!
//! Hotel room booking core: room inventory, a booking ledger, and the
//! availability checking that keeps active bookings for a room from ever
//! overlapping.
//!
//! Persistence sits behind the [`Store`] trait (see [`store::memory`] for
//! the in-memory backend), authentication behind [`auth::Authenticator`],
//! and time behind [`clock::Clock`], so the core can be driven from any
//! outer transport.

pub mod api;
pub mod auth;
pub mod availability;
pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod ledger;
pub mod model;
pub mod registry;
pub mod store;

pub use api::Api;
pub use auth::{Authenticator, Principal, Role, TokenAuthenticator};
pub use availability::AvailabilityChecker;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::AppConfig;
pub use controller::{BookingController, BookingDetails};
pub use error::Error;
pub use ledger::BookingLedger;
pub use model::booking::{Booking, BookingRequest, BookingStatus, PaymentStatus};
pub use model::room::{NewRoom, Room, RoomFilter, RoomPatch, RoomStatus, RoomSummary, RoomType};
pub use model::user::UserSummary;
pub use registry::RoomRegistry;
pub use store::{memory::MemoryStore, Store, StoreError};
