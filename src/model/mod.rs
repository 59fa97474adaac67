//! Domain entities and their wire shapes.

pub mod booking;
pub mod room;
pub mod user;

pub use booking::{Booking, BookingRequest, BookingStatus, PaymentStatus};
pub use room::{NewRoom, Room, RoomFilter, RoomPatch, RoomStatus, RoomSummary, RoomType};
pub use user::UserSummary;
