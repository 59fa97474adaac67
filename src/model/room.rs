//! Room entity and its creation/patch/filter shapes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;

/// Room numbers are short human-facing labels.
pub const MAX_NUMBER_LEN: usize = 10;
/// Free-text description limit.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Category of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomType {
    Single,
    Double,
    Suite,
}

/// Administrative status of a room.
///
/// `Booked` is set by the lifecycle controller when a booking is created and
/// is never reverted on cancellation; date-scoped availability is decided by
/// the availability checker, not this flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Available,
    Booked,
    Maintenance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: Uuid,
    pub number: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    /// Price per night, snapshotted into bookings at creation time.
    pub price: Decimal,
    pub status: RoomStatus,
    pub description: Option<String>,
    pub amenities: Vec<String>,
    pub max_guests: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Room {
    /// Condensed shape embedded in booking responses.
    pub fn summary(&self) -> RoomSummary {
        RoomSummary {
            id: self.id,
            number: self.number.clone(),
            room_type: self.room_type,
            price: self.price,
        }
    }
}

/// The `number type price` projection of a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    pub id: Uuid,
    pub number: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    pub price: Decimal,
}

/// Fields an admin supplies when creating a room.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRoom {
    pub number: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    pub price: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default = "default_max_guests")]
    pub max_guests: u32,
}

fn default_max_guests() -> u32 {
    1
}

/// Partial update for a room: one optional slot per mutable field.
///
/// Absent fields are left untouched; supplied fields go through the same
/// validation as creation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomPatch {
    pub number: Option<String>,
    #[serde(rename = "type")]
    pub room_type: Option<RoomType>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub amenities: Option<Vec<String>>,
    pub max_guests: Option<u32>,
}

impl RoomPatch {
    pub fn is_empty(&self) -> bool {
        self.number.is_none()
            && self.room_type.is_none()
            && self.price.is_none()
            && self.description.is_none()
            && self.amenities.is_none()
            && self.max_guests.is_none()
    }
}

/// Listing filter. `status` defaults to `available` when unspecified.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomFilter {
    #[serde(rename = "type")]
    pub room_type: Option<RoomType>,
    pub status: Option<RoomStatus>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

/// Validate a room number against length and emptiness limits.
pub(crate) fn validate_number(number: &str) -> Result<(), Error> {
    if number.trim().is_empty() {
        return Err(Error::Validation("Please enter room number".into()));
    }
    if number.len() > MAX_NUMBER_LEN {
        return Err(Error::Validation(format!(
            "Room number cannot exceed {MAX_NUMBER_LEN} characters"
        )));
    }
    Ok(())
}

pub(crate) fn validate_price(price: Decimal) -> Result<(), Error> {
    if price.is_sign_negative() {
        return Err(Error::Validation("Price cannot be negative".into()));
    }
    Ok(())
}

pub(crate) fn validate_description(description: &str) -> Result<(), Error> {
    if description.len() > MAX_DESCRIPTION_LEN {
        return Err(Error::Validation(format!(
            "Description cannot exceed {MAX_DESCRIPTION_LEN} characters"
        )));
    }
    Ok(())
}

pub(crate) fn validate_max_guests(max_guests: u32) -> Result<(), Error> {
    if max_guests < 1 {
        return Err(Error::Validation("Maximum guests must be at least 1".into()));
    }
    Ok(())
}
