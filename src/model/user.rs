//! Account summary attached to booking responses.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name and email of the account that placed a booking.
///
/// Resolved through the access-control capability; the booking itself only
/// stores the user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}
