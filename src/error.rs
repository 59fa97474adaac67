//! Error types surfaced at the request boundary.
//!
//! Every public operation returns [`Error`]; the outer transport maps it to
//! a status code via [`Error::status_code`] and a structured body via
//! [`Error::to_body`]. No operation retries automatically.

use crate::store::StoreError;
use std::fmt;

/// Error taxonomy for the booking core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Missing or malformed input (400)
    Validation(String),
    /// Referenced entity absent (404)
    NotFound(String),
    /// Uniqueness violation, room unavailable, or date overlap (400)
    Conflict(String),
    /// Booking is in a state that does not permit the transition (400)
    InvalidState(String),
    /// Role or ownership violation (403)
    Forbidden(String),
    /// Missing or invalid credential (401)
    Unauthenticated(String),
    /// Durable store failure (500)
    Store(String),
}

impl Error {
    /// HTTP status code this error maps to at the boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Validation(_) | Error::Conflict(_) | Error::InvalidState(_) => 400,
            Error::NotFound(_) => 404,
            Error::Forbidden(_) => 403,
            Error::Unauthenticated(_) => 401,
            Error::Store(_) => 500,
        }
    }

    /// Structured error body for the response boundary.
    pub fn to_body(&self) -> serde_json::Value {
        serde_json::json!({
            "success": false,
            "message": self.to_string(),
        })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Validation(msg) => write!(f, "{msg}"),
            Error::NotFound(msg) => write!(f, "{msg}"),
            Error::Conflict(msg) => write!(f, "{msg}"),
            Error::InvalidState(msg) => write!(f, "{msg}"),
            Error::Forbidden(msg) => write!(f, "{msg}"),
            Error::Unauthenticated(msg) => write!(f, "{msg}"),
            Error::Store(msg) => write!(f, "Store error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Error::Store(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_taxonomy() {
        assert_eq!(Error::Validation("x".into()).status_code(), 400);
        assert_eq!(Error::Conflict("x".into()).status_code(), 400);
        assert_eq!(Error::InvalidState("x".into()).status_code(), 400);
        assert_eq!(Error::NotFound("x".into()).status_code(), 404);
        assert_eq!(Error::Forbidden("x".into()).status_code(), 403);
        assert_eq!(Error::Unauthenticated("x".into()).status_code(), 401);
        assert_eq!(Error::Store("x".into()).status_code(), 500);
    }

    #[test]
    fn body_carries_the_message() {
        let body = Error::NotFound("Room not found".into()).to_body();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Room not found");
    }
}
