//! Access-control capability consumed by the booking core.
//!
//! Token issuance and verification live outside this crate; what the core
//! consumes is `credential -> (user id, role)` plus an account lookup for
//! enriching booking responses. [`TokenAuthenticator`] is a static-token
//! implementation suitable for tests and single-node deployments.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::Error;
use crate::model::UserSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

/// Authenticated caller identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
    pub role: Role,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Gate an admin-only operation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Forbidden`] for non-admin callers.
    pub fn require_admin(&self) -> Result<(), Error> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(Error::Forbidden(
                "Access denied: Only admin can access this resource".into(),
            ))
        }
    }
}

/// Credential verification and account lookup.
pub trait Authenticator: Send + Sync {
    /// Resolve a request credential to a caller identity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthenticated`] when the credential is missing,
    /// unknown, or expired.
    fn authenticate(&self, credential: &str) -> Result<Principal, Error>;

    /// Account summary for response enrichment. `None` when the account is
    /// no longer resolvable.
    fn user_summary(&self, user_id: Uuid) -> Option<UserSummary>;
}

/// Static token registry: each token maps to one account.
#[derive(Default)]
pub struct TokenAuthenticator {
    tokens: HashMap<String, Principal>,
    accounts: HashMap<Uuid, UserSummary>,
}

impl TokenAuthenticator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account and the token that authenticates it. Returns the
    /// new principal.
    pub fn register(
        &mut self,
        token: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Principal {
        let user_id = Uuid::new_v4();
        let principal = Principal { user_id, role };
        self.tokens.insert(token.into(), principal);
        self.accounts.insert(
            user_id,
            UserSummary {
                id: user_id,
                name: name.into(),
                email: email.into(),
            },
        );
        principal
    }
}

impl Authenticator for TokenAuthenticator {
    fn authenticate(&self, credential: &str) -> Result<Principal, Error> {
        self.tokens.get(credential).copied().ok_or_else(|| {
            Error::Unauthenticated("Please login to access this resource".into())
        })
    }

    fn user_summary(&self, user_id: Uuid) -> Option<UserSummary> {
        self.accounts.get(&user_id).cloned()
    }
}
