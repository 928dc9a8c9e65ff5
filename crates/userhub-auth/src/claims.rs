//! JWT claim structure for access tokens.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::roles::Role;

/// JWT claims for access tokens.
///
/// These claims are embedded in access tokens and carry everything the
/// authorization layer needs, so verifying a token never touches the database.
/// A role change therefore only takes effect for tokens issued afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Username (subject claim)
    pub sub: String,
    /// Display name at issuance time
    pub name: String,
    /// Email at issuance time
    pub email: String,
    pub role: Role,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

impl Claims {
    /// Claims issued now and expiring `ttl_seconds` later.
    pub fn new(
        username: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        ttl_seconds: i64,
    ) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: username.into(),
            name: name.into(),
            email: email.into(),
            role,
            exp: now.saturating_add(ttl_seconds).max(0) as usize,
            iat: now.max(0) as usize,
        }
    }

    pub fn username(&self) -> &str {
        &self.sub
    }
}
