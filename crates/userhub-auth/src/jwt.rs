//! JWT (JSON Web Token) utilities for authentication.
//!
//! Access tokens are HS256-signed JWTs carrying [`Claims`]. Verification checks the
//! signature against the configured secret and the expiry against the current time
//! with no leeway.
//!
//! # Example
//!
//! ```ignore
//! use userhub_auth::{Role, create_access_token, verify_token};
//! use userhub_config::JwtConfig;
//!
//! let config = JwtConfig::from_env()?;
//!
//! let token = create_access_token("test", "Test", "test@gmail.com", Role::User, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.username(), "test");
//! ```

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use userhub_config::JwtConfig;
use userhub_core::AppError;

use crate::claims::Claims;
use crate::roles::Role;

/// Why a token was rejected.
///
/// Only used for logs, metrics, and tests. Clients always see the same
/// "invalid or expired token" response whatever the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error("token is malformed")]
    Malformed,
    #[error("token signature does not match")]
    BadSignature,
    #[error("token has expired")]
    Expired,
}

impl VerifyError {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerifyError::Malformed => "malformed",
            VerifyError::BadSignature => "bad_signature",
            VerifyError::Expired => "expired",
        }
    }
}

impl From<jsonwebtoken::errors::Error> for VerifyError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => VerifyError::Expired,
            ErrorKind::InvalidSignature => VerifyError::BadSignature,
            _ => VerifyError::Malformed,
        }
    }
}

/// Signs `claims` with `secret`.
pub fn issue_token(claims: &Claims, secret: &str) -> Result<String, AppError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

/// Creates an access token for an account, valid for the configured lifetime.
///
/// # Errors
///
/// Returns an internal error if token encoding fails.
pub fn create_access_token(
    username: &str,
    name: &str,
    email: &str,
    role: Role,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let claims = Claims::new(username, name, email, role, jwt_config.access_token_expiry);
    issue_token(&claims, &jwt_config.secret)
}

/// Verifies an access token and returns the embedded claims.
///
/// # Errors
///
/// - [`VerifyError::Malformed`] if the string is not a decodable HS256 JWT
/// - [`VerifyError::BadSignature`] if it was signed with another secret or altered
/// - [`VerifyError::Expired`] if the signature is valid but `exp` has passed
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, VerifyError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(VerifyError::from)
}
