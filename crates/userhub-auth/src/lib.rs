//! # userhub Auth
//!
//! Roles, token claims, and JWT utilities for the userhub API.
//!
//! - [`roles`]: the [`Role`] enumeration (`USER`, `ADMIN`)
//! - [`claims`]: the [`Claims`] payload carried by access tokens
//! - [`jwt`]: token issuance and verification
//!
//! Tokens are stateless: there is no server-side record of issued tokens, so a
//! token stays valid until it expires.

pub mod claims;
pub mod jwt;
pub mod roles;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{VerifyError, create_access_token, issue_token, verify_token};
pub use roles::{Role, UnknownRole};
