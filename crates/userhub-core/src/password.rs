//! Password hashing backed by bcrypt.
//!
//! Hashes are salted and carry their own cost factor, so a hash produced with one
//! `BCRYPT_COST` still verifies after the cost is changed.

use bcrypt::{hash, verify};

use crate::errors::AppError;

/// Work factor used when none is configured.
pub const DEFAULT_COST: u32 = 10;

pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost)
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to hash password: {}", e)))
}

/// Returns `false` for a wrong password and for anything that is not a bcrypt hash.
pub fn verify_password(password: &str, hash: &str) -> bool {
    verify(password, hash).unwrap_or(false)
}
