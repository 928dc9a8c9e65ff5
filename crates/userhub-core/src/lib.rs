//! # userhub Core
//!
//! Foundational types shared by every userhub crate:
//!
//! - [`errors`]: the [`AppError`] type and its HTTP response conversion
//! - [`password`]: bcrypt password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use userhub_core::{AppError, hash_password, verify_password};
//!
//! let hash = hash_password("secure_password", 10)?;
//! assert!(verify_password("secure_password", &hash));
//!
//! let error = AppError::bad_request(anyhow::anyhow!("User not found"));
//! ```

pub mod errors;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorResponse, FieldErrors};
pub use password::{DEFAULT_COST, hash_password, verify_password};
