//! # userhub Models
//!
//! Domain models and DTOs for the userhub API.
//!
//! - [`users`]: the persisted [`Account`], store-level inputs ([`NewAccount`],
//!   [`AccountChanges`]), request DTOs with their validation rules, and response views
//!
//! Role and claims types live in `userhub-auth` and are re-exported here.

pub mod users;

pub use userhub_auth::{Claims, Role};

// Re-export commonly used types at crate root for convenience
pub use users::{
    Account, AccountChanges, LoginUserRequest, NewAccount, RegisterUserRequest,
    UpdateUserRequest, UserResponse, WebResponse, is_reserved_username,
};
