//! # userhub CLI
//!
//! Administrative operations that cannot go through the HTTP API, most importantly
//! creating the first ADMIN account.
//!
//! ## Usage
//!
//! ```ignore
//! use userhub_cli::admin::{AdminInput, create_admin};
//!
//! let accounts = PgAccountRepository::new(pool);
//! create_admin(&accounts, input, 10).await?;
//! ```

pub mod admin;
