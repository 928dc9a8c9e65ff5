//! # userhub DB
//!
//! Account storage for the userhub API.
//!
//! The service layer talks to an [`AccountRepository`] and never to SQL directly.
//! Two implementations ship:
//!
//! - [`PgAccountRepository`]: PostgreSQL via SQLx, used in production
//! - [`InMemoryAccountRepository`]: a map behind a lock, used by tests and by
//!   `ACCOUNT_STORE=memory` for local runs
//!
//! # Example
//!
//! ```ignore
//! use userhub_db::{PgAccountRepository, connect, run_migrations};
//!
//! let pool = connect(&database_url).await?;
//! run_migrations(&pool).await?;
//! let accounts = PgAccountRepository::new(pool);
//! ```

pub mod memory;
pub mod postgres;
pub mod repository;

pub use memory::InMemoryAccountRepository;
pub use postgres::{PgAccountRepository, connect, run_migrations};
pub use repository::{AccountRepository, StoreError};

// Re-export PgPool for convenience
pub use sqlx::PgPool;
