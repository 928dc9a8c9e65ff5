//! Middleware for authentication and authorization.
//!
//! # Modules
//!
//! - [`access`]: the per-route access table consulted by both middlewares
//! - [`auth`]: bearer-token authentication and the [`AuthUser`](auth::AuthUser) extractor
//! - [`role`]: role checks against the route's allowed roles
//!
//! # Request Flow
//!
//! 1. [`auth::authenticate`] looks up the matched route; public routes pass straight through
//! 2. Otherwise the `Authorization` header is verified and `AuthUser` is stored on the request
//! 3. [`role::authorize`] rejects callers whose role the route does not admit
//! 4. Handlers take `AuthUser` as an argument to learn who is calling
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, middleware};
//!
//! let router = Router::new()
//!     .route("/api/users/current", get(get_current_user))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), authorize))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));
//! ```

pub mod access;
pub mod auth;
pub mod role;
