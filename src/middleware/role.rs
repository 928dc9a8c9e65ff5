//! Role-based authorization.
//!
//! [`authorize`] is a route-layer middleware that looks up the matched route in the
//! [`AccessTable`](crate::middleware::access::AccessTable) and checks the identity left
//! by [`authenticate`](crate::middleware::auth::authenticate) against the route's
//! allowed roles. [`check_any_role`] and [`check_role`] are the same decision for
//! handlers that need it inline.

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use userhub_auth::Role;
use userhub_core::AppError;

use crate::metrics::track_authorization_check;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub const ACCESS_DENIED: &str = "Access denied";

/// Allows the request iff the route admits every role or the caller's role is listed.
pub async fn authorize(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    let access = state.access.lookup(req.method(), &path);
    if access.allowed_roles().is_empty() {
        return Ok(next.run(req).await);
    }

    let auth_user = req
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| AppError::unauthorized("Unauthorized"))?;

    check_any_role(auth_user, access.allowed_roles())?;

    Ok(next.run(req).await)
}

/// Check that the user holds `required_role`.
pub fn check_role(auth_user: &AuthUser, required_role: Role) -> Result<(), AppError> {
    check_any_role(auth_user, &[required_role])
}

/// Check that the user holds one of `allowed_roles`. An empty list allows everyone.
///
/// # Example
///
/// ```rust,ignore
/// pub async fn handler(auth_user: AuthUser) -> Result<Json<Response>, AppError> {
///     check_any_role(&auth_user, &[Role::Admin])?;
///     // ...
/// }
/// ```
pub fn check_any_role(auth_user: &AuthUser, allowed_roles: &[Role]) -> Result<(), AppError> {
    if allowed_roles.is_empty() {
        return Ok(());
    }

    let role = auth_user.role();
    let allowed = allowed_roles.contains(&role);
    track_authorization_check(allowed, role.as_str());

    if !allowed {
        debug!(username = %auth_user.username(), role = %role, "Role not allowed on route");
        return Err(AppError::forbidden(ACCESS_DENIED));
    }

    Ok(())
}
