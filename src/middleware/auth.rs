use axum::{
    extract::{FromRequestParts, MatchedPath, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use userhub_auth::{Claims, Role, verify_token};
use userhub_config::JwtConfig;
use userhub_core::AppError;

use crate::metrics::track_token_rejected;
use crate::state::AppState;

pub const NO_TOKEN: &str = "Unauthorized: No token provided";
pub const INVALID_TOKEN: &str = "Invalid or expired token";

/// Identity established by [`authenticate`] for the current request.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn username(&self) -> &str {
        self.0.username()
    }

    pub fn role(&self) -> Role {
        self.0.role
    }

    pub fn is_admin(&self) -> bool {
        self.0.role == Role::Admin
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized("Unauthorized"))
    }
}

/// Reads the bearer token from `headers` and verifies it.
///
/// - no header, an empty header, or an empty token after `Bearer ` is stripped: 401
/// - anything that fails verification, including a non-ASCII header value: 403
pub fn claims_from_headers(headers: &HeaderMap, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        track_token_rejected("missing");
        return Err(AppError::unauthorized(NO_TOKEN));
    };

    let Ok(raw) = value.to_str() else {
        track_token_rejected("malformed");
        return Err(AppError::forbidden(INVALID_TOKEN));
    };

    let token = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();
    if token.is_empty() {
        track_token_rejected("missing");
        return Err(AppError::unauthorized(NO_TOKEN));
    }

    verify_token(token, jwt_config).map_err(|reason| {
        debug!(reason = reason.as_str(), "Token rejected");
        track_token_rejected(reason.as_str());
        AppError::forbidden(INVALID_TOKEN)
    })
}

/// Establishes the caller's identity for routes that are not public.
///
/// Must run before [`authorize`](crate::middleware::role::authorize).
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    if state.access.lookup(req.method(), &path).is_public() {
        return Ok(next.run(req).await);
    }

    let claims = claims_from_headers(req.headers(), &state.jwt_config)?;
    req.extensions_mut().insert(AuthUser(claims));

    Ok(next.run(req).await)
}
