use crate::middleware::auth::AuthUser;
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::validator::ValidatedJson;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use userhub_core::{AppError, ErrorResponse};
use userhub_models::{
    LoginUserRequest, RegisterUserRequest, UpdateUserRequest, UserResponse, WebResponse,
};

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "Account created", body = WebResponse<UserResponse>),
        (status = 400, description = "Validation failed or username already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterUserRequest>,
) -> Result<(StatusCode, Json<WebResponse<UserResponse>>), AppError> {
    let user = UserService::register(state.accounts.as_ref(), &state.password_config, dto).await?;
    Ok((StatusCode::CREATED, Json(WebResponse::new(user))))
}

/// Log in with username and password
#[utoipa::path(
    post,
    path = "/api/users/login",
    request_body = LoginUserRequest,
    responses(
        (status = 201, description = "Logged in; response carries the access token", body = WebResponse<UserResponse>),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Username or password is invalid", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginUserRequest>,
) -> Result<(StatusCode, Json<WebResponse<UserResponse>>), AppError> {
    let user = UserService::login(
        state.accounts.as_ref(),
        &state.jwt_config,
        &state.password_config,
        dto,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(WebResponse::new(user))))
}

/// Get the current account
#[utoipa::path(
    get,
    path = "/api/users/current",
    responses(
        (status = 200, description = "Current account", body = WebResponse<UserResponse>),
        (status = 400, description = "Account no longer exists", body = ErrorResponse),
        (status = 401, description = "No token provided", body = ErrorResponse),
        (status = 403, description = "Invalid or expired token", body = ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
pub async fn get_current_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<WebResponse<UserResponse>>, AppError> {
    let user = UserService::get(state.accounts.as_ref(), &auth_user).await?;
    Ok(Json(WebResponse::new(user)))
}

/// Update the current account
///
/// Only the fields present in the body are changed.
#[utoipa::path(
    patch,
    path = "/api/users/current",
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Account updated", body = WebResponse<UserResponse>),
        (status = 400, description = "Validation failed or account no longer exists", body = ErrorResponse),
        (status = 401, description = "No token provided", body = ErrorResponse),
        (status = 403, description = "Invalid or expired token", body = ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
pub async fn update_current_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<WebResponse<UserResponse>>, AppError> {
    let user = UserService::update(
        state.accounts.as_ref(),
        &state.password_config,
        &auth_user,
        dto,
    )
    .await?;
    Ok(Json(WebResponse::new(user)))
}

/// Delete an account (ADMIN only)
#[utoipa::path(
    delete,
    path = "/api/users/{username}",
    params(
        ("username" = String, Path, description = "Username of the account to delete")
    ),
    responses(
        (status = 200, description = "Account deleted"),
        (status = 400, description = "Account not found", body = ErrorResponse),
        (status = 401, description = "No token provided", body = ErrorResponse),
        (status = 403, description = "Invalid token or caller is not an ADMIN", body = ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(username): Path<String>,
) -> Result<StatusCode, AppError> {
    UserService::delete(state.accounts.as_ref(), &auth_user, &username).await?;
    Ok(StatusCode::OK)
}
