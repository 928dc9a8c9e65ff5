use crate::middleware::auth::authenticate;
use crate::middleware::role::authorize;
use crate::modules::users::controller::{
    delete_user, get_current_user, login_user, register_user, update_current_user,
};
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

/// Account routes with their full paths, so the matched route pattern lines up with
/// the access table.
pub fn init_users_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/users", post(register_user))
        .route("/api/users/login", post(login_user))
        .route(
            "/api/users/current",
            get(get_current_user).patch(update_current_user),
        )
        .route("/api/users/{username}", delete(delete_user))
        .route_layer(middleware::from_fn_with_state(state.clone(), authorize))
        .route_layer(middleware::from_fn_with_state(state, authenticate))
}
