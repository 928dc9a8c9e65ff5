use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use userhub_auth::Role;
use userhub_core::ErrorResponse;
use userhub_models::{LoginUserRequest, RegisterUserRequest, UpdateUserRequest, UserResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::users::controller::register_user,
        crate::modules::users::controller::login_user,
        crate::modules::users::controller::get_current_user,
        crate::modules::users::controller::update_current_user,
        crate::modules::users::controller::delete_user,
    ),
    components(
        schemas(
            Role,
            RegisterUserRequest,
            LoginUserRequest,
            UpdateUserRequest,
            UserResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "Registration, login, and account management")
    ),
    info(
        title = "userhub API",
        version = "0.1.0",
        description = "User account service with JWT bearer authentication and role-based access control.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
