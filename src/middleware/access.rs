//! Per-route access declarations.
//!
//! The [`AccessTable`] is built once at startup and maps `(method, route pattern)` to a
//! [`RouteAccess`]. Route patterns are the strings axum reports through
//! [`MatchedPath`](axum::extract::MatchedPath), e.g. `/api/users/{username}`.
//!
//! A route that is not in the table requires authentication with no role
//! restriction, so forgetting to declare a new route never makes it public.

use std::collections::HashMap;

use axum::http::Method;
use userhub_auth::Role;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAccess {
    /// No token needed.
    Public,
    /// A valid token is needed. An empty list admits every role.
    Authenticated(Vec<Role>),
}

static REQUIRE_AUTHENTICATION: RouteAccess = RouteAccess::Authenticated(Vec::new());

impl RouteAccess {
    pub fn is_public(&self) -> bool {
        matches!(self, RouteAccess::Public)
    }

    /// Roles allowed through, empty for public routes and unrestricted ones.
    pub fn allowed_roles(&self) -> &[Role] {
        match self {
            RouteAccess::Public => &[],
            RouteAccess::Authenticated(roles) => roles,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AccessTable {
    routes: HashMap<(Method, String), RouteAccess>,
}

impl AccessTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn public(mut self, method: Method, path: &str) -> Self {
        self.routes
            .insert((method, path.to_string()), RouteAccess::Public);
        self
    }

    pub fn protected(mut self, method: Method, path: &str, roles: &[Role]) -> Self {
        self.routes.insert(
            (method, path.to_string()),
            RouteAccess::Authenticated(roles.to_vec()),
        );
        self
    }

    pub fn lookup(&self, method: &Method, path: &str) -> &RouteAccess {
        self.routes
            .get(&(method.clone(), path.to_string()))
            .unwrap_or(&REQUIRE_AUTHENTICATION)
    }

    /// Access rules for the account API.
    pub fn users() -> Self {
        Self::new()
            .public(Method::POST, "/api/users")
            .public(Method::POST, "/api/users/login")
            .protected(Method::GET, "/api/users/current", &Role::ALL)
            .protected(Method::PATCH, "/api/users/current", &Role::ALL)
            .protected(Method::DELETE, "/api/users/{username}", &[Role::Admin])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_users_table() {
        let table = AccessTable::users();

        assert!(table.lookup(&Method::POST, "/api/users").is_public());
        assert!(table.lookup(&Method::POST, "/api/users/login").is_public());
        assert_eq!(
            table.lookup(&Method::GET, "/api/users/current").allowed_roles(),
            &[Role::User, Role::Admin]
        );
        assert_eq!(
            table
                .lookup(&Method::DELETE, "/api/users/{username}")
                .allowed_roles(),
            &[Role::Admin]
        );
    }

    #[test]
    fn test_unknown_route_requires_authentication() {
        let table = AccessTable::users();

        let access = table.lookup(&Method::GET, "/api/users/{username}");
        assert!(!access.is_public());
        assert!(access.allowed_roles().is_empty());

        // Method is part of the key.
        assert!(!table.lookup(&Method::GET, "/api/users").is_public());
    }
}
