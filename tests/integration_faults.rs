mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use serde_json::json;
use userhub::router::init_router;
use userhub::state::AppState;
use userhub_auth::{Role, create_access_token};
use userhub_config::{CorsConfig, JwtConfig, PasswordConfig};
use userhub_db::{AccountRepository, StoreError};
use userhub_models::{Account, AccountChanges, NewAccount};

use common::{TEST_COST, TEST_SECRET, TestApp};

/// Store whose every call fails the way a dropped database connection does.
struct UnavailableStore;

fn unavailable() -> StoreError {
    StoreError::Database(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl AccountRepository for UnavailableStore {
    async fn count_by_username(&self, _username: &str) -> Result<i64, StoreError> {
        Err(unavailable())
    }

    async fn find_by_username(&self, _username: &str) -> Result<Option<Account>, StoreError> {
        Err(unavailable())
    }

    async fn create(&self, _account: NewAccount) -> Result<Account, StoreError> {
        Err(unavailable())
    }

    async fn update(
        &self,
        _username: &str,
        _changes: AccountChanges,
    ) -> Result<Option<Account>, StoreError> {
        Err(unavailable())
    }

    async fn delete(&self, _username: &str) -> Result<bool, StoreError> {
        Err(unavailable())
    }
}

/// Store that panics on every call.
struct PanickingStore;

#[async_trait]
impl AccountRepository for PanickingStore {
    async fn count_by_username(&self, _username: &str) -> Result<i64, StoreError> {
        panic!("count_by_username exploded")
    }

    async fn find_by_username(&self, _username: &str) -> Result<Option<Account>, StoreError> {
        panic!("find_by_username exploded")
    }

    async fn create(&self, _account: NewAccount) -> Result<Account, StoreError> {
        panic!("create exploded")
    }

    async fn update(
        &self,
        _username: &str,
        _changes: AccountChanges,
    ) -> Result<Option<Account>, StoreError> {
        panic!("update exploded")
    }

    async fn delete(&self, _username: &str) -> Result<bool, StoreError> {
        panic!("delete exploded")
    }
}

fn app_with(accounts: Arc<dyn AccountRepository>) -> (TestApp, JwtConfig) {
    let jwt_config = JwtConfig::new(TEST_SECRET, 1800);
    let state = AppState::new(
        accounts,
        jwt_config.clone(),
        PasswordConfig { cost: TEST_COST },
        CorsConfig::default(),
    );

    let app = TestApp {
        router: init_router(state),
        accounts: Arc::default(),
        jwt_config: jwt_config.clone(),
    };
    (app, jwt_config)
}

fn bearer(jwt_config: &JwtConfig, role: Role) -> String {
    let token = create_access_token("test", "test", "test@gmail.com", role, jwt_config).unwrap();
    format!("Bearer {}", token)
}

fn assert_generic_500(status: StatusCode, body: &serde_json::Value) {
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, &json!({ "error": "Internal server error" }));
}

#[tokio::test]
async fn test_store_failure_on_register_is_generic_500() {
    let (app, _) = app_with(Arc::new(UnavailableStore));

    let (status, body) = app
        .send(
            "POST",
            "/api/users",
            None,
            Some(json!({
                "username": "test",
                "password": "test",
                "name": "test",
                "email": "test@gmail.com"
            })),
        )
        .await;

    assert_generic_500(status, &body);
}

#[tokio::test]
async fn test_store_failure_on_login_is_generic_500() {
    let (app, _) = app_with(Arc::new(UnavailableStore));

    let (status, body) = app
        .send(
            "POST",
            "/api/users/login",
            None,
            Some(json!({ "username": "test", "password": "test" })),
        )
        .await;

    assert_generic_500(status, &body);
    assert!(!body.to_string().contains("pool"));
}

#[tokio::test]
async fn test_store_failure_on_authenticated_routes_is_generic_500() {
    let (app, jwt_config) = app_with(Arc::new(UnavailableStore));
    let admin = bearer(&jwt_config, Role::Admin);

    for (method, uri, body) in [
        ("GET", "/api/users/current", None),
        ("PATCH", "/api/users/current", Some(json!({ "name": "x" }))),
        ("DELETE", "/api/users/someone", None),
    ] {
        let (status, body) = app.send(method, uri, Some(&admin), body).await;
        assert_generic_500(status, &body);
    }
}

#[tokio::test]
async fn test_panic_in_handler_is_generic_500() {
    let (app, jwt_config) = app_with(Arc::new(PanickingStore));

    let (status, body) = app
        .send(
            "POST",
            "/api/users/login",
            None,
            Some(json!({ "username": "test", "password": "test" })),
        )
        .await;
    assert_generic_500(status, &body);
    assert!(!body.to_string().contains("exploded"));

    let (status, body) = app
        .send(
            "GET",
            "/api/users/current",
            Some(&bearer(&jwt_config, Role::User)),
            None,
        )
        .await;
    assert_generic_500(status, &body);
}

#[tokio::test]
async fn test_rejections_happen_before_the_store() {
    let (app, _) = app_with(Arc::new(PanickingStore));

    let (status, _) = app.send("GET", "/api/users/current", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send(
            "POST",
            "/api/users",
            None,
            Some(json!({ "username": "", "password": "", "name": "", "email": "" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
