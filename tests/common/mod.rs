use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use userhub::router::init_router;
use userhub::state::AppState;
use userhub_auth::Role;
use userhub_config::{CorsConfig, JwtConfig, PasswordConfig};
use userhub_core::hash_password;
use userhub_db::{AccountRepository, InMemoryAccountRepository};
use userhub_models::NewAccount;

pub const TEST_SECRET: &str = "test-secret-key-at-least-32-characters-long";
pub const TEST_COST: u32 = 4;

pub struct TestApp {
    pub router: Router,
    pub accounts: Arc<InMemoryAccountRepository>,
    pub jwt_config: JwtConfig,
}

#[allow(dead_code)]
pub fn setup_test_app() -> TestApp {
    let accounts = Arc::new(InMemoryAccountRepository::new());
    let jwt_config = JwtConfig::new(TEST_SECRET, 1800);

    let state = AppState::new(
        accounts.clone(),
        jwt_config.clone(),
        PasswordConfig { cost: TEST_COST },
        CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
    );

    TestApp {
        router: init_router(state),
        accounts,
        jwt_config,
    }
}

impl TestApp {
    /// Sends a request and returns the status and the JSON body (`Value::Null` if empty).
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, token);
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, body)
    }

    /// Inserts an account directly into the store, bypassing registration.
    #[allow(dead_code)]
    pub async fn seed_account(&self, username: &str, password: &str, role: Role) {
        self.accounts
            .create(NewAccount {
                username: username.to_string(),
                password_hash: hash_password(password, TEST_COST).unwrap(),
                name: username.to_string(),
                email: format!("{}@test.com", username),
                role,
            })
            .await
            .unwrap();
    }

    /// Logs in and returns the `Bearer <token>` header value.
    #[allow(dead_code)]
    pub async fn login(&self, username: &str, password: &str) -> String {
        let (status, body) = self
            .send(
                "POST",
                "/api/users/login",
                None,
                Some(serde_json::json!({ "username": username, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "login failed: {}", body);

        format!("Bearer {}", body["data"]["token"].as_str().unwrap())
    }
}
