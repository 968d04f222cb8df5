// Common test utilities
//
// Tests drive the real router over fresh in-memory stores seeded with the
// demo fixture, so every request exercises the full middleware stack.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use server_core::seed::{seed_demo_data, SeedIds};
use server_core::server::{build_app, AppState};
use server_core::Config;

pub const DEMO_PASSWORD: &str = "password123";

/// A fully wired application over seeded in-memory stores.
pub struct TestApp {
    pub router: Router,
    pub ids: SeedIds,
}

pub async fn spawn_app() -> TestApp {
    let config = test_config();
    let state = AppState::new(&config);
    let ids = seed_demo_data(state.directory.as_ref(), state.ledger.as_ref(), &state.users)
        .await
        .expect("seeding demo data into empty stores");
    let router = build_app(state, &config.allowed_origins);

    TestApp { router, ids }
}

fn test_config() -> Config {
    Config {
        port: 0,
        jwt_secret: "test_secret_key".to_string(),
        jwt_issuer: "test_issuer".to_string(),
        allowed_origins: vec!["*".to_string()],
        seed_demo_data: true,
    }
}

impl TestApp {
    /// Send one request through the router and return the raw response.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(value) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request construction");

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router never fails")
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Response {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> Response {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: Option<&str>, body: Value) -> Response {
        self.request(Method::PATCH, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> Response {
        self.request(Method::DELETE, uri, token, None).await
    }

    /// Log in as a demo account and return its bearer token.
    pub async fn login(&self, email: &str) -> String {
        let response = self
            .post(
                "/api/auth/login",
                None,
                json!({ "email": email, "password": DEMO_PASSWORD }),
            )
            .await;
        assert_eq!(
            response.status(),
            StatusCode::OK,
            "demo login should succeed for {email}"
        );

        let body = read_json(response).await;
        body["token"]
            .as_str()
            .expect("login response carries a token")
            .to_string()
    }
}

/// Drain a response body and parse it as JSON.
pub async fn read_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body collects");
    serde_json::from_slice(&bytes).expect("body is JSON")
}

/// The `error.code` discriminator of an error response body.
pub async fn error_code(response: Response) -> String {
    let body = read_json(response).await;
    body["error"]["code"]
        .as_str()
        .expect("error body carries a code")
        .to_string()
}
