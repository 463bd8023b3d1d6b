#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::test::{self, TestRequest};
use actix_web::{App, Error};
use async_trait::async_trait;
use serde_json::{json, Value};

use blog_service::db::{MemoryPostStore, MemoryUserStore};
use blog_service::media::{ImageHost, ImageHostError, ImageRef};
use blog_service::routes;
use blog_service::security::password::PasswordPolicy;
use blog_service::AppState;
use token_core::TokenService;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Image host double: returns a deterministic URL and can be switched into
/// failure mode.
pub struct StubImageHost {
    pub fail: AtomicBool,
}

impl StubImageHost {
    pub fn new() -> Self {
        Self {
            fail: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl ImageHost for StubImageHost {
    async fn upload(&self, file_name: &str, _bytes: Vec<u8>) -> Result<ImageRef, ImageHostError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ImageHostError::Rejected("stub failure".to_string()));
        }
        Ok(ImageRef {
            url: format!("https://img.test/{file_name}"),
        })
    }
}

pub fn test_state() -> AppState {
    AppState {
        users: Arc::new(MemoryUserStore::new()),
        posts: Arc::new(MemoryPostStore::new()),
        images: Arc::new(StubImageHost::new()),
        tokens: Arc::new(TokenService::new(TEST_SECRET, 3600)),
        policy: PasswordPolicy { min_length: 8 },
    }
}

pub async fn init_app(
    state: AppState,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
    test::init_service(App::new().configure(routes::configure(state))).await
}

/// Fire a request, optionally with a bearer token, and return status plus
/// parsed JSON body (null for empty bodies).
pub async fn api<S>(app: &S, req: TestRequest, token: Option<&str>) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = match token {
        Some(token) => req.insert_header((header::AUTHORIZATION, format!("Bearer {token}"))),
        None => req,
    };

    let resp = test::call_service(app, req.to_request()).await;
    let status = resp.status();
    let bytes = test::read_body(resp).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, body)
}

pub async fn register<S>(
    app: &S,
    username: &str,
    email: &str,
    password: &str,
) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    api(
        app,
        TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(json!({
                "username": username,
                "email": email,
                "password": password,
            })),
        None,
    )
    .await
}

pub async fn login<S>(app: &S, identifier: &str, password: &str) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    api(
        app,
        TestRequest::post().uri("/api/v1/auth/login").set_json(json!({
            "identifier": identifier,
            "password": password,
        })),
        None,
    )
    .await
}

/// Register + login in one go; returns (user id, token).
pub async fn signed_up_user<S>(
    app: &S,
    username: &str,
    email: &str,
    password: &str,
) -> (String, String)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let (status, body) = register(app, username, email, password).await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    let user_id = body["id"].as_str().unwrap().to_string();

    let (status, body) = login(app, username, password).await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    let token = body["access_token"].as_str().unwrap().to_string();

    (user_id, token)
}
