#![allow(clippy::unused_async, clippy::expect_used, dead_code)]
//! Test helpers for integration tests.
//!
//! Provides utilities for:
//! - Creating a test Salvo service backed by a fresh in-memory store
//! - Making HTTP requests
//! - Asserting on responses and store state
//!
//! ## Isolation
//! Each test gets its own `MemoryStore`, so tests run in parallel without
//! contention. The store handle is returned alongside the service for tests
//! that want to seed or inspect documents directly.

use salvo::http::header::HeaderName;
use salvo::http::{Method, ReqBody, StatusCode};
use salvo::prelude::*;
use salvo::test::{RequestBuilder, ResponseExt, TestClient};

use minyan_test::component::config::{
    ConfigHandler, LoggingConfig, MessagingConfig, ServerConfig, Settings,
};
use minyan_test::component::store::memory::MemoryStore;
use minyan_test::app::gateway_handler::{GatewayHandler, Gateways};
use minyan_test::app::store_handler::StoreHandler;

pub use tracing;

/// Configuration used by every test service. No gateways are configured, so
/// broadcast fan-out is a no-op in tests.
#[must_use]
pub fn test_config() -> Settings {
    Settings {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5800,
            serve_origin: None,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
        },
        messaging: MessagingConfig {
            push_gateway_url: None,
            whatsapp_gateway_url: None,
            whatsapp_from: None,
            whatsapp_token: None,
        },
    }
}

/// Creates a test Salvo service backed by a fresh in-memory store.
///
/// ## Summary
/// Returns the service plus the store it wraps, matching the handler setup
/// in `main.rs`. Tests seed and inspect documents through the returned store.
#[must_use]
pub fn create_test_service() -> (Service, MemoryStore) {
    let store = MemoryStore::new();

    let router = Router::new()
        .hoop(StoreHandler {
            store: store.clone(),
        })
        .hoop(ConfigHandler {
            settings: test_config(),
        })
        .hoop(GatewayHandler {
            gateways: Gateways {
                push: None,
                whatsapp: None,
            },
        })
        .push(minyan_test::app::api::routes());

    (Service::new(router), store)
}

/// Test request builder for constructing HTTP requests.
pub struct TestRequest {
    method: Method,
    path: String,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl TestRequest {
    /// Creates a new test request with the given method and path.
    #[must_use]
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            headers: Vec::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn get(path: &str) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: &str) -> Self {
        Self::new(Method::POST, path)
    }

    #[must_use]
    pub fn put(path: &str) -> Self {
        Self::new(Method::PUT, path)
    }

    #[must_use]
    pub fn delete(path: &str) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Adds a header to the request.
    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Sets a JSON request body.
    ///
    /// ## Panics
    /// Panics if the value cannot be serialized.
    #[must_use]
    pub fn json_body(mut self, value: &serde_json::Value) -> Self {
        self.headers.push((
            "content-type".to_string(),
            "application/json; charset=utf-8".to_string(),
        ));
        self.body = Some(
            serde_json::to_vec(value).expect("JSON body should serialize"),
        );
        self
    }

    /// Sends the request to the test service and returns the response.
    ///
    /// ## Panics
    /// Panics if the request cannot be sent or the response cannot be read.
    pub async fn send(self, service: &Service) -> TestResponse {
        let url = format!("http://127.0.0.1:5800{}", self.path);

        let mut client = match self.method.as_str() {
            "GET" => TestClient::get(&url),
            "PUT" => TestClient::put(&url),
            "POST" => TestClient::post(&url),
            "DELETE" => TestClient::delete(&url),
            _ => RequestBuilder::new(&url, self.method.clone()),
        };

        for (name, value) in self.headers {
            if let Ok(header_name) = HeaderName::try_from(name.as_str()) {
                client = client.add_header(header_name, value, true);
            }
        }

        if let Some(body_bytes) = self.body {
            client = client.body(ReqBody::Once(body_bytes.into()));
        }

        let mut response = client.send(service).await;

        let status = response
            .status_code
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = response.take_string().await.unwrap_or_default();

        TestResponse { status, body }
    }
}

/// Captured response from the test service.
pub struct TestResponse {
    pub status: StatusCode,
    pub body: String,
}

impl TestResponse {
    /// Parses the response body as JSON.
    ///
    /// ## Panics
    /// Panics if the body is not valid JSON.
    #[must_use]
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("Response body should be JSON")
    }

    /// Asserts the response status.
    ///
    /// ## Panics
    /// Panics on a status mismatch, printing the body for context.
    pub fn assert_status(&self, expected: StatusCode) {
        assert_eq!(
            self.status, expected,
            "Unexpected status; response body: {}",
            self.body
        );
    }
}

/// Seeds a user document directly in the store.
///
/// ## Panics
/// Panics if the write fails.
pub async fn seed_user(store: &MemoryStore, user_id: &str, name: &str) {
    use minyan_test::component::model::user::{COLLECTION, NotificationPreferences, User};
    use minyan_test::component::store::DocumentStore;
    use minyan_test::component::types::UserRole;

    let member = User {
        email: format!("{user_id}@example.com"),
        name: name.to_string(),
        phone: None,
        building_ids: vec![],
        role: UserRole::Member,
        notification_preferences: NotificationPreferences::default(),
        push_token: None,
        whatsapp_opt_in: false,
        preferred_prayers: vec![],
        preferred_nusach: None,
        created_at: 0,
        updated_at: 0,
    };
    store
        .set(
            COLLECTION,
            user_id,
            serde_json::to_value(&member).expect("user should encode"),
        )
        .await
        .expect("user seed should persist");
}

/// Seeds a building over HTTP, returning (building_id, invite_code).
///
/// ## Panics
/// Panics if the create request fails.
pub async fn seed_building(service: &Service, name: &str) -> (String, String) {
    let response = TestRequest::post("/api/app/buildings")
        .json_body(&serde_json::json!({
            "name": name,
            "address": "1 Main St",
            "adminUserId": "admin-1",
        }))
        .send(service)
        .await;
    response.assert_status(StatusCode::CREATED);
    let body = response.json();
    (
        body["buildingId"]
            .as_str()
            .expect("buildingId should be a string")
            .to_string(),
        body["inviteCode"]
            .as_str()
            .expect("inviteCode should be a string")
            .to_string(),
    )
}

/// Seeds a single event over HTTP, returning its id.
///
/// ## Panics
/// Panics if the create request fails.
pub async fn seed_event(service: &Service, building_id: &str, date: &str) -> String {
    let response = TestRequest::post("/api/app/events")
        .json_body(&serde_json::json!({
            "buildingId": building_id,
            "date": date,
            "time": "07:00",
            "prayerType": "Shacharis",
            "nusach": "Ashkenaz",
            "location": "Main sanctuary",
            "createdBy": "admin-1",
        }))
        .send(service)
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json()["eventId"]
        .as_str()
        .expect("eventId should be a string")
        .to_string()
}
