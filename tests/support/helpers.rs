// tests/support/helpers.rs
use std::str::FromStr;
use std::sync::Arc;

use axum::body::{self, Body};
use axum::http::{Request, StatusCode, header};
use bigdecimal::BigDecimal;
use serde_json::Value;
use tower::util::ServiceExt as _;

use certshop::application::dto::AuthenticatedUser;
use certshop::application::services::{ApplicationServices, Repositories};
use certshop::domain::certificate::Certificate;
use certshop::domain::tag::TagRepository;
use certshop::domain::user::{Role, User};
use certshop::presentation::http::{routes::build_router, state::HttpState};

use super::mocks::{
    ADMIN_EMAIL, CUSTOMER_EMAIL, FixedClock, InMemoryStore, PlainPasswordHasher,
    StaticTokenManager, fixed_now, plain_hash, principal,
};

pub fn dec(value: &str) -> BigDecimal {
    BigDecimal::from_str(value).unwrap()
}

/// Services wired to one in-memory store, with an admin and a customer
/// account already registered.
pub struct TestApp {
    pub store: Arc<InMemoryStore>,
    pub services: Arc<ApplicationServices>,
    pub admin_user: User,
    pub customer_user: User,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_tag_repository(|store| store as Arc<dyn TagRepository>)
    }

    /// Same wiring, but tag lookups go through the repository `wrap` builds
    /// around the store.
    pub fn with_tag_repository(
        wrap: impl FnOnce(Arc<InMemoryStore>) -> Arc<dyn TagRepository>,
    ) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let admin_user = store.seed_user("Ada", "Admin", ADMIN_EMAIL, &plain_hash("root1"));
        let customer_user = store.seed_user("Alice", "Smith", CUSTOMER_EMAIL, &plain_hash("secret1"));

        let repos = Repositories {
            certificate_read: store.clone(),
            certificate_write: store.clone(),
            tags: wrap(store.clone()),
            orders: store.clone(),
            users: store.clone(),
        };
        let token_manager = StaticTokenManager {
            admin_id: admin_user.id.0,
            customer_id: customer_user.id.0,
        };
        let services = Arc::new(ApplicationServices::new(
            repos,
            Arc::new(PlainPasswordHasher),
            Arc::new(token_manager),
            Arc::new(FixedClock),
        ));

        Self {
            store,
            services,
            admin_user,
            customer_user,
        }
    }

    pub fn admin(&self) -> AuthenticatedUser {
        principal(self.admin_user.id.0, ADMIN_EMAIL, Role::Admin)
    }

    pub fn customer(&self) -> AuthenticatedUser {
        principal(self.customer_user.id.0, CUSTOMER_EMAIL, Role::User)
    }

    pub fn certificate(&self, name: &str, price: &str, tags: &[&str]) -> Certificate {
        self.store.seed_certificate(
            name,
            &format!("{name} gift certificate"),
            dec(price),
            30,
            tags,
            fixed_now(),
        )
    }

    pub fn router(&self) -> axum::Router {
        let state = HttpState {
            services: Arc::clone(&self.services),
        };
        build_router(state, &["http://localhost:3000".to_string()])
    }
}

/// Sends the request through a fresh router and decodes the JSON body
/// (`Value::Null` when empty).
pub async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.router().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            panic!("non-JSON body: {}", String::from_utf8_lossy(&bytes))
        })
    };
    (status, json)
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, payload: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(payload.to_string())).unwrap()
}
