// src/presentation/http/routes.rs
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{auth, certificates, orders, tags, users},
    openapi::{self, StatusResponse},
};
use axum::{
    Extension, Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring unparsable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600))
}

pub fn build_router(state: HttpState, allowed_origins: &[String]) -> Router {
    Router::new()
        .merge(openapi::docs_router())
        .route("/health", get(health))
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route(
            "/api/v1/certificates",
            get(certificates::search_certificates).post(certificates::create_certificate),
        )
        .route(
            "/api/v1/certificates/{id}",
            get(certificates::get_certificate)
                .patch(certificates::update_certificate)
                .delete(certificates::delete_certificate),
        )
        .route(
            "/api/v1/certificates/{id}/tags",
            get(certificates::certificate_tags),
        )
        .route(
            "/api/v1/certificates/{id}/orders",
            get(certificates::certificate_orders),
        )
        .route(
            "/api/v1/certificates/{id}/users",
            get(certificates::certificate_users),
        )
        .route("/api/v1/tags", get(tags::search_tags).post(tags::create_tag))
        .route("/api/v1/tags/most-used", get(tags::most_used_tags))
        .route(
            "/api/v1/tags/{id}",
            get(tags::get_tag).delete(tags::delete_tag),
        )
        .route("/api/v1/tags/{id}/certificates", get(tags::tag_certificates))
        .route(
            "/api/v1/orders",
            get(orders::search_orders).post(orders::create_order),
        )
        .route(
            "/api/v1/orders/{id}",
            get(orders::get_order).delete(orders::delete_order),
        )
        .route(
            "/api/v1/orders/{id}/certificates",
            get(orders::order_certificates),
        )
        .route("/api/v1/orders/{id}/user", get(orders::order_user))
        .route("/api/v1/users", get(users::search_users))
        .route("/api/v1/users/{id}", get(users::get_user))
        .route("/api/v1/users/{id}/orders", get(users::user_orders))
        .route(
            "/api/v1/users/{id}/certificates",
            get(users::user_certificates),
        )
        .route("/api/v1/users/{id}/admin", post(users::promote_user))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
        .layer(Extension(state))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = StatusResponse)
    ),
    security([]),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse {
        status: "ok".into(),
    })
}
