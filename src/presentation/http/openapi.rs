// src/presentation/http/openapi.rs
use crate::application::dto::{AuthTokenDto, CertificateDto, OrderDto, TagDto, UserDto};
use crate::presentation::http::controllers::{auth, certificates, orders, tags};
use crate::presentation::http::error::{ErrorResponse, FieldError};
use axum::{Router, response::Redirect, routing::get};
use serde::{Deserialize, Serialize};
use utoipa::openapi::{
    Components,
    security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa::{Modify, OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        super::routes::health,
        crate::presentation::http::controllers::auth::register,
        crate::presentation::http::controllers::auth::login,
        crate::presentation::http::controllers::certificates::search_certificates,
        crate::presentation::http::controllers::certificates::get_certificate,
        crate::presentation::http::controllers::certificates::create_certificate,
        crate::presentation::http::controllers::certificates::update_certificate,
        crate::presentation::http::controllers::certificates::delete_certificate,
        crate::presentation::http::controllers::tags::search_tags,
        crate::presentation::http::controllers::tags::most_used_tags,
        crate::presentation::http::controllers::tags::get_tag,
        crate::presentation::http::controllers::tags::create_tag,
        crate::presentation::http::controllers::tags::delete_tag,
        crate::presentation::http::controllers::orders::search_orders,
        crate::presentation::http::controllers::orders::get_order,
        crate::presentation::http::controllers::orders::create_order,
        crate::presentation::http::controllers::orders::delete_order,
        crate::presentation::http::controllers::users::search_users,
        crate::presentation::http::controllers::users::get_user,
        crate::presentation::http::controllers::users::promote_user
    ),
    components(
        schemas(
            StatusResponse,
            ErrorResponse,
            FieldError,
            CertificateDto,
            TagDto,
            OrderDto,
            UserDto,
            AuthTokenDto,
            auth::RegisterRequest,
            auth::LoginRequest,
            auth::LoginResponse,
            certificates::CertificateRequest,
            certificates::TagRequest,
            tags::CreateTagRequest,
            orders::CreateOrderRequest
        )
    ),
    tags(
        (name = "Auth", description = "Registration and login"),
        (name = "Certificates", description = "Gift-certificate catalog"),
        (name = "Tags", description = "Certificate tags"),
        (name = "Orders", description = "Certificate purchases"),
        (name = "Users", description = "Customer accounts"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&BearerAuth),
    info(
        title = "certshop API",
        description = "Gift-certificate catalog backend",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::default);
        let mut http = Http::new(HttpAuthScheme::Bearer);
        http.bearer_format = Some("Biscuit".into());
        components.add_security_scheme("bearerAuth", SecurityScheme::Http(http));
    }
}

pub fn docs_router() -> Router {
    let swagger = SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi());
    Router::new()
        .merge(swagger)
        .route("/", get(|| async { Redirect::permanent("/docs") }))
}
