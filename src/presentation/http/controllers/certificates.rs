// src/presentation/http/controllers/certificates.rs
use crate::application::{
    commands::certificates::{
        CreateCertificateCommand, DeleteCertificateCommand, UpdateCertificateCommand,
    },
    dto::{CertificateDto, OrderDto, Page, TagDto, UserDto},
    queries::certificates::{GetCertificateByIdQuery, SearchCertificatesQuery},
};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::params::QueryParams;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::Path,
    http::StatusCode,
};
use bigdecimal::BigDecimal;
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TagRequest {
    pub name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CertificateRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>, example = "49.90")]
    pub price: Option<BigDecimal>,
    pub duration: Option<i32>,
    #[serde(default)]
    pub tags: Vec<TagRequest>,
}

impl CertificateRequest {
    fn tag_names(tags: Vec<TagRequest>) -> Vec<String> {
        tags.into_iter().map(|tag| tag.name).collect()
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/certificates",
    params(
        ("name" = Option<String>, Query, description = "Substring of the name"),
        ("description" = Option<String>, Query, description = "Substring of the description"),
        ("tags" = Option<String>, Query, description = "Tag names separated by \", \"; all must match"),
        ("partOfWord" = Option<String>, Query, description = "Substring of name or description"),
        ("userId" = Option<i64>, Query, description = "Certificates bought by this user"),
        ("sort" = Option<String>, Query, description = "e.g. \"price desc, name asc\""),
        ("page" = Option<i64>, Query),
        ("limit" = Option<i64>, Query)
    ),
    responses(
        (status = 200, description = "Matching certificates.", body = Page<CertificateDto>),
        (status = 400, description = "Invalid parameter or page.", body = ErrorResponse)
    ),
    security([]),
    tag = "Certificates"
)]
pub async fn search_certificates(
    Extension(state): Extension<HttpState>,
    params: QueryParams,
) -> HttpResult<Json<Page<CertificateDto>>> {
    let query = SearchCertificatesQuery {
        name: params.text("name"),
        description: params.text("description"),
        tags: params.text("tags"),
        part_of_word: params.text("partOfWord"),
        user_id: params.int("userId").into_http()?,
        sort: params.text("sort"),
        page: params.page().into_http()?,
    };

    state
        .services
        .certificate_queries
        .search_certificates(query)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/certificates/{id}",
    params(("id" = i64, Path)),
    responses(
        (status = 200, description = "The certificate.", body = CertificateDto),
        (status = 400, description = "Non-positive id.", body = ErrorResponse),
        (status = 404, description = "Unknown certificate.", body = ErrorResponse)
    ),
    security([]),
    tag = "Certificates"
)]
pub async fn get_certificate(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<CertificateDto>> {
    state
        .services
        .certificate_queries
        .get_certificate_by_id(GetCertificateByIdQuery { id })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/certificates",
    request_body = CertificateRequest,
    responses(
        (status = 201, description = "Certificate created.", body = CertificateDto),
        (status = 400, description = "Invalid fields.", body = ErrorResponse),
        (status = 401, description = "Unauthorized.", body = ErrorResponse),
        (status = 403, description = "Admins only.", body = ErrorResponse),
        (status = 409, description = "Same name and description exist.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Certificates"
)]
pub async fn create_certificate(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<CertificateRequest>,
) -> HttpResult<(StatusCode, Json<CertificateDto>)> {
    let command = CreateCertificateCommand {
        name: payload.name,
        description: payload.description,
        price: payload.price,
        duration: payload.duration,
        tags: CertificateRequest::tag_names(payload.tags),
    };

    let created = state
        .services
        .certificate_commands
        .create_certificate(&user, command)
        .await
        .into_http()?;

    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/certificates/{id}",
    params(("id" = i64, Path)),
    request_body = CertificateRequest,
    responses(
        (status = 200, description = "Certificate after the update.", body = CertificateDto),
        (status = 400, description = "Invalid fields.", body = ErrorResponse),
        (status = 403, description = "Admins only.", body = ErrorResponse),
        (status = 404, description = "Unknown certificate.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Certificates"
)]
pub async fn update_certificate(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<CertificateRequest>,
) -> HttpResult<Json<CertificateDto>> {
    let command = UpdateCertificateCommand {
        id,
        name: payload.name,
        description: payload.description,
        price: payload.price,
        duration: payload.duration,
        tags: CertificateRequest::tag_names(payload.tags),
    };

    state
        .services
        .certificate_commands
        .update_certificate(&user, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/certificates/{id}",
    params(("id" = i64, Path)),
    responses(
        (status = 204, description = "Certificate deleted."),
        (status = 403, description = "Admins only.", body = ErrorResponse),
        (status = 404, description = "Unknown certificate.", body = ErrorResponse),
        (status = 409, description = "Certificate is part of an order.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Certificates"
)]
pub async fn delete_certificate(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<StatusCode> {
    state
        .services
        .certificate_commands
        .delete_certificate(&user, DeleteCertificateCommand { id })
        .await
        .into_http()?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn certificate_tags(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<Vec<TagDto>>> {
    state
        .services
        .certificate_queries
        .certificate_tags(id)
        .await
        .into_http()
        .map(Json)
}

pub async fn certificate_orders(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<Vec<OrderDto>>> {
    state
        .services
        .certificate_queries
        .certificate_orders(&user, id)
        .await
        .into_http()
        .map(Json)
}

pub async fn certificate_users(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<Vec<UserDto>>> {
    state
        .services
        .certificate_queries
        .certificate_users(&user, id)
        .await
        .into_http()
        .map(Json)
}
