// src/presentation/http/controllers/tags.rs
use crate::application::{
    commands::tags::{CreateTagCommand, DeleteTagCommand},
    dto::{CertificateDto, Page, TagDto},
    queries::tags::{GetTagByIdQuery, SearchTagsQuery},
};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::params::QueryParams;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Path, http::StatusCode};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTagRequest {
    pub name: String,
}

#[utoipa::path(
    get,
    path = "/api/v1/tags",
    params(
        ("name" = Option<String>, Query, description = "Exact tag name"),
        ("certificateId" = Option<i64>, Query),
        ("page" = Option<i64>, Query),
        ("limit" = Option<i64>, Query)
    ),
    responses(
        (status = 200, description = "Matching tags.", body = Page<TagDto>),
        (status = 400, description = "Invalid parameter or page.", body = ErrorResponse)
    ),
    security([]),
    tag = "Tags"
)]
pub async fn search_tags(
    Extension(state): Extension<HttpState>,
    params: QueryParams,
) -> HttpResult<Json<Page<TagDto>>> {
    let query = SearchTagsQuery {
        name: params.text("name"),
        certificate_id: params.int("certificateId").into_http()?,
        page: params.page().into_http()?,
    };

    state
        .services
        .tag_queries
        .search_tags(query)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/tags/most-used",
    params(("page" = Option<i64>, Query), ("limit" = Option<i64>, Query)),
    responses(
        (status = 200, description = "Most used tags of the top spenders.", body = Page<TagDto>),
        (status = 400, description = "Invalid page.", body = ErrorResponse)
    ),
    security([]),
    tag = "Tags"
)]
pub async fn most_used_tags(
    Extension(state): Extension<HttpState>,
    params: QueryParams,
) -> HttpResult<Json<Page<TagDto>>> {
    let page = params.page().into_http()?;
    state
        .services
        .tag_queries
        .most_used_tags_of_top_spenders(page)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/tags/{id}",
    params(("id" = i64, Path)),
    responses(
        (status = 200, description = "The tag.", body = TagDto),
        (status = 404, description = "Unknown tag.", body = ErrorResponse)
    ),
    security([]),
    tag = "Tags"
)]
pub async fn get_tag(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<TagDto>> {
    state
        .services
        .tag_queries
        .get_tag_by_id(GetTagByIdQuery { id })
        .await
        .into_http()
        .map(Json)
}

pub async fn tag_certificates(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<Vec<CertificateDto>>> {
    state
        .services
        .tag_queries
        .tag_certificates(id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/tags",
    request_body = CreateTagRequest,
    responses(
        (status = 200, description = "The stored tag, new or existing.", body = TagDto),
        (status = 400, description = "Invalid name.", body = ErrorResponse),
        (status = 403, description = "Admins only.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Tags"
)]
pub async fn create_tag(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<CreateTagRequest>,
) -> HttpResult<Json<TagDto>> {
    state
        .services
        .tag_commands
        .create_tag(&user, CreateTagCommand { name: payload.name })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/tags/{id}",
    params(("id" = i64, Path)),
    responses(
        (status = 204, description = "Tag deleted."),
        (status = 403, description = "Admins only.", body = ErrorResponse),
        (status = 404, description = "Unknown tag.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Tags"
)]
pub async fn delete_tag(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<StatusCode> {
    state
        .services
        .tag_commands
        .delete_tag(&user, DeleteTagCommand { id })
        .await
        .into_http()?;

    Ok(StatusCode::NO_CONTENT)
}
