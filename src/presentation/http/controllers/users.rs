// src/presentation/http/controllers/users.rs
use crate::application::{
    commands::users::PromoteUserCommand,
    dto::{CertificateDto, OrderDto, Page, UserDto},
    queries::users::{GetUserByIdQuery, SearchUsersQuery},
};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::params::QueryParams;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Path};

#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(
        ("firstName" = Option<String>, Query),
        ("lastName" = Option<String>, Query),
        ("email" = Option<String>, Query),
        ("certificateId" = Option<i64>, Query),
        ("page" = Option<i64>, Query),
        ("limit" = Option<i64>, Query)
    ),
    responses(
        (status = 200, description = "Matching users.", body = Page<UserDto>),
        (status = 400, description = "Invalid parameter or page.", body = ErrorResponse),
        (status = 401, description = "Unauthorized.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Users"
)]
pub async fn search_users(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    params: QueryParams,
) -> HttpResult<Json<Page<UserDto>>> {
    let query = SearchUsersQuery {
        first_name: params.text("firstName"),
        last_name: params.text("lastName"),
        email: params.text("email"),
        certificate_id: params.int("certificateId").into_http()?,
        page: params.page().into_http()?,
    };

    state
        .services
        .user_queries
        .search_users(&user, query)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path)),
    responses(
        (status = 200, description = "The user.", body = UserDto),
        (status = 404, description = "Unknown user.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Users"
)]
pub async fn get_user(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<UserDto>> {
    state
        .services
        .user_queries
        .get_user_by_id(&user, GetUserByIdQuery { id })
        .await
        .into_http()
        .map(Json)
}

pub async fn user_orders(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<Vec<OrderDto>>> {
    state
        .services
        .user_queries
        .user_orders(&user, id)
        .await
        .into_http()
        .map(Json)
}

pub async fn user_certificates(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<Vec<CertificateDto>>> {
    state
        .services
        .user_queries
        .user_certificates(&user, id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/admin",
    params(("id" = i64, Path)),
    responses(
        (status = 200, description = "User with the ADMIN role.", body = UserDto),
        (status = 403, description = "Admins only.", body = ErrorResponse),
        (status = 404, description = "Unknown user.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Users"
)]
pub async fn promote_user(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<UserDto>> {
    state
        .services
        .user_commands
        .add_admin(&user, PromoteUserCommand { user_id: id })
        .await
        .into_http()
        .map(Json)
}
