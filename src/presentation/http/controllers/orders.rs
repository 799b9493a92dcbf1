// src/presentation/http/controllers/orders.rs
use crate::application::{
    commands::orders::{CreateOrderCommand, DeleteOrderCommand},
    dto::{CertificateDto, OrderDto, Page, UserDto},
    queries::orders::{GetOrderByIdQuery, SearchOrdersQuery},
};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{Authenticated, MaybeAuthenticated};
use crate::presentation::http::params::QueryParams;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Path, http::StatusCode};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    /// Purchased certificates; an id may repeat.
    #[serde(default)]
    pub certificate_ids: Vec<i64>,
}

fn owned(values: Vec<&str>) -> Vec<String> {
    values.into_iter().map(str::to_string).collect()
}

#[utoipa::path(
    get,
    path = "/api/v1/orders",
    params(
        ("userId" = Option<i64>, Query),
        ("cost" = Option<Vec<String>>, Query, description = "One value: at most. Two values: between, inclusive"),
        ("createDate" = Option<Vec<String>>, Query, description = "YYYY-MM-DD, same bounds as cost"),
        ("page" = Option<i64>, Query),
        ("limit" = Option<i64>, Query)
    ),
    responses(
        (status = 200, description = "Matching orders.", body = Page<OrderDto>),
        (status = 400, description = "Invalid parameter or page.", body = ErrorResponse),
        (status = 401, description = "Unauthorized.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Orders"
)]
pub async fn search_orders(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    params: QueryParams,
) -> HttpResult<Json<Page<OrderDto>>> {
    let query = SearchOrdersQuery {
        user_id: params.int("userId").into_http()?,
        cost: owned(params.all("cost")),
        create_date: owned(params.all("createDate")),
        page: params.page().into_http()?,
    };

    state
        .services
        .order_queries
        .search_orders(&user, query)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}",
    params(("id" = i64, Path)),
    responses(
        (status = 200, description = "The order.", body = OrderDto),
        (status = 404, description = "Unknown order.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Orders"
)]
pub async fn get_order(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<OrderDto>> {
    state
        .services
        .order_queries
        .get_order_by_id(&user, GetOrderByIdQuery { id })
        .await
        .into_http()
        .map(Json)
}

pub async fn order_certificates(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<Vec<CertificateDto>>> {
    state
        .services
        .order_queries
        .order_certificates(&user, id)
        .await
        .into_http()
        .map(Json)
}

pub async fn order_user(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<UserDto>> {
    state
        .services
        .order_queries
        .order_user(&user, id)
        .await
        .into_http()
        .map(Json)
}

/// Anonymous callers reach the service so it can answer with 403.
#[utoipa::path(
    post,
    path = "/api/v1/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order placed for the caller.", body = OrderDto),
        (status = 400, description = "No certificates.", body = ErrorResponse),
        (status = 403, description = "No authenticated user.", body = ErrorResponse),
        (status = 404, description = "Unknown certificate.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Orders"
)]
pub async fn create_order(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    Json(payload): Json<CreateOrderRequest>,
) -> HttpResult<(StatusCode, Json<OrderDto>)> {
    let command = CreateOrderCommand {
        certificate_ids: payload.certificate_ids,
    };

    let order = state
        .services
        .order_commands
        .create_order(actor.0.as_ref(), command)
        .await
        .into_http()?;

    Ok((StatusCode::CREATED, Json(order)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/orders/{id}",
    params(("id" = i64, Path)),
    responses(
        (status = 204, description = "Order deleted."),
        (status = 403, description = "Admins only.", body = ErrorResponse),
        (status = 404, description = "Unknown order.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Orders"
)]
pub async fn delete_order(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<StatusCode> {
    state
        .services
        .order_commands
        .delete_order(&user, DeleteOrderCommand { id })
        .await
        .into_http()?;

    Ok(StatusCode::NO_CONTENT)
}
