use axum::{
    extract::{OriginalUri, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse, UnauthorizedResponse,
    },
    Page, PageQuery, UuidPath, ValidatedJson, PAGE_SIZE,
};
use domain_catalog::ProductRepository;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::OrderResult;
use crate::models::{CreateOrder, OrderResponse, UpdateOrder};
use crate::repository::OrderRepository;
use crate::service::OrderService;

/// OpenAPI documentation for the order endpoints.
///
/// Every operation requires a bearer token; the app composes this router
/// behind the authentication middleware.
#[derive(OpenApi)]
#[openapi(
    paths(list_orders, create_order, get_order, update_order, patch_order, delete_order),
    components(
        schemas(OrderResponse, CreateOrder, UpdateOrder, Page<OrderResponse>),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "orders", description = "Order management endpoints (authenticated)")
    )
)]
pub struct ApiDoc;

/// Create the order router with all HTTP endpoints
pub fn router<O, P>(service: OrderService<O, P>) -> Router
where
    O: OrderRepository + 'static,
    P: ProductRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route(
            "/{id}",
            get(get_order)
                .put(update_order)
                .patch(patch_order)
                .delete(delete_order),
        )
        .with_state(shared_service)
}

/// List orders (paginated, page size 5)
#[utoipa::path(
    get,
    path = "",
    tag = "orders",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of orders", body = Page<OrderResponse>),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_token" = []))
)]
async fn list_orders<O: OrderRepository, P: ProductRepository>(
    State(service): State<Arc<OrderService<O, P>>>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<PageQuery>,
) -> OrderResult<Json<Page<OrderResponse>>> {
    let (orders, count) = service.list_orders(query.page).await?;

    Ok(Json(Page::new(
        uri.path(),
        query.page,
        PAGE_SIZE,
        count,
        orders,
    )))
}

/// Create a new order
#[utoipa::path(
    post,
    path = "",
    tag = "orders",
    request_body = CreateOrder,
    responses(
        (status = 201, description = "Order created successfully", body = OrderResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_token" = []))
)]
async fn create_order<O: OrderRepository, P: ProductRepository>(
    State(service): State<Arc<OrderService<O, P>>>,
    ValidatedJson(input): ValidatedJson<CreateOrder>,
) -> OrderResult<impl IntoResponse> {
    let order = service.create_order(input).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// Get an order by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "orders",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_token" = []))
)]
async fn get_order<O: OrderRepository, P: ProductRepository>(
    State(service): State<Arc<OrderService<O, P>>>,
    UuidPath(id): UuidPath,
) -> OrderResult<Json<OrderResponse>> {
    let order = service.get_order(id).await?;
    Ok(Json(order))
}

/// Update an order
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "orders",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    request_body = UpdateOrder,
    responses(
        (status = 200, description = "Order updated successfully", body = OrderResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_token" = []))
)]
async fn update_order<O: OrderRepository, P: ProductRepository>(
    State(service): State<Arc<OrderService<O, P>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateOrder>,
) -> OrderResult<Json<OrderResponse>> {
    let order = service.update_order(id, input).await?;
    Ok(Json(order))
}

/// Partially update an order (same partial semantics as PUT)
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "orders",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    request_body = UpdateOrder,
    responses(
        (status = 200, description = "Order updated successfully", body = OrderResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_token" = []))
)]
async fn patch_order<O: OrderRepository, P: ProductRepository>(
    State(service): State<Arc<OrderService<O, P>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateOrder>,
) -> OrderResult<Json<OrderResponse>> {
    let order = service.update_order(id, input).await?;
    Ok(Json(order))
}

/// Delete an order
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "orders",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    responses(
        (status = 204, description = "Order deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_token" = []))
)]
async fn delete_order<O: OrderRepository, P: ProductRepository>(
    State(service): State<Arc<OrderService<O, P>>>,
    UuidPath(id): UuidPath,
) -> OrderResult<impl IntoResponse> {
    service.delete_order(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
