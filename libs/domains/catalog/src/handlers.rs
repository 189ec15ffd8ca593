use axum::{
    extract::{OriginalUri, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
    Page, PageQuery, UuidPath, ValidatedJson, PAGE_SIZE,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CatalogResult;
use crate::models::{CategoryResponse, CreateCategory, ProductResponse, UpdateCategory};
use crate::repository::{CategoryRepository, ProductRepository};
use crate::service::{CategoryService, ProductService};

/// OpenAPI documentation for the read-only product surface
#[derive(OpenApi)]
#[openapi(
    paths(list_products, get_product),
    components(
        schemas(ProductResponse, CategoryResponse, Page<ProductResponse>),
        responses(NotFoundResponse, BadRequestUuidResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "products", description = "Read-only product catalog endpoints")
    )
)]
pub struct ProductsApiDoc;

/// OpenAPI documentation for the category endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        list_categories,
        get_category,
        create_category,
        update_category,
        delete_category,
    ),
    components(
        schemas(
            CategoryResponse,
            CreateCategory,
            UpdateCategory,
            Page<CategoryResponse>
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "categories", description = "Category management endpoints")
    )
)]
pub struct CategoriesApiDoc;

/// Router for the anonymous, read-only product surface
pub fn products_router<P, C>(service: ProductService<P, C>) -> Router
where
    P: ProductRepository + 'static,
    C: CategoryRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products))
        .route("/{id}", get(get_product))
        .with_state(shared_service)
}

/// Router for the anonymous, read-only category surface
pub fn categories_router<R>(service: CategoryService<R>) -> Router
where
    R: CategoryRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_categories))
        .route("/{id}", get(get_category))
        .with_state(shared_service)
}

/// Router for category writes; the app composes this behind authentication
pub fn categories_admin_router<R>(service: CategoryService<R>) -> Router
where
    R: CategoryRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", post(create_category))
        .route("/{id}", put(update_category).delete(delete_category))
        .with_state(shared_service)
}

/// List products (paginated, page size 5)
#[utoipa::path(
    get,
    path = "",
    tag = "products",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of products", body = Page<ProductResponse>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<P: ProductRepository, C: CategoryRepository>(
    State(service): State<Arc<ProductService<P, C>>>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<PageQuery>,
) -> CatalogResult<Json<Page<ProductResponse>>> {
    let (products, count) = service.list_products(query.page).await?;
    let results = products.into_iter().map(ProductResponse::from).collect();

    Ok(Json(Page::new(
        uri.path(),
        query.page,
        PAGE_SIZE,
        count,
        results,
    )))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<P: ProductRepository, C: CategoryRepository>(
    State(service): State<Arc<ProductService<P, C>>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<ProductResponse>> {
    let product = service.get_product(id).await?;
    Ok(Json(product.into()))
}

/// List categories (paginated, page size 5)
#[utoipa::path(
    get,
    path = "",
    tag = "categories",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of categories", body = Page<CategoryResponse>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categories<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<PageQuery>,
) -> CatalogResult<Json<Page<CategoryResponse>>> {
    let (categories, count) = service.list_categories(query.page).await?;
    let results = categories.into_iter().map(CategoryResponse::from).collect();

    Ok(Json(Page::new(
        uri.path(),
        query.page,
        PAGE_SIZE,
        count,
        results,
    )))
}

/// Get a category by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "categories",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found", body = CategoryResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<CategoryResponse>> {
    let category = service.get_category(id).await?;
    Ok(Json(category.into()))
}

/// Create a new category
#[utoipa::path(
    post,
    path = "",
    tag = "categories",
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created successfully", body = CategoryResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_token" = []))
)]
async fn create_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateCategory>,
) -> CatalogResult<impl IntoResponse> {
    let category = service.create_category(input).await?;
    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))))
}

/// Update a category
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "categories",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Category updated successfully", body = CategoryResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_token" = []))
)]
async fn update_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateCategory>,
) -> CatalogResult<Json<CategoryResponse>> {
    let category = service.update_category(id, input).await?;
    Ok(Json(category.into()))
}

/// Delete a category; product associations simply drop
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "categories",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 204, description = "Category deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_token" = []))
)]
async fn delete_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<impl IntoResponse> {
    service.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
