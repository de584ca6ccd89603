use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use axum_helpers::{
    UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse, TooManyRequestsResponse,
    },
    http::{RateLimit, enforce_rate_limit},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::entity;
use crate::error::ProductResult;
use crate::models::{CreateProduct, Product, ProductFilters, UpdateProduct};
use crate::pagination::{DEFAULT_LIMIT, DEFAULT_PAGE, PaginatedResult};
use crate::repository::ProductRepository;
use crate::use_cases::ProductUseCases;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(
            Product,
            CreateProduct,
            UpdateProduct,
            ProductResponse,
            ProductListResponse,
            PaginationMeta,
            MessageResponse
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            TooManyRequestsResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = entity::TAG, description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

type SharedUseCases<R> = Arc<ProductUseCases<R>>;

/// Single-product envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub success: bool,
    pub data: Product,
}

impl From<Product> for ProductResponse {
    fn from(data: Product) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

/// Page-of-products envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductListResponse {
    pub success: bool,
    pub data: Vec<Product>,
    pub pagination: PaginationMeta,
}

impl From<PaginatedResult<Product>> for ProductListResponse {
    fn from(result: PaginatedResult<Product>) -> Self {
        Self {
            success: true,
            pagination: PaginationMeta {
                page: result.page,
                limit: result.limit,
                total: result.total,
                total_pages: result.total_pages,
            },
            data: result.data,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

/// Query string accepted by the list endpoint
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListProductsQuery {
    /// Exact category match
    pub category: Option<String>,
    /// Inclusive lower price bound
    #[param(value_type = Option<String>)]
    pub min_price: Option<Decimal>,
    /// Inclusive upper price bound
    #[param(value_type = Option<String>)]
    pub max_price: Option<Decimal>,
    /// Only products with stock > 0 when true
    pub in_stock: Option<bool>,
    /// Case-insensitive match on name or description
    pub search: Option<String>,
    /// 1-based page, values below 1 are treated as 1
    pub page: Option<i64>,
    /// Page size 1-100, anything else falls back to 10
    pub limit: Option<i64>,
}

impl ListProductsQuery {
    fn into_parts(self) -> (ProductFilters, i64, i64) {
        let filters = ProductFilters {
            category: self.category,
            min_price: self.min_price,
            max_price: self.max_price,
            in_stock: self.in_stock,
            search: self.search,
        };
        let page = self.page.unwrap_or(DEFAULT_PAGE as i64);
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT as i64);

        (filters, page, limit)
    }
}

/// Create the product router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(use_cases: ProductUseCases<R>) -> Router {
    build_router(use_cases, None)
}

/// Same as [`router`], with `write_limit` applied to POST, PUT and DELETE
pub fn rate_limited_router<R: ProductRepository + 'static>(
    use_cases: ProductUseCases<R>,
    write_limit: RateLimit,
) -> Router {
    build_router(use_cases, Some(write_limit))
}

fn build_router<R: ProductRepository + 'static>(
    use_cases: ProductUseCases<R>,
    write_limit: Option<RateLimit>,
) -> Router {
    let shared_use_cases: SharedUseCases<R> = Arc::new(use_cases);

    let reads = Router::<SharedUseCases<R>>::new()
        .route("/", get(list_products::<R>))
        .route("/{id}", get(get_product::<R>));

    let mut writes = Router::<SharedUseCases<R>>::new()
        .route("/", post(create_product::<R>))
        .route(
            "/{id}",
            put(update_product::<R>).delete(delete_product::<R>),
        );

    if let Some(limit) = write_limit {
        writes = writes.route_layer(middleware::from_fn_with_state(limit, enforce_rate_limit));
    }

    reads.merge(writes).with_state(shared_use_cases)
}

/// List products with optional filters and pagination
#[utoipa::path(
    get,
    path = "",
    tag = entity::TAG,
    params(ListProductsQuery),
    responses(
        (status = 200, description = "Page of products", body = ProductListResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(use_cases): State<SharedUseCases<R>>,
    Query(query): Query<ListProductsQuery>,
) -> ProductResult<Json<ProductListResponse>> {
    let (filters, page, limit) = query.into_parts();
    let result = use_cases.list.execute(filters, page, limit).await?;
    Ok(Json(result.into()))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = entity::TAG,
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = ProductResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 429, response = TooManyRequestsResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(use_cases): State<SharedUseCases<R>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let product = use_cases.create.execute(input).await?;
    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = entity::TAG,
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
async fn get_product<R: ProductRepository>(
    State(use_cases): State<SharedUseCases<R>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<ProductResponse>> {
    let product = use_cases.get_by_id.execute(id).await?;
    Ok(Json(product.into()))
}

/// Update a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = entity::TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated successfully", body = ProductResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 429, response = TooManyRequestsResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(use_cases): State<SharedUseCases<R>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<Json<ProductResponse>> {
    let product = use_cases.update.execute(id, input).await?;
    Ok(Json(product.into()))
}

/// Soft-delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = entity::TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted successfully", body = MessageResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 429, response = TooManyRequestsResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(use_cases): State<SharedUseCases<R>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<MessageResponse>> {
    use_cases.delete.execute(id).await?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Deleted successfully".to_string(),
    }))
}
