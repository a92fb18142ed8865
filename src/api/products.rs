//! Product API endpoints.

use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};

use super::{success, ApiResult, Json, Path};
use crate::errors::AppError;
use crate::models::{CreateProductRequest, Product};
use crate::AppState;

/// GET /api/products - List all products.
pub async fn list_products(State(state): State<AppState>) -> ApiResult<Vec<Product>> {
    success(state.store.products().await)
}

/// POST /api/products - Add a product.
pub async fn create_product(
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> ApiResult<Product> {
    // Validate required fields, as the add-product form does before submitting
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }
    if request.price.is_empty() {
        return Err(AppError::Validation("Price is required".to_string()));
    }

    match state.store.create(&request).await {
        Ok(product) => success(product),
        Err(e) => Err(e),
    }
}

/// DELETE /api/products/{id} - Remove a product. Unknown ids succeed as no-ops.
pub async fn delete_product(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<()> {
    match state.store.delete(id).await {
        Ok(()) => success(()),
        Err(e) => Err(e),
    }
}

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Search text; blank matches everything.
    #[serde(default)]
    pub q: String,
}

/// Search results with the count the product list header shows.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<Product>,
    pub total: usize,
}

/// GET /api/products/search - Filter products by name.
pub async fn search_products(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> ApiResult<SearchResponse> {
    let results = state.store.filter(&params.q).await;
    let total = results.len();

    success(SearchResponse { results, total })
}
