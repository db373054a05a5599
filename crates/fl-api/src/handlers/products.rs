//! Product handlers

use axum::{extract::State, Json};
use fl_service::dto::{MessageResponse, ProductRequest, ProductResponse};
use fl_service::ProductService;

use crate::extractors::{IdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// GET /api/products
pub async fn list_products(State(state): State<AppState>) -> ApiResult<Json<Vec<ProductResponse>>> {
    let service = ProductService::new(state.service_context());
    Ok(Json(service.list().await?))
}

/// GET /api/products/:id
pub async fn get_product(
    State(state): State<AppState>,
    IdPath(product_id): IdPath,
) -> ApiResult<Json<ProductResponse>> {
    let service = ProductService::new(state.service_context());
    Ok(Json(service.get(&product_id).await?))
}

/// POST /api/products
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ProductRequest>,
) -> ApiResult<Created<Json<ProductResponse>>> {
    let service = ProductService::new(state.service_context());
    let response = service.create(request).await?;
    Ok(Created(Json(response)))
}

/// PUT /api/products/:id
pub async fn update_product(
    State(state): State<AppState>,
    IdPath(product_id): IdPath,
    ValidatedJson(request): ValidatedJson<ProductRequest>,
) -> ApiResult<Json<ProductResponse>> {
    let service = ProductService::new(state.service_context());
    Ok(Json(service.update(&product_id, request).await?))
}

/// DELETE /api/products/:id
pub async fn delete_product(
    State(state): State<AppState>,
    IdPath(product_id): IdPath,
) -> ApiResult<Json<MessageResponse>> {
    let service = ProductService::new(state.service_context());
    Ok(Json(service.delete(&product_id).await?))
}
