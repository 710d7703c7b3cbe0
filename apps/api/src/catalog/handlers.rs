use axum::{
    extract::{Path, State},
    Json,
};

use crate::catalog::Product;
use crate::errors::AppError;
use crate::state::AppState;

/// GET /api/v1/products
pub async fn handle_list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.catalog.all().to_vec())
}

/// GET /api/v1/products/:id
pub async fn handle_get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, AppError> {
    state
        .catalog
        .get_by_route_id(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Product {id} not found")))
}
