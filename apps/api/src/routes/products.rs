//! Product catalog routes.
//!
//! ```text
//! POST /products            create a product
//! GET  /products            list (category/page/limit query)
//! GET  /products/:id        fetch one
//! PUT  /products/:id        update descriptive fields
//! PUT  /products/:id/stock  adjust stock by a signed delta
//! ```

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;

use shopgate_core::{NewProduct, PageRequest, ProductUpdate};

use crate::error::ApiResult;
use crate::services::CatalogService;
use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/products", post(create).get(list))
        .route("/products/:id", get(get_by_id).put(update))
        .route("/products/:id/stock", put(adjust_stock))
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    #[serde(default)]
    category: String,
    #[serde(default)]
    page: i64,
    #[serde(default)]
    limit: i64,
}

/// Signed stock adjustment: positive restocks, negative consumes.
#[derive(Debug, Deserialize)]
struct StockAdjustment {
    quantity_change: i64,
}

async fn create(
    State(state): State<Arc<AppState>>,
    Json(new): Json<NewProduct>,
) -> ApiResult<impl IntoResponse> {
    let product = CatalogService::new(&state.db).create(new).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

async fn get_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let product = CatalogService::new(&state.db).get(&id).await?;
    Ok(Json(product))
}

async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<ProductUpdate>,
) -> ApiResult<impl IntoResponse> {
    let product = CatalogService::new(&state.db).update(&id, body).await?;
    Ok(Json(product))
}

async fn adjust_stock(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<StockAdjustment>,
) -> ApiResult<impl IntoResponse> {
    let product = CatalogService::new(&state.db)
        .adjust_stock(&id, body.quantity_change)
        .await?;
    Ok(Json(product))
}

async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<impl IntoResponse> {
    let page = PageRequest::new(query.page, query.limit);
    let paged = CatalogService::new(&state.db)
        .list(&query.category, page)
        .await?;
    Ok(Json(paged))
}
