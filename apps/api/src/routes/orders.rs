//! Order routes.
//!
//! ```text
//! POST /orders        create an order (total derived server-side)
//! GET  /orders        list (user_id/page/limit query)
//! GET  /orders/:id    fetch one with its items
//! PUT  /orders/:id    overwrite the status
//! ```

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use shopgate_core::{NewOrder, PageRequest};

use crate::error::ApiResult;
use crate::services::OrderService;
use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/orders", post(create).get(list))
        .route("/orders/:id", get(get_by_id).put(update_status))
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    #[serde(default)]
    user_id: String,
    #[serde(default)]
    page: i64,
    #[serde(default)]
    limit: i64,
}

#[derive(Debug, Deserialize)]
struct StatusUpdate {
    status: String,
}

async fn create(
    State(state): State<Arc<AppState>>,
    Json(new): Json<NewOrder>,
) -> ApiResult<impl IntoResponse> {
    let order = OrderService::new(&state.db).create(new).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

async fn get_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let order = OrderService::new(&state.db).get(&id).await?;
    Ok(Json(order))
}

async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<StatusUpdate>,
) -> ApiResult<impl IntoResponse> {
    let order = OrderService::new(&state.db)
        .update_status(&id, &body.status)
        .await?;
    Ok(Json(order))
}

async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<impl IntoResponse> {
    let page = PageRequest::new(query.page, query.limit);
    let paged = OrderService::new(&state.db)
        .list(&query.user_id, page)
        .await?;
    Ok(Json(paged))
}
