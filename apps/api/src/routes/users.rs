//! User and authentication routes.
//!
//! ```text
//! POST   /users       register (password hashed, never echoed)
//! GET    /users       list (role/page/limit query)
//! GET    /users/:id   fetch one
//! PUT    /users/:id   update profile fields
//! DELETE /users/:id   delete
//! POST   /auth        verify credentials, issue a token
//! ```

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use shopgate_core::{NewUser, PageRequest, UserUpdate};

use crate::error::ApiResult;
use crate::services::UserService;
use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", post(create).get(list))
        .route("/users/:id", get(get_by_id).put(update).delete(delete_user))
        .route("/auth", post(authenticate))
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    #[serde(default)]
    role: String,
    #[serde(default)]
    page: i64,
    #[serde(default)]
    limit: i64,
}

#[derive(Debug, Deserialize)]
struct Credentials {
    email: String,
    password: String,
}

fn service(state: &AppState) -> UserService {
    UserService::new(&state.db, state.jwt.clone())
}

async fn create(
    State(state): State<Arc<AppState>>,
    Json(new): Json<NewUser>,
) -> ApiResult<impl IntoResponse> {
    let user = service(&state).create(new).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn get_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let user = service(&state).get(&id).await?;
    Ok(Json(user))
}

async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<UserUpdate>,
) -> ApiResult<impl IntoResponse> {
    let user = service(&state).update(&id, body).await?;
    Ok(Json(user))
}

async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    service(&state).delete(&id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "user deleted",
    })))
}

async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<impl IntoResponse> {
    let page = PageRequest::new(query.page, query.limit);
    let paged = service(&state).list(&query.role, page).await?;
    Ok(Json(paged))
}

async fn authenticate(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> ApiResult<impl IntoResponse> {
    let auth = service(&state)
        .authenticate(&credentials.email, &credentials.password)
        .await?;
    Ok(Json(auth))
}
