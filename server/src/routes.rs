//! HTTP handlers mapping the REST surface onto `TodoStore`.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use serde::Deserialize;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::model::{NewTodo, Todo, TodoId, TodoPatch, UpdateTodo};
use crate::sort::SortBy;
use crate::store::TodoStore;

/// The one store instance for this process, shared by every handler.
pub type SharedStore = Arc<RwLock<TodoStore>>;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
}

pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", get(get_todo).put(update_todo).delete(delete_todo))
        .route("/todos/{id}/toggle", patch(toggle_todo))
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

fn parse_id(raw: &str) -> Result<TodoId, ApiError> {
    raw.parse::<TodoId>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ApiError::UnknownId(raw.to_string()))
}

async fn list_todos(
    State(store): State<SharedStore>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Json<Vec<Todo>> {
    // Listing never fails: a query that does not deserialize sorts by default.
    let sort_by = match params {
        Ok(Query(params)) => SortBy::from_query(params.sort_by.as_deref()),
        Err(rejection) => {
            tracing::debug!(%rejection, "ignoring unreadable list query");
            SortBy::default()
        }
    };
    let todos = store.read().await.list(sort_by);
    Json(todos)
}

async fn get_todo(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(&id)?;
    let todo = store.read().await.get(id)?;
    Ok(Json(todo))
}

async fn create_todo(
    State(store): State<SharedStore>,
    payload: Result<Json<NewTodo>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let Json(input) = payload?;
    let todo = store.write().await.create(input)?;
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn update_todo(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTodo>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(&id)?;
    let Json(input) = payload?;
    let patch = TodoPatch::try_from(input)?;
    let todo = store.write().await.update(id, patch)?;
    Ok(Json(todo))
}

async fn toggle_todo(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(&id)?;
    let todo = store.write().await.toggle(id)?;
    Ok(Json(todo))
}

async fn delete_todo(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    store.write().await.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
