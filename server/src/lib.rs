//! HTTP layer for the todo service.
//!
//! Translates requests into `Store` calls and store results into JSON
//! responses. All validation happens here, before the store is touched.

pub mod config;
pub mod error;

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use todo_core::{CreateTodo, Store, TodoId, TodoItem, UpdateTodo};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub use error::ApiError;

pub type SharedStore = Arc<Store>;

pub fn app(store: SharedStore) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).patch(update_todo).delete(delete_todo),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

/// Serve `store` on `listener` until Ctrl-C or SIGTERM.
pub async fn run(listener: TcpListener, store: SharedStore) -> Result<(), std::io::Error> {
    axum::serve(listener, app(store))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutting down");
}

/// Parse a path id; only integers `>= 1` are accepted.
fn parse_id(raw: &str) -> Result<TodoId, ApiError> {
    match raw.parse::<TodoId>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(ApiError::InvalidId),
    }
}

/// Extract the `{id}` segment. Segments axum cannot decode are invalid ids too.
fn path_id(path: Result<Path<String>, PathRejection>) -> Result<TodoId, ApiError> {
    let Path(raw) = path.map_err(|_| ApiError::InvalidId)?;
    parse_id(&raw)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn list_todos(State(store): State<SharedStore>) -> Json<Vec<TodoItem>> {
    Json(store.list())
}

// Bodies are decoded as JSON whatever the `Content-Type` header says.
async fn create_todo(
    State(store): State<SharedStore>,
    body: Bytes,
) -> Result<(StatusCode, Json<TodoItem>), ApiError> {
    let input: CreateTodo =
        serde_json::from_slice(&body).map_err(|_| ApiError::TitleRequired)?;
    if input.title.is_empty() {
        return Err(ApiError::TitleRequired);
    }
    Ok((StatusCode::CREATED, Json(store.create(input.title))))
}

async fn get_todo(
    State(store): State<SharedStore>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<TodoItem>, ApiError> {
    let id = path_id(path)?;
    store.get(id).map(Json).ok_or(ApiError::NotFound)
}

async fn update_todo(
    State(store): State<SharedStore>,
    path: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> Result<Json<TodoItem>, ApiError> {
    let id = path_id(path)?;
    let input: UpdateTodo =
        serde_json::from_slice(&body).map_err(|_| ApiError::InvalidPayload)?;
    if input.is_empty() {
        return Err(ApiError::NoFieldsToUpdate);
    }
    store.update(id, &input).map(Json).ok_or(ApiError::NotFound)
}

async fn delete_todo(
    State(store): State<SharedStore>,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = path_id(path)?;
    if store.delete(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}
