//! In-memory todo service with a REST surface.
//!
//! # Overview
//! `TodoStore` owns every todo record: it assigns ids, stamps timestamps,
//! applies mutations, and materializes sorted snapshots. The `routes` module
//! exposes it over HTTP with axum.
//!
//! # Design
//! - One store per process, created at startup and injected into the router
//!   as shared state. There is no global collection.
//! - Writes hold the store's write lock for the whole operation, so each
//!   mutation applies completely or not at all.
//! - Every failure leaves the server as `{"error", "message"}` JSON with a
//!   400 or 404 status.

pub mod clock;
pub mod config;
pub mod error;
pub mod model;
pub mod routes;
pub mod sort;
pub mod store;

use std::sync::Arc;

use axum::Router;
use tokio::{net::TcpListener, sync::RwLock};

pub use config::ServerConfig;
pub use error::{ApiError, StoreError};
pub use model::{NewTodo, Priority, Todo, TodoId, TodoPatch, UpdateTodo};
pub use routes::SharedStore;
pub use sort::SortBy;
pub use store::TodoStore;

/// Router over a fresh, empty store.
pub fn app() -> Router {
    app_with_store(TodoStore::new())
}

/// Router over the given store.
pub fn app_with_store(store: TodoStore) -> Router {
    routes::router(Arc::new(RwLock::new(store)))
}

/// Serve a fresh, empty store on `listener`.
pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, TodoStore::new()).await
}

/// Serve `store` on `listener` until the process stops.
pub async fn serve(listener: TcpListener, store: TodoStore) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, todos = store.len(), "serving todo api");
    }
    axum::serve(listener, app_with_store(store)).await
}
