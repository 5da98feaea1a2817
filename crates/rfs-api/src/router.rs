//! Route definitions for the remote file system HTTP API.
//!
//! All routes are mounted under `/api`.

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(folder_routes())
        .merge(file_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Folder endpoints: content, listings, tree, CRUD, move
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/folders",
            get(handlers::folder::get_root_content).post(handlers::folder::create_folder),
        )
        .route("/folders/root", get(handlers::folder::get_root_id))
        .route(
            "/folders/{id}",
            get(handlers::folder::get_folder_content)
                .put(handlers::folder::update_folder)
                .delete(handlers::folder::delete_folder),
        )
        .route("/folders/{id}/folders", get(handlers::folder::list_folders))
        .route("/folders/{id}/files", get(handlers::folder::list_files))
        .route("/folders/{id}/tree", get(handlers::folder::get_tree))
        .route(
            "/folders/{id}/breadcrumbs",
            get(handlers::folder::get_breadcrumbs),
        )
        .route("/folders/{id}/move", put(handlers::folder::move_folder))
}

/// File endpoints: CRUD, move
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/files", post(handlers::file::create_file))
        .route(
            "/files/{id}",
            get(handlers::file::get_file)
                .put(handlers::file::update_file)
                .delete(handlers::file::delete_file),
        )
        .route("/files/{id}/move", put(handlers::file::move_file))
}

/// Health endpoint
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
