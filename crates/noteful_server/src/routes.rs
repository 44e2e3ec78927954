//! Routing table.

use crate::handlers::{folders, notes};
use crate::middleware::{log_requests, render_server_errors, security_headers};
use crate::AppState;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;

pub const API_PREFIX: &str = "/api";

/// Builds the full application router around `state`.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/folders",
            get(folders::list_folders).post(folders::create_folder),
        )
        .route(
            "/folders/:folder_id",
            get(folders::get_folder)
                .patch(folders::update_folder)
                .delete(folders::delete_folder),
        )
        .route("/notes", get(notes::list_notes).post(notes::create_note))
        .route(
            "/notes/:note_id",
            get(notes::get_note)
                .patch(notes::update_note)
                .delete(notes::delete_note),
        );

    let mut router = Router::new()
        .route("/", get(hello))
        .nest(API_PREFIX, api)
        .layer(from_fn_with_state(state.clone(), render_server_errors))
        .layer(from_fn(log_requests));
    for layer in security_headers() {
        router = router.layer(layer);
    }
    router.layer(CorsLayer::permissive()).with_state(state)
}

async fn hello() -> &'static str {
    "Hello, world!"
}
