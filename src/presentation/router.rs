// Route table for the portal API
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    add_file, department_gallery, export_manifest, get_dashboard, get_sidebar, get_tree, health_check,
    import_manifest, remove_file, set_embed_url, set_sidebar, toggle_sidebar,
};
use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/api/tree", get(get_tree))
        .route("/api/departments/:dept_slug", get(department_gallery))
        .route("/api/dash/:id", get(get_dashboard))
        .route("/api/dash/:id/embed", put(set_embed_url))
        .route("/api/dash/:id/files", post(add_file))
        .route("/api/dash/:id/files/:file_id", delete(remove_file))
        .route("/api/export", get(export_manifest))
        .route("/api/import", post(import_manifest))
        .route("/api/sidebar", get(get_sidebar).put(set_sidebar))
        .route("/api/sidebar/toggle", post(toggle_sidebar))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
