// HTTP request handlers
use crate::application::catalog_service::{DashboardLookup, GalleryFilter};
use crate::application::editor_service::NewFile;
use crate::application::error::PortalError;
use crate::infrastructure::http_response::{accepts_brotli, json_download_response};
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

pub const EXPORT_FILENAME: &str = "datasets.json";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedUpdate {
    #[serde(default)]
    pub embed_url: String,
}

#[derive(Deserialize)]
pub struct SidebarNode {
    pub department: String,
    pub section: Option<String>,
}

#[derive(Deserialize)]
pub struct SidebarUpdate {
    pub department: String,
    pub section: Option<String>,
    pub expanded: bool,
}

impl IntoResponse for PortalError {
    fn into_response(self) -> Response {
        let status = match &self {
            PortalError::DepartmentNotFound(_)
            | PortalError::DashboardNotFound { .. }
            | PortalError::FileNotFound { .. } => StatusCode::NOT_FOUND,
            PortalError::InvalidManifest(_) => StatusCode::BAD_REQUEST,
            PortalError::Storage(e) => {
                tracing::error!("Storage failure: {:#}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = match &self {
            PortalError::DashboardNotFound { query, suggestions } => json!({
                "error": self.to_string(),
                "query": query,
                "suggestions": suggestions,
            }),
            _ => json!({ "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Department -> section -> dashboard tree with totals
pub async fn get_tree(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.catalog_service.tree().await)
}

/// Gallery cards for one department, filtered by `?section=&q=&sort=`
pub async fn department_gallery(
    Path(dept_slug): Path<String>,
    Query(filter): Query<GalleryFilter>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, PortalError> {
    let cards = state
        .catalog_service
        .department_gallery(&dept_slug, &filter)
        .await?;
    Ok(Json(cards))
}

/// Resolve `/dash/:id`; unknown ids answer 404 with suggestions
pub async fn get_dashboard(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    match state.catalog_service.dashboard_view(&id).await {
        DashboardLookup::Found(view) => Json(view).into_response(),
        DashboardLookup::NotFound { query, suggestions } => {
            PortalError::DashboardNotFound { query, suggestions }.into_response()
        }
    }
}

pub async fn set_embed_url(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(update): Json<EmbedUpdate>,
) -> Result<impl IntoResponse, PortalError> {
    let at = state.editor_service.set_embed_url(&id, &update.embed_url).await?;
    Ok(Json(at))
}

pub async fn add_file(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(new_file): Json<NewFile>,
) -> Result<impl IntoResponse, PortalError> {
    let file = state.editor_service.add_file(&id, new_file).await?;
    Ok((StatusCode::CREATED, Json(file)))
}

pub async fn remove_file(
    Path((id, file_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, PortalError> {
    let file = state.editor_service.remove_file(&id, &file_id).await?;
    Ok(Json(file))
}

/// Download the working copy as pretty-printed JSON
pub async fn export_manifest(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let json = match state.editor_service.export().await {
        Ok(json) => json,
        Err(e) => return e.into_response(),
    };

    match json_download_response(json, EXPORT_FILENAME, accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Replace the working copy with an uploaded manifest
pub async fn import_manifest(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<impl IntoResponse, PortalError> {
    let stats = state.editor_service.import(&body).await?;
    Ok(Json(stats))
}

pub async fn get_sidebar(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.sidebar_service.load().await)
}

pub async fn toggle_sidebar(
    State(state): State<Arc<AppState>>,
    Json(node): Json<SidebarNode>,
) -> Result<impl IntoResponse, PortalError> {
    let expansion = state
        .sidebar_service
        .toggle(&node.department, node.section.as_deref())
        .await?;
    Ok(Json(expansion))
}

pub async fn set_sidebar(
    State(state): State<Arc<AppState>>,
    Json(update): Json<SidebarUpdate>,
) -> Result<impl IntoResponse, PortalError> {
    let expansion = state
        .sidebar_service
        .set(&update.department, update.section.as_deref(), update.expanded)
        .await?;
    Ok(Json(expansion))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::manifest::fixtures::sample_manifest;
    use crate::infrastructure::memory_store::MemoryStore;
    use tokio::sync::RwLock;

    fn state() -> Arc<AppState> {
        Arc::new(AppState::new(
            Arc::new(RwLock::new(sample_manifest())),
            Arc::new(MemoryStore::default()),
        ))
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_get_dashboard_found() {
        let response = get_dashboard(Path("Company%20KPI%20Dashboard".to_string()), State(state())).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["id"], "company-kpi");
        assert_eq!(body["embed"]["status"], "configured");
        assert_eq!(body["matchedBy"], "name");
    }

    #[tokio::test]
    async fn test_get_dashboard_not_found_has_suggestions() {
        let response = get_dashboard(Path("aging".to_string()), State(state())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["query"], "aging");
        assert_eq!(body["suggestions"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_department_is_404() {
        let result = department_gallery(
            Path("Legal".to_string()),
            Query(GalleryFilter::default()),
            State(state()),
        )
        .await;
        let response = result.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_import_malformed_is_400() {
        let result = import_manifest(State(state()), "not json".to_string()).await;
        assert_eq!(result.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_storage_error_is_500() {
        let response = PortalError::Storage(anyhow::anyhow!("disk full")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_edit_then_export() {
        let state = state();
        let response = set_embed_url(
            Path("okr".to_string()),
            State(state.clone()),
            Json(EmbedUpdate {
                embed_url: "https://app.powerbi.com/r/okr".to_string(),
            }),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let response = export_manifest(HeaderMap::new(), State(state)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(
            body["company"]["Executive / Management"]["Strategy"]["OKR / Performance Scorecard"]["embedUrl"],
            "https://app.powerbi.com/r/okr"
        );
    }

    #[tokio::test]
    async fn test_sidebar_toggle_round_trip() {
        let state = state();
        let response = toggle_sidebar(
            State(state.clone()),
            Json(SidebarNode {
                department: "Finance & Accounting".to_string(),
                section: Some("Payables".to_string()),
            }),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(get_sidebar(State(state)).await.into_response()).await;
        assert_eq!(body, json!({ "Finance & Accounting::Payables": true }));
    }
}
