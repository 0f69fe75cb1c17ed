// Application state for HTTP handlers
use crate::application::SharedManifest;
use crate::application::catalog_service::CatalogService;
use crate::application::editor_service::EditorService;
use crate::application::sidebar_service::SidebarService;
use crate::application::state_store::KeyValueStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub catalog_service: CatalogService,
    pub editor_service: EditorService,
    pub sidebar_service: SidebarService,
}

impl AppState {
    pub fn new(manifest: SharedManifest, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            catalog_service: CatalogService::new(manifest.clone()),
            editor_service: EditorService::new(manifest),
            sidebar_service: SidebarService::new(store),
        }
    }
}
