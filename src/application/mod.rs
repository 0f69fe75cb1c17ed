// Application layer - Use cases and the ports they depend on
pub mod catalog_service;
pub mod editor_service;
pub mod error;
pub mod manifest_builder;
pub mod manifest_repository;
pub mod resolver;
pub mod sidebar_service;
pub mod state_store;

use crate::domain::manifest::Manifest;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory working copy shared by the catalog and the editor.
pub type SharedManifest = Arc<RwLock<Manifest>>;
