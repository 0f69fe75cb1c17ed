// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod file_state_store;
pub mod http_response;
pub mod json_manifest_repository;
pub mod manifest_writer;
pub mod memory_store;
pub mod workbook;
