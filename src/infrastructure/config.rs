use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct PortalConfig {
    pub server: ServerSettings,
    pub manifest: ManifestSettings,
    pub state: StateSettings,
    pub builder: BuilderSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ManifestSettings {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StateSettings {
    pub backend: StateBackend,
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StateBackend {
    File,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BuilderSettings {
    pub output: PathBuf,
    pub public_dir: PathBuf,
}

/// Defaults, then `config/portal.{toml,..}` if present, then `PORTAL__*` env vars.
pub fn load_portal_config() -> anyhow::Result<PortalConfig> {
    let settings = config::Config::builder()
        .set_default("server.bind", "0.0.0.0:8080")?
        .set_default("manifest.path", "src/data/datasets.json")?
        .set_default("state.backend", "file")?
        .set_default("state.path", "data/ui-state.json")?
        .set_default("builder.output", "src/data/datasets.json")?
        .set_default("builder.public_dir", "public")?
        .add_source(config::File::with_name("config/portal").required(false))
        .add_source(config::Environment::with_prefix("PORTAL").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
