// Sidebar service - Expand/collapse state persisted through the key-value port
use crate::application::error::PortalError;
use crate::application::state_store::KeyValueStore;
use crate::domain::sidebar::{EXPANDED_STATE_KEY, ExpansionState, node_key};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct SidebarService {
    store: Arc<dyn KeyValueStore>,
    // held from load through save
    edit_lock: Arc<Mutex<()>>,
}

impl SidebarService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            edit_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Current state. Missing, unreadable or malformed entries load as empty.
    pub async fn load(&self) -> ExpansionState {
        let raw = match self.store.get(EXPANDED_STATE_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return ExpansionState::default(),
            Err(e) => {
                tracing::warn!("Could not read sidebar state: {:#}", e);
                return ExpansionState::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!("Ignoring malformed sidebar state: {}", e);
            ExpansionState::default()
        })
    }

    pub async fn toggle(&self, department: &str, section: Option<&str>) -> Result<ExpansionState, PortalError> {
        let _guard = self.edit_lock.lock().await;
        let mut state = self.load().await;
        state.toggle(node_key(department, section));
        self.save(&state).await?;
        Ok(state)
    }

    pub async fn set(
        &self,
        department: &str,
        section: Option<&str>,
        expanded: bool,
    ) -> Result<ExpansionState, PortalError> {
        let _guard = self.edit_lock.lock().await;
        let mut state = self.load().await;
        state.set(node_key(department, section), expanded);
        self.save(&state).await?;
        Ok(state)
    }

    async fn save(&self, state: &ExpansionState) -> Result<(), PortalError> {
        let raw = serde_json::to_string(state)?;
        self.store.set(EXPANDED_STATE_KEY, raw).await?;
        Ok(())
    }
}
