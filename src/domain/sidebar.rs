// Sidebar expand/collapse state
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Fixed key under which the expansion map is persisted.
pub const EXPANDED_STATE_KEY: &str = "portal.sidebar.expanded";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpansionState {
    nodes: IndexMap<String, bool>,
}

/// `dept` for a department node, `dept::section` for a section node.
pub fn node_key(department: &str, section: Option<&str>) -> String {
    match section {
        Some(section) => format!("{}::{}", department, section),
        None => department.to_string(),
    }
}

impl ExpansionState {
    pub fn is_expanded(&self, key: &str) -> bool {
        self.nodes.get(key).copied().unwrap_or(false)
    }

    pub fn set(&mut self, key: String, expanded: bool) {
        self.nodes.insert(key, expanded);
    }

    /// Flip a node; absent nodes count as collapsed. Returns the new value.
    pub fn toggle(&mut self, key: String) -> bool {
        let next = !self.is_expanded(&key);
        self.nodes.insert(key, next);
        next
    }

    pub fn entries(&self) -> &IndexMap<String, bool> {
        &self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_key() {
        assert_eq!(node_key("Finance", None), "Finance");
        assert_eq!(node_key("Finance", Some("Payables")), "Finance::Payables");
    }

    #[test]
    fn test_toggle_from_absent() {
        let mut state = ExpansionState::default();
        assert!(state.toggle("Finance".to_string()));
        assert!(state.is_expanded("Finance"));
        assert!(!state.toggle("Finance".to_string()));
        assert!(!state.is_expanded("Finance"));
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let mut state = ExpansionState::default();
        state.set("HR".to_string(), true);
        state.set("HR::Payroll".to_string(), false);
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"HR":true,"HR::Payroll":false}"#);
    }
}
