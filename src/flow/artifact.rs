use super::definition::{FORWARD_NODE_KEY, FlowDocument};
use crate::error::PersistError;

/// Extension of the flow files written to local storage.
pub const FLOW_FILE_EXTENSION: &str = "yaml";

impl FlowDocument {
    /// Renders the document in the YAML form stored on disk.
    pub fn to_yaml(&self) -> Result<String, PersistError> {
        serde_yaml::to_string(self).map_err(|source| PersistError::Serialize {
            key: self.key.clone(),
            source,
        })
    }

    /// Parses a document previously produced by [`FlowDocument::to_yaml`].
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Name of the file this document is stored under, e.g. `created-contacts-hubspot.yaml`.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.key, FLOW_FILE_EXTENSION)
    }

    /// The key of the node the trigger links to, if it has exactly one link.
    pub fn trigger_target(&self) -> Option<&str> {
        match self.nodes.trigger.links.as_slice() {
            [link] => Some(link.key.as_str()),
            _ => None,
        }
    }

    /// True when the trigger's only link points at the forwarding node.
    pub fn is_connected(&self) -> bool {
        self.trigger_target() == Some(FORWARD_NODE_KEY)
            && self.nodes.forward.node_type == FORWARD_NODE_KEY
    }
}
