//! Common test utilities: an in-memory catalog, an in-memory store and a recording observer.
use async_trait::async_trait;
use flowsync::error::PersistError;
use flowsync::prelude::*;
use flowsync::sync::StoredFlow;
use serde_json::{Map, Value, json};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::result::Result;
use std::sync::Mutex;
use tracing::Level;

/// A scripted [`Catalog`] that remembers every flow created through it.
///
/// Creating a flow whose key was already created fails the same way the real
/// service does, with a `bad_request` "already exists" error.
#[derive(Default)]
#[allow(dead_code)]
pub struct FakeCatalog {
    fail_integration_listing: bool,
    integrations: Vec<Integration>,
    collections: HashMap<String, Vec<CollectionSummary>>,
    details: HashMap<(String, String), CollectionDetail>,
    failing_collection_listings: HashSet<String>,
    failing_details: HashSet<(String, String)>,
    rejected_flows: HashSet<String>,
    created: Mutex<Vec<FlowDocument>>,
    detail_requests: Mutex<Vec<(String, String, tokio::time::Instant)>>,
}

#[allow(dead_code)]
impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_integration(mut self, key: &str, id: &str) -> Self {
        self.integrations.push(Integration {
            id: id.to_string(),
            key: key.to_string(),
            name: key.to_uppercase(),
        });
        self.collections.entry(key.to_string()).or_default();
        self
    }

    pub fn with_collection(
        mut self,
        integration_key: &str,
        summary: CollectionSummary,
        detail: CollectionDetail,
    ) -> Self {
        self.details
            .insert((integration_key.to_string(), summary.key.clone()), detail);
        self.collections
            .entry(integration_key.to_string())
            .or_default()
            .push(summary);
        self
    }

    pub fn failing_integration_listing(mut self) -> Self {
        self.fail_integration_listing = true;
        self
    }

    pub fn failing_collection_listing(mut self, integration_key: &str) -> Self {
        self.failing_collection_listings
            .insert(integration_key.to_string());
        self
    }

    pub fn failing_detail(mut self, integration_key: &str, collection_key: &str) -> Self {
        self.failing_details
            .insert((integration_key.to_string(), collection_key.to_string()));
        self
    }

    pub fn rejecting_flow(mut self, flow_key: &str) -> Self {
        self.rejected_flows.insert(flow_key.to_string());
        self
    }

    pub fn created(&self) -> Vec<FlowDocument> {
        self.created.lock().unwrap().clone()
    }

    pub fn created_keys(&self) -> Vec<String> {
        self.created().into_iter().map(|d| d.key).collect()
    }

    pub fn detail_requests(&self) -> Vec<(String, String, tokio::time::Instant)> {
        self.detail_requests.lock().unwrap().clone()
    }
}

#[allow(dead_code)]
fn server_error(message: &str) -> CatalogError {
    CatalogError::Api {
        status: 500,
        kind: "internal_server_error".to_string(),
        message: message.to_string(),
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn list_integrations(&self) -> Result<Vec<Integration>, CatalogError> {
        if self.fail_integration_listing {
            return Err(server_error("catalog unavailable"));
        }
        Ok(self.integrations.clone())
    }

    async fn list_collections(
        &self,
        integration_key: &str,
    ) -> Result<Vec<CollectionSummary>, CatalogError> {
        if self.failing_collection_listings.contains(integration_key) {
            return Err(server_error("collections unavailable"));
        }
        Ok(self
            .collections
            .get(integration_key)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_collection(
        &self,
        integration_key: &str,
        collection_key: &str,
    ) -> Result<CollectionDetail, CatalogError> {
        let id = (integration_key.to_string(), collection_key.to_string());
        self.detail_requests.lock().unwrap().push((
            id.0.clone(),
            id.1.clone(),
            tokio::time::Instant::now(),
        ));
        if self.failing_details.contains(&id) {
            return Err(server_error("collection unavailable"));
        }
        self.details.get(&id).cloned().ok_or_else(|| CatalogError::Api {
            status: 404,
            kind: "not_found".to_string(),
            message: format!("Collection {} not found", collection_key),
        })
    }

    async fn create_flow(&self, document: &FlowDocument) -> Result<(), CatalogError> {
        if self.rejected_flows.contains(&document.key) {
            return Err(server_error("flow rejected"));
        }
        let mut created = self.created.lock().unwrap();
        if created.iter().any(|d| d.key == document.key) {
            return Err(CatalogError::bad_request(format!(
                "Flow with key \"{}\" already exists",
                document.key
            )));
        }
        created.push(document.clone());
        Ok(())
    }
}

/// Keeps saved documents in memory, keyed by path.
#[derive(Default)]
#[allow(dead_code)]
pub struct MemoryFlowStore {
    files: Mutex<HashMap<PathBuf, FlowDocument>>,
}

#[allow(dead_code)]
impl MemoryFlowStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.files.lock().unwrap().len()
    }

    pub fn get(&self, integration_key: &str, flow_key: &str) -> Option<FlowDocument> {
        let path = PathBuf::from(integration_key).join(format!("{}.yaml", flow_key));
        self.files.lock().unwrap().get(&path).cloned()
    }
}

#[async_trait]
impl FlowStore for MemoryFlowStore {
    async fn save(
        &self,
        integration_key: &str,
        document: &FlowDocument,
    ) -> Result<StoredFlow, PersistError> {
        let mut files = self.files.lock().unwrap();
        let dir = PathBuf::from(integration_key);
        let created_dir = !files.keys().any(|p| p.starts_with(&dir));
        let path = dir.join(document.file_name());
        files.insert(path.clone(), document.clone());
        Ok(StoredFlow { path, created_dir })
    }
}

/// Owned copy of [`TraversalEvent::scope`].
#[allow(dead_code)]
pub type RecordedScope = (Option<String>, Option<String>, Option<String>);

/// Captures every traversal event as its level, rendered message and scope.
#[derive(Default)]
#[allow(dead_code)]
pub struct RecordingObserver {
    events: Mutex<Vec<(Level, String, RecordedScope)>>,
}

#[allow(dead_code)]
impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|(_, m, _)| m.clone())
            .collect()
    }

    pub fn at_level(&self, level: Level) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _, _)| *l == level)
            .map(|(_, m, _)| m.clone())
            .collect()
    }

    pub fn count_containing(&self, needle: &str) -> usize {
        self.messages().iter().filter(|m| m.contains(needle)).count()
    }

    /// Scopes of every event whose message contains `needle`, in order.
    pub fn scopes_containing(&self, needle: &str) -> Vec<RecordedScope> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, m, _)| m.contains(needle))
            .map(|(_, _, scope)| scope.clone())
            .collect()
    }
}

impl TraversalObserver for RecordingObserver {
    fn on_event(&self, event: &TraversalEvent<'_>) {
        let (integration, collection, event_type) = event.scope();
        let scope = (
            integration.map(str::to_string),
            collection.map(str::to_string),
            event_type.map(str::to_string),
        );
        self.events
            .lock()
            .unwrap()
            .push((event.level(), event.to_string(), scope));
    }
}

/// Owned scope tuple, for comparing against [`RecordingObserver::scopes_containing`].
#[allow(dead_code)]
pub fn recorded(integration: &str, collection: &str, event_type: &str) -> RecordedScope {
    (
        Some(integration.to_string()),
        Some(collection.to_string()),
        Some(event_type.to_string()),
    )
}

/// Scope of a `hubspot` / `contacts` event.
#[allow(dead_code)]
pub fn contacts_scope(event_type: &str) -> EventScope<'_> {
    EventScope::new("hubspot", "contacts", event_type)
}

#[allow(dead_code)]
pub fn hubspot() -> Integration {
    Integration {
        id: "abc".to_string(),
        key: "hubspot".to_string(),
        name: "HubSpot".to_string(),
    }
}

/// Builds an event map from event type names, preserving their order.
#[allow(dead_code)]
pub fn events(names: &[&str]) -> Map<String, Value> {
    names
        .iter()
        .map(|name| (name.to_string(), json!({})))
        .collect()
}

#[allow(dead_code)]
pub fn contacts() -> Collection {
    Collection {
        key: "contacts".to_string(),
        name: "Contacts".to_string(),
        events: events(&["created", "updated"]),
        parameters_schema: None,
    }
}

#[allow(dead_code)]
pub fn parameters_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "listId": { "type": "string", "title": "List" }
        },
        "required": ["listId"]
    })
}

#[allow(dead_code)]
pub fn summary(key: &str, name: &str) -> CollectionSummary {
    CollectionSummary {
        key: key.to_string(),
        name: Some(name.to_string()),
    }
}

#[allow(dead_code)]
pub fn detail_with_events(names: &[&str]) -> CollectionDetail {
    CollectionDetail {
        events: Some(events(names)),
        ..Default::default()
    }
}
