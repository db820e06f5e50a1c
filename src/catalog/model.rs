use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A third-party system registered in the workspace catalog.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Integration {
    pub id: String,
    pub key: String,
    #[serde(default)]
    pub name: String,
}

/// A collection as it appears in an integration's collection listing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CollectionSummary {
    pub key: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// The detail response for a single collection.
///
/// The service does not always echo the collection key or name back, so both are
/// optional here and get backfilled from the [`CollectionSummary`].
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CollectionDetail {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub events: Option<Map<String, Value>>,
    #[serde(default)]
    pub parameters_schema: Option<Value>,
}

impl CollectionDetail {
    /// Merges the listing entry into the detail response.
    ///
    /// The key always comes from the summary. The summary name wins when present, the
    /// detail name is the fallback. Returns `None` when neither carries a name.
    pub fn into_collection(self, summary: &CollectionSummary) -> Option<Collection> {
        let name = non_empty(summary.name.clone()).or_else(|| non_empty(self.name))?;
        Some(Collection {
            key: summary.key.clone(),
            name,
            events: self.events.unwrap_or_default(),
            parameters_schema: self.parameters_schema,
        })
    }
}

/// A fully resolved collection descriptor, ready for flow generation.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    pub key: String,
    pub name: String,
    /// Event type name to event metadata, in catalog order.
    pub events: Map<String, Value>,
    pub parameters_schema: Option<Value>,
}

impl Collection {
    /// The event types this collection can emit.
    pub fn event_types(&self) -> impl Iterator<Item = &str> {
        self.events.keys().map(String::as_str)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

