use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key, and node type, of the node that relays trigger events to the application.
///
/// Must match the `rename` on [`FlowNodes::forward`].
pub const FORWARD_NODE_KEY: &str = "api-request-to-your-app";
pub const FORWARD_NODE_NAME: &str = "Send event to API";
/// Relative path the forwarding node posts events to.
pub const EVENTS_URI: &str = "/events";

/// The complete flow document submitted to the remote store and written to disk.
///
/// Field order is the serialized order, so generated files are stable.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlowDocument {
    pub key: String,
    pub name: String,
    pub integration_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters_schema: Option<Value>,
    pub nodes: FlowNodes,
}

/// The two-node graph: one trigger linked to one forwarding node.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FlowNodes {
    pub trigger: TriggerNode,
    #[serde(rename = "api-request-to-your-app")]
    pub forward: ForwardNode,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TriggerNode {
    #[serde(rename = "type")]
    pub node_type: String,
    pub name: String,
    pub config: TriggerConfig,
    pub links: Vec<NodeLink>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TriggerConfig {
    pub data_source: DataSource,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DataSource {
    pub collection_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_parameters: Option<Binding>,
}

/// An outgoing edge, naming the target node by key.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NodeLink {
    pub key: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ForwardNode {
    #[serde(rename = "type")]
    pub node_type: String,
    pub name: String,
    pub config: ForwardConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ForwardConfig {
    pub request: ForwardRequest,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Post,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ForwardRequest {
    pub uri: String,
    pub method: Method,
    pub body: EventPayload,
}

/// Body of the request sent to the application for every trigger event.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub integration_key: Binding,
    pub connection_id: Binding,
    pub instance_key: Binding,
    /// Literal event type, fixed when the document is generated.
    pub trigger_type: String,
    pub data: Binding,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Binding>,
}

/// A value resolved by the flow engine at run time, e.g. `{ $var: $.connection.id }`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    #[serde(rename = "$var")]
    pub var: String,
}

impl Binding {
    pub const INTEGRATION_KEY: &'static str = "$.integration.key";
    pub const CONNECTION_ID: &'static str = "$.connection.id";
    pub const INSTANCE_KEY: &'static str = "$.flowInstance.instanceKey";
    pub const TRIGGER_INPUT: &'static str = "$.input.trigger";
    pub const FLOW_PARAMETERS: &'static str = "$.flowInstance.parameters";

    pub fn var(path: &str) -> Self {
        Self {
            var: path.to_string(),
        }
    }
}
