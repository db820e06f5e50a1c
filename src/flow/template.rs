use super::definition::*;
use crate::catalog::{Collection, Integration};

/// Builds the flow document that forwards `event_type` events of `collection` to the app.
///
/// Pure and deterministic: the same inputs always yield the same document. When the
/// collection declares a parameters schema, three things are added together: the
/// schema itself at the top level, a `collectionParameters` binding on the trigger's
/// data source, and a `parameters` binding in the forwarded payload.
pub fn generate(event_type: &str, collection: &Collection, integration: &Integration) -> FlowDocument {
    let parameters_schema = collection.parameters_schema.clone();
    let flow_parameters = || {
        parameters_schema
            .as_ref()
            .map(|_| Binding::var(Binding::FLOW_PARAMETERS))
    };

    let trigger = TriggerNode {
        node_type: format!("data-record-{}-trigger", event_type),
        name: format!("{}: {}", event_type, collection.name),
        config: TriggerConfig {
            data_source: DataSource {
                collection_key: collection.key.clone(),
                collection_parameters: flow_parameters(),
            },
        },
        links: vec![NodeLink {
            key: FORWARD_NODE_KEY.to_string(),
        }],
    };

    let forward = ForwardNode {
        node_type: FORWARD_NODE_KEY.to_string(),
        name: FORWARD_NODE_NAME.to_string(),
        config: ForwardConfig {
            request: ForwardRequest {
                uri: EVENTS_URI.to_string(),
                method: Method::Post,
                body: EventPayload {
                    integration_key: Binding::var(Binding::INTEGRATION_KEY),
                    connection_id: Binding::var(Binding::CONNECTION_ID),
                    instance_key: Binding::var(Binding::INSTANCE_KEY),
                    trigger_type: event_type.to_string(),
                    data: Binding::var(Binding::TRIGGER_INPUT),
                    parameters: flow_parameters(),
                },
            },
        },
    };

    FlowDocument {
        key: flow_key(event_type, &collection.key, &integration.key),
        name: format!("{} {}", event_type, collection.name),
        integration_id: integration.id.clone(),
        parameters_schema,
        nodes: FlowNodes { trigger, forward },
    }
}

/// `{event}-{collection}-{integration}`, unique for every distinct triple.
pub fn flow_key(event_type: &str, collection_key: &str, integration_key: &str) -> String {
    format!("{}-{}-{}", event_type, collection_key, integration_key)
}
