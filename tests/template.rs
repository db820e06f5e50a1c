//! Tests for flow document generation.
mod common;
use common::*;
use flowsync::flow::{Binding, EVENTS_URI, FORWARD_NODE_NAME, Method, flow_key};
use flowsync::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_document_identity_fields() {
    let doc = generate("created", &contacts(), &hubspot());

    assert_eq!(doc.key, "created-contacts-hubspot");
    assert_eq!(doc.name, "created Contacts");
    assert_eq!(doc.integration_id, "abc");
    assert_eq!(doc.file_name(), "created-contacts-hubspot.yaml");
}

#[test]
fn test_flow_key_joins_triple() {
    assert_eq!(flow_key("deleted", "deals", "salesforce"), "deleted-deals-salesforce");
}

#[test]
fn test_trigger_node_shape() {
    let doc = generate("updated", &contacts(), &hubspot());
    let trigger = &doc.nodes.trigger;

    assert_eq!(trigger.node_type, "data-record-updated-trigger");
    assert_eq!(trigger.name, "updated: Contacts");
    assert_eq!(trigger.config.data_source.collection_key, "contacts");
    assert_eq!(trigger.links.len(), 1);
}

#[test]
fn test_trigger_links_to_forwarding_node() {
    for event in ["created", "updated", "deleted"] {
        let doc = generate(event, &contacts(), &hubspot());
        assert_eq!(doc.trigger_target(), Some(FORWARD_NODE_KEY));
        assert_eq!(doc.nodes.forward.node_type, FORWARD_NODE_KEY);
        assert!(doc.is_connected());

        // The serialized node map must contain the link target as a key.
        let value = serde_json::to_value(&doc).unwrap();
        let nodes = value["nodes"].as_object().unwrap();
        assert_eq!(nodes.len(), 2);
        assert!(nodes.contains_key("trigger"));
        assert!(nodes.contains_key(doc.trigger_target().unwrap()));
    }
}

#[test]
fn test_forwarding_request_shape() {
    let doc = generate("created", &contacts(), &hubspot());
    let forward = &doc.nodes.forward;
    let request = &forward.config.request;

    assert_eq!(forward.name, FORWARD_NODE_NAME);
    assert_eq!(request.uri, EVENTS_URI);
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.body.trigger_type, "created");
    assert_eq!(request.body.integration_key, Binding::var("$.integration.key"));
    assert_eq!(request.body.connection_id, Binding::var("$.connection.id"));
    assert_eq!(
        request.body.instance_key,
        Binding::var("$.flowInstance.instanceKey")
    );
    assert_eq!(request.body.data, Binding::var("$.input.trigger"));

    let value = serde_json::to_value(&doc).unwrap();
    let body = &value["nodes"]["api-request-to-your-app"]["config"]["request"];
    assert_eq!(body["method"], json!("POST"));
    assert_eq!(body["body"]["connectionId"], json!({ "$var": "$.connection.id" }));
    assert_eq!(body["body"]["triggerType"], json!("created"));
}

#[test]
fn test_no_schema_means_no_parameter_bindings() {
    let doc = generate("created", &contacts(), &hubspot());
    let value = serde_json::to_value(&doc).unwrap();

    assert!(value.get("parametersSchema").is_none());
    assert!(
        value["nodes"]["trigger"]["config"]["dataSource"]
            .get("collectionParameters")
            .is_none()
    );
    assert!(
        value["nodes"]["api-request-to-your-app"]["config"]["request"]["body"]
            .get("parameters")
            .is_none()
    );
    assert!(!doc.to_yaml().unwrap().contains("parameters"));
}

#[test]
fn test_schema_adds_all_three_parameter_bindings() {
    let mut collection = contacts();
    collection.parameters_schema = Some(parameters_schema());

    let doc = generate("created", &collection, &hubspot());
    let value = serde_json::to_value(&doc).unwrap();
    let flow_parameters = json!({ "$var": "$.flowInstance.parameters" });

    assert_eq!(value["parametersSchema"], parameters_schema());
    assert_eq!(
        value["nodes"]["trigger"]["config"]["dataSource"]["collectionParameters"],
        flow_parameters
    );
    assert_eq!(
        value["nodes"]["api-request-to-your-app"]["config"]["request"]["body"]["parameters"],
        flow_parameters
    );
}

#[test]
fn test_generation_is_deterministic() {
    let mut collection = contacts();
    collection.parameters_schema = Some(parameters_schema());

    let first = generate("created", &collection, &hubspot());
    let second = generate("created", &collection, &hubspot());

    assert_eq!(first, second);
    assert_eq!(first.to_yaml().unwrap(), second.to_yaml().unwrap());
    assert_eq!(
        serde_json::to_vec(&first).unwrap(),
        serde_json::to_vec(&second).unwrap()
    );
}

#[test]
fn test_top_level_field_order() {
    let mut collection = contacts();
    collection.parameters_schema = Some(parameters_schema());
    let doc = generate("created", &collection, &hubspot());

    let value = serde_json::to_value(&doc).unwrap();
    let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
    assert_eq!(
        keys,
        ["key", "name", "integrationId", "parametersSchema", "nodes"]
    );
}

#[test]
fn test_yaml_artifact_parses_back() {
    let mut collection = contacts();
    collection.parameters_schema = Some(parameters_schema());
    let doc = generate("updated", &collection, &hubspot());

    let yaml = doc.to_yaml().unwrap();
    assert!(yaml.starts_with("key: updated-contacts-hubspot\n"));
    assert_eq!(FlowDocument::from_yaml(&yaml).unwrap(), doc);
}

#[test]
fn test_hubspot_contacts_produces_two_documents() {
    let collection = contacts();
    let integration = hubspot();

    let docs: Vec<FlowDocument> = collection
        .event_types()
        .map(|event| generate(event, &collection, &integration))
        .collect();

    let keys: Vec<&str> = docs.iter().map(|d| d.key.as_str()).collect();
    assert_eq!(keys, ["created-contacts-hubspot", "updated-contacts-hubspot"]);
    assert!(docs.iter().all(|d| d.parameters_schema.is_none()));
}
