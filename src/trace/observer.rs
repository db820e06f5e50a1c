use crate::catalog::Collection;
use crate::error::{CatalogError, SyncError, TraverseError};
use crate::traverse::RunTally;
use itertools::Itertools;
use serde_json::Value;
use std::fmt;
use std::path::Path;
use tracing::{Level, debug, error, info, warn};

/// A milestone reached while walking the catalog.
#[derive(Debug)]
pub enum TraversalEvent<'a> {
    Started,
    IntegrationsFound {
        count: usize,
    },
    IntegrationStarted {
        integration: &'a str,
    },
    CollectionsFound {
        integration: &'a str,
        count: usize,
    },
    IntegrationFailed {
        integration: &'a str,
        error: &'a CatalogError,
    },
    CollectionStarted {
        integration: &'a str,
        collection: &'a str,
    },
    CollectionFetched {
        integration: &'a str,
        collection: &'a Collection,
    },
    CollectionFailed {
        integration: &'a str,
        collection: &'a str,
        error: CollectionError<'a>,
    },
    CollectionSkipped {
        integration: &'a str,
        collection: &'a str,
    },
    EventsFound {
        integration: &'a str,
        collection: &'a str,
        event_types: &'a [&'a str],
    },
    EventStarted {
        integration: &'a str,
        collection: &'a str,
        event_type: &'a str,
    },
    DirectoryCreated {
        scope: EventScope<'a>,
        path: &'a Path,
    },
    FlowWritten {
        scope: EventScope<'a>,
        flow_key: &'a str,
        path: &'a Path,
    },
    FlowSubmitting {
        scope: EventScope<'a>,
        flow_key: &'a str,
    },
    FlowCreated {
        scope: EventScope<'a>,
        flow_key: &'a str,
    },
    FlowExists {
        scope: EventScope<'a>,
        flow_key: &'a str,
    },
    FlowFailed {
        scope: EventScope<'a>,
        flow_key: &'a str,
        error: &'a SyncError,
    },
    Completed {
        tally: &'a RunTally,
    },
}

/// The integration, collection and event type a flow document was generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventScope<'a> {
    pub integration: &'a str,
    pub collection: &'a str,
    pub event_type: &'a str,
}

impl<'a> EventScope<'a> {
    pub fn new(integration: &'a str, collection: &'a str, event_type: &'a str) -> Self {
        Self {
            integration,
            collection,
            event_type,
        }
    }
}

/// Why a collection was abandoned.
#[derive(Debug, Clone, Copy)]
pub enum CollectionError<'a> {
    Fetch(&'a CatalogError),
    Resolve(&'a TraverseError),
}

impl fmt::Display for CollectionError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionError::Fetch(e) => write!(f, "{}", e),
            CollectionError::Resolve(e) => write!(f, "{}", e),
        }
    }
}

impl TraversalEvent<'_> {
    pub fn level(&self) -> Level {
        match self {
            TraversalEvent::IntegrationFailed { .. }
            | TraversalEvent::CollectionFailed { .. }
            | TraversalEvent::FlowFailed { .. } => Level::ERROR,
            TraversalEvent::CollectionSkipped { .. } => Level::WARN,
            TraversalEvent::CollectionFetched { .. } => Level::DEBUG,
            _ => Level::INFO,
        }
    }

    /// The integration, collection and event type this event concerns, where known.
    pub fn scope(&self) -> (Option<&str>, Option<&str>, Option<&str>) {
        match *self {
            TraversalEvent::IntegrationStarted { integration }
            | TraversalEvent::CollectionsFound { integration, .. }
            | TraversalEvent::IntegrationFailed { integration, .. } => {
                (Some(integration), None, None)
            }
            TraversalEvent::CollectionStarted {
                integration,
                collection,
            }
            | TraversalEvent::CollectionFailed {
                integration,
                collection,
                ..
            }
            | TraversalEvent::CollectionSkipped {
                integration,
                collection,
            }
            | TraversalEvent::EventsFound {
                integration,
                collection,
                ..
            } => (Some(integration), Some(collection), None),
            TraversalEvent::CollectionFetched {
                integration,
                collection,
            } => (Some(integration), Some(collection.key.as_str()), None),
            TraversalEvent::EventStarted {
                integration,
                collection,
                event_type,
            } => (Some(integration), Some(collection), Some(event_type)),
            TraversalEvent::DirectoryCreated { scope, .. }
            | TraversalEvent::FlowWritten { scope, .. }
            | TraversalEvent::FlowSubmitting { scope, .. }
            | TraversalEvent::FlowCreated { scope, .. }
            | TraversalEvent::FlowExists { scope, .. }
            | TraversalEvent::FlowFailed { scope, .. } => (
                Some(scope.integration),
                Some(scope.collection),
                Some(scope.event_type),
            ),
            _ => (None, None, None),
        }
    }
}

impl fmt::Display for TraversalEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraversalEvent::Started => write!(f, "Starting flow generation"),
            TraversalEvent::IntegrationsFound { count } => {
                write!(f, "Found {} integrations", count)
            }
            TraversalEvent::IntegrationStarted { integration } => {
                write!(f, "Processing integration: {}", integration)
            }
            TraversalEvent::CollectionsFound { integration, count } => {
                write!(f, "Found {} data collections for {}", count, integration)
            }
            TraversalEvent::IntegrationFailed { integration, error } => {
                write!(f, "Error processing integration {}: {}", integration, error)
            }
            TraversalEvent::CollectionStarted { collection, .. } => {
                write!(f, "Processing collection: {}", collection)
            }
            TraversalEvent::CollectionFetched { collection, .. } => write!(
                f,
                "Collection detail for {}: name={}, events=[{}], parametersSchema={}",
                collection.key,
                collection.name,
                collection.event_types().join(", "),
                collection
                    .parameters_schema
                    .as_ref()
                    .map_or_else(|| "none".to_string(), Value::to_string)
            ),
            TraversalEvent::CollectionFailed {
                collection, error, ..
            } => write!(f, "Error processing collection {}: {}", collection, error),
            TraversalEvent::CollectionSkipped { collection, .. } => write!(
                f,
                "No events found for collection {}, skipping...",
                collection
            ),
            TraversalEvent::EventsFound {
                collection,
                event_types,
                ..
            } => write!(
                f,
                "Found {} events for collection {}: {}",
                event_types.len(),
                collection,
                event_types.iter().join(", ")
            ),
            TraversalEvent::EventStarted { event_type, .. } => {
                write!(f, "Processing event type: {}", event_type)
            }
            TraversalEvent::DirectoryCreated { path, .. } => {
                write!(f, "Creating directory: {}", path.display())
            }
            TraversalEvent::FlowWritten { path, .. } => {
                write!(f, "Writing flow template to {}", path.display())
            }
            TraversalEvent::FlowSubmitting { flow_key, .. } => {
                write!(f, "Creating flow: {}", flow_key)
            }
            TraversalEvent::FlowCreated { flow_key, .. } => {
                write!(f, "Flow {} created successfully", flow_key)
            }
            TraversalEvent::FlowExists { flow_key, .. } => {
                write!(f, "Flow {} already exists, skipping...", flow_key)
            }
            TraversalEvent::FlowFailed {
                flow_key, error, ..
            } => {
                write!(f, "Error syncing flow {}: {}", flow_key, error)
            }
            TraversalEvent::Completed { tally } => {
                write!(f, "Flow generation completed: {}", tally)
            }
        }
    }
}

/// Receives progress and failure reports from a traversal.
pub trait TraversalObserver: Send + Sync {
    fn on_event(&self, event: &TraversalEvent<'_>);
}

/// Forwards traversal events to `tracing`, the default sink.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl TraversalObserver for TracingObserver {
    fn on_event(&self, event: &TraversalEvent<'_>) {
        let (integration, collection, event_type) = event.scope();
        let flow_key = match *event {
            TraversalEvent::FlowWritten { flow_key, .. }
            | TraversalEvent::FlowSubmitting { flow_key, .. }
            | TraversalEvent::FlowCreated { flow_key, .. }
            | TraversalEvent::FlowExists { flow_key, .. }
            | TraversalEvent::FlowFailed { flow_key, .. } => Some(flow_key),
            _ => None,
        };

        let level = event.level();
        if level == Level::ERROR {
            error!(integration, collection, event_type, flow_key, "{}", event);
        } else if level == Level::WARN {
            warn!(integration, collection, event_type, flow_key, "{}", event);
        } else if level == Level::DEBUG {
            debug!(integration, collection, event_type, flow_key, "{}", event);
        } else {
            info!(integration, collection, event_type, flow_key, "{}", event);
        }
    }
}
