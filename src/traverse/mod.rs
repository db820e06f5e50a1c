use crate::catalog::{Catalog, CollectionSummary, Integration};
use crate::config::{DEFAULT_REQUEST_DELAY, SyncConfig};
use crate::error::TraverseError;
use crate::flow::template;
use crate::sync::{FlowStore, SyncExecutor};
use crate::trace::{
    CollectionError, EventScope, TracingObserver, TraversalEvent, TraversalObserver,
};
use std::time::Duration;

mod report;
mod throttle;

pub use report::*;
pub use throttle::Throttle;

static DEFAULT_OBSERVER: TracingObserver = TracingObserver;

/// Walks integrations, their collections, and each collection's event types, syncing
/// one flow document per event type.
///
/// Strictly sequential. Only the initial integration listing can fail the run; any
/// other failure is recorded in the [`RunReport`] and the walk moves on to the next
/// sibling.
pub struct Traversal<'a> {
    catalog: &'a dyn Catalog,
    executor: SyncExecutor<'a>,
    observer: &'a dyn TraversalObserver,
    throttle: Throttle,
}

pub struct TraversalBuilder<'a> {
    catalog: &'a dyn Catalog,
    store: &'a dyn FlowStore,
    observer: &'a dyn TraversalObserver,
    request_delay: Duration,
}

impl<'a> TraversalBuilder<'a> {
    pub fn new(catalog: &'a dyn Catalog, store: &'a dyn FlowStore) -> Self {
        Self {
            catalog,
            store,
            observer: &DEFAULT_OBSERVER,
            request_delay: DEFAULT_REQUEST_DELAY,
        }
    }

    pub fn with_observer(mut self, observer: &'a dyn TraversalObserver) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    /// Applies the run settings that concern the walk itself.
    pub fn with_config(self, config: &SyncConfig) -> Self {
        self.with_request_delay(config.request_delay)
    }

    pub fn build(self) -> Traversal<'a> {
        Traversal {
            catalog: self.catalog,
            executor: SyncExecutor::new(self.catalog, self.store, self.observer),
            observer: self.observer,
            throttle: Throttle::new(self.request_delay),
        }
    }
}

impl<'a> Traversal<'a> {
    pub fn builder(catalog: &'a dyn Catalog, store: &'a dyn FlowStore) -> TraversalBuilder<'a> {
        TraversalBuilder::new(catalog, store)
    }

    /// Runs the full walk. Fails only if the integration list cannot be fetched.
    pub async fn run(&self) -> Result<RunReport, TraverseError> {
        self.notify(TraversalEvent::Started);
        let integrations = self
            .catalog
            .list_integrations()
            .await
            .map_err(TraverseError::ListIntegrations)?;
        self.notify(TraversalEvent::IntegrationsFound {
            count: integrations.len(),
        });

        let mut report = RunReport::default();
        for integration in &integrations {
            report
                .integrations
                .push(self.visit_integration(integration).await);
        }

        self.notify(TraversalEvent::Completed {
            tally: &report.tally(),
        });
        Ok(report)
    }

    async fn visit_integration(&self, integration: &Integration) -> IntegrationReport {
        let key = integration.key.as_str();
        self.notify(TraversalEvent::IntegrationStarted { integration: key });

        let summaries = match self.catalog.list_collections(key).await {
            Ok(summaries) => summaries,
            Err(error) => {
                self.notify(TraversalEvent::IntegrationFailed {
                    integration: key,
                    error: &error,
                });
                return IntegrationReport {
                    key: key.to_string(),
                    status: NodeStatus::Failed(error.to_string()),
                    collections: Vec::new(),
                };
            }
        };
        self.notify(TraversalEvent::CollectionsFound {
            integration: key,
            count: summaries.len(),
        });

        let mut collections = Vec::with_capacity(summaries.len());
        for summary in &summaries {
            collections.push(self.visit_collection(integration, summary).await);
        }

        IntegrationReport {
            key: key.to_string(),
            status: NodeStatus::Processed,
            collections,
        }
    }

    async fn visit_collection(
        &self,
        integration: &Integration,
        summary: &CollectionSummary,
    ) -> CollectionReport {
        let integration_key = integration.key.as_str();
        let collection_key = summary.key.as_str();
        self.notify(TraversalEvent::CollectionStarted {
            integration: integration_key,
            collection: collection_key,
        });

        self.throttle.pause().await;

        let detail = match self
            .catalog
            .get_collection(integration_key, collection_key)
            .await
        {
            Ok(detail) => detail,
            Err(error) => {
                self.notify(TraversalEvent::CollectionFailed {
                    integration: integration_key,
                    collection: collection_key,
                    error: CollectionError::Fetch(&error),
                });
                return CollectionReport::failed(collection_key, &error);
            }
        };

        let Some(collection) = detail.into_collection(summary) else {
            let error = TraverseError::MissingCollectionName {
                integration_key: integration_key.to_string(),
                collection_key: collection_key.to_string(),
            };
            self.notify(TraversalEvent::CollectionFailed {
                integration: integration_key,
                collection: collection_key,
                error: CollectionError::Resolve(&error),
            });
            return CollectionReport::failed(collection_key, &error);
        };
        self.notify(TraversalEvent::CollectionFetched {
            integration: integration_key,
            collection: &collection,
        });

        if collection.events.is_empty() {
            self.notify(TraversalEvent::CollectionSkipped {
                integration: integration_key,
                collection: collection_key,
            });
            return CollectionReport::skipped(collection_key, "no events");
        }

        let event_types: Vec<&str> = collection.event_types().collect();
        self.notify(TraversalEvent::EventsFound {
            integration: integration_key,
            collection: collection_key,
            event_types: &event_types,
        });

        let mut events = Vec::with_capacity(event_types.len());
        for &event_type in &event_types {
            self.notify(TraversalEvent::EventStarted {
                integration: integration_key,
                collection: collection_key,
                event_type,
            });
            let document = template::generate(event_type, &collection, integration);
            let scope = EventScope::new(integration_key, collection_key, event_type);
            let outcome = self.executor.sync(scope, &document).await;
            events.push(EventReport {
                event_type: event_type.to_string(),
                flow_key: document.key,
                outcome,
            });
        }

        CollectionReport::processed(collection_key, events)
    }

    fn notify(&self, event: TraversalEvent<'_>) {
        self.observer.on_event(&event);
    }
}
