use crate::catalog::Catalog;
use crate::error::{CatalogError, SyncError};
use crate::flow::FlowDocument;
use crate::trace::{EventScope, TraversalEvent, TraversalObserver};

pub mod store;

pub use store::*;

/// Result of synchronizing one flow document.
#[derive(Debug)]
pub enum SyncOutcome {
    Created,
    /// The remote store already holds a flow with this key.
    AlreadyExists,
    Failed(SyncError),
}

impl SyncOutcome {
    /// `Created` and `AlreadyExists` both leave the flow present remotely.
    pub fn is_success(&self) -> bool {
        !matches!(self, SyncOutcome::Failed(_))
    }
}

/// Recognizes the flow store's duplicate-key rejection.
///
/// The service signals a duplicate only through a `bad_request` error whose message
/// says the flow "already exists"; there is no dedicated status code. Any change to
/// that wording breaks this check, so it lives here and nowhere else.
pub fn is_already_exists(error: &CatalogError) -> bool {
    match error {
        CatalogError::Api { kind, message, .. } => {
            kind == "bad_request" && message.contains("already exists")
        }
        _ => false,
    }
}

/// Writes flow documents to local storage and submits them to the remote store.
///
/// Never returns an error: every failure becomes [`SyncOutcome::Failed`].
pub struct SyncExecutor<'a> {
    catalog: &'a dyn Catalog,
    store: &'a dyn FlowStore,
    observer: &'a dyn TraversalObserver,
}

impl<'a> SyncExecutor<'a> {
    pub fn new(
        catalog: &'a dyn Catalog,
        store: &'a dyn FlowStore,
        observer: &'a dyn TraversalObserver,
    ) -> Self {
        Self {
            catalog,
            store,
            observer,
        }
    }

    /// Persists `document` under `scope.integration`, then submits it.
    pub async fn sync(&self, scope: EventScope<'_>, document: &FlowDocument) -> SyncOutcome {
        let outcome = match self.persist_and_submit(scope, document).await {
            Ok(outcome) => outcome,
            Err(error) => SyncOutcome::Failed(error),
        };

        let flow_key = document.key.as_str();
        match &outcome {
            SyncOutcome::Created => self.notify(TraversalEvent::FlowCreated { scope, flow_key }),
            SyncOutcome::AlreadyExists => {
                self.notify(TraversalEvent::FlowExists { scope, flow_key })
            }
            SyncOutcome::Failed(error) => self.notify(TraversalEvent::FlowFailed {
                scope,
                flow_key,
                error,
            }),
        }
        outcome
    }

    async fn persist_and_submit(
        &self,
        scope: EventScope<'_>,
        document: &FlowDocument,
    ) -> Result<SyncOutcome, SyncError> {
        let stored = self.store.save(scope.integration, document).await?;
        if stored.created_dir {
            if let Some(dir) = stored.path.parent() {
                self.notify(TraversalEvent::DirectoryCreated { scope, path: dir });
            }
        }
        self.notify(TraversalEvent::FlowWritten {
            scope,
            flow_key: &document.key,
            path: &stored.path,
        });

        self.notify(TraversalEvent::FlowSubmitting {
            scope,
            flow_key: &document.key,
        });
        match self.catalog.create_flow(document).await {
            Ok(()) => Ok(SyncOutcome::Created),
            Err(error) if is_already_exists(&error) => Ok(SyncOutcome::AlreadyExists),
            Err(error) => Err(SyncError::Submit(error)),
        }
    }

    fn notify(&self, event: TraversalEvent<'_>) {
        self.observer.on_event(&event);
    }
}
