use crate::sync::SyncOutcome;
use std::fmt;

/// How far processing of one catalog node got.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeStatus {
    Processed,
    /// Nothing to do, e.g. a collection without events.
    Skipped(String),
    /// The node was abandoned; siblings carried on.
    Failed(String),
}

#[derive(Debug)]
pub struct EventReport {
    pub event_type: String,
    pub flow_key: String,
    pub outcome: SyncOutcome,
}

#[derive(Debug)]
pub struct CollectionReport {
    pub key: String,
    pub status: NodeStatus,
    pub events: Vec<EventReport>,
}

impl CollectionReport {
    pub(crate) fn processed(key: &str, events: Vec<EventReport>) -> Self {
        Self {
            key: key.to_string(),
            status: NodeStatus::Processed,
            events,
        }
    }

    pub(crate) fn skipped(key: &str, reason: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            status: NodeStatus::Skipped(reason.into()),
            events: Vec::new(),
        }
    }

    pub(crate) fn failed(key: &str, reason: impl fmt::Display) -> Self {
        Self {
            key: key.to_string(),
            status: NodeStatus::Failed(reason.to_string()),
            events: Vec::new(),
        }
    }
}

#[derive(Debug)]
pub struct IntegrationReport {
    pub key: String,
    pub status: NodeStatus,
    pub collections: Vec<CollectionReport>,
}

impl IntegrationReport {
    /// Every flow this integration produced, across all of its collections.
    pub fn flows(&self) -> impl Iterator<Item = &EventReport> {
        self.collections.iter().flat_map(|c| c.events.iter())
    }
}

/// Everything a traversal run did, node by node, in processing order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub integrations: Vec<IntegrationReport>,
}

impl RunReport {
    pub fn flows(&self) -> impl Iterator<Item = &EventReport> {
        self.integrations.iter().flat_map(|i| i.flows())
    }

    pub fn integration(&self, key: &str) -> Option<&IntegrationReport> {
        self.integrations.iter().find(|i| i.key == key)
    }

    pub fn tally(&self) -> RunTally {
        let mut tally = RunTally::default();
        for integration in &self.integrations {
            match integration.status {
                NodeStatus::Failed(_) => tally.integrations_failed += 1,
                _ => tally.integrations_processed += 1,
            }
            for collection in &integration.collections {
                match collection.status {
                    NodeStatus::Processed => tally.collections_processed += 1,
                    NodeStatus::Skipped(_) => tally.collections_skipped += 1,
                    NodeStatus::Failed(_) => tally.collections_failed += 1,
                }
            }
        }
        for flow in self.flows() {
            match flow.outcome {
                SyncOutcome::Created => tally.flows_created += 1,
                SyncOutcome::AlreadyExists => tally.flows_existing += 1,
                SyncOutcome::Failed(_) => tally.flows_failed += 1,
            }
        }
        tally
    }
}

/// Counts derived from a [`RunReport`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunTally {
    pub integrations_processed: usize,
    pub integrations_failed: usize,
    pub collections_processed: usize,
    pub collections_skipped: usize,
    pub collections_failed: usize,
    pub flows_created: usize,
    pub flows_existing: usize,
    pub flows_failed: usize,
}

impl fmt::Display for RunTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} integrations ({} failed), {} collections ({} skipped, {} failed), \
             {} flows created, {} already existed, {} failed",
            self.integrations_processed,
            self.integrations_failed,
            self.collections_processed,
            self.collections_skipped,
            self.collections_failed,
            self.flows_created,
            self.flows_existing,
            self.flows_failed
        )
    }
}
