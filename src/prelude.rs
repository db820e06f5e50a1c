//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the flowsync
//! crate. Import it to get the core functionality without importing each type
//! individually.

// Catalog access
pub use crate::catalog::{
    Catalog, Collection, CollectionDetail, CollectionSummary, HttpCatalog, Integration,
};

// Flow documents
pub use crate::flow::{FORWARD_NODE_KEY, FlowDocument, generate};

// Sync and traversal
pub use crate::sync::{FlowStore, FsFlowStore, SyncExecutor, SyncOutcome, is_already_exists};
pub use crate::trace::{EventScope, TracingObserver, TraversalEvent, TraversalObserver};
pub use crate::traverse::{NodeStatus, RunReport, RunTally, Traversal};

// Configuration and auth
pub use crate::auth::WorkspaceCredentials;
pub use crate::config::{ClientConfig, DEFAULT_API_URI, SyncConfig};

// Error types
pub use crate::error::{AuthError, CatalogError, ConfigError, PersistError, SyncError, TraverseError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
