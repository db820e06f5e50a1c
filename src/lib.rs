//! # flowsync - Trigger Flow Generation and Sync
//!
//! **flowsync** turns an integration catalog into trigger flows. For every integration,
//! every data collection it exposes, and every event type that collection emits, it
//! generates a flow document that listens for the event and forwards it to your
//! application. It then writes the document to disk and creates it in the remote flow
//! store.
//!
//! ## Core Workflow
//!
//! 1.  **Authenticate**: Issue a workspace token with [`auth::WorkspaceCredentials`].
//! 2.  **Connect**: Build an [`catalog::HttpCatalog`] from a [`config::ClientConfig`], or
//!     bring your own [`catalog::Catalog`] implementation.
//! 3.  **Traverse**: Create a [`traverse::Traversal`] with a [`sync::FlowStore`] and run
//!     it. Each event type yields one [`flow::FlowDocument`], built by
//!     [`flow::generate`] and synchronized by [`sync::SyncExecutor`].
//! 4.  **Inspect**: The returned [`traverse::RunReport`] records what happened at every
//!     node; failures below the integration listing never abort the run.
//!
//! Re-running is safe. Local files are overwritten, and flows the remote store already
//! holds come back as [`sync::SyncOutcome::AlreadyExists`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use flowsync::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let credentials = WorkspaceCredentials::new("workspace-key", "workspace-secret")?;
//!     let config = ClientConfig::new(DEFAULT_API_URI, credentials.issue_token()?)?;
//!     let catalog = HttpCatalog::new(config)?;
//!     let store = FsFlowStore::new("./dist");
//!
//!     let report = Traversal::builder(&catalog, &store).build().run().await?;
//!     println!("{}", report.tally());
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod flow;
pub mod prelude;
pub mod sync;
pub mod trace;
pub mod traverse;
