use crate::error::CatalogError;
use crate::flow::FlowDocument;
use async_trait::async_trait;

pub mod http;
pub mod model;

pub use http::HttpCatalog;
pub use model::*;

/// The remote integration service: catalog reads plus flow creation.
///
/// This is the whole surface the traversal depends on. Transport, authentication and
/// pagination are the implementation's business.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Lists every integration in the workspace, in the order the service returns them.
    async fn list_integrations(&self) -> Result<Vec<Integration>, CatalogError>;

    /// Lists the data collections exposed by one integration.
    async fn list_collections(
        &self,
        integration_key: &str,
    ) -> Result<Vec<CollectionSummary>, CatalogError>;

    /// Fetches a collection's full detail, including its events and parameters schema.
    async fn get_collection(
        &self,
        integration_key: &str,
        collection_key: &str,
    ) -> Result<CollectionDetail, CatalogError>;

    /// Creates a flow in the remote store. Fails if a flow with the same key exists.
    async fn create_flow(&self, document: &FlowDocument) -> Result<(), CatalogError>;
}
