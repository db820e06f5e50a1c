//! REST implementation of the [`Catalog`] trait.

use super::{Catalog, CollectionDetail, CollectionSummary, Integration};
use crate::config::ClientConfig;
use crate::error::{CatalogError, ConfigError};
use crate::flow::FlowDocument;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

/// A page of results. Some endpoints return a bare array instead.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum Listing<T> {
    Page {
        items: Vec<T>,
        #[serde(default)]
        cursor: Option<String>,
    },
    Bare(Vec<T>),
}

impl<T> Listing<T> {
    fn into_parts(self) -> (Vec<T>, Option<String>) {
        match self {
            Listing::Page { items, cursor } => (items, cursor.filter(|c| !c.is_empty())),
            Listing::Bare(items) => (items, None),
        }
    }
}

/// Error payload returned by the service on non-success responses.
#[derive(Deserialize, Default)]
struct ApiErrorBody {
    #[serde(rename = "type")]
    kind: Option<String>,
    message: Option<String>,
}

/// Talks to the integration service over HTTPS with a bearer token.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    base_url: Url,
    token: String,
}

impl HttpCatalog {
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ConfigError::Client)?;
        Ok(Self {
            client,
            base_url: config.base_url,
            token: config.token,
        })
    }

    /// Appends path segments to the base URL, escaping each one.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, CatalogError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CatalogError::InvalidEndpoint(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder, url: &Url) -> Result<String, CatalogError> {
        let response = request
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|source| CatalogError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| CatalogError::Http {
            url: url.to_string(),
            source,
        })?;

        if status.is_client_error() || status.is_server_error() {
            return Err(api_error(status, &body));
        }
        Ok(body)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, CatalogError> {
        debug!(%url, "GET");
        let body = self.send(self.client.get(url.clone()), &url).await?;
        serde_json::from_str(&body).map_err(|e| CatalogError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

/// Turns an error response into [`CatalogError::Api`], tolerating non-JSON bodies.
pub fn api_error(status: StatusCode, body: &str) -> CatalogError {
    let parsed: ApiErrorBody = serde_json::from_str(body).unwrap_or_default();
    let kind = parsed.kind.unwrap_or_else(|| match status {
        StatusCode::BAD_REQUEST => "bad_request".to_string(),
        other => other.as_u16().to_string(),
    });
    let message = parsed.message.unwrap_or_else(|| body.trim().to_string());
    CatalogError::Api {
        status: status.as_u16(),
        kind,
        message,
    }
}

#[async_trait]
impl Catalog for HttpCatalog {
    async fn list_integrations(&self) -> Result<Vec<Integration>, CatalogError> {
        let mut integrations = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let mut url = self.endpoint(&["integrations"])?;
            if let Some(c) = &cursor {
                url.query_pairs_mut().append_pair("cursor", c);
            }
            let page: Listing<Integration> = self.get_json(url).await?;
            let (items, next) = page.into_parts();
            let exhausted = items.is_empty();
            integrations.extend(items);

            match next {
                Some(next) if !exhausted && cursor.as_deref() != Some(next.as_str()) => {
                    cursor = Some(next)
                }
                _ => break,
            }
        }
        Ok(integrations)
    }

    async fn list_collections(
        &self,
        integration_key: &str,
    ) -> Result<Vec<CollectionSummary>, CatalogError> {
        let url = self.endpoint(&["integrations", integration_key, "data"])?;
        let listing: Listing<CollectionSummary> = self.get_json(url).await?;
        Ok(listing.into_parts().0)
    }

    async fn get_collection(
        &self,
        integration_key: &str,
        collection_key: &str,
    ) -> Result<CollectionDetail, CatalogError> {
        let url = self.endpoint(&["integrations", integration_key, "data", collection_key])?;
        self.get_json(url).await
    }

    async fn create_flow(&self, document: &FlowDocument) -> Result<(), CatalogError> {
        let url = self.endpoint(&["flows"])?;
        debug!(%url, flow_key = %document.key, "POST");
        self.send(self.client.post(url.clone()).json(document), &url)
            .await
            .map(|_| ())
    }
}
