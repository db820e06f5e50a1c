use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by the integration catalog and flow store.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Request to '{url}' failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with an error payload.
    #[error("Service returned {status} ({kind}): {message}")]
    Api {
        status: u16,
        kind: String,
        message: String,
    },

    #[error("Failed to decode response from '{url}': {message}")]
    Decode { url: String, message: String },

    #[error("API URI '{0}' cannot carry path segments")]
    InvalidEndpoint(String),
}

impl CatalogError {
    /// Builds a client-side bad request error, the kind the flow store uses for duplicates.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Api {
            status: 400,
            kind: "bad_request".to_string(),
            message: message.into(),
        }
    }
}

/// Errors that can occur while writing a flow document to local storage.
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Could not create directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not write file '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Refusing to use '{key}' as a path segment")]
    UnsafeKey { key: String },

    #[error("Failed to serialize flow '{key}' to YAML: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Reason a single flow document could not be synchronized.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error(transparent)]
    Persist(#[from] PersistError),

    #[error("Error creating flow: {0}")]
    Submit(#[source] CatalogError),
}

/// Errors that abort a traversal run, or abandon one of its nodes.
#[derive(Error, Debug)]
pub enum TraverseError {
    #[error("Failed to list integrations: {0}")]
    ListIntegrations(#[source] CatalogError),

    #[error("Collection '{collection_key}' of integration '{integration_key}' has no name")]
    MissingCollectionName {
        integration_key: String,
        collection_key: String,
    },
}

/// Errors that can occur while issuing a workspace access token.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Workspace {0} must not be empty")]
    MissingCredential(&'static str),

    #[error("Failed to sign workspace token: {0}")]
    Sign(#[from] jsonwebtoken::errors::Error),
}

/// Errors raised while assembling client configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid API URI '{uri}': {source}")]
    InvalidUri {
        uri: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error(transparent)]
    Auth(#[from] AuthError),
}
