//! Workspace access tokens for the integration service.

use crate::error::AuthError;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Lifetime of an issued token. Kept short so a leaked token expires quickly.
pub const TOKEN_TTL: Duration = Duration::from_secs(7200);

/// Claims of an admin token for a workspace.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceClaims {
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
    /// Issuer: the workspace key.
    pub iss: String,
    pub iat: u64,
    pub exp: u64,
}

/// Key and secret identifying a workspace.
#[derive(Clone)]
pub struct WorkspaceCredentials {
    key: String,
    secret: String,
}

impl std::fmt::Debug for WorkspaceCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkspaceCredentials")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl WorkspaceCredentials {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Result<Self, AuthError> {
        let key = key.into();
        let secret = secret.into();
        if key.is_empty() {
            return Err(AuthError::MissingCredential("key"));
        }
        if secret.is_empty() {
            return Err(AuthError::MissingCredential("secret"));
        }
        Ok(Self { key, secret })
    }

    /// Issues an HS512-signed admin token valid for [`TOKEN_TTL`].
    pub fn issue_token(&self) -> Result<String, AuthError> {
        self.issue_token_with_ttl(TOKEN_TTL)
    }

    pub fn issue_token_with_ttl(&self, ttl: Duration) -> Result<String, AuthError> {
        let now = jsonwebtoken::get_current_timestamp();
        let claims = WorkspaceClaims {
            is_admin: true,
            iss: self.key.clone(),
            iat: now,
            exp: now + ttl.as_secs(),
        };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;
        Ok(token)
    }
}
