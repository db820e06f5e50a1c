use crate::config::SyncConfig;
use crate::error::PersistError;
use crate::flow::FlowDocument;
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Where a document ended up, and whether its directory had to be created first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFlow {
    pub path: PathBuf,
    pub created_dir: bool,
}

/// Local persistence for generated flow documents.
#[async_trait]
pub trait FlowStore: Send + Sync {
    /// Writes `document` under the integration's directory, replacing any prior copy.
    async fn save(
        &self,
        integration_key: &str,
        document: &FlowDocument,
    ) -> Result<StoredFlow, PersistError>;
}

/// Stores flows as `<root>/flows/<integrationKey>/<flowKey>.yaml`.
#[derive(Debug, Clone)]
pub struct FsFlowStore {
    root: PathBuf,
}

impl FsFlowStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_config(config: &SyncConfig) -> Self {
        Self::new(&config.output_root)
    }

    pub fn integration_dir(&self, integration_key: &str) -> PathBuf {
        self.root.join("flows").join(integration_key)
    }
}

#[async_trait]
impl FlowStore for FsFlowStore {
    async fn save(
        &self,
        integration_key: &str,
        document: &FlowDocument,
    ) -> Result<StoredFlow, PersistError> {
        check_segment(integration_key)?;
        check_segment(&document.key)?;

        let dir = self.integration_dir(integration_key);
        let created_dir = !fs::try_exists(&dir).await.unwrap_or(false);
        if created_dir {
            fs::create_dir_all(&dir)
                .await
                .map_err(|source| PersistError::CreateDir {
                    path: dir.clone(),
                    source,
                })?;
        }

        let path = dir.join(document.file_name());
        let yaml = document.to_yaml()?;
        fs::write(&path, yaml)
            .await
            .map_err(|source| PersistError::Write {
                path: path.clone(),
                source,
            })?;

        Ok(StoredFlow { path, created_dir })
    }
}

/// Keys come from the remote catalog and must name exactly one normal path component.
fn check_segment(key: &str) -> Result<(), PersistError> {
    let mut components = Path::new(key).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !key.contains(['/', '\\']) => Ok(()),
        _ => Err(PersistError::UnsafeKey {
            key: key.to_string(),
        }),
    }
}
