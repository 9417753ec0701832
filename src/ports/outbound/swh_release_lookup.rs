use crate::shared::Result;
use async_trait::async_trait;
use serde::Deserialize;

/// Software Heritage release metadata.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SwhRelease {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Hash of the object the release points at
    pub target: String,
    /// `revision`, `release`, `directory` or `content`
    pub target_type: String,
    #[serde(default)]
    pub target_url: Option<String>,
}

impl SwhRelease {
    /// The revision hash, when the release targets a revision.
    pub fn target_revision(&self) -> Option<&str> {
        (self.target_type == "revision").then_some(self.target.as_str())
    }
}

/// SwhReleaseLookup port for resolving Software Heritage releases
#[async_trait]
pub trait SwhReleaseLookup: Send + Sync {
    /// Fetches the release with the given identifier hash
    ///
    /// # Arguments
    /// * `release_id` - 40-character release hash
    ///
    /// # Errors
    /// Returns an error if the release does not exist or the archive API
    /// fails
    async fn fetch_release(&self, release_id: &str) -> Result<SwhRelease>;
}
