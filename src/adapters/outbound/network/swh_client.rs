use crate::ports::outbound::{SwhRelease, SwhReleaseLookup};
use crate::shared::error::SpdxToOsvError;
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;

/// SwhClient adapter for the Software Heritage archive API
///
/// Resolves release objects so that `swh:1:rel:` identifiers can be
/// queried by the revision they point at.
pub struct SwhClient {
    client: reqwest::Client,
    base_url: String,
}

impl SwhClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://archive.softwareheritage.org/api/1";

    /// Creates a new Software Heritage client
    ///
    /// # Arguments
    /// * `base_url` - API root without trailing slash
    /// * `timeout` - Per-request network timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Validates a release hash before it becomes part of a URL
    fn validate_release_id(release_id: &str) -> Result<()> {
        if release_id.len() != 40 || !release_id.bytes().all(|b| b.is_ascii_hexdigit()) {
            anyhow::bail!(
                "Security: release id '{}' is not a 40-character hexadecimal hash",
                release_id
            );
        }
        Ok(())
    }

    fn release_url(&self, release_id: &str) -> String {
        format!(
            "{}/release/{}/",
            self.base_url,
            urlencoding::encode(release_id)
        )
    }
}

#[async_trait]
impl SwhReleaseLookup for SwhClient {
    async fn fetch_release(&self, release_id: &str) -> Result<SwhRelease> {
        Self::validate_release_id(release_id)?;
        let url = self.release_url(release_id);

        let response = self.client.get(&url).send().await.map_err(|e| {
            SpdxToOsvError::SwhApi {
                message: format!("request to {} failed: {}", url, e),
            }
        })?;

        match response.status() {
            StatusCode::OK => Ok(response.json::<SwhRelease>().await?),
            StatusCode::NOT_FOUND => Err(SpdxToOsvError::SwhNotFound { url }.into()),
            status => Err(SpdxToOsvError::SwhApi {
                message: format!("{} returned status code {}", url, status),
            }
            .into()),
        }
    }
}
