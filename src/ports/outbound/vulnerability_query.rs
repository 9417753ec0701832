use crate::osv_conversion::domain::{OsvVulnerability, VulnerabilityRequest};
use crate::shared::Result;
use async_trait::async_trait;

/// VulnerabilityQuery port for looking up vulnerabilities of one request
///
/// # Async Support
/// Requests are independent of each other and are issued concurrently,
/// so implementations must be `Send + Sync`.
#[async_trait]
pub trait VulnerabilityQuery: Send + Sync {
    /// Queries the vulnerability database for a single request
    ///
    /// # Arguments
    /// * `request` - Package identity with version, or a commit
    ///
    /// # Returns
    /// The vulnerability records affecting the request; empty when none
    ///
    /// # Errors
    /// Returns an error if:
    /// - The network request fails or times out
    /// - The service answers with an error message
    /// - The response cannot be parsed
    async fn query(&self, request: &VulnerabilityRequest) -> Result<Vec<OsvVulnerability>>;
}
