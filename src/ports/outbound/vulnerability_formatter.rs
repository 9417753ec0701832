use crate::osv_conversion::domain::OsvVulnerability;
use crate::shared::Result;

/// VulnerabilityFormatter port for rendering the query results
pub trait VulnerabilityFormatter {
    /// Formats the vulnerability records found during a run
    ///
    /// # Arguments
    /// * `vulnerabilities` - Every record returned by the queries, possibly
    ///   with duplicates across requests
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, vulnerabilities: &[OsvVulnerability]) -> Result<String>;
}
