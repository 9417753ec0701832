use crate::osv_conversion::domain::{Diagnostic, OsvVulnerability};

/// ConversionResponse - Internal response DTO from the conversion use case
#[derive(Debug, Clone, Default)]
pub struct ConversionResponse {
    /// Every record returned by the queries, in completion order
    pub vulnerabilities: Vec<OsvVulnerability>,
    /// Packages considered relevant
    pub relevant_package_count: usize,
    /// De-duplicated requests issued
    pub request_count: usize,
    /// Requests whose query failed
    pub failed_query_count: usize,
    /// Non-fatal problems met during the run
    pub diagnostics: Vec<Diagnostic>,
}

impl ConversionResponse {
    pub fn has_vulnerabilities(&self) -> bool {
        !self.vulnerabilities.is_empty()
    }
}
