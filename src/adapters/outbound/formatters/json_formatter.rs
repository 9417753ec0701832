use crate::osv_conversion::domain::OsvVulnerability;
use crate::ports::outbound::VulnerabilityFormatter;
use crate::shared::Result;
use std::collections::BTreeMap;

/// JsonFormatter adapter rendering the report as a JSON array of OSV records
///
/// Records are de-duplicated by id (first occurrence wins) and sorted by id,
/// so that two runs over the same document produce identical output even
/// though queries complete in arbitrary order.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl VulnerabilityFormatter for JsonFormatter {
    fn format(&self, vulnerabilities: &[OsvVulnerability]) -> Result<String> {
        let mut by_id: BTreeMap<&str, &OsvVulnerability> = BTreeMap::new();
        for vulnerability in vulnerabilities {
            by_id.entry(vulnerability.id.as_str()).or_insert(vulnerability);
        }

        let records: Vec<&OsvVulnerability> = by_id.into_values().collect();
        serde_json::to_string_pretty(&records).map_err(Into::into)
    }
}
