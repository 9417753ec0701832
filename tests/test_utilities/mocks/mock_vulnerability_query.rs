use spdx_to_osv::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Mock VulnerabilityQuery answering from a table keyed by package name
/// or commit; records every request it receives.
#[derive(Default, Clone)]
pub struct MockVulnerabilityQuery {
    pub records: HashMap<String, Vec<OsvVulnerability>>,
    pub failing: HashSet<String>,
    pub seen: Arc<Mutex<Vec<VulnerabilityRequest>>>,
}

impl MockVulnerabilityQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vulnerability(mut self, key: &str, id: &str) -> Self {
        self.records
            .entry(key.to_string())
            .or_default()
            .push(OsvVulnerability::new(id));
        self
    }

    pub fn with_failure_for(mut self, key: &str) -> Self {
        self.failing.insert(key.to_string());
        self
    }

    pub fn seen_requests(&self) -> Vec<VulnerabilityRequest> {
        self.seen.lock().unwrap().clone()
    }

    /// Package names (or commits) of every request received, sorted
    pub fn seen_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.seen_requests().iter().map(Self::key).collect();
        keys.sort();
        keys
    }

    fn key(request: &VulnerabilityRequest) -> String {
        match (request.package_identity(), request.commit_id()) {
            (Some(package), _) => package.name().to_string(),
            (None, Some(commit)) => commit.to_string(),
            (None, None) => String::new(),
        }
    }
}

#[async_trait::async_trait]
impl VulnerabilityQuery for MockVulnerabilityQuery {
    async fn query(&self, request: &VulnerabilityRequest) -> Result<Vec<OsvVulnerability>> {
        self.seen.lock().unwrap().push(request.clone());
        let key = Self::key(request);
        if self.failing.contains(&key) {
            anyhow::bail!("OSV API returned status 500 Internal Server Error");
        }
        Ok(self.records.get(&key).cloned().unwrap_or_default())
    }
}
