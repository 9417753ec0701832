use spdx_to_osv::ports::outbound::SwhRelease;
use spdx_to_osv::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock SwhReleaseLookup resolving known releases; unknown ones fail
#[derive(Default, Clone)]
pub struct MockSwhReleaseLookup {
    pub targets: HashMap<String, String>,
    pub call_count: Arc<AtomicUsize>,
}

impl MockSwhReleaseLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_release(mut self, release: &str, revision: &str) -> Self {
        self.targets
            .insert(release.to_string(), revision.to_string());
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl SwhReleaseLookup for MockSwhReleaseLookup {
    async fn fetch_release(&self, release_id: &str) -> Result<SwhRelease> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        match self.targets.get(release_id) {
            Some(revision) => Ok(SwhRelease {
                id: release_id.to_string(),
                name: Some("v1.0.0".to_string()),
                date: None,
                message: None,
                target: revision.clone(),
                target_type: "revision".to_string(),
                target_url: None,
            }),
            None => anyhow::bail!("release {} not found", release_id),
        }
    }
}
