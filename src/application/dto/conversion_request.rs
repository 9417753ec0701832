use super::InputFormat;
use crate::osv_conversion::parsers::MavenNaming;
use crate::osv_conversion::services::RelevanceMode;
use crate::shared::error::SpdxToOsvError;
use crate::shared::Result;
use std::path::PathBuf;

/// ConversionRequest - Internal request DTO for the conversion use case
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    /// Path to the SPDX document
    pub input_path: PathBuf,
    pub input_format: InputFormat,
    /// Reachable packages only, or every package
    pub relevance_mode: RelevanceMode,
    pub maven_naming: MavenNaming,
    /// Upper bound on queries in flight
    pub max_concurrent_queries: usize,
    /// Whether `swh:1:rel:` identifiers are resolved to their revision
    pub resolve_swh_releases: bool,
}

impl ConversionRequest {
    pub const DEFAULT_MAX_CONCURRENT_QUERIES: usize = 10;
    pub const MAX_CONCURRENT_QUERIES_LIMIT: usize = 64;

    pub fn new(input_path: PathBuf, input_format: InputFormat) -> Self {
        Self {
            input_path,
            input_format,
            relevance_mode: RelevanceMode::default(),
            maven_naming: MavenNaming::default(),
            max_concurrent_queries: Self::DEFAULT_MAX_CONCURRENT_QUERIES,
            resolve_swh_releases: false,
        }
    }

    pub fn with_relevance_mode(mut self, relevance_mode: RelevanceMode) -> Self {
        self.relevance_mode = relevance_mode;
        self
    }

    pub fn with_maven_naming(mut self, maven_naming: MavenNaming) -> Self {
        self.maven_naming = maven_naming;
        self
    }

    pub fn with_max_concurrent_queries(mut self, max_concurrent_queries: usize) -> Self {
        self.max_concurrent_queries = max_concurrent_queries;
        self
    }

    pub fn with_resolve_swh_releases(mut self, resolve_swh_releases: bool) -> Self {
        self.resolve_swh_releases = resolve_swh_releases;
        self
    }

    /// Checks the bounds of the tunable values.
    pub fn validate(&self) -> Result<()> {
        if !(1..=Self::MAX_CONCURRENT_QUERIES_LIMIT).contains(&self.max_concurrent_queries) {
            return Err(SpdxToOsvError::Validation {
                message: format!(
                    "max concurrent queries must be between 1 and {}, got {}",
                    Self::MAX_CONCURRENT_QUERIES_LIMIT,
                    self.max_concurrent_queries
                ),
            }
            .into());
        }
        Ok(())
    }
}
