use crate::osv_conversion::domain::{OsvPackage, OsvVulnerability, VulnerabilityRequest};
use crate::osv_conversion::parsers::PurlParser;
use crate::ports::outbound::VulnerabilityQuery;
use crate::shared::error::SpdxToOsvError;
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OSV API client issuing one `/v1/query` call per request
///
/// The client is constructed once and handed to the use case; nothing about
/// it is global, so tests substitute a mock `VulnerabilityQuery` instead.
///
/// # Retries
/// Transport failures and 5xx answers are retried with a short linear
/// back-off. 4xx answers are reported immediately.
pub struct OsvClient {
    client: reqwest::Client,
    api_url: String,
    max_retries: u32,
}

impl OsvClient {
    pub const DEFAULT_API_URL: &'static str = "https://api.osv.dev/v1/query";
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
    const MAX_RETRIES: u32 = 3;
    /// Upper bound on result pages followed for one request
    const MAX_PAGES: usize = 20;

    /// Creates a new OSV API client
    ///
    /// # Arguments
    /// * `api_url` - Query endpoint, normally [`Self::DEFAULT_API_URL`]
    /// * `timeout` - Per-request network timeout
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.into(),
            max_retries: Self::MAX_RETRIES,
        })
    }

    /// Creates a client for the public OSV instance
    pub fn with_defaults() -> Result<Self> {
        Self::new(
            Self::DEFAULT_API_URL,
            Duration::from_secs(Self::DEFAULT_TIMEOUT_SECONDS),
        )
    }

    async fn post_with_retry(&self, query: &OsvQuery<'_>) -> Result<OsvQueryResponse> {
        let mut attempt = 1;
        loop {
            match self.post(query).await {
                Ok(response) => return Ok(response),
                Err(PostError::Fatal(e)) => return Err(e),
                Err(PostError::Retryable(e)) if attempt >= self.max_retries => return Err(e),
                Err(PostError::Retryable(e)) => {
                    tracing::debug!(attempt, error = %e, "retrying OSV query");
                    tokio::time::sleep(Duration::from_millis(100 * attempt as u64)).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn post(&self, query: &OsvQuery<'_>) -> std::result::Result<OsvQueryResponse, PostError> {
        let response = self
            .client
            .post(&self.api_url)
            .json(query)
            .send()
            .await
            .map_err(|e| PostError::Retryable(e.into()))?;

        let status = response.status();
        if status == StatusCode::OK {
            return response
                .json::<OsvQueryResponse>()
                .await
                .map_err(|e| PostError::Fatal(e.into()));
        }

        let body = response.text().await.unwrap_or_default();
        let error = SpdxToOsvError::OsvApi {
            message: error_message(status, &body),
        }
        .into();
        if status.is_server_error() {
            Err(PostError::Retryable(error))
        } else {
            Err(PostError::Fatal(error))
        }
    }
}

#[async_trait]
impl VulnerabilityQuery for OsvClient {
    async fn query(&self, request: &VulnerabilityRequest) -> Result<Vec<OsvVulnerability>> {
        let mut query = OsvQuery::from_request(request);
        let mut vulnerabilities = Vec::new();

        for _ in 0..Self::MAX_PAGES {
            let page = self.post_with_retry(&query).await?;
            vulnerabilities.extend(page.vulns);
            match page.next_page_token {
                Some(token) if !token.is_empty() => query.page_token = Some(token),
                _ => break,
            }
        }

        Ok(vulnerabilities)
    }
}

enum PostError {
    Retryable(anyhow::Error),
    Fatal(anyhow::Error),
}

/// The service answers errors as `{"code": .., "message": ".."}`.
fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<OsvErrorResponse>(body) {
        Ok(error) => format!("{} ({})", error.message, status),
        Err(_) => format!("OSV API returned status code {}", status),
    }
}

// OSV API request/response structures

#[derive(Debug, Serialize)]
struct OsvQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    commit: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    package: Option<OsvQueryPackage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_token: Option<String>,
}

/// Either a purl alone, or a name with an optional ecosystem; the service
/// rejects a purl combined with name/ecosystem.
#[derive(Debug, Serialize)]
struct OsvQueryPackage<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ecosystem: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    purl: Option<&'a str>,
}

impl<'a> OsvQuery<'a> {
    fn from_request(request: &'a VulnerabilityRequest) -> Self {
        match (request.commit_id(), request.package_identity()) {
            (Some(commit), _) => Self {
                commit: Some(commit),
                package: None,
                version: None,
                page_token: None,
            },
            (None, identity) => {
                let (package, purl_has_version) = identity.map(Self::package_of).unzip();
                // a versioned purl already pins the version
                let version = match purl_has_version {
                    Some(true) => None,
                    _ => request.version(),
                };
                Self {
                    commit: None,
                    package,
                    version,
                    page_token: None,
                }
            }
        }
    }

    fn package_of(identity: &'a OsvPackage) -> (OsvQueryPackage<'a>, bool) {
        match identity.purl() {
            Some(purl) => (
                OsvQueryPackage {
                    name: None,
                    ecosystem: None,
                    purl: Some(purl),
                },
                // '@' may also appear inside qualifiers or the subpath
                PurlParser::components(purl).is_ok_and(|c| c.version.is_some()),
            ),
            None => (
                OsvQueryPackage {
                    name: Some(identity.name()),
                    ecosystem: identity.ecosystem().map(|e| e.as_str()),
                    purl: None,
                },
                false,
            ),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OsvQueryResponse {
    #[serde(default)]
    vulns: Vec<OsvVulnerability>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OsvErrorResponse {
    message: String,
}
