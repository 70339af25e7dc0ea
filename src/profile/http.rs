//! HTTP client seam used by the profile resolver.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;

use super::ProfileError;

/// Status and body of a completed request. Non-success statuses are returned
/// here rather than as errors, the resolver gives some of them meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Performs a single blocking GET. Implemented by [`ReqwestClient`] and by
/// mocks in tests.
pub trait HttpClient: Send + Sync {
    fn get(&self, url: &str) -> Result<HttpResponse, ProfileError>;
}

/// Real HTTP client using reqwest's blocking API.
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Creates a client whose requests give up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, ProfileError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProfileError::Failure(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<HttpResponse, ProfileError> {
        let response = self
            .client
            .get(url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .map_err(|e| ProfileError::Failure(format!("request failed: {}", e)))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .map_err(|e| ProfileError::Failure(format!("failed to read response: {}", e)))?;

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}
