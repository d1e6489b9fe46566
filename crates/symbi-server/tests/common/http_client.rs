//! HTTP client helpers for tests.

use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(DEFAULT_TIMEOUT_SECS);
const POLL_ATTEMPTS: usize = 500;
const POLL_INTERVAL: Duration = Duration::from_millis(10);

pub struct TestClient {
    client: reqwest::Client,
    base_url: String,
    tenant: Option<String>,
}

impl TestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
            tenant: None,
        }
    }

    /// Sends `X-Tenant-Id` on every request.
    pub fn with_tenant(mut self, tenant: &str) -> Self {
        self.tenant = Some(tenant.to_string());
        self
    }

    fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }

    fn add_headers(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let builder = builder.header("Content-Type", "application/json");
        match &self.tenant {
            Some(tenant) => builder.header("X-Tenant-Id", tenant),
            None => builder,
        }
    }

    /// Returns the receipt and the `X-Symbi-Status` header.
    pub async fn assess(
        &self,
        filename: &str,
        content: &str,
    ) -> Result<(Receipt, String), TestClientError> {
        let builder = self.add_headers(self.client.post(self.url("/assess")));
        let resp = builder
            .json(&serde_json::json!({ "filename": filename, "content": content }))
            .send()
            .await?;

        let status_header = resp
            .headers()
            .get("x-symbi-status")
            .and_then(|h| h.to_str().ok())
            .unwrap_or("unknown")
            .to_string();

        match resp.status().as_u16() {
            200 | 202 => Ok((resp.json().await?, status_header)),
            400 => Err(TestClientError::BadRequest(resp.text().await?)),
            status => {
                let body = resp.text().await.unwrap_or_default();
                Err(TestClientError::UnexpectedStatus(status, body))
            }
        }
    }

    pub async fn assessment(&self, id: &str) -> Result<serde_json::Value, TestClientError> {
        self.get_json(&format!("/assess/{id}")).await
    }

    /// Polls until the record leaves `processing`.
    pub async fn wait_for_terminal(&self, id: &str) -> Result<serde_json::Value, TestClientError> {
        for _ in 0..POLL_ATTEMPTS {
            let record = self.assessment(id).await?;
            if record["status"] != "processing" {
                return Ok(record);
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
        Err(TestClientError::StillProcessing(id.to_string()))
    }

    pub async fn assessments(&self) -> Result<Vec<serde_json::Value>, TestClientError> {
        let value = self.get_json("/assessments").await?;
        Ok(value.as_array().cloned().unwrap_or_default())
    }

    pub async fn delete(&self, id: &str) -> Result<u16, TestClientError> {
        let resp = self
            .add_headers(self.client.delete(self.url(&format!("/assess/{id}"))))
            .send()
            .await?;
        Ok(resp.status().as_u16())
    }

    pub async fn emergence(&self, window: Option<usize>) -> Result<serde_json::Value, TestClientError> {
        match window {
            Some(n) => self.get_json(&format!("/emergence?window={n}")).await,
            None => self.get_json("/emergence").await,
        }
    }

    pub async fn compare(&self) -> Result<serde_json::Value, TestClientError> {
        self.get_json("/compare-assessments").await
    }

    pub async fn metrics(&self) -> Result<serde_json::Value, TestClientError> {
        self.get_json("/metrics").await
    }

    pub async fn health(&self) -> Result<HealthResponse, TestClientError> {
        let resp = self.client.get(self.url("/healthz")).send().await?;

        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            Err(TestClientError::UnexpectedStatus(status, body))
        }
    }

    async fn get_json(&self, path: &str) -> Result<serde_json::Value, TestClientError> {
        let resp = self.add_headers(self.client.get(self.url(path))).send().await?;

        match resp.status().as_u16() {
            200 => Ok(resp.json().await?),
            400 => Err(TestClientError::BadRequest(resp.text().await?)),
            404 => Err(TestClientError::NotFound(path.to_string())),
            status => {
                let body = resp.text().await.unwrap_or_default();
                Err(TestClientError::UnexpectedStatus(status, body))
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub assessment_id: String,
    pub status: String,
    pub content_hash: String,
    pub word_count: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TestClientError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Unexpected HTTP status: {0} - Body: {1}")]
    UnexpectedStatus(u16, String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Assessment {0} still processing")]
    StillProcessing(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_url_building() {
        let client = TestClient::new("http://localhost:8080");
        assert_eq!(client.url("/healthz"), "http://localhost:8080/healthz");
        assert_eq!(client.url("assess/abc"), "http://localhost:8080/assess/abc");
    }
}
