use serde::{Deserialize, Serialize};

use symbi::ArtifactSubmission;

use crate::gateway::error::GatewayError;

/// Body of `POST /assess`. Fields are optional so missing ones map to a 400 with a message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssessRequest {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl AssessRequest {
    pub fn into_submission(self) -> Result<ArtifactSubmission, GatewayError> {
        let filename = self
            .filename
            .ok_or_else(|| GatewayError::InvalidRequest("filename is required".to_string()))?;
        let content = self
            .content
            .ok_or_else(|| GatewayError::InvalidRequest("content is required".to_string()))?;
        Ok(ArtifactSubmission::new(filename, content))
    }
}

/// Body of the debug endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentRequest {
    #[serde(default)]
    pub content: Option<String>,
}

impl ContentRequest {
    pub fn into_content(self) -> Result<String, GatewayError> {
        self.content
            .ok_or_else(|| GatewayError::InvalidRequest("content is required".to_string()))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmergenceQuery {
    #[serde(default)]
    pub window: Option<String>,
}

impl EmergenceQuery {
    /// `None` when absent; parse failures are rejected.
    pub fn window(&self) -> Result<Option<usize>, GatewayError> {
        match self.window.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse().map(Some).map_err(|_| {
                GatewayError::InvalidRequest(format!(
                    "window must be a positive integer, got {raw:?}"
                ))
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub deleted: bool,
    pub assessment_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
