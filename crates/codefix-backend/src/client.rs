//! HTTP client for the fix/analysis backend.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

use codefix_core::{CodefixError, Result};

use crate::api::{CodeFixApi, FixOutcome};
use crate::protocol::*;

/// Client for the backend API. One request per user action; retry is a
/// UI-level re-invocation, never done here.
pub struct ServiceClient {
    client: Client,
    base_url: String,
}

impl ServiceClient {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client, base_url }
    }

    /// Request an AI fix for the given code.
    #[instrument(skip(self, code))]
    pub async fn fix_code(&self, code: &str) -> Result<FixOutcome> {
        let url = format!("{}/api/fix-code", self.base_url);
        let req = FixRequest {
            code: code.to_string(),
        };
        let resp = self
            .client
            .post(&url)
            .json(&req)
            .send()
            .await
            .map_err(|e| CodefixError::Transport(e.to_string()))?
            .error_for_status()
            .map_err(|e| CodefixError::Transport(e.to_string()))?;
        let fix: FixResponse = resp
            .json()
            .await
            .map_err(|e| CodefixError::MalformedResult(e.to_string()))?;
        debug!(bytes = fix.fixed_code.len(), "Fix received");
        Ok(FixOutcome {
            fixed_code: fix.fixed_code,
            explanation: fix.short_explanation,
        })
    }

    /// Run the three static-analysis tools on the given code.
    #[instrument(skip(self, code))]
    pub async fn static_analysis(&self, code: &str) -> Result<AnalysisResponse> {
        let url = format!("{}/api/static-analysis", self.base_url);
        let req = AnalysisRequest {
            code: code.to_string(),
        };
        let resp = self
            .client
            .post(&url)
            .json(&req)
            .send()
            .await
            .map_err(|e| CodefixError::Transport(e.to_string()))?
            .error_for_status()
            .map_err(|e| CodefixError::Transport(e.to_string()))?;
        let analysis: AnalysisResponse = resp
            .json()
            .await
            .map_err(|e| CodefixError::MalformedResult(e.to_string()))?;
        debug!("Analysis received");
        Ok(analysis)
    }
}

#[async_trait]
impl CodeFixApi for ServiceClient {
    async fn fix_code(&self, code: &str) -> Result<FixOutcome> {
        ServiceClient::fix_code(self, code).await
    }

    async fn static_analysis(&self, code: &str) -> Result<AnalysisResponse> {
        ServiceClient::static_analysis(self, code).await
    }
}
