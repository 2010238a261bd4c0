//! Trait seam over the two backend endpoints.

use async_trait::async_trait;

use codefix_core::Result;

use crate::protocol::AnalysisResponse;

/// A proposed fix as the panel stores it. The explanation stays raw
/// labeled text; it is parsed only when the explanation tab is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutcome {
    pub fixed_code: String,
    pub explanation: String,
}

/// The two remote operations the panel can drive. `ServiceClient`
/// implements this against the real backend; tests drive the orchestrator
/// with counting mocks instead.
#[async_trait]
pub trait CodeFixApi: Send + Sync {
    async fn fix_code(&self, code: &str) -> Result<FixOutcome>;
    async fn static_analysis(&self, code: &str) -> Result<AnalysisResponse>;
}
