//! Request and response types for the fix/analysis backend API.
//! Wire names mirror the service's JSON exactly.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── Fix ─────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct FixRequest {
    pub code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixResponse {
    pub fixed_code: String,
    pub short_explanation: String,
}

// ── Static analysis ─────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AnalysisRequest {
    pub code: String,
}

/// Tool fields stay raw JSON: a tool that failed server-side may come back
/// as null or an error object instead of an array, and the aggregator needs
/// to see that instead of deserialization rejecting the whole response.
#[derive(Debug, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default)]
    pub pylint: Value,
    #[serde(default)]
    pub mypy: Value,
    #[serde(default)]
    pub bandit: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use codefix_core::analysis::ToolReport;

    #[test]
    fn fix_request_serializes_bare_code_field() {
        let body = serde_json::to_value(FixRequest {
            code: "x=1".to_string(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"code": "x=1"}));
    }

    #[test]
    fn fix_response_uses_camel_case_wire_names() {
        let resp: FixResponse = serde_json::from_str(
            r#"{"fixedCode": "x = 1", "shortExplanation": "Issue: style"}"#,
        )
        .unwrap();
        assert_eq!(resp.fixed_code, "x = 1");
        assert_eq!(resp.short_explanation, "Issue: style");
    }

    #[test]
    fn analysis_response_keeps_tool_fields_raw() {
        let resp: AnalysisResponse = serde_json::from_str(
            r#"{"pylint": [{"line": 1, "message": "m", "severity": "error"}],
                "mypy": "crashed",
                "bandit": []}"#,
        )
        .unwrap();
        assert!(resp.pylint.is_array());
        assert!(ToolReport::from_raw(&resp.mypy).is_failed());
        assert_eq!(ToolReport::from_raw(&resp.bandit), ToolReport::Issues(vec![]));
    }

    #[test]
    fn missing_tool_field_reads_as_null() {
        let resp: AnalysisResponse = serde_json::from_str(r#"{"pylint": []}"#).unwrap();
        assert!(resp.mypy.is_null());
        assert!(ToolReport::from_raw(&resp.bandit).is_failed());
    }
}
