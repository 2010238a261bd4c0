//! Normalization of static-analysis results into a uniform display model.
//!
//! The backend runs three independent tools and returns one issue array per
//! tool. Each tool's field is interpreted on its own: a non-array value
//! means that tool's run failed, which is not the same thing as an empty
//! array (a confirmed-clean run).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One independent analysis engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Pylint,
    Mypy,
    Bandit,
}

impl Tool {
    pub fn all() -> &'static [Tool] {
        &[Tool::Pylint, Tool::Mypy, Tool::Bandit]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tool::Pylint => "Pylint",
            Tool::Mypy => "Mypy",
            Tool::Bandit => "Bandit",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            Tool::Pylint => "Code quality & style checks",
            Tool::Mypy => "Type checking & validation",
            Tool::Bandit => "Security vulnerability scanning",
        }
    }
}

/// A single finding reported by a tool. Issue order is preserved exactly
/// as received; the panel never re-sorts by severity or line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(default)]
    pub line: u32,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub severity: String,
}

/// Display tier a raw severity string maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Critical,
    Warning,
    Info,
    Unknown,
}

impl Severity {
    /// Case-insensitive classification of whatever severity string a tool
    /// emitted. Unrecognized strings land in the Unknown tier rather than
    /// being dropped.
    pub fn classify(raw: &str) -> Severity {
        match raw.to_ascii_lowercase().as_str() {
            "error" | "high" | "critical" => Severity::Critical,
            "warning" | "medium" => Severity::Warning,
            "info" | "low" => Severity::Info,
            _ => Severity::Unknown,
        }
    }

    /// Fixed icon per tier; the matching color lives in the UI theme.
    pub fn icon(&self) -> &'static str {
        match self {
            Severity::Critical => "✗",
            Severity::Warning => "⚠",
            Severity::Info => "ℹ",
            Severity::Unknown => "?",
        }
    }
}

/// Outcome of one tool's run, as the panel will show it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolReport {
    /// The tool ran and produced a (possibly empty) issue list.
    Issues(Vec<Issue>),
    /// The response carried no issue array for this tool.
    Failed,
}

impl ToolReport {
    /// Interpret one tool's field from the raw service response.
    ///
    /// Anything that is not a JSON array counts as a failed run. Individual
    /// entries that are not issue objects degrade to a default issue rather
    /// than poisoning the rest of the list.
    pub fn from_raw(value: &Value) -> ToolReport {
        match value {
            Value::Array(items) => {
                let issues = items
                    .iter()
                    .map(|item| serde_json::from_value(item.clone()).unwrap_or_default())
                    .collect();
                ToolReport::Issues(issues)
            }
            _ => ToolReport::Failed,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ToolReport::Failed)
    }
}

/// Per-tool reports for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisReport {
    pub pylint: ToolReport,
    pub mypy: ToolReport,
    pub bandit: ToolReport,
}

impl AnalysisReport {
    /// Build the display model from the three raw response fields. Each
    /// tool is judged independently so one malformed field never hides the
    /// other two tools' results.
    pub fn from_raw(pylint: &Value, mypy: &Value, bandit: &Value) -> AnalysisReport {
        AnalysisReport {
            pylint: ToolReport::from_raw(pylint),
            mypy: ToolReport::from_raw(mypy),
            bandit: ToolReport::from_raw(bandit),
        }
    }

    pub fn get(&self, tool: Tool) -> &ToolReport {
        match tool {
            Tool::Pylint => &self.pylint,
            Tool::Mypy => &self.mypy,
            Tool::Bandit => &self.bandit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn severity_tiers_are_case_insensitive() {
        for raw in ["ERROR", "Error", "error", "HIGH", "high", "Critical"] {
            assert_eq!(Severity::classify(raw), Severity::Critical, "{raw}");
        }
        for raw in ["warning", "WARNING", "medium", "Medium"] {
            assert_eq!(Severity::classify(raw), Severity::Warning, "{raw}");
        }
        for raw in ["info", "Low", "LOW"] {
            assert_eq!(Severity::classify(raw), Severity::Info, "{raw}");
        }
    }

    #[test]
    fn unrecognized_severity_is_unknown() {
        assert_eq!(Severity::classify("refactor"), Severity::Unknown);
        assert_eq!(Severity::classify(""), Severity::Unknown);
    }

    #[test]
    fn non_array_field_is_a_failed_tool() {
        assert!(ToolReport::from_raw(&json!("pylint crashed")).is_failed());
        assert!(ToolReport::from_raw(&json!({"error": "timeout"})).is_failed());
        assert!(ToolReport::from_raw(&Value::Null).is_failed());
    }

    #[test]
    fn empty_array_is_a_clean_run_not_a_failure() {
        let report = ToolReport::from_raw(&json!([]));
        assert_eq!(report, ToolReport::Issues(vec![]));
    }

    #[test]
    fn issue_order_is_preserved() {
        let report = ToolReport::from_raw(&json!([
            {"line": 9, "message": "b", "severity": "info"},
            {"line": 2, "message": "a", "severity": "error"},
        ]));
        let ToolReport::Issues(issues) = report else {
            panic!("expected issues");
        };
        assert_eq!(issues[0].line, 9);
        assert_eq!(issues[1].line, 2);
    }

    #[test]
    fn missing_line_defaults_to_zero() {
        let report = ToolReport::from_raw(&json!([{"message": "m", "severity": "low"}]));
        let ToolReport::Issues(issues) = report else {
            panic!("expected issues");
        };
        assert_eq!(issues[0].line, 0);
    }

    #[test]
    fn one_failed_tool_does_not_taint_the_others() {
        let report = AnalysisReport::from_raw(
            &json!("boom"),
            &json!([{"line": 1, "message": "m", "severity": "error"}]),
            &json!([]),
        );
        assert!(report.pylint.is_failed());
        assert!(matches!(&report.mypy, ToolReport::Issues(i) if i.len() == 1));
        assert_eq!(report.bandit, ToolReport::Issues(vec![]));
    }
}
