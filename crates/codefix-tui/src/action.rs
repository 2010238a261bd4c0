//! Action enum — the central message bus for the panel.
//! All user interactions, host messages, and async results flow through here.

use codefix_backend::FixOutcome;
use codefix_core::analysis::AnalysisReport;

/// Every possible action that can occur in the panel.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Navigation ──────────────────────────────────────────
    /// Switch to a specific tab.
    GoToTab(Tab),
    /// Move to the next tab.
    NextTab,
    /// Move to the previous tab.
    PrevTab,

    // ── Global ──────────────────────────────────────────────
    /// Quit the panel.
    Quit,
    /// Toggle help overlay.
    ToggleHelp,
    /// Display a status message in the status bar.
    SetStatus(String),
    /// Clear the status message.
    ClearStatus,
    /// A tick event for animations and polling.
    Tick,

    // ── Host channel ────────────────────────────────────────
    /// Snapshot delivery from the editor host.
    InitialCode(String),
    /// A host-level notification to surface in the status bar.
    Notified { error: bool, message: String },
    /// The host dropped its end of the channel; the surface is gone.
    HostClosed,

    // ── Debug (fix request) ─────────────────────────────────
    /// User asked for an AI fix of the captured code.
    StartDebug,
    /// The fix call completed.
    DebugFinished(Box<FixOutcome>),
    /// The fix call failed; prior results stay untouched.
    DebugFailed(String),

    // ── Static analysis ─────────────────────────────────────
    /// Run the analysis tools on the captured code.
    StartAnalysis,
    /// Analysis completed for `code` (the cache key).
    AnalysisFinished {
        code: String,
        report: Box<AnalysisReport>,
    },
    /// Analysis failed; prior report stays untouched.
    AnalysisFailed(String),

    // ── Review verdict ──────────────────────────────────────
    /// Apply the current draft back to the document.
    Accept,
    /// Close the panel without applying.
    Reject,
    /// Start editing the draft in place.
    Modify,
    /// Stop editing; the draft is kept locally until Accept.
    Save,

    // ── Text input (only sent while editing) ────────────────
    CharInput(char),
    BackspaceInput,
    DeleteWord,
    NewlineInput,
    /// Bulk paste from bracketed paste mode.
    PasteBulk(String),

    // ── Scrolling ───────────────────────────────────────────
    ScrollUp,
    ScrollDown,
}

/// Whether the panel is in a text-input mode where raw keys should be
/// forwarded to the draft editor instead of interpreted as shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// The three panel tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Fix,
    Explanation,
    Analysis,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Fix, Tab::Explanation, Tab::Analysis]
    }

    /// Display label for the tab bar.
    pub fn label(&self) -> &'static str {
        match self {
            Tab::Fix => "1.AI Fix",
            Tab::Explanation => "2.Explanation",
            Tab::Analysis => "3.Analysis",
        }
    }

    pub fn next(&self) -> Option<Tab> {
        match self {
            Tab::Fix => Some(Tab::Explanation),
            Tab::Explanation => Some(Tab::Analysis),
            Tab::Analysis => None,
        }
    }

    pub fn prev(&self) -> Option<Tab> {
        match self {
            Tab::Fix => None,
            Tab::Explanation => Some(Tab::Fix),
            Tab::Analysis => Some(Tab::Explanation),
        }
    }

    /// Numeric index (0-based).
    pub fn index(&self) -> usize {
        match self {
            Tab::Fix => 0,
            Tab::Explanation => 1,
            Tab::Analysis => 2,
        }
    }
}
