//! Color scheme and styling for the panel.

use ratatui::style::{Color, Modifier, Style};

use codefix_core::analysis::Severity;

/// The color palette for the codefix panel.
///
/// Uses RGB colors for a subdued look in line with modern terminal UIs.
pub struct Theme;

impl Theme {
    // ── Base colors ─────────────────────────────────────────
    pub fn bg() -> Color {
        Color::Reset
    }

    pub fn fg() -> Color {
        Color::Rgb(200, 200, 200)
    }

    pub fn fg_dim() -> Color {
        Color::Rgb(100, 100, 100)
    }

    pub fn fg_muted() -> Color {
        Color::Rgb(140, 140, 140)
    }

    // ── Accent colors ───────────────────────────────────────
    pub fn accent() -> Color {
        Color::Rgb(110, 170, 255)
    }

    pub fn success() -> Color {
        Color::Rgb(80, 200, 120)
    }

    pub fn error() -> Color {
        Color::Rgb(240, 80, 80)
    }

    // ── Severity tiers ──────────────────────────────────────
    // One fixed color per tier, paired with the tier's icon.
    pub fn severity_critical() -> Color {
        Color::Rgb(255, 68, 68)
    }

    pub fn severity_warning() -> Color {
        Color::Rgb(255, 153, 0)
    }

    pub fn severity_info() -> Color {
        Color::Rgb(76, 175, 80)
    }

    pub fn severity_unknown() -> Color {
        Color::Rgb(102, 102, 102)
    }

    pub fn severity(tier: Severity) -> Style {
        let color = match tier {
            Severity::Critical => Self::severity_critical(),
            Severity::Warning => Self::severity_warning(),
            Severity::Info => Self::severity_info(),
            Severity::Unknown => Self::severity_unknown(),
        };
        Style::default().fg(color)
    }

    // ── Structural colors ───────────────────────────────────
    pub fn border_color() -> Color {
        Color::Rgb(60, 60, 60)
    }

    // ── Composite styles ────────────────────────────────────

    pub fn title() -> Style {
        Style::default()
            .fg(Self::accent())
            .add_modifier(Modifier::BOLD)
    }

    pub fn header() -> Style {
        Style::default().fg(Self::fg()).add_modifier(Modifier::BOLD)
    }

    pub fn normal() -> Style {
        Style::default().fg(Self::fg())
    }

    pub fn dim() -> Style {
        Style::default().fg(Self::fg_dim())
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::fg_muted())
    }

    pub fn border() -> Style {
        Style::default().fg(Self::border_color())
    }

    pub fn key_hint() -> Style {
        Style::default().fg(Self::accent())
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::fg_muted())
    }

    pub fn ok_text() -> Style {
        Style::default().fg(Self::success())
    }

    pub fn error_text() -> Style {
        Style::default().fg(Self::error())
    }

    pub fn tab_active() -> Style {
        Style::default()
            .fg(Self::accent())
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    pub fn tab_inactive() -> Style {
        Style::default().fg(Self::fg_dim())
    }
}
