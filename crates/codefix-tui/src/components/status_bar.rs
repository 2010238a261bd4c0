//! Status bar at the bottom of the panel.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::action::{Action, Tab};
use crate::components::Component;
use crate::theme::Theme;

pub struct StatusBarComponent {
    /// Current status message.
    pub message: String,
    /// Whether the current message reports an error.
    pub is_error: bool,
    /// Current active tab.
    pub current_tab: Tab,
}

impl StatusBarComponent {
    pub fn new() -> Self {
        Self {
            message: "Press d to request an AI fix.".to_string(),
            is_error: false,
            current_tab: Tab::Fix,
        }
    }

    /// Short tab name for the badge.
    fn tab_badge(&self) -> &'static str {
        match self.current_tab {
            Tab::Fix => "Fix",
            Tab::Explanation => "Explanation",
            Tab::Analysis => "Analysis",
        }
    }
}

impl Component for StatusBarComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::SetStatus(msg) => {
                self.message = msg.clone();
                self.is_error = false;
                None
            }
            Action::Notified { error, message } => {
                self.message = message.clone();
                self.is_error = *error;
                None
            }
            Action::ClearStatus => {
                self.message.clear();
                self.is_error = false;
                None
            }
            Action::GoToTab(tab) => {
                self.current_tab = *tab;
                None
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let width = area.width as usize;

        // Right side: compact key hints
        let hints = "d·a·x·e·1-3·?·q";
        let hints_len = hints.len() + 1;

        let badge = self.tab_badge();
        let badge_len = badge.len() + 2;

        // Truncate message to remaining space
        let msg_budget = width
            .saturating_sub(badge_len)
            .saturating_sub(hints_len)
            .saturating_sub(4);

        let msg = if self.message.len() > msg_budget {
            if msg_budget > 3 {
                format!("{}...", &self.message[..msg_budget - 3])
            } else {
                String::new()
            }
        } else {
            self.message.clone()
        };

        let msg_style = if self.is_error {
            Theme::error_text()
        } else {
            Theme::dim()
        };

        // Pad to push hints to the right edge
        let used = badge_len + 2 + msg.len();
        let pad = width.saturating_sub(used + hints_len);

        let line = Line::from(vec![
            Span::styled(format!(" {} ", badge), Theme::muted()),
            Span::styled("  ", Theme::dim()),
            Span::styled(msg, msg_style),
            Span::raw(" ".repeat(pad)),
            Span::styled(hints, Theme::key_hint()),
            Span::raw(" "),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
