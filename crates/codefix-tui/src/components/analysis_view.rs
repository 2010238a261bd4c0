//! Analysis tab — three independent tool sections.
//!
//! Each tool renders one of three states: a failure panel (the response
//! carried no issue array), a confirmed-clean line (empty array), or the
//! issue list in exactly the order received.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use codefix_core::analysis::{AnalysisReport, Severity, Tool, ToolReport};

use crate::action::Action;
use crate::components::Component;
use crate::theme::Theme;

pub struct AnalysisViewComponent {
    /// Report for the current snapshot, if analysis has completed.
    pub report: Option<AnalysisReport>,
    /// Whether an analysis request is in flight.
    pub loading: bool,
    scroll: usize,
}

impl AnalysisViewComponent {
    pub fn new() -> Self {
        Self {
            report: None,
            loading: false,
            scroll: 0,
        }
    }

    fn tool_lines<'a>(tool: Tool, report: &'a ToolReport) -> Vec<Line<'a>> {
        let mut lines = vec![
            Line::from(vec![
                Span::styled(tool.name(), Theme::header()),
                Span::styled(format!("  {}", tool.subtitle()), Theme::dim()),
            ]),
        ];

        match report {
            ToolReport::Failed => {
                lines.push(Line::from(Span::styled(
                    format!(
                        "  {} analysis failed to run. Check the backend service.",
                        tool.name()
                    ),
                    Theme::error_text(),
                )));
            }
            ToolReport::Issues(issues) if issues.is_empty() => {
                lines.push(Line::from(Span::styled(
                    format!("  No issues found in {} analysis ✓", tool.name().to_lowercase()),
                    Theme::ok_text(),
                )));
            }
            ToolReport::Issues(issues) => {
                for issue in issues {
                    let tier = Severity::classify(&issue.severity);
                    lines.push(Line::from(vec![
                        Span::styled(format!("  {} ", tier.icon()), Theme::severity(tier)),
                        Span::styled(format!("Line {}: ", issue.line), Theme::muted()),
                        Span::styled(issue.message.as_str(), Theme::severity(tier)),
                    ]));
                }
            }
        }

        lines.push(Line::from(""));
        lines
    }
}

impl Component for AnalysisViewComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::ScrollUp => {
                self.scroll = self.scroll.saturating_sub(1);
                None
            }
            Action::ScrollDown => {
                self.scroll += 1;
                None
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Static Analysis ")
            .title_style(Theme::header())
            .borders(Borders::ALL)
            .border_style(Theme::border());

        if self.loading {
            let body = Paragraph::new(vec![
                Line::from(Span::styled("Analyzing code...", Theme::muted())),
                Line::from(Span::styled(
                    "Running pylint, mypy, and bandit",
                    Theme::dim(),
                )),
            ]);
            frame.render_widget(body.block(block), area);
            return;
        }

        let Some(report) = &self.report else {
            let body = Paragraph::new(Line::from(Span::styled(
                "Switch here with code loaded to run static analysis.",
                Theme::dim(),
            )));
            frame.render_widget(body.block(block), area);
            return;
        };

        let mut lines: Vec<Line> = Vec::new();
        for tool in Tool::all() {
            lines.extend(Self::tool_lines(*tool, report.get(*tool)));
        }

        let body = Paragraph::new(lines).scroll((self.scroll as u16, 0));
        frame.render_widget(body.block(block), area);
    }
}
