//! Explanation tab — renders the parsed explanation sections.
//!
//! The raw explanation text is stored as received; it is parsed into
//! sections only once this tab is shown, and the parse is cached until a
//! new fix arrives.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use codefix_core::explanation::{parse_explanation, Section, SectionKind};

use crate::action::Action;
use crate::components::Component;
use crate::theme::Theme;

pub struct ExplanationViewComponent {
    /// Raw labeled text from the last successful debug, if any.
    raw: Option<String>,
    /// Parsed sections; populated lazily by `ensure_parsed`.
    sections: Option<Vec<Section>>,
    /// Whether a debug request is in flight.
    pub loading: bool,
    scroll: usize,
}

impl ExplanationViewComponent {
    pub fn new() -> Self {
        Self {
            raw: None,
            sections: None,
            loading: false,
            scroll: 0,
        }
    }

    /// Store a new raw explanation and drop the stale parse.
    pub fn set_explanation(&mut self, text: String) {
        self.raw = Some(text);
        self.sections = None;
        self.scroll = 0;
    }

    /// Parse the raw text if it hasn't been parsed yet. Called when the
    /// explanation tab becomes active.
    pub fn ensure_parsed(&mut self) {
        if self.sections.is_none() {
            if let Some(raw) = &self.raw {
                self.sections = Some(parse_explanation(raw));
            }
        }
    }

    pub fn sections(&self) -> Option<&[Section]> {
        self.sections.as_deref()
    }

    fn section_header(kind: SectionKind) -> Line<'static> {
        let marker = match kind {
            SectionKind::Issue => "●",
            SectionKind::Cause => "◆",
            SectionKind::Fix => "▶",
        };
        Line::from(vec![
            Span::styled(format!("{marker} "), Theme::key_hint()),
            Span::styled(kind.title(), Theme::header()),
        ])
    }
}

impl Component for ExplanationViewComponent {
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
            .title(" Explanation ")
            .title_style(Theme::header())
            .borders(Borders::ALL)
            .border_style(Theme::border());

        if self.loading {
            let body = Paragraph::new(Line::from(Span::styled(
                "Debugging...",
                Theme::muted(),
            )));
            frame.render_widget(body.block(block), area);
            return;
        }

        let Some(sections) = self.sections.as_deref().filter(|s| !s.is_empty()) else {
            let body = Paragraph::new(Line::from(Span::styled(
                "No explanation available. Try debugging your code first.",
                Theme::dim(),
            )));
            frame.render_widget(body.block(block), area);
            return;
        };

        let mut lines: Vec<Line> = Vec::new();
        for section in sections {
            lines.push(Self::section_header(section.kind));
            if section.content.is_empty() {
                lines.push(Line::from(Span::styled("  (no detail)", Theme::dim())));
            } else {
                for content_line in section.content.split('\n') {
                    lines.push(Line::from(Span::styled(
                        format!("  {content_line}"),
                        Theme::normal(),
                    )));
                }
            }
            lines.push(Line::from(""));
        }

        let body = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll as u16, 0));
        frame.render_widget(body.block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_lazy_until_ensure() {
        let mut view = ExplanationViewComponent::new();
        view.set_explanation("Issue: A Cause: B Fix: C".to_string());
        assert!(view.sections().is_none());

        view.ensure_parsed();
        let sections = view.sections().unwrap();
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].content, "A");
    }

    #[test]
    fn new_explanation_drops_the_stale_parse() {
        let mut view = ExplanationViewComponent::new();
        view.set_explanation("Issue: old".to_string());
        view.ensure_parsed();

        view.set_explanation("Fix: new".to_string());
        assert!(view.sections().is_none());
        view.ensure_parsed();
        assert_eq!(view.sections().unwrap()[0].kind, SectionKind::Fix);
    }
}
