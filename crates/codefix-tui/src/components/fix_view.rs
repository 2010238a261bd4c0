//! Fix tab — shows the proposed fix and lets the user edit it in place.
//!
//! The draft is plain text with a byte-offset cursor and a scroll
//! viewport. Editing only receives input while the app has switched the
//! shared input mode to Editing (after Modify, until Save).

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::action::Action;
use crate::components::Component;
use crate::theme::Theme;

pub struct FixViewComponent {
    /// Current fixed-code draft. Starts as whatever the service proposed
    /// and may be hand-edited before Accept.
    pub draft: String,
    /// Whether a fix has been received this session.
    pub has_fix: bool,
    /// Whether the draft is being edited in place.
    pub editing: bool,
    /// Whether a debug request is in flight.
    pub loading: bool,
    /// Cursor position (byte offset) within the draft.
    cursor: usize,
    /// Scroll offset (first visible line).
    scroll: usize,
}

impl FixViewComponent {
    pub fn new() -> Self {
        Self {
            draft: String::new(),
            has_fix: false,
            editing: false,
            loading: false,
            cursor: 0,
            scroll: 0,
        }
    }

    /// Install a freshly received fix as the draft.
    pub fn set_fix(&mut self, code: String) {
        self.draft = code;
        self.has_fix = true;
        self.loading = false;
        self.cursor = self.draft.len();
        self.scroll = 0;
    }

    fn clamp_cursor(&mut self) {
        if self.cursor > self.draft.len() {
            self.cursor = self.draft.len();
        }
    }

    fn insert_char(&mut self, c: char) {
        self.clamp_cursor();
        self.draft.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        self.ensure_cursor_visible();
    }

    fn insert_str(&mut self, s: &str) {
        self.clamp_cursor();
        self.draft.insert_str(self.cursor, s);
        self.cursor += s.len();
        self.ensure_cursor_visible();
    }

    fn delete_char(&mut self) {
        self.clamp_cursor();
        if self.cursor > 0 {
            let prev = self.draft[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.draft.remove(prev);
            self.cursor = prev;
            self.ensure_cursor_visible();
        }
    }

    /// Delete the word before the cursor (Ctrl+W).
    fn delete_word(&mut self) {
        self.clamp_cursor();
        if self.cursor > 0 {
            let mut end = self.cursor;
            while end > 0 && self.draft.as_bytes().get(end - 1) == Some(&b' ') {
                end -= 1;
            }
            let mut start = end;
            while start > 0 && self.draft.as_bytes().get(start - 1) != Some(&b' ') {
                start -= 1;
            }
            self.draft.drain(start..self.cursor);
            self.cursor = start;
            self.ensure_cursor_visible();
        }
    }

    /// Line and column of the cursor within the draft.
    fn cursor_line_col(&self) -> (usize, usize) {
        let before = &self.draft[..self.cursor.min(self.draft.len())];
        let line = before.matches('\n').count();
        let col = before
            .rfind('\n')
            .map(|p| self.cursor - p - 1)
            .unwrap_or(self.cursor);
        (line, col)
    }

    fn cursor_up(&mut self) {
        let (line, col) = self.cursor_line_col();
        if line == 0 {
            return;
        }
        let lines: Vec<&str> = self.draft.split('\n').collect();
        let prev_line = lines[line - 1];
        let prev_line_start: usize = lines[..line - 1].iter().map(|l| l.len() + 1).sum();
        self.cursor = prev_line_start + col.min(prev_line.len());
        self.ensure_cursor_visible();
    }

    fn cursor_down(&mut self) {
        let lines: Vec<&str> = self.draft.split('\n').collect();
        let (line, col) = self.cursor_line_col();
        if line + 1 >= lines.len() {
            return;
        }
        let next_line = lines[line + 1];
        let next_line_start: usize = lines[..line + 1].iter().map(|l| l.len() + 1).sum();
        self.cursor = next_line_start + col.min(next_line.len());
        self.ensure_cursor_visible();
    }

    /// Keep the cursor's line inside the scroll viewport. Uses a
    /// conservative viewport estimate; render adjusts the rest.
    fn ensure_cursor_visible(&mut self) {
        let (cursor_line, _) = self.cursor_line_col();
        if cursor_line < self.scroll {
            self.scroll = cursor_line;
        }
        let estimated_viewport = 6usize;
        if cursor_line >= self.scroll + estimated_viewport {
            self.scroll = cursor_line.saturating_sub(estimated_viewport - 1);
        }
    }

    /// Render the draft with an inverted cursor cell while editing.
    fn draft_lines(&self) -> Vec<Line<'_>> {
        if !self.editing {
            return self.draft.split('\n').map(Line::from).collect();
        }

        let pos = self.cursor.min(self.draft.len());
        let (before, after) = self.draft.split_at(pos);
        // A cursor sitting on a newline renders as a space cell at the end
        // of the line; the newline itself stays in `rest`.
        let (cursor_char, consumed) = match after.chars().next() {
            Some('\n') | None => (" ".to_string(), 0),
            Some(c) => (c.to_string(), c.len_utf8()),
        };
        let rest = &after[consumed..];

        // Rebuild lines around the styled cursor cell.
        let mut lines: Vec<Line> = Vec::new();
        let mut current: Vec<Span> = Vec::new();
        for (i, part) in before.split('\n').enumerate() {
            if i > 0 {
                lines.push(Line::from(std::mem::take(&mut current)));
            }
            current.push(Span::styled(part.to_string(), Theme::normal()));
        }
        current.push(Span::styled(
            cursor_char,
            Style::default().fg(Theme::bg()).bg(Theme::accent()),
        ));
        for (i, part) in rest.split('\n').enumerate() {
            if i > 0 {
                lines.push(Line::from(std::mem::take(&mut current)));
            }
            current.push(Span::styled(part.to_string(), Theme::normal()));
        }
        lines.push(Line::from(current));
        lines
    }
}

impl Component for FixViewComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::CharInput(c) if self.editing => {
                self.insert_char(*c);
                None
            }
            Action::BackspaceInput if self.editing => {
                self.delete_char();
                None
            }
            Action::DeleteWord if self.editing => {
                self.delete_word();
                None
            }
            Action::NewlineInput if self.editing => {
                self.insert_char('\n');
                None
            }
            Action::PasteBulk(text) if self.editing => {
                if !text.is_empty() {
                    self.insert_str(text);
                }
                None
            }
            Action::ScrollUp => {
                if self.editing {
                    self.cursor_up();
                } else {
                    self.scroll = self.scroll.saturating_sub(1);
                }
                None
            }
            Action::ScrollDown => {
                if self.editing {
                    self.cursor_down();
                } else {
                    let max = self.draft.matches('\n').count();
                    self.scroll = (self.scroll + 1).min(max);
                }
                None
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let title = if self.editing {
            " AI Fix (editing — Esc/Ctrl+S to save) "
        } else {
            " AI Fix "
        };
        let border_style = if self.editing {
            Style::default().fg(Theme::accent())
        } else {
            Theme::border()
        };
        let block = Block::default()
            .title(title)
            .title_style(Theme::header())
            .borders(Borders::ALL)
            .border_style(border_style);

        let body = if self.loading {
            Paragraph::new(Line::from(Span::styled(
                "Debugging...",
                Theme::muted(),
            )))
        } else if !self.has_fix {
            Paragraph::new(Line::from(Span::styled(
                "Press d to debug and see the AI fix here.",
                Theme::dim(),
            )))
        } else {
            Paragraph::new(self.draft_lines()).scroll((self.scroll as u16, 0))
        };

        frame.render_widget(body.block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edited(draft: &str) -> FixViewComponent {
        let mut view = FixViewComponent::new();
        view.set_fix(draft.to_string());
        view.editing = true;
        view
    }

    #[test]
    fn typed_characters_land_in_the_draft() {
        let mut view = edited("x =");
        view.handle_action(&Action::CharInput(' '));
        view.handle_action(&Action::CharInput('1'));
        assert_eq!(view.draft, "x = 1");
    }

    #[test]
    fn backspace_removes_before_cursor() {
        let mut view = edited("x = 12");
        view.handle_action(&Action::BackspaceInput);
        assert_eq!(view.draft, "x = 1");
    }

    #[test]
    fn input_is_ignored_when_not_editing() {
        let mut view = FixViewComponent::new();
        view.set_fix("x = 1".to_string());
        view.handle_action(&Action::CharInput('z'));
        assert_eq!(view.draft, "x = 1");
    }

    #[test]
    fn paste_inserts_at_cursor() {
        let mut view = edited("def f():\n");
        view.handle_action(&Action::PasteBulk("    return 1".to_string()));
        assert_eq!(view.draft, "def f():\n    return 1");
    }
}
