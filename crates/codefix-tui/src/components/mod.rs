//! Component trait and all panel components.
//!
//! Each component encapsulates rendering and input handling for one tab
//! or overlay.

pub mod analysis_view;
pub mod explanation_view;
pub mod fix_view;
pub mod help;
pub mod status_bar;

use ratatui::layout::Rect;
use ratatui::Frame;

use crate::action::Action;

/// Trait implemented by all panel components.
pub trait Component {
    /// Handle an action and optionally return a new action to dispatch.
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        let _ = action;
        None
    }

    /// Render the component into the given area.
    fn render(&self, frame: &mut Frame, area: Rect);
}
