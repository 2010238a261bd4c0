//! Panel application state and render loop.
//!
//! `PanelApp` is the UI side of the panel protocol. It owns the session
//! state (captured code, fix draft, explanation, analysis results), drives
//! the backend calls, and posts document mutations back through the bridge
//! handle. It never touches the document itself.

use crossterm::{
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Tabs};
use ratatui::Terminal;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};

use codefix_backend::CodeFixApi;
use codefix_bridge::{HostMessage, Notification, NotifyLevel, PanelHandle, PanelPoster, UiMessage};
use codefix_core::analysis::AnalysisReport;

use crate::action::{Action, InputMode, Tab};
use crate::components::analysis_view::AnalysisViewComponent;
use crate::components::explanation_view::ExplanationViewComponent;
use crate::components::fix_view::FixViewComponent;
use crate::components::help::HelpComponent;
use crate::components::status_bar::StatusBarComponent;
use crate::components::Component;
use crate::event::{self, EventHandler, InputModeFlag};
use crate::theme::Theme;

/// Fallback panel title if the host page has none.
const DEFAULT_TITLE: &str = "CodeFix AI";

/// Panel application state.
pub struct PanelApp {
    /// Current active tab.
    active_tab: Tab,
    /// Whether the panel should exit.
    should_quit: bool,
    /// Shared flag to tell the EventHandler which key-mapping to use.
    input_mode_flag: InputModeFlag,

    // ── Session state ────────────────────────────────────────
    /// Snapshot of the document under review, as delivered by the host.
    original_code: String,
    /// Code the current analysis report was computed for (cache key).
    analyzed_code: Option<String>,
    /// Guard flag: a fix request is in flight.
    debugging: bool,
    /// Guard flag: an analysis request is in flight.
    analyzing: bool,

    // ── Host / backend plumbing ──────────────────────────────
    /// Backend client (shared across async tasks).
    api: Arc<dyn CodeFixApi>,
    /// UI→host sender.
    to_host: PanelPoster,
    /// Host→UI receiver; moved into a forwarding task by `run`.
    from_host: Option<mpsc::UnboundedReceiver<HostMessage>>,
    /// Host notification receiver; moved into a forwarding task by `run`.
    notifications: Option<mpsc::UnboundedReceiver<Notification>>,
    /// Panel title, extracted from the injected host page.
    title: String,

    // Components
    fix_view: FixViewComponent,
    explanation_view: ExplanationViewComponent,
    analysis_view: AnalysisViewComponent,
    status_bar: StatusBarComponent,
    help: HelpComponent,
}

impl PanelApp {
    pub fn new(
        api: Arc<dyn CodeFixApi>,
        handle: PanelHandle,
        notifications: mpsc::UnboundedReceiver<Notification>,
    ) -> Self {
        let PanelHandle {
            id,
            content,
            to_host,
            from_host,
        } = handle;
        info!(%id, "Panel app attached to surface");
        let title = page_title(&content).unwrap_or(DEFAULT_TITLE).to_string();

        Self {
            active_tab: Tab::Fix,
            should_quit: false,
            input_mode_flag: event::new_input_mode_flag(),
            original_code: String::new(),
            analyzed_code: None,
            debugging: false,
            analyzing: false,
            api,
            to_host,
            from_host: Some(from_host),
            notifications: Some(notifications),
            title,
            fix_view: FixViewComponent::new(),
            explanation_view: ExplanationViewComponent::new(),
            analysis_view: AnalysisViewComponent::new(),
            status_bar: StatusBarComponent::new(),
            help: HelpComponent::new(),
        }
    }

    /// Run the panel application.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        // Set up terminal.
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        )?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Create the action channel.
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();

        // Start the event handler with the shared input mode flag.
        let event_tx = tx.clone();
        let mode_flag = self.input_mode_flag.clone();
        let event_handler = EventHandler::new(event_tx, Duration::from_millis(100), mode_flag);
        tokio::spawn(async move {
            event_handler.run().await;
        });

        // Forward host messages and notifications into the action channel.
        self.spawn_host_forwarders(tx.clone());

        // Signal readiness; the host answers with the initial snapshot.
        self.to_host.post(UiMessage::WebviewReady);

        self.sync_input_mode();

        // Main loop.
        loop {
            terminal.draw(|frame| {
                self.render(frame);
            })?;

            if let Some(action) = rx.recv().await {
                self.handle_action(&action, &tx);

                if self.should_quit {
                    break;
                }
            }
        }

        // Restore terminal.
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableBracketedPaste
        )?;
        terminal.show_cursor()?;

        Ok(())
    }

    /// Pump the host→UI channel and the notification channel into actions.
    fn spawn_host_forwarders(&mut self, tx: mpsc::UnboundedSender<Action>) {
        if let Some(mut from_host) = self.from_host.take() {
            let tx = tx.clone();
            tokio::spawn(async move {
                while let Some(message) = from_host.recv().await {
                    let action = match message {
                        HostMessage::InitialCode { code } => Action::InitialCode(code),
                    };
                    if tx.send(action).is_err() {
                        return;
                    }
                }
                // Channel closed: the surface was disposed.
                let _ = tx.send(Action::HostClosed);
            });
        }

        if let Some(mut notifications) = self.notifications.take() {
            tokio::spawn(async move {
                while let Some(notification) = notifications.recv().await {
                    let action = Action::Notified {
                        error: notification.level == NotifyLevel::Error,
                        message: notification.message,
                    };
                    if tx.send(action).is_err() {
                        return;
                    }
                }
            });
        }
    }

    /// Determine and set the correct input mode. Called after every action.
    fn sync_input_mode(&self) {
        let mode = if self.fix_view.editing && self.active_tab == Tab::Fix && !self.help.visible {
            InputMode::Editing
        } else {
            InputMode::Normal
        };
        event::set_input_mode(&self.input_mode_flag, mode);
    }

    /// Dispatch an action to the app state and all relevant components.
    fn handle_action(&mut self, action: &Action, tx: &mpsc::UnboundedSender<Action>) {
        match action {
            Action::Quit => {
                self.to_host.post(UiMessage::ClosePanel);
                self.should_quit = true;
                return;
            }
            Action::GoToTab(tab) => {
                self.switch_tab(*tab, tx);
            }
            Action::NextTab => {
                if !self.fix_view.editing {
                    if let Some(next) = self.active_tab.next() {
                        self.switch_tab(next, tx);
                    }
                }
            }
            Action::PrevTab => {
                if !self.fix_view.editing {
                    if let Some(prev) = self.active_tab.prev() {
                        self.switch_tab(prev, tx);
                    }
                }
            }

            // ── Host channel ────────────────────────────────────
            Action::InitialCode(code) => {
                self.original_code = code.clone();
                self.fix_view.draft.clear();
                self.fix_view.has_fix = false;
                info!(bytes = code.len(), "Initial code received");
            }
            Action::HostClosed => {
                info!("Host channel closed; exiting panel");
                self.should_quit = true;
                return;
            }

            // ── Debug ───────────────────────────────────────────
            Action::StartDebug => {
                if !self.debugging {
                    self.debugging = true;
                    self.fix_view.loading = true;
                    self.explanation_view.loading = true;
                    self.spawn_debug(tx.clone());
                }
            }
            Action::DebugFinished(outcome) => {
                self.debugging = false;
                self.fix_view.loading = false;
                self.explanation_view.loading = false;
                self.fix_view.set_fix(outcome.fixed_code.clone());
                self.explanation_view
                    .set_explanation(outcome.explanation.clone());
                self.switch_tab(Tab::Fix, tx);
            }
            Action::DebugFailed(error) => {
                // Prior fix and explanation stay untouched.
                self.debugging = false;
                self.fix_view.loading = false;
                self.explanation_view.loading = false;
                self.status_bar.message = format!("Debugging failed: {error}. Try again.");
                self.status_bar.is_error = true;
                warn!(%error, "Debug request failed");
            }

            // ── Analysis ────────────────────────────────────────
            Action::StartAnalysis => {
                if !self.analyzing {
                    self.analyzing = true;
                    self.analysis_view.loading = true;
                    self.spawn_analysis(tx.clone());
                }
            }
            Action::AnalysisFinished { code, report } => {
                self.analyzing = false;
                self.analysis_view.loading = false;
                self.analysis_view.report = Some((**report).clone());
                self.analyzed_code = Some(code.clone());
            }
            Action::AnalysisFailed(error) => {
                // Prior report stays untouched.
                self.analyzing = false;
                self.analysis_view.loading = false;
                self.status_bar.message = format!("Static analysis failed: {error}");
                self.status_bar.is_error = true;
                warn!(%error, "Analysis request failed");
            }

            // ── Review verdict ──────────────────────────────────
            Action::Accept => {
                // The draft is applied literally, even when empty; the
                // outcome comes back as a host notification.
                self.fix_view.editing = false;
                self.to_host.post(UiMessage::ApplyFix {
                    code: self.fix_view.draft.clone(),
                });
            }
            Action::Reject => {
                self.to_host.post(UiMessage::ClosePanel);
                self.should_quit = true;
                return;
            }
            Action::Modify => {
                self.fix_view.editing = true;
                self.switch_tab(Tab::Fix, tx);
            }
            Action::Save => {
                // The draft is kept locally until Accept.
                self.fix_view.editing = false;
            }

            _ => {}
        }

        // Forward to the active tab component.
        match self.active_tab {
            Tab::Fix => self.fix_view.handle_action(action),
            Tab::Explanation => self.explanation_view.handle_action(action),
            Tab::Analysis => self.analysis_view.handle_action(action),
        };

        // Always forward to overlays and the status bar.
        self.help.handle_action(action);
        self.status_bar.handle_action(action);

        self.sync_input_mode();
    }

    /// Activate a tab, parsing or fetching whatever it needs.
    fn switch_tab(&mut self, tab: Tab, tx: &mpsc::UnboundedSender<Action>) {
        self.active_tab = tab;
        self.status_bar.current_tab = tab;
        match tab {
            Tab::Explanation => self.explanation_view.ensure_parsed(),
            Tab::Analysis => self.maybe_start_analysis(tx),
            Tab::Fix => {}
        }
    }

    /// Analysis runs once per snapshot: a cached report for the current
    /// code is reused, and an in-flight run is never duplicated.
    fn maybe_start_analysis(&self, tx: &mpsc::UnboundedSender<Action>) {
        if self.original_code.is_empty() || self.analyzing {
            return;
        }
        if self.analyzed_code.as_deref() == Some(self.original_code.as_str()) {
            return;
        }
        let _ = tx.send(Action::StartAnalysis);
    }

    // ── Async task spawners ─────────────────────────────────────

    /// Spawn the fix request. Completion always clears the guard flag via
    /// the DebugFinished/DebugFailed actions.
    fn spawn_debug(&self, tx: mpsc::UnboundedSender<Action>) {
        let api = Arc::clone(&self.api);
        let code = self.original_code.clone();
        let _ = tx.send(Action::SetStatus("Debugging...".to_string()));

        tokio::spawn(async move {
            match api.fix_code(&code).await {
                Ok(outcome) => {
                    info!(bytes = outcome.fixed_code.len(), "Fix received");
                    let _ = tx.send(Action::DebugFinished(Box::new(outcome)));
                    let _ = tx.send(Action::SetStatus(
                        "Code debugged successfully.".to_string(),
                    ));
                }
                Err(e) => {
                    let _ = tx.send(Action::DebugFailed(e.to_string()));
                }
            }
        });
    }

    /// Spawn the analysis request for the current snapshot.
    fn spawn_analysis(&self, tx: mpsc::UnboundedSender<Action>) {
        let api = Arc::clone(&self.api);
        let code = self.original_code.clone();
        let _ = tx.send(Action::SetStatus("Running static analysis...".to_string()));

        tokio::spawn(async move {
            match api.static_analysis(&code).await {
                Ok(resp) => {
                    let report = AnalysisReport::from_raw(&resp.pylint, &resp.mypy, &resp.bandit);
                    let _ = tx.send(Action::AnalysisFinished {
                        code,
                        report: Box::new(report),
                    });
                    let _ = tx.send(Action::SetStatus("Static analysis complete.".to_string()));
                }
                Err(e) => {
                    let _ = tx.send(Action::AnalysisFailed(e.to_string()));
                }
            }
        });
    }

    // ── Rendering ───────────────────────────────────────────────

    /// Render the full panel.
    fn render(&self, frame: &mut ratatui::Frame) {
        let area = frame.area();

        let chunks = Layout::vertical([
            Constraint::Length(2), // Title + tab bar
            Constraint::Min(10),   // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        self.render_header(frame, chunks[0]);

        match self.active_tab {
            Tab::Fix => self.fix_view.render(frame, chunks[1]),
            Tab::Explanation => self.explanation_view.render(frame, chunks[1]),
            Tab::Analysis => self.analysis_view.render(frame, chunks[1]),
        }

        self.status_bar.render(frame, chunks[2]);

        // Overlay (rendered on top)
        self.help.render(frame, area);
    }

    /// Render the panel title and the tab bar.
    fn render_header(&self, frame: &mut ratatui::Frame, area: Rect) {
        let rows = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(area);

        frame.render_widget(
            Paragraph::new(Span::styled(format!(" {}", self.title), Theme::title())),
            rows[0],
        );

        let titles: Vec<Line> = Tab::all()
            .iter()
            .map(|tab| {
                let style = if *tab == self.active_tab {
                    Theme::tab_active()
                } else {
                    Theme::tab_inactive()
                };
                Line::from(Span::styled(tab.label(), style))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .select(self.active_tab.index())
            .divider(Span::styled(" | ", Theme::dim()))
            .highlight_style(Theme::tab_active());

        frame.render_widget(tabs, rows[1]);
    }
}

/// Title of the injected host page, if it declares one.
fn page_title(html: &str) -> Option<&str> {
    let start = html.find("<title>")? + "<title>".len();
    let end = html[start..].find("</title>")? + start;
    Some(html[start..end].trim())
}
