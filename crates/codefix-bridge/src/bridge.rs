//! Host side of the panel protocol.
//!
//! The bridge owns the live document (through `EditorHost`) and every
//! surface's lifecycle. The UI never touches the document; each mutation
//! arrives as an `applyFix` message and is applied here as one atomic
//! full-text edit. Results of document operations go to the user as
//! notifications, not back into the panel protocol.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use codefix_core::{CodefixConfig, Result};

use crate::command::CommandRegistry;
use crate::host::{DocumentSnapshot, EditorHost};
use crate::messages::{HostMessage, UiMessage};
use crate::notify::{Notifier, NotifyLevel};
use crate::template;

/// Command id registered at activation.
pub const DEBUG_COMMAND: &str = "codefix.debug";

/// Sending half of a panel's UI→host channel. Posts after disposal are
/// dropped without error.
#[derive(Clone, Debug)]
pub struct PanelPoster {
    tx: mpsc::UnboundedSender<UiMessage>,
}

impl PanelPoster {
    pub fn new(tx: mpsc::UnboundedSender<UiMessage>) -> Self {
        Self { tx }
    }

    pub fn post(&self, message: UiMessage) {
        let _ = self.tx.send(message);
    }
}

/// The UI surface's end of a panel's channels.
#[derive(Debug)]
pub struct PanelHandle {
    /// Surface id, for log correlation.
    pub id: Uuid,
    /// Rendered host page injected as the surface's content.
    pub content: String,
    pub to_host: PanelPoster,
    /// Messages from the host; closed once the surface is disposed.
    pub from_host: mpsc::UnboundedReceiver<HostMessage>,
}

impl PanelHandle {
    /// Post a message to the host.
    pub fn post(&self, message: UiMessage) {
        self.to_host.post(message);
    }
}

/// Host-side component tying the editor, the notifier, and panel surfaces
/// together.
pub struct EditorBridge {
    host: Arc<dyn EditorHost>,
    notifier: Arc<dyn Notifier>,
    config: CodefixConfig,
}

impl EditorBridge {
    pub fn new(
        host: Arc<dyn EditorHost>,
        notifier: Arc<dyn Notifier>,
        config: CodefixConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            host,
            notifier,
            config,
        })
    }

    /// Register the user-invokable command. One registration per
    /// activation; the registration lives as long as the registry.
    pub fn activate(self: &Arc<Self>, registry: &mut CommandRegistry) {
        let bridge = Arc::clone(self);
        registry.register(DEBUG_COMMAND, Box::new(move || bridge.open_panel()));
        info!(command = DEBUG_COMMAND, "codefix activated");
    }

    /// Create a panel surface scoped to this invocation and start its
    /// dispatch task. Returns the UI end of the channels.
    pub fn open_panel(&self) -> Result<PanelHandle> {
        // A broken host page means no panel; surface the error instead of
        // failing silently.
        let content = match template::render_host_page(&self.config.panel.assets_dir) {
            Ok(page) => page,
            Err(e) => {
                self.notifier
                    .notify(NotifyLevel::Error, &format!("Cannot open panel: {e}"));
                return Err(e);
            }
        };

        let id = Uuid::new_v4();
        let snapshot = self.capture_snapshot();
        let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiMessage>();
        let (host_tx, host_rx) = mpsc::unbounded_channel::<HostMessage>();

        let surface = PanelSurface {
            id,
            snapshot,
            to_ui: host_tx,
            host: Arc::clone(&self.host),
            notifier: Arc::clone(&self.notifier),
            language: self.config.editor.language.clone(),
            disposed: false,
        };
        tokio::spawn(surface.dispatch(ui_rx));

        info!(%id, "Panel surface created");
        Ok(PanelHandle {
            id,
            content,
            to_host: PanelPoster::new(ui_tx),
            from_host: host_rx,
        })
    }

    /// Copy the active document's text, but only if it declares the
    /// expected language; the tool is single-language-scoped.
    fn capture_snapshot(&self) -> DocumentSnapshot {
        let language = self.config.editor.language.clone();
        let text = self
            .host
            .active_document()
            .filter(|doc| doc.language == language)
            .map(|doc| doc.text)
            .unwrap_or_default();
        DocumentSnapshot { text, language }
    }
}

/// One isolated UI surface and the per-panel state the host keeps for it.
struct PanelSurface {
    id: Uuid,
    snapshot: DocumentSnapshot,
    to_ui: mpsc::UnboundedSender<HostMessage>,
    host: Arc<dyn EditorHost>,
    notifier: Arc<dyn Notifier>,
    language: String,
    disposed: bool,
}

impl PanelSurface {
    /// Drain UI messages until the surface is disposed. Messages still in
    /// flight after disposal are dropped with the receiver.
    async fn dispatch(mut self, mut rx: mpsc::UnboundedReceiver<UiMessage>) {
        while let Some(message) = rx.recv().await {
            if !self.handle_message(message) {
                break;
            }
        }
        debug!(id = %self.id, "Panel dispatch ended");
    }

    /// Dispatch one message. Returns false once the surface is disposed.
    fn handle_message(&mut self, message: UiMessage) -> bool {
        if self.disposed {
            debug!(id = %self.id, "Message after disposal discarded");
            return false;
        }
        match message {
            UiMessage::WebviewReady => {
                // Duplicate readiness re-sends the same snapshot.
                let _ = self.to_ui.send(HostMessage::InitialCode {
                    code: self.snapshot.text.clone(),
                });
            }
            UiMessage::ApplyFix { code } => self.apply_fix(&code),
            UiMessage::ClosePanel => {
                self.disposed = true;
                info!(id = %self.id, "Panel surface disposed");
            }
        }
        !self.disposed
    }

    /// Replace the whole target document with `code`.
    fn apply_fix(&self, code: &str) {
        let Some(key) = self.host.find_visible(&self.language) else {
            let err = codefix_core::CodefixError::DocumentUnavailable(self.language.clone());
            warn!(id = %self.id, language = %self.language, "No document to apply the fix to");
            self.notifier.notify(NotifyLevel::Error, &format!("{err}."));
            return;
        };

        match self.host.replace_all(&key, code) {
            Ok(()) => {
                info!(id = %self.id, document = %key.0, "Fix applied");
                self.notifier
                    .notify(NotifyLevel::Info, "AI fix applied successfully.");
            }
            Err(e) => {
                warn!(id = %self.id, error = %e, "Edit failed");
                self.notifier
                    .notify(NotifyLevel::Error, &format!("Failed to apply fix: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{DocumentInfo, DocumentKey};
    use crate::notify::Notification;
    use std::sync::Mutex;

    /// In-memory host over zero or one documents.
    struct MockHost {
        document: Option<(String, Mutex<String>)>,
    }

    impl MockHost {
        fn with_document(language: &str, text: &str) -> Self {
            Self {
                document: Some((language.to_string(), Mutex::new(text.to_string()))),
            }
        }

        fn empty() -> Self {
            Self { document: None }
        }

        fn text(&self) -> Option<String> {
            self.document
                .as_ref()
                .map(|(_, buffer)| buffer.lock().unwrap().clone())
        }
    }

    impl EditorHost for MockHost {
        fn active_document(&self) -> Option<DocumentInfo> {
            self.document.as_ref().map(|(language, buffer)| DocumentInfo {
                key: DocumentKey("mock".to_string()),
                language: language.clone(),
                text: buffer.lock().unwrap().clone(),
            })
        }

        fn find_visible(&self, language: &str) -> Option<DocumentKey> {
            match &self.document {
                Some((doc_language, _)) if doc_language == language => {
                    Some(DocumentKey("mock".to_string()))
                }
                _ => None,
            }
        }

        fn replace_all(&self, _key: &DocumentKey, text: &str) -> Result<()> {
            let (_, buffer) = self.document.as_ref().expect("no document to replace");
            *buffer.lock().unwrap() = text.to_string();
            Ok(())
        }
    }

    struct RecordingNotifier {
        seen: Mutex<Vec<Notification>>,
    }

    impl RecordingNotifier {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                seen: Mutex::new(Vec::new()),
            })
        }

        fn messages(&self) -> Vec<Notification> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, level: NotifyLevel, message: &str) {
            self.seen.lock().unwrap().push(Notification {
                level,
                message: message.to_string(),
            });
        }
    }

    fn surface(host: Arc<dyn EditorHost>, notifier: Arc<dyn Notifier>, snapshot: &str)
        -> (PanelSurface, mpsc::UnboundedReceiver<HostMessage>)
    {
        let (to_ui, from_host) = mpsc::unbounded_channel();
        let surface = PanelSurface {
            id: Uuid::new_v4(),
            snapshot: DocumentSnapshot {
                text: snapshot.to_string(),
                language: "python".to_string(),
            },
            to_ui,
            host,
            notifier,
            language: "python".to_string(),
            disposed: false,
        };
        (surface, from_host)
    }

    #[test]
    fn ready_replies_with_snapshot_and_is_idempotent() {
        let host = Arc::new(MockHost::with_document("python", "x=1"));
        let notifier = RecordingNotifier::new();
        let (mut surface, mut from_host) = surface(host, notifier, "x=1");

        assert!(surface.handle_message(UiMessage::WebviewReady));
        assert!(surface.handle_message(UiMessage::WebviewReady));

        for _ in 0..2 {
            let msg = from_host.try_recv().unwrap();
            assert_eq!(
                msg,
                HostMessage::InitialCode {
                    code: "x=1".to_string()
                }
            );
        }
    }

    #[test]
    fn apply_fix_replaces_full_text_and_notifies_success() {
        let host = Arc::new(MockHost::with_document("python", "x=1"));
        let notifier = RecordingNotifier::new();
        let (mut surface, _from_host) =
            surface(Arc::clone(&host) as Arc<dyn EditorHost>, notifier.clone(), "x=1");

        surface.handle_message(UiMessage::ApplyFix {
            code: "x = 1".to_string(),
        });

        assert_eq!(host.text().unwrap(), "x = 1");
        let seen = notifier.messages();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].level, NotifyLevel::Info);
    }

    #[test]
    fn apply_fix_with_empty_draft_empties_the_document() {
        let host = Arc::new(MockHost::with_document("python", "x=1"));
        let notifier = RecordingNotifier::new();
        let (mut surface, _from_host) =
            surface(Arc::clone(&host) as Arc<dyn EditorHost>, notifier.clone(), "x=1");

        surface.handle_message(UiMessage::ApplyFix {
            code: String::new(),
        });

        assert_eq!(host.text().unwrap(), "");
        assert_eq!(notifier.messages()[0].level, NotifyLevel::Info);
    }

    #[test]
    fn apply_fix_without_matching_document_notifies_and_mutates_nothing() {
        let host = Arc::new(MockHost::with_document("rust", "fn main() {}"));
        let notifier = RecordingNotifier::new();
        let (mut surface, _from_host) =
            surface(Arc::clone(&host) as Arc<dyn EditorHost>, notifier.clone(), "");

        surface.handle_message(UiMessage::ApplyFix {
            code: "x = 1".to_string(),
        });

        assert_eq!(host.text().unwrap(), "fn main() {}");
        let seen = notifier.messages();
        assert_eq!(seen[0].level, NotifyLevel::Error);
        assert!(seen[0].message.contains("No open python document"));
    }

    #[test]
    fn close_panel_disposes_and_discards_later_messages() {
        let host = Arc::new(MockHost::with_document("python", "x=1"));
        let notifier = RecordingNotifier::new();
        let (mut surface, _from_host) =
            surface(Arc::clone(&host) as Arc<dyn EditorHost>, notifier.clone(), "x=1");

        assert!(!surface.handle_message(UiMessage::ClosePanel));
        assert!(!surface.handle_message(UiMessage::ApplyFix {
            code: "ignored".to_string(),
        }));

        assert_eq!(host.text().unwrap(), "x=1");
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn open_panel_captures_snapshot_only_for_matching_language() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(template::TEMPLATE_FILE), "{{bundleUri}}").unwrap();

        let notifier = RecordingNotifier::new();
        let mut config = CodefixConfig::default();
        config.panel.assets_dir = dir.path().to_path_buf();

        let bridge = EditorBridge::new(
            Arc::new(MockHost::with_document("rust", "fn main() {}")),
            notifier,
            config,
        );
        let mut handle = bridge.open_panel().unwrap();

        handle.post(UiMessage::WebviewReady);
        let msg = handle.from_host.recv().await.unwrap();
        assert_eq!(
            msg,
            HostMessage::InitialCode {
                code: String::new()
            }
        );
    }

    #[tokio::test]
    async fn open_panel_surfaces_template_failure() {
        let dir = tempfile::tempdir().unwrap();
        let notifier = RecordingNotifier::new();
        let mut config = CodefixConfig::default();
        config.panel.assets_dir = dir.path().to_path_buf();

        let bridge = EditorBridge::new(Arc::new(MockHost::empty()), notifier.clone(), config);
        assert!(bridge.open_panel().is_err());

        let seen = notifier.messages();
        assert_eq!(seen[0].level, NotifyLevel::Error);
        assert!(seen[0].message.contains("Cannot open panel"));
    }
}
