pub mod bridge;
pub mod command;
pub mod host;
pub mod messages;
pub mod notify;
pub mod template;

pub use bridge::{EditorBridge, PanelHandle, PanelPoster, DEBUG_COMMAND};
pub use command::CommandRegistry;
pub use host::{DocumentInfo, DocumentKey, DocumentSnapshot, EditorHost, FileHost};
pub use messages::{HostMessage, UiMessage};
pub use notify::{ChannelNotifier, Notification, Notifier, NotifyLevel};
