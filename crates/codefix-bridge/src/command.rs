//! Explicit command registry for the editor host.
//!
//! The host keeps one registry for the life of the process; activation
//! registers commands into it and user invocation looks them up by id.
//! This is process-wide state with an init-at-startup lifecycle, owned by
//! main rather than hidden in a module-level singleton.

use std::collections::HashMap;

use codefix_core::{CodefixError, Result};

use crate::bridge::PanelHandle;

/// A registered command handler. The codefix command opens a panel and
/// hands back the UI side of its channels.
pub type CommandHandler = Box<dyn FnMut() -> Result<PanelHandle> + Send>;

#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandHandler>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Register a command. A later registration under the same id replaces
    /// the earlier one.
    pub fn register(&mut self, id: &'static str, handler: CommandHandler) {
        self.commands.insert(id, handler);
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.commands.contains_key(id)
    }

    /// Invoke a command by id.
    pub fn invoke(&mut self, id: &str) -> Result<PanelHandle> {
        match self.commands.get_mut(id) {
            Some(handler) => handler(),
            None => Err(CodefixError::UnknownCommand(id.to_string())),
        }
    }
}
