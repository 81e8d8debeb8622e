//! Collaborator contracts consumed by the chat room.
//!
//! SYSTEM CONTEXT
//! ==============
//! The room never talks to a transport. `ChatHandler` owns connection state,
//! the message history and the user list; `ChatCommunication` exposes the
//! inbound message stream. Implementations are single-threaded and may emit
//! synchronously from inside `connect` or `send`.

use std::rc::Rc;

use crate::error::ChatError;
use crate::net::subject::{Observer, Subscription};
use crate::state::chat::ChatMessage;

/// Chat state and commands.
pub trait ChatHandler {
    /// Observe connection state. Implementations replay the current value.
    fn connected(&self, observer: Observer<bool>) -> Subscription;

    fn messages(&self) -> Vec<ChatMessage>;

    fn users(&self) -> Vec<String>;

    /// Start a session under `name`.
    fn connect(&self, name: &str) -> Result<(), ChatError>;

    /// Dispatch one outbound message.
    fn send(&self, text: &str) -> Result<(), ChatError>;

    /// Surface a non-fatal, user-visible warning.
    fn show_warning(&self, text: &str);
}

/// Inbound message feed.
pub trait ChatCommunication {
    fn messages_stream(&self, observer: Observer<ChatMessage>) -> Subscription;
}

/// Both collaborators, bundled for injection into views.
#[derive(Clone)]
pub struct ChatServices {
    pub handler: Rc<dyn ChatHandler>,
    pub communication: Rc<dyn ChatCommunication>,
}

impl ChatServices {
    pub fn new(handler: Rc<dyn ChatHandler>, communication: Rc<dyn ChatCommunication>) -> Self {
        Self { handler, communication }
    }

    /// Use one value for both roles.
    pub fn from_shared<S>(service: Rc<S>) -> Self
    where
        S: ChatHandler + ChatCommunication + 'static,
    {
        Self::new(service.clone(), service)
    }
}

impl std::fmt::Debug for ChatServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatServices").finish_non_exhaustive()
    }
}
