//! Loopback chat collaborator.
//!
//! DESIGN
//! ======
//! `InMemoryChat` implements both collaborator traits over local state so the
//! room runs without a server. Sent messages come straight back on the
//! inbound stream. Peers are simulated with `join`, `leave` and `receive`.
//!
//! Streams are emitted only after the state borrow is released, because
//! observers call back into `messages()` and `users()`.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::error::ChatError;
use crate::net::service::{ChatCommunication, ChatHandler};
use crate::net::subject::{Observer, Subject, Subscription};
use crate::state::chat::ChatMessage;

#[cfg(test)]
#[path = "in_memory_test.rs"]
mod in_memory_test;

pub const DEFAULT_HISTORY_LIMIT: usize = 500;

#[derive(Debug, Default)]
struct Room {
    self_name: Option<String>,
    users: Vec<String>,
    history: VecDeque<ChatMessage>,
    warnings: Vec<String>,
}

/// In-process chat service.
#[derive(Debug)]
pub struct InMemoryChat {
    room: RefCell<Room>,
    history_limit: usize,
    connected: Subject<bool>,
    inbound: Subject<ChatMessage>,
}

impl InMemoryChat {
    pub fn new(history_limit: usize) -> Self {
        Self {
            room: RefCell::new(Room::default()),
            history_limit: history_limit.max(1),
            connected: Subject::replaying(false),
            inbound: Subject::new(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.room.borrow().self_name.is_some()
    }

    /// Display name of the local session, if connected.
    pub fn self_name(&self) -> Option<String> {
        self.room.borrow().self_name.clone()
    }

    /// End the local session. No-op when not connected.
    pub fn disconnect(&self) {
        {
            let mut room = self.room.borrow_mut();
            let Some(name) = room.self_name.take() else {
                return;
            };
            room.users.retain(|u| *u != name);
            log::info!("{name} disconnected");
        }
        self.connected.emit(false);
    }

    /// Add a peer to the user list. Returns `false` if the name is taken.
    pub fn join(&self, name: &str) -> bool {
        let mut room = self.room.borrow_mut();
        if room.users.iter().any(|u| u == name) {
            return false;
        }
        room.users.push(name.to_owned());
        true
    }

    /// Remove a peer from the user list.
    pub fn leave(&self, name: &str) {
        self.room.borrow_mut().users.retain(|u| u != name);
    }

    /// Deliver a message from a peer.
    pub fn receive(&self, message: ChatMessage) {
        self.push(message.clone());
        self.inbound.emit(message);
    }

    /// Warnings shown so far, oldest first.
    pub fn warnings(&self) -> Vec<String> {
        self.room.borrow().warnings.clone()
    }

    fn push(&self, message: ChatMessage) {
        let mut room = self.room.borrow_mut();
        room.history.push_back(message);
        while room.history.len() > self.history_limit {
            room.history.pop_front();
        }
    }
}

impl Default for InMemoryChat {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl ChatHandler for InMemoryChat {
    fn connected(&self, observer: Observer<bool>) -> Subscription {
        self.connected.subscribe(observer)
    }

    fn messages(&self) -> Vec<ChatMessage> {
        self.room.borrow().history.iter().cloned().collect()
    }

    fn users(&self) -> Vec<String> {
        self.room.borrow().users.clone()
    }

    fn connect(&self, name: &str) -> Result<(), ChatError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ChatError::EmptyName);
        }
        {
            let mut room = self.room.borrow_mut();
            if let Some(current) = &room.self_name {
                return Err(ChatError::AlreadyConnected { name: current.clone() });
            }
            if room.users.iter().any(|u| u == name) {
                return Err(ChatError::NameTaken { name: name.to_owned() });
            }
            room.self_name = Some(name.to_owned());
            room.users.push(name.to_owned());
        }
        log::info!("{name} connected");
        self.connected.emit(true);
        Ok(())
    }

    fn send(&self, text: &str) -> Result<(), ChatError> {
        let author = self.room.borrow().self_name.clone().ok_or(ChatError::NotConnected)?;
        if text.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        let message = ChatMessage {
            id: uuid::Uuid::new_v4().to_string(),
            author,
            content: text.to_owned(),
            timestamp: now_ms(),
        };
        self.push(message.clone());
        self.inbound.emit(message);
        Ok(())
    }

    fn show_warning(&self, text: &str) {
        log::warn!("{text}");
        self.room.borrow_mut().warnings.push(text.to_owned());
    }
}

impl ChatCommunication for InMemoryChat {
    fn messages_stream(&self, observer: Observer<ChatMessage>) -> Subscription {
        self.inbound.subscribe(observer)
    }
}

/// Wall-clock time in milliseconds since the Unix epoch.
fn now_ms() -> f64 {
    #[cfg(feature = "hydrate")]
    {
        js_sys::Date::now()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0.0, |d| d.as_secs_f64() * 1000.0)
    }
}
