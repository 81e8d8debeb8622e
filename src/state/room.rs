//! Chat room view controller.
//!
//! DESIGN
//! ======
//! `ChatRoomController` owns the input draft and binds it to the chat
//! collaborators. It never touches the DOM directly: scroll measurement and
//! focus go through `ScrollView` / `Focusable`, and anything that must wait
//! for the view to catch up goes through `after_change`.
//!
//! Subscriptions made by `init` are owned by the controller and released by
//! `destroy` or on drop. Stream callbacks hold the handler weakly, because
//! the handler owns the stream that owns the callback.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::ChatConfig;
use crate::net::service::ChatServices;
use crate::net::subject::Subscription;
use crate::state::chat::{ChatMessage, RoomDraft};
use crate::util::deferred::{ChangeDetection, ChangeDetector, after_change};
use crate::util::dom::{Focusable, ScrollView, is_scrolled_to_bottom, scroll_to_bottom};

#[cfg(test)]
#[path = "room_test.rs"]
mod room_test;

/// DOM elements the controller reads and drives.
#[derive(Clone)]
pub struct RoomViews {
    /// The scrollable message list.
    pub messages: Rc<dyn ScrollView>,
    /// The message text input.
    pub text_input: Rc<dyn Focusable>,
}

pub struct ChatRoomController {
    services: ChatServices,
    detector: Rc<dyn ChangeDetector>,
    views: RoomViews,
    config: ChatConfig,
    draft: Rc<RefCell<RoomDraft>>,
    subscriptions: Vec<Subscription>,
    initialized: bool,
}

impl ChatRoomController {
    pub fn new(
        services: ChatServices,
        detector: Rc<dyn ChangeDetector>,
        views: RoomViews,
        config: ChatConfig,
    ) -> Self {
        Self {
            services,
            detector,
            views,
            config,
            draft: Rc::new(RefCell::new(RoomDraft::default())),
            subscriptions: Vec::new(),
            initialized: false,
        }
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.services.handler.messages()
    }

    pub fn users(&self) -> Vec<String> {
        self.services.handler.users()
    }

    pub fn name(&self) -> String {
        self.draft.borrow().name.clone()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.draft.borrow_mut().name = name.into();
    }

    pub fn text(&self) -> String {
        self.draft.borrow().text.clone()
    }

    pub fn set_text(&self, text: impl Into<String>) {
        self.draft.borrow_mut().text = text.into();
    }

    /// Last connection state seen on the connection stream.
    pub fn is_connected(&self) -> bool {
        self.draft.borrow().connected
    }

    /// Subscribe to connection state and inbound messages.
    ///
    /// Calling it again while subscribed does nothing.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;

        let connection = self.watch_connection();
        let inbound = self.watch_messages();
        self.subscriptions.push(connection);
        self.subscriptions.push(inbound);
        log::debug!("chat room initialized");
    }

    /// Warn on connected -> disconnected; focus the input whenever connected.
    fn watch_connection(&self) -> Subscription {
        let draft = Rc::clone(&self.draft);
        let handler = Rc::downgrade(&self.services.handler);
        let detector = Rc::clone(&self.detector);
        let input = Rc::clone(&self.views.text_input);
        let warning = self.config.disconnect_warning.clone();
        let focus_mode = self.config.focus_detection;

        self.services.handler.connected(Box::new(move |value: bool| {
            let was_connected = draft.borrow().connected;
            if was_connected && !value {
                if let Some(handler) = handler.upgrade() {
                    handler.show_warning(&warning);
                }
            }
            if value {
                let input = Rc::clone(&input);
                after_change(detector.as_ref(), focus_mode, move || input.focus());
            }
            draft.borrow_mut().connected = value;
        }))
    }

    /// Keep the list pinned to the bottom only if it was there before the update.
    fn watch_messages(&self) -> Subscription {
        let view = Rc::clone(&self.views.messages);
        let detector = Rc::clone(&self.detector);
        let tolerance = self.config.bottom_tolerance_px;
        let scroll_mode = self.config.scroll_detection;

        self.services.communication.messages_stream(Box::new(move |_message: ChatMessage| {
            if !is_scrolled_to_bottom(view.as_ref(), tolerance) {
                return;
            }
            let view = Rc::clone(&view);
            after_change(detector.as_ref(), scroll_mode, move || scroll_to_bottom(view.as_ref()));
        }))
    }

    /// Connect under the drafted name. Ignored when the name is empty.
    pub fn connect(&self) {
        let name = self.draft.borrow().pending_name().map(str::to_owned);
        let Some(name) = name else {
            return;
        };
        log::debug!("connecting as {name}");
        if let Err(e) = self.services.handler.connect(&name) {
            log::warn!("connect as {name} failed: {e}");
            self.services.handler.show_warning(&e.to_string());
        }
    }

    /// Send the drafted text, then clear the draft and refocus the input.
    ///
    /// Ignored when the draft is empty. On failure the draft is kept.
    pub fn send(&self) {
        let text = self.draft.borrow().pending_text().map(str::to_owned);
        let Some(text) = text else {
            return;
        };
        match self.services.handler.send(&text) {
            Ok(()) => {
                self.draft.borrow_mut().text.clear();
                self.focus_message_field();
            }
            Err(e) => {
                log::warn!("send failed: {e}");
                self.services.handler.show_warning(&e.to_string());
            }
        }
    }

    /// Keep `subscription` alive for as long as this controller's subscriptions.
    pub fn hold(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }

    /// Release every subscription. `init` may be called again afterwards.
    pub fn destroy(&mut self) {
        let count = self.subscriptions.len();
        self.subscriptions.clear();
        self.initialized = false;
        log::debug!("chat room destroyed, released {count} subscriptions");
    }

    /// Run `task` under `method`, using this room's change detector.
    pub fn after_change(&self, method: ChangeDetection, task: impl FnOnce() + 'static) {
        after_change(self.detector.as_ref(), method, task);
    }

    fn focus_message_field(&self) {
        self.views.text_input.focus();
    }
}

impl std::fmt::Debug for ChatRoomController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatRoomController")
            .field("draft", &*self.draft.borrow())
            .field("config", &self.config)
            .field("subscriptions", &self.subscriptions.len())
            .finish_non_exhaustive()
    }
}
