//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read the chat collaborators and room config from Leptos
//! context providers set up by `App`.

pub mod chat_room;
pub mod user_list;
