//! Client-side state for the chat room.
//!
//! DESIGN
//! ======
//! `chat` holds plain data (messages and the input draft); `room` holds the
//! controller that ties the draft to the collaborators and the DOM seams.

pub mod chat;
pub mod room;
