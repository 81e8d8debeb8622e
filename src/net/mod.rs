//! Chat collaborator seams.
//!
//! SYSTEM CONTEXT
//! ==============
//! `service` defines what the chat room consumes, `subject` is the stream
//! primitive those contracts are expressed in, and `in_memory` is a local
//! implementation of both contracts.

pub mod in_memory;
pub mod service;
pub mod subject;
