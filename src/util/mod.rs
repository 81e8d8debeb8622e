//! Browser-facing helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `deferred` times callbacks against the reactive update cycle and `dom`
//! wraps the element measurements the chat room reads. Both keep the
//! controller free of direct `web_sys` calls.

pub mod deferred;
pub mod dom;
