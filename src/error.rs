//! Error types shared by the chat collaborators and configuration.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatError {
    /// A connection was requested with a blank display name.
    #[error("name must not be empty")]
    EmptyName,

    /// Another user in the room already uses this display name.
    #[error("name already taken: {name}")]
    NameTaken { name: String },

    /// The session is already connected under some name.
    #[error("already connected as {name}")]
    AlreadyConnected { name: String },

    /// A message was sent without an active connection.
    #[error("not connected")]
    NotConnected,

    /// A message with no visible content was sent.
    #[error("message must not be empty")]
    EmptyMessage,

    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
