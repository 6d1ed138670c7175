//! Payload types handed to the (out-of-scope) transport layer.

use serde::Serialize;

/// Rendered maze wrapped the way the WebSocket transport expects it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MapMessage {
    maze: String,
}

impl MapMessage {
    /// Wraps an already rendered ASCII maze.
    #[must_use]
    pub fn new(maze: impl Into<String>) -> Self {
        Self { maze: maze.into() }
    }

    /// Rendered maze carried by the message.
    #[must_use]
    pub fn maze(&self) -> &str {
        &self.maze
    }

    /// Serializes the message to the transport's JSON shape.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
