//! Client error types.

use std::io;

/// Errors surfaced by [`crate::MoveClient`].
///
/// There is no retry logic behind any of these: a failed connect or a
/// broken command channel ends the session, and the consumer must
/// establish a new connection from scratch.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Could not open the reliable channel to the server.
    #[error("failed to connect to server: {0}")]
    Connect(#[source] io::Error),

    /// Could not bind the local telemetry endpoint.
    #[error("failed to bind telemetry endpoint: {0}")]
    Bind(#[source] io::Error),

    /// A command frame could not be written in full; the connection
    /// should be treated as unusable.
    #[error("command channel write failed: {0}")]
    ChannelWrite(#[source] io::Error),
}
