//! The write side of the reliable channel.

use std::sync::Arc;

use moveme_core::Command;
use moveme_protocol::command_codec;
use tokio::io::AsyncWriteExt;
use tokio::net::tcp::OwnedWriteHalf;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::ClientError;

/// Serialized access to the TCP write half.
///
/// The lock is held across the whole `write_all` + `flush` of one
/// frame so two commands can never interleave byte-for-byte, no matter
/// which tasks issue them.
#[derive(Clone)]
pub(crate) struct CommandChannel {
    writer: Arc<Mutex<OwnedWriteHalf>>,
}

impl CommandChannel {
    pub(crate) fn new(writer: OwnedWriteHalf) -> Self {
        CommandChannel {
            writer: Arc::new(Mutex::new(writer)),
        }
    }

    /// Encode one command and write the frame in full, flushed, before
    /// returning. A write fault means the channel is broken; it is
    /// surfaced to the caller and nothing is retried.
    pub(crate) async fn send(&self, cmd: &Command) -> Result<(), ClientError> {
        let mut frame = Vec::with_capacity(24);
        command_codec::encode_command(cmd, &mut frame);

        let mut writer = self.writer.lock().await;
        writer
            .write_all(&frame)
            .await
            .map_err(ClientError::ChannelWrite)?;
        writer.flush().await.map_err(ClientError::ChannelWrite)?;

        debug!(?cmd, "sent command");
        Ok(())
    }

    /// Close the write side, signalling the server we are done.
    pub(crate) async fn shutdown(&self) {
        let mut writer = self.writer.lock().await;
        let _ = writer.shutdown().await;
    }
}
