//! Connection lifecycle and the public command surface.

use std::sync::{Arc, Mutex};

use moveme_core::{Command, UpdateListener};
use tokio::net::{TcpStream, UdpSocket};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::info;

use crate::commands::CommandChannel;
use crate::error::ClientError;
use crate::receive::{ListenerSlot, ReceiveLoop};

/// A live session with a Move.Me tracking server.
///
/// Owns the reliable command channel and the background telemetry
/// task. Commands may be issued from any task; the listener runs on
/// the receive task. Dropping the client (or calling [`close`]) closes
/// the telemetry endpoint, which is the only way the receive task
/// terminates.
///
/// [`close`]: MoveClient::close
pub struct MoveClient {
    commands: CommandChannel,
    listener: ListenerSlot,
    shutdown: oneshot::Sender<()>,
    receive_task: JoinHandle<()>,
}

impl MoveClient {
    /// Connect to a tracking server.
    ///
    /// Opens the TCP command channel, binds a UDP socket on an
    /// ephemeral local port, starts the receive task and sends the
    /// init command carrying that port — the server sends no telemetry
    /// until it knows where to aim it.
    pub async fn connect(host: &str, port: u16) -> Result<Self, ClientError> {
        let stream = TcpStream::connect((host, port))
            .await
            .map_err(ClientError::Connect)?;
        stream.set_nodelay(true).map_err(ClientError::Connect)?;
        // The server only ever talks back over UDP; the read half is
        // not needed.
        let (_, writer) = stream.into_split();

        let socket = UdpSocket::bind(("0.0.0.0", 0))
            .await
            .map_err(ClientError::Bind)?;
        let udp_port = socket.local_addr().map_err(ClientError::Bind)?.port();
        info!(udp_port, "telemetry endpoint bound");

        let listener: ListenerSlot = Arc::new(Mutex::new(None));
        let (shutdown, shutdown_rx) = oneshot::channel();
        let receive_task =
            tokio::spawn(ReceiveLoop::new(socket, shutdown_rx, listener.clone()).run());

        let client = MoveClient {
            commands: CommandChannel::new(writer),
            listener,
            shutdown,
            receive_task,
        };
        client.send(&Command::Init {
            udp_port: udp_port as u32,
        })
        .await?;

        info!(host, port, "connected to tracking server");
        Ok(client)
    }

    /// Register a listener for controller updates, replacing any
    /// previous one. Only the most recently registered listener
    /// receives updates.
    pub fn register_listener(&self, listener: impl UpdateListener + 'static) {
        if let Ok(mut slot) = self.listener.lock() {
            *slot = Some(Box::new(listener));
        }
    }

    /// Send any command over the reliable channel.
    ///
    /// The frame is written in full and flushed before this returns;
    /// on [`ClientError::ChannelWrite`] the connection is unusable and
    /// should be closed.
    pub async fn send(&self, cmd: &Command) -> Result<(), ClientError> {
        self.commands.send(cmd).await
    }

    /// Close the session: stop the receive task and shut down the
    /// command channel. Consuming `self` makes closing a once-only
    /// operation.
    pub async fn close(self) {
        // Dropping the sender also works; sending makes the handoff
        // explicit and ignores an already-gone task.
        let _ = self.shutdown.send(());
        let _ = self.receive_task.await;
        self.commands.shutdown().await;
        info!("connection closed");
    }

    // -------------------------------------------------------------------------
    // Convenience wrappers, one per protocol command.
    // -------------------------------------------------------------------------

    /// Pause standard-state packet delivery.
    pub async fn pause(&self) -> Result<(), ClientError> {
        self.send(&Command::Pause).await
    }

    /// Resume standard-state packet delivery.
    pub async fn resume(&self) -> Result<(), ClientError> {
        self.send(&Command::Resume).await
    }

    /// Set the delay between standard-state packets in milliseconds.
    /// 2ms is a good value.
    pub async fn delay_change(&self, ms: u32) -> Result<(), ClientError> {
        self.send(&Command::DelayChange { ms }).await
    }

    /// Configure the camera: `max_exposure` in image rows (40-511),
    /// `image_quality` 0.0-1.0.
    pub async fn configure_camera(
        &self,
        max_exposure: u32,
        image_quality: f32,
    ) -> Result<(), ClientError> {
        self.send(&Command::ConfigureCamera {
            max_exposure,
            image_quality,
        })
        .await
    }

    /// Calibrate a controller (0-3). It should be pointed at the
    /// camera and held still.
    pub async fn calibrate_controller(&self, controller: u32) -> Result<(), ClientError> {
        self.send(&Command::CalibrateController { controller }).await
    }

    /// Record the left edge of the laser pointer box; the controller
    /// should be pointed at the left-most point.
    pub async fn set_laser_left(&self, controller: u32) -> Result<(), ClientError> {
        self.send(&Command::LaserSetLeft { controller }).await
    }

    /// Record the right edge of the laser pointer box.
    pub async fn set_laser_right(&self, controller: u32) -> Result<(), ClientError> {
        self.send(&Command::LaserSetRight { controller }).await
    }

    /// Record the bottom edge of the laser pointer box.
    pub async fn set_laser_bottom(&self, controller: u32) -> Result<(), ClientError> {
        self.send(&Command::LaserSetBottom { controller }).await
    }

    /// Record the top edge of the laser pointer box.
    pub async fn set_laser_top(&self, controller: u32) -> Result<(), ClientError> {
        self.send(&Command::LaserSetTop { controller }).await
    }

    /// Enable laser-pointer tracking for a controller.
    pub async fn enable_laser(&self, controller: u32) -> Result<(), ClientError> {
        self.send(&Command::LaserEnable { controller }).await
    }

    /// Disable laser-pointer tracking for a controller.
    pub async fn disable_laser(&self, controller: u32) -> Result<(), ClientError> {
        self.send(&Command::LaserDisable { controller }).await
    }

    /// Reset a controller.
    pub async fn reset_controller(&self, controller: u32) -> Result<(), ClientError> {
        self.send(&Command::ControllerReset { controller }).await
    }

    /// Record the left edge of the position pointer box.
    pub async fn set_position_left(&self, controller: u32) -> Result<(), ClientError> {
        self.send(&Command::PositionSetLeft { controller }).await
    }

    /// Record the right edge of the position pointer box.
    pub async fn set_position_right(&self, controller: u32) -> Result<(), ClientError> {
        self.send(&Command::PositionSetRight { controller }).await
    }

    /// Record the bottom edge of the position pointer box.
    pub async fn set_position_bottom(&self, controller: u32) -> Result<(), ClientError> {
        self.send(&Command::PositionSetBottom { controller }).await
    }

    /// Record the top edge of the position pointer box.
    pub async fn set_position_top(&self, controller: u32) -> Result<(), ClientError> {
        self.send(&Command::PositionSetTop { controller }).await
    }

    /// Enable position tracking for a controller.
    pub async fn enable_position(&self, controller: u32) -> Result<(), ClientError> {
        self.send(&Command::PositionEnable { controller }).await
    }

    /// Disable position tracking for a controller.
    pub async fn disable_position(&self, controller: u32) -> Result<(), ClientError> {
        self.send(&Command::PositionDisable { controller }).await
    }

    /// Force a controller sphere to a fixed RGB color (components
    /// 0.0-1.0). Disables sphere tracking for that controller and
    /// costs tracking accuracy.
    pub async fn force_rgb(
        &self,
        controller: u32,
        r: f32,
        g: f32,
        b: f32,
    ) -> Result<(), ClientError> {
        self.send(&Command::ForceRgb { controller, r, g, b }).await
    }

    /// Set controller rumble, 0 (off) to 255 (full).
    pub async fn set_rumble(&self, controller: u32, rumble: u32) -> Result<(), ClientError> {
        self.send(&Command::SetRumble { controller, rumble }).await
    }

    /// Request tracking hues for all four controller slots at once
    /// (0-359 each, or [`crate::PICK_FOR_ME`] / [`crate::DONT_TRACK`]).
    /// Hues are requests; the server may move them to keep tracking
    /// stable.
    pub async fn set_tracking_hues(
        &self,
        hue0: u32,
        hue1: u32,
        hue2: u32,
        hue3: u32,
    ) -> Result<(), ClientError> {
        self.send(&Command::TrackHues {
            hue0,
            hue1,
            hue2,
            hue3,
        })
        .await
    }

    /// Set the delay between camera frame packets in milliseconds
    /// (16-255).
    pub async fn camera_frame_delay(&self, ms: u32) -> Result<(), ClientError> {
        self.send(&Command::CameraFrameDelay { ms }).await
    }

    /// Set the number of horizontal slices each camera frame is split
    /// into (1-7).
    pub async fn camera_frame_slices(&self, count: u32) -> Result<(), ClientError> {
        self.send(&Command::CameraFrameSlices { count }).await
    }

    /// Pause camera frame packet delivery.
    pub async fn camera_frame_pause(&self) -> Result<(), ClientError> {
        self.send(&Command::CameraFramePause).await
    }

    /// Resume camera frame packet delivery.
    pub async fn camera_frame_resume(&self) -> Result<(), ClientError> {
        self.send(&Command::CameraFrameResume).await
    }
}
