//! The telemetry receive loop.
//!
//! One dedicated task per connection. It owns the UDP socket, the
//! sequence state and the previous button mask, and it is the only
//! context that ever touches them. Per accepted standard-state packet
//! it runs edge detection and dispatches exactly one update to the
//! registered listener.
//!
//! The loop ends when the endpoint is closed: [`crate::MoveClient`]
//! drops its half of the shutdown channel, the `select!` arm fires,
//! and the task returns, dropping the socket. That is the only
//! cancellation path; there are no receive timeouts, and a silent
//! server simply produces no callbacks.

use std::sync::{Arc, Mutex};

use moveme_core::{ButtonEdges, ControllerStatus, UpdateListener};
use moveme_protocol::telemetry_codec::{self, Rejected, SequenceState};
use tokio::net::UdpSocket;
use tokio::sync::oneshot;
use tracing::{error, info, trace, warn};

/// Largest datagram the loop will accept; standard-state records are
/// ~2.1 KiB, camera frame slices can be much larger.
const MAX_DATAGRAM_LEN: usize = 65536;

/// The single registration slot for the consumer's listener.
/// Last registration wins; `None` means updates are dropped.
pub(crate) type ListenerSlot = Arc<Mutex<Option<Box<dyn UpdateListener>>>>;

pub(crate) struct ReceiveLoop {
    socket: UdpSocket,
    shutdown: oneshot::Receiver<()>,
    listener: ListenerSlot,
    sequence: SequenceState,
    buttons_down: u16,
}

impl ReceiveLoop {
    pub(crate) fn new(
        socket: UdpSocket,
        shutdown: oneshot::Receiver<()>,
        listener: ListenerSlot,
    ) -> Self {
        ReceiveLoop {
            socket,
            shutdown,
            listener,
            sequence: SequenceState::new(),
            buttons_down: 0,
        }
    }

    pub(crate) async fn run(mut self) {
        let mut buf = vec![0u8; MAX_DATAGRAM_LEN];

        loop {
            tokio::select! {
                _ = &mut self.shutdown => {
                    info!("telemetry endpoint closed, receive loop exiting");
                    return;
                }
                received = self.socket.recv(&mut buf) => {
                    match received {
                        Ok(len) => self.handle_datagram(&buf[..len]),
                        // Not closure (closure is the shutdown arm):
                        // report and keep draining the socket.
                        Err(e) => error!("telemetry receive fault: {}", e),
                    }
                }
            }
        }
    }

    fn handle_datagram(&mut self, datagram: &[u8]) {
        let frame = match telemetry_codec::decode_standard_state(datagram, &mut self.sequence) {
            Ok(frame) => frame,
            Err(Rejected::UnsupportedPayload(code)) => {
                warn!("unimplemented payload code {}", code);
                return;
            }
            Err(reason) => {
                // Expected noise on an unreliable transport.
                trace!("dropping datagram: {}", reason);
                return;
            }
        };

        // Edge state advances once per accepted packet, whether or not
        // anyone is listening.
        let edges = ButtonEdges::between(self.buttons_down, frame.digital_buttons);
        self.buttons_down = frame.digital_buttons;

        let Ok(mut slot) = self.listener.lock() else {
            return;
        };
        let Some(listener) = slot.as_deref_mut() else {
            return;
        };

        if !frame.controller_connected && frame.status == ControllerStatus::NotConnected {
            listener.no_controller();
        }

        if !frame.pointer_valid && !frame.position_pointer_valid {
            // No position known yet; buttons still flow.
            listener.button_update(edges, frame.trigger);
            return;
        }

        let (x, y) = if frame.pointer_valid {
            (frame.pointer_x, frame.pointer_y)
        } else {
            (frame.position_x, frame.position_y)
        };
        listener.position_update(x, y, edges, frame.trigger);
    }
}
