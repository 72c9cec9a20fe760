//! Interactive smoke-test against a live tracking server: cycles the
//! first three controllers' hues while mapping face buttons to laser
//! box calibration for controller 0.
//!
//! Buttons: Square/Circle/Cross/Triangle set the left/right/bottom/top
//! laser edges, Move enables the laser, Select resets, Start
//! calibrates.

use anyhow::Result;
use clap::Parser;
use moveme_client::{buttons, ButtonEdges, MoveClient, UpdateListener, PICK_FOR_ME};
use tokio::sync::mpsc;
use tokio::time::{interval, Duration};
use tracing::info;

#[derive(Parser)]
#[clap(name = "color-cycle")]
#[clap(about = "Cycle tracking hues and drive laser calibration from the controller")]
struct Cli {
    /// Tracking server address
    #[clap(short, long, default_value = "127.0.0.1")]
    server: String,

    /// Tracking server port
    #[clap(short, long, default_value = "7899")]
    port: u16,
}

/// Forwards pushed-button masks to the main task; listeners run on the
/// receive task, so command sending happens over a channel.
struct ButtonRelay(mpsc::UnboundedSender<u16>);

impl UpdateListener for ButtonRelay {
    fn button_update(&mut self, edges: ButtonEdges, _trigger: u16) {
        if edges.pushed != 0 {
            let _ = self.0.send(edges.pushed);
        }
    }

    fn position_update(&mut self, x: f32, y: f32, edges: ButtonEdges, _trigger: u16) {
        info!("pointer at ({:.3}, {:.3})", x, y);
        if edges.pushed != 0 {
            let _ = self.0.send(edges.pushed);
        }
    }

    fn no_controller(&mut self) {
        info!("controller is not connected");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let client = MoveClient::connect(&cli.server, cli.port).await?;
    let (tx, mut rx) = mpsc::unbounded_channel();
    client.register_listener(ButtonRelay(tx));
    client.delay_change(2).await?;

    let mut hues: [u32; 3] = [0, 100, 250];
    let mut tick = interval(Duration::from_millis(10));

    loop {
        tokio::select! {
            Some(pushed) = rx.recv() => {
                if pushed & buttons::SQUARE != 0 {
                    client.set_laser_left(0).await?;
                }
                if pushed & buttons::CIRCLE != 0 {
                    client.set_laser_right(0).await?;
                }
                if pushed & buttons::CROSS != 0 {
                    client.set_laser_bottom(0).await?;
                }
                if pushed & buttons::TRIANGLE != 0 {
                    client.set_laser_top(0).await?;
                }
                if pushed & buttons::MOVE != 0 {
                    client.enable_laser(0).await?;
                }
                if pushed & buttons::SELECT != 0 {
                    client.reset_controller(0).await?;
                }
                if pushed & buttons::START != 0 {
                    client.calibrate_controller(0).await?;
                }
            }
            _ = tick.tick() => {
                client
                    .set_tracking_hues(hues[0], hues[1], hues[2], PICK_FOR_ME)
                    .await?;
                for hue in &mut hues {
                    *hue = (*hue + 1) % 360;
                }
            }
        }
    }
}
