// crates/moveme-client/tests/session.rs
//
// End-to-end session against a fake server on loopback: accept the
// TCP connection, learn the client's UDP port from the init frame,
// then feed crafted telemetry datagrams and watch the listener.

use std::net::SocketAddr;

use moveme_client::buttons;
use moveme_client::{ButtonEdges, MoveClient, UpdateListener};
use tokio::io::AsyncReadExt;
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tokio::sync::mpsc;
use tokio::time::{timeout, Duration};

const MAGIC: u32 = 0xff00_00dd;
const RECORD_LEN: usize = 2148;

#[derive(Debug, PartialEq)]
enum Event {
    Buttons {
        edges: ButtonEdges,
        trigger: u16,
    },
    Position {
        x: f32,
        y: f32,
        edges: ButtonEdges,
        trigger: u16,
    },
    NoController,
}

struct Recorder(mpsc::UnboundedSender<Event>);

impl UpdateListener for Recorder {
    fn button_update(&mut self, edges: ButtonEdges, trigger: u16) {
        let _ = self.0.send(Event::Buttons { edges, trigger });
    }

    fn position_update(&mut self, x: f32, y: f32, edges: ButtonEdges, trigger: u16) {
        let _ = self.0.send(Event::Position {
            x,
            y,
            edges,
            trigger,
        });
    }

    fn no_controller(&mut self) {
        let _ = self.0.send(Event::NoController);
    }
}

/// Standard-state packet with the given index and slot-0 fields.
struct Packet(Vec<u8>);

impl Packet {
    fn new(index: i32) -> Self {
        let mut buf = vec![0u8; RECORD_LEN];
        buf[0..4].copy_from_slice(&MAGIC.to_be_bytes());
        buf[4..8].copy_from_slice(&1u32.to_be_bytes()); // version
        buf[8..12].copy_from_slice(&1u32.to_be_bytes()); // standard state
        buf[12..16].copy_from_slice(&index.to_be_bytes());
        buf[40..44].copy_from_slice(&1i32.to_be_bytes()); // connected
        Packet(buf)
    }

    fn buttons(mut self, mask: u16) -> Self {
        self.0[248..250].copy_from_slice(&mask.to_be_bytes());
        self
    }

    fn trigger(mut self, value: u16) -> Self {
        self.0[250..252].copy_from_slice(&value.to_be_bytes());
        self
    }

    fn laser_pointer(mut self, x: f32, y: f32) -> Self {
        self.0[1000..1004].copy_from_slice(&1i32.to_be_bytes());
        self.0[1004..1008].copy_from_slice(&x.to_be_bytes());
        self.0[1008..1012].copy_from_slice(&y.to_be_bytes());
        self
    }

    fn position_pointer(mut self, x: f32, y: f32) -> Self {
        self.0[2100..2104].copy_from_slice(&1i32.to_be_bytes());
        self.0[2104..2108].copy_from_slice(&x.to_be_bytes());
        self.0[2108..2112].copy_from_slice(&y.to_be_bytes());
        self
    }

    fn disconnected(mut self) -> Self {
        self.0[40..44].copy_from_slice(&0i32.to_be_bytes());
        self.0[44..48].copy_from_slice(&1i32.to_be_bytes()); // NotConnected
        self
    }
}

/// Accept one client and read the init handshake off the stream,
/// returning the UDP port the client asked telemetry to be sent to.
async fn accept_client(listener: TcpListener) -> (TcpStream, u16) {
    let (mut stream, _) = listener.accept().await.expect("accept");

    let mut frame = [0u8; 12];
    stream.read_exact(&mut frame).await.expect("init frame");
    assert_eq!(frame[0..4], 0u32.to_be_bytes(), "init code");
    assert_eq!(frame[4..8], 4u32.to_be_bytes(), "init payload length");

    let port = u32::from_be_bytes(frame[8..12].try_into().unwrap()) as u16;
    (stream, port)
}

async fn recv_event(rx: &mut mpsc::UnboundedReceiver<Event>) -> Event {
    timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("listener should be called within 5s")
        .expect("event channel open")
}

#[tokio::test]
async fn session_dispatches_updates_in_order() {
    let server = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let server_port = server.local_addr().unwrap().port();
    let accept = tokio::spawn(accept_client(server));

    let client = MoveClient::connect("127.0.0.1", server_port).await.unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel();
    client.register_listener(Recorder(tx));

    let (_stream, udp_port) = accept.await.unwrap();
    let telemetry = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let dest = SocketAddr::from(([127, 0, 0, 1], udp_port));

    // No pointer known yet: button-only update.
    let pkt = Packet::new(1).buttons(buttons::SELECT).trigger(42);
    telemetry.send_to(&pkt.0, dest).await.unwrap();
    assert_eq!(
        recv_event(&mut rx).await,
        Event::Buttons {
            edges: ButtonEdges {
                pushed: buttons::SELECT,
                held: 0,
                released: 0,
            },
            trigger: 42,
        }
    );

    // Laser pointer becomes valid: positioned update, Move pushed on
    // top of the held Select.
    let pkt = Packet::new(2)
        .buttons(buttons::SELECT | buttons::MOVE)
        .trigger(200)
        .laser_pointer(0.25, -0.5);
    telemetry.send_to(&pkt.0, dest).await.unwrap();
    assert_eq!(
        recv_event(&mut rx).await,
        Event::Position {
            x: 0.25,
            y: -0.5,
            edges: ButtonEdges {
                pushed: buttons::MOVE,
                held: buttons::SELECT,
                released: 0,
            },
            trigger: 200,
        }
    );

    // Laser invalid but position pointer valid: its coordinates win.
    let pkt = Packet::new(3)
        .buttons(buttons::SELECT | buttons::MOVE)
        .position_pointer(-1.0, 1.0);
    telemetry.send_to(&pkt.0, dest).await.unwrap();
    assert_eq!(
        recv_event(&mut rx).await,
        Event::Position {
            x: -1.0,
            y: 1.0,
            edges: ButtonEdges {
                pushed: 0,
                held: buttons::SELECT | buttons::MOVE,
                released: 0,
            },
            trigger: 0,
        }
    );

    client.close().await;
}

#[tokio::test]
async fn stale_datagrams_do_not_corrupt_edges() {
    let server = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let server_port = server.local_addr().unwrap().port();
    let accept = tokio::spawn(accept_client(server));

    let client = MoveClient::connect("127.0.0.1", server_port).await.unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel();
    client.register_listener(Recorder(tx));

    let (_stream, udp_port) = accept.await.unwrap();
    let telemetry = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let dest = SocketAddr::from(([127, 0, 0, 1], udp_port));

    let pkt = Packet::new(10).buttons(buttons::SELECT);
    telemetry.send_to(&pkt.0, dest).await.unwrap();
    assert_eq!(
        recv_event(&mut rx).await,
        Event::Buttons {
            edges: ButtonEdges {
                pushed: buttons::SELECT,
                held: 0,
                released: 0,
            },
            trigger: 0,
        }
    );

    // Late duplicate from before the Select press: must be dropped
    // silently, producing no event and leaving the button state alone.
    let stale = Packet::new(9).buttons(0);
    telemetry.send_to(&stale.0, dest).await.unwrap();

    // Next in-order packet: Select is still *held*, not re-pushed —
    // proof the stale sample never reached the edge detector.
    let pkt = Packet::new(11).buttons(buttons::SELECT);
    telemetry.send_to(&pkt.0, dest).await.unwrap();
    assert_eq!(
        recv_event(&mut rx).await,
        Event::Buttons {
            edges: ButtonEdges {
                pushed: 0,
                held: buttons::SELECT,
                released: 0,
            },
            trigger: 0,
        }
    );

    client.close().await;
}

#[tokio::test]
async fn disconnected_controller_notifies_alongside_buttons() {
    let server = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let server_port = server.local_addr().unwrap().port();
    let accept = tokio::spawn(accept_client(server));

    let client = MoveClient::connect("127.0.0.1", server_port).await.unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel();
    client.register_listener(Recorder(tx));

    let (_stream, udp_port) = accept.await.unwrap();
    let telemetry = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let dest = SocketAddr::from(([127, 0, 0, 1], udp_port));

    telemetry
        .send_to(&Packet::new(1).disconnected().0, dest)
        .await
        .unwrap();

    // The no-controller notification comes first, then the regular
    // button-only update for the same tick.
    assert_eq!(recv_event(&mut rx).await, Event::NoController);
    assert_eq!(
        recv_event(&mut rx).await,
        Event::Buttons {
            edges: ButtonEdges::default(),
            trigger: 0,
        }
    );

    client.close().await;
}

#[tokio::test]
async fn commands_reach_the_server_as_single_frames() {
    let server = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let server_port = server.local_addr().unwrap().port();
    let accept = tokio::spawn(accept_client(server));

    let client = MoveClient::connect("127.0.0.1", server_port).await.unwrap();
    let (mut stream, _udp_port) = accept.await.unwrap();

    client.set_rumble(0, 128).await.unwrap();

    let mut frame = [0u8; 16];
    timeout(Duration::from_secs(5), stream.read_exact(&mut frame))
        .await
        .expect("frame should arrive")
        .expect("read");

    assert_eq!(frame[0..4], 0x21u32.to_be_bytes()); // set-rumble code
    assert_eq!(frame[4..8], 8u32.to_be_bytes()); // two fields
    assert_eq!(frame[8..12], 0i32.to_be_bytes()); // controller
    assert_eq!(frame[12..16], 128i32.to_be_bytes()); // rumble

    client.close().await;
}
