//! Per-connection reader task: owns the socket's read half, decodes packets and forwards them
//! as tagged events. Holds no server state directly — the event loop is the only task that
//! mutates [`crate::server::ServerState`], including the player-ID pool, so claiming an ID is a
//! round trip through the event loop rather than a direct pool call.

use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::protocol::downstream::DownstreamPacket;
use crate::protocol::upstream::{self, UpstreamPacket};
use crate::protocol::{BuildMode, fixed::FpShort};

/// Which slash command a deferred world save was triggered by, so the event loop can word the
/// player-facing outcome message correctly once the detached save task reports back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldSaveCommand {
    SetSpawn,
    SaveWorld,
}

pub enum ServerEvent {
    Connect {
        username: String,
        verification: String,
        write_half: tokio::net::tcp::OwnedWriteHalf,
        reply: oneshot::Sender<Option<i8>>,
    },
    Disconnect { id: i8 },
    Message { id: i8, message: String },
    SetPosition { id: i8, x: FpShort, y: FpShort, z: FpShort, yaw: u8, pitch: u8 },
    SetBlock { id: i8, x: i16, y: i16, z: i16, mode: BuildMode, block: u8 },
    WorldSaveComplete { requester_id: i8, requester_name: String, command: WorldSaveCommand, result: Result<(), String> },
}

/// Accepts one connection: reads the handshake, asks the event loop for a player ID (rejecting
/// for a full server if none is free), then loops decoding packets until the socket closes or
/// errors.
pub async fn handle_connection(stream: TcpStream, events: mpsc::Sender<ServerEvent>) {
    let (mut read_half, mut write_half) = stream.into_split();

    let identification = match upstream::read_handshake(&mut read_half).await {
        Ok(identification) => identification,
        Err(err) => {
            debug!("rejecting connection during handshake: {err}");
            return;
        }
    };

    let (reply_tx, reply_rx) = oneshot::channel();
    if events
        .send(ServerEvent::Connect {
            username: identification.username,
            verification: identification.verification,
            write_half,
            reply: reply_tx,
        })
        .await
        .is_err()
    {
        return;
    }

    let Ok(Some(id)) = reply_rx.await else {
        return;
    };

    loop {
        let packet = match upstream::read_packet(&mut read_half).await {
            Ok(packet) => packet,
            Err(err) => {
                debug!("connection {id} closed: {err}");
                break;
            }
        };

        let event = match packet {
            UpstreamPacket::Message(message) => ServerEvent::Message { id, message: message.message },
            UpstreamPacket::SetPosition(position) => ServerEvent::SetPosition {
                id,
                x: position.x,
                y: position.y,
                z: position.z,
                yaw: position.yaw,
                pitch: position.pitch,
            },
            UpstreamPacket::SetBlock(set_block) => {
                let Some(mode) = BuildMode::from_byte(set_block.mode) else { continue };
                ServerEvent::SetBlock { id, x: set_block.x, y: set_block.y, z: set_block.z, mode, block: set_block.block }
            }
            UpstreamPacket::Identification(_) => {
                warn!("connection {id} sent a second identification packet, disconnecting");
                break;
            }
        };

        if events.send(event).await.is_err() {
            break;
        }
    }

    events.send(ServerEvent::Disconnect { id }).await.ok();
}
