use tokio::net::tcp::OwnedWriteHalf;

use crate::protocol::downstream::DownstreamPacket;
use crate::protocol::fixed::FpShort;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerMode {
    Normal = 0x00,
    Op = 0x64,
}

impl PlayerMode {
    #[must_use]
    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

/// State the event loop owns for one connected client, plus the write half of its socket: the
/// only I/O the loop performs itself (reads happen on the per-connection task and arrive as
/// events).
pub struct Player {
    pub id: i8,
    pub username: String,
    pub mode: PlayerMode,
    pub x: FpShort,
    pub y: FpShort,
    pub z: FpShort,
    pub yaw: u8,
    pub pitch: u8,
    write_half: OwnedWriteHalf,
}

impl Player {
    #[must_use]
    pub fn new(id: i8, username: String, write_half: OwnedWriteHalf) -> Self {
        Self {
            id,
            username,
            mode: PlayerMode::Normal,
            x: 0.0,
            y: 0.0,
            z: 0.0,
            yaw: 0,
            pitch: 0,
            write_half,
        }
    }

    pub async fn write(&mut self, packet: &DownstreamPacket) -> std::io::Result<()> {
        packet.write(&mut self.write_half).await
    }

    pub async fn send_message(&mut self, text: impl Into<String>) {
        let _ = self.write(&DownstreamPacket::message(-1, &text.into())).await;
    }
}
