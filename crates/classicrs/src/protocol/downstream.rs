use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::fixed::{FpShort, encode_fpshort, encode_short, encode_string, truncate_to_bytes};
use super::ids;
use crate::consts::{LEVEL_CHUNK_LEN, STRING_FIELD_LEN};

/// A packet queued to be written to a single client's socket.
#[derive(Debug, Clone)]
pub enum DownstreamPacket {
    ServerIdentification { name: String, motd: String, mode: u8 },
    LevelInit,
    LevelChunk { data: [u8; LEVEL_CHUNK_LEN], length: i16, percent: u8 },
    LevelFinalize { x: i16, y: i16, z: i16 },
    SetBlock { x: i16, y: i16, z: i16, block: u8 },
    SpawnPlayer { id: i8, username: String, x: FpShort, y: FpShort, z: FpShort, yaw: u8, pitch: u8 },
    SetPosition { id: i8, x: FpShort, y: FpShort, z: FpShort, yaw: u8, pitch: u8 },
    DespawnPlayer { id: i8 },
    Message { id: i8, message: String },
    DisconnectPlayer { reason: String },
    UpdatePlayerMode { mode: u8 },
}

impl DownstreamPacket {
    /// Builds a chat-line packet, applying the reference server's message normalization:
    /// hard-truncate to the 64-byte string field, then strip a single trailing `&` so a
    /// truncated color code can't bleed a dangling escape onto the next line.
    #[must_use]
    pub fn message(sender_id: i8, text: &str) -> Self {
        let mut message = truncate_to_bytes(text, STRING_FIELD_LEN).to_string();
        if message.ends_with('&') {
            message.pop();
        }
        Self::Message { id: sender_id, message }
    }

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::ServerIdentification { name, motd, mode } => {
                let mut buf = Vec::with_capacity(2 + STRING_FIELD_LEN * 2 + 1);
                buf.push(ids::DOWNSTREAM_SERVER_IDENTIFICATION);
                buf.push(crate::consts::PROTOCOL_VERSION);
                buf.extend_from_slice(&encode_string(name));
                buf.extend_from_slice(&encode_string(motd));
                buf.push(*mode);
                buf
            }
            Self::LevelInit => vec![ids::DOWNSTREAM_LEVEL_INIT],
            Self::LevelChunk { data, length, percent } => {
                let mut buf = Vec::with_capacity(1 + 2 + LEVEL_CHUNK_LEN + 1);
                buf.push(ids::DOWNSTREAM_LEVEL_CHUNK);
                buf.extend_from_slice(&encode_short(*length));
                buf.extend_from_slice(data);
                buf.push(*percent);
                buf
            }
            Self::LevelFinalize { x, y, z } => {
                let mut buf = Vec::with_capacity(7);
                buf.push(ids::DOWNSTREAM_LEVEL_FINALIZE);
                buf.extend_from_slice(&encode_short(*x));
                buf.extend_from_slice(&encode_short(*y));
                buf.extend_from_slice(&encode_short(*z));
                buf
            }
            Self::SetBlock { x, y, z, block } => {
                let mut buf = Vec::with_capacity(8);
                buf.push(ids::DOWNSTREAM_SET_BLOCK);
                buf.extend_from_slice(&encode_short(*x));
                buf.extend_from_slice(&encode_short(*y));
                buf.extend_from_slice(&encode_short(*z));
                buf.push(*block);
                buf
            }
            Self::SpawnPlayer { id, username, x, y, z, yaw, pitch } => {
                let mut buf = Vec::with_capacity(2 + STRING_FIELD_LEN + 8);
                buf.push(ids::DOWNSTREAM_SPAWN_PLAYER);
                buf.push(*id as u8);
                buf.extend_from_slice(&encode_string(username));
                buf.extend_from_slice(&encode_fpshort(*x));
                buf.extend_from_slice(&encode_fpshort(*y));
                buf.extend_from_slice(&encode_fpshort(*z));
                buf.push(*yaw);
                buf.push(*pitch);
                buf
            }
            Self::SetPosition { id, x, y, z, yaw, pitch } => {
                let mut buf = Vec::with_capacity(9);
                buf.push(ids::DOWNSTREAM_SET_POSITION);
                buf.push(*id as u8);
                buf.extend_from_slice(&encode_fpshort(*x));
                buf.extend_from_slice(&encode_fpshort(*y));
                buf.extend_from_slice(&encode_fpshort(*z));
                buf.push(*yaw);
                buf.push(*pitch);
                buf
            }
            Self::DespawnPlayer { id } => vec![ids::DOWNSTREAM_DESPAWN_PLAYER, *id as u8],
            Self::Message { id, message } => {
                let mut buf = Vec::with_capacity(2 + STRING_FIELD_LEN);
                buf.push(ids::DOWNSTREAM_MESSAGE);
                buf.push(*id as u8);
                buf.extend_from_slice(&encode_string(message));
                buf
            }
            Self::DisconnectPlayer { reason } => {
                let mut buf = Vec::with_capacity(1 + STRING_FIELD_LEN);
                buf.push(ids::DOWNSTREAM_DISCONNECT_PLAYER);
                buf.extend_from_slice(&encode_string(reason));
                buf
            }
            Self::UpdatePlayerMode { mode } => vec![ids::DOWNSTREAM_UPDATE_PLAYER_MODE, *mode],
        }
    }

    pub async fn write<W: AsyncWrite + Unpin>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.encode()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_strips_trailing_ampersand_after_truncation() {
        let text = format!("{}&", "x".repeat(63));
        let packet = DownstreamPacket::message(-1, &text);
        match packet {
            DownstreamPacket::Message { message, .. } => {
                assert_eq!(message, "x".repeat(63));
            }
            _ => panic!("expected Message"),
        }
    }

    #[test]
    fn set_block_encodes_fixed_layout() {
        let packet = DownstreamPacket::SetBlock { x: 1, y: 2, z: 3, block: 9 };
        assert_eq!(packet.encode(), vec![ids::DOWNSTREAM_SET_BLOCK, 0, 1, 0, 2, 0, 3, 9]);
    }

    #[test]
    fn level_chunk_length_reflects_unpadded_size() {
        let mut data = [0u8; LEVEL_CHUNK_LEN];
        data[0] = 7;
        let packet = DownstreamPacket::LevelChunk { data, length: 1, percent: 50 };
        let encoded = packet.encode();
        assert_eq!(encoded.len(), 1 + 2 + LEVEL_CHUNK_LEN + 1);
        assert_eq!(&encoded[1..3], &[0, 1]);
    }
}
