use tokio::io::{AsyncRead, AsyncReadExt};

use super::fixed::{FpShort, decode_fpshort, decode_short, decode_string};
use super::ids;
use crate::consts::STRING_FIELD_LEN;
use crate::error::ProtocolError;

#[derive(Debug, Clone)]
pub struct Identification {
    pub version: u8,
    pub username: String,
    pub verification: String,
}

#[derive(Debug, Clone, Copy)]
pub struct SetBlock {
    pub x: i16,
    pub y: i16,
    pub z: i16,
    pub mode: u8,
    pub block: u8,
}

#[derive(Debug, Clone, Copy)]
pub struct SetPosition {
    pub x: FpShort,
    pub y: FpShort,
    pub z: FpShort,
    pub yaw: u8,
    pub pitch: u8,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub message: String,
}

/// A packet parsed off a client's socket, tagged with which kind it was.
#[derive(Debug, Clone)]
pub enum UpstreamPacket {
    Identification(Identification),
    SetBlock(SetBlock),
    SetPosition(SetPosition),
    Message(Message),
}

async fn read_short<R: AsyncRead + Unpin>(reader: &mut R) -> Result<i16, ProtocolError> {
    let mut buf = [0u8; 2];
    reader.read_exact(&mut buf).await?;
    Ok(decode_short(buf))
}

async fn read_fpshort<R: AsyncRead + Unpin>(reader: &mut R) -> Result<FpShort, ProtocolError> {
    let mut buf = [0u8; 2];
    reader.read_exact(&mut buf).await?;
    Ok(decode_fpshort(buf))
}

async fn read_fixed_string<R: AsyncRead + Unpin>(reader: &mut R) -> Result<String, ProtocolError> {
    let mut buf = [0u8; STRING_FIELD_LEN];
    reader.read_exact(&mut buf).await?;
    Ok(decode_string(&buf))
}

async fn read_identification<R: AsyncRead + Unpin>(
    reader: &mut R,
) -> Result<Identification, ProtocolError> {
    let mut version = [0u8; 1];
    reader.read_exact(&mut version).await?;

    let username = read_fixed_string(reader).await?;
    let verification = read_fixed_string(reader).await?;

    // Trailing padding byte, unused.
    let mut pad = [0u8; 1];
    reader.read_exact(&mut pad).await?;

    Ok(Identification {
        version: version[0],
        username,
        verification,
    })
}

async fn read_set_block<R: AsyncRead + Unpin>(reader: &mut R) -> Result<SetBlock, ProtocolError> {
    let x = read_short(reader).await?;
    let y = read_short(reader).await?;
    let z = read_short(reader).await?;

    let mut mode_and_block = [0u8; 2];
    reader.read_exact(&mut mode_and_block).await?;

    Ok(SetBlock {
        x,
        y,
        z,
        mode: mode_and_block[0],
        block: mode_and_block[1],
    })
}

async fn read_set_position<R: AsyncRead + Unpin>(
    reader: &mut R,
) -> Result<SetPosition, ProtocolError> {
    // The leading player-id byte is part of the wire format but ignored: the sender's
    // connection identity is the only source of truth for whose position this is.
    let mut player_id = [0u8; 1];
    reader.read_exact(&mut player_id).await?;

    let x = read_fpshort(reader).await?;
    let y = read_fpshort(reader).await?;
    let z = read_fpshort(reader).await?;

    let mut yaw_pitch = [0u8; 2];
    reader.read_exact(&mut yaw_pitch).await?;

    Ok(SetPosition {
        x,
        y,
        z,
        yaw: yaw_pitch[0],
        pitch: yaw_pitch[1],
    })
}

async fn read_message<R: AsyncRead + Unpin>(reader: &mut R) -> Result<Message, ProtocolError> {
    // Leading sender-id byte, unused on the way in (same reasoning as SetPosition).
    let mut unused = [0u8; 1];
    reader.read_exact(&mut unused).await?;

    let message = read_fixed_string(reader).await?;
    Ok(Message { message })
}

/// Reads the handshake packet that must open every connection. Returns
/// `Err(ProtocolError::UnknownPacketId)` if the first byte isn't `Identification` — the caller
/// treats that as an immediate disconnect, matching the reference server.
pub async fn read_handshake<R: AsyncRead + Unpin>(
    reader: &mut R,
) -> Result<Identification, ProtocolError> {
    let mut id = [0u8; 1];
    reader.read_exact(&mut id).await?;

    if id[0] != ids::UPSTREAM_PLAYER_IDENTIFICATION {
        return Err(ProtocolError::UnknownPacketId(id[0]));
    }

    read_identification(reader).await
}

/// Reads one packet from an established session. A second `Identification` packet is valid
/// here (it decodes fine) — the caller is responsible for treating it as a forced disconnect.
pub async fn read_packet<R: AsyncRead + Unpin>(
    reader: &mut R,
) -> Result<UpstreamPacket, ProtocolError> {
    let mut id = [0u8; 1];
    reader.read_exact(&mut id).await?;

    match id[0] {
        ids::UPSTREAM_PLAYER_IDENTIFICATION => {
            Ok(UpstreamPacket::Identification(read_identification(reader).await?))
        }
        ids::UPSTREAM_SET_BLOCK => Ok(UpstreamPacket::SetBlock(read_set_block(reader).await?)),
        ids::UPSTREAM_SET_POSITION => {
            Ok(UpstreamPacket::SetPosition(read_set_position(reader).await?))
        }
        ids::UPSTREAM_MESSAGE => Ok(UpstreamPacket::Message(read_message(reader).await?)),
        other => Err(ProtocolError::UnknownPacketId(other)),
    }
}
