use thiserror::Error;

/// Errors surfaced while decoding bytes off the wire into an [`crate::protocol::upstream::UpstreamPacket`].
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("unknown packet id {0:#04x}")]
    UnknownPacketId(u8),
}

/// Errors surfaced while loading or saving flat-text configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
