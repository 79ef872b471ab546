pub mod downstream;
pub mod fixed;
pub mod upstream;

pub mod ids {
    pub const UPSTREAM_PLAYER_IDENTIFICATION: u8 = 0x00;
    pub const UPSTREAM_SET_BLOCK: u8 = 0x05;
    pub const UPSTREAM_SET_POSITION: u8 = 0x08;
    pub const UPSTREAM_MESSAGE: u8 = 0x0D;

    pub const DOWNSTREAM_SERVER_IDENTIFICATION: u8 = 0x00;
    pub const DOWNSTREAM_PING: u8 = 0x01;
    pub const DOWNSTREAM_LEVEL_INIT: u8 = 0x02;
    pub const DOWNSTREAM_LEVEL_CHUNK: u8 = 0x03;
    pub const DOWNSTREAM_LEVEL_FINALIZE: u8 = 0x04;
    pub const DOWNSTREAM_SET_BLOCK: u8 = 0x06;
    pub const DOWNSTREAM_SPAWN_PLAYER: u8 = 0x07;
    pub const DOWNSTREAM_SET_POSITION: u8 = 0x08;
    pub const DOWNSTREAM_DESPAWN_PLAYER: u8 = 0x0C;
    pub const DOWNSTREAM_MESSAGE: u8 = 0x0D;
    pub const DOWNSTREAM_DISCONNECT_PLAYER: u8 = 0x0E;
    pub const DOWNSTREAM_UPDATE_PLAYER_MODE: u8 = 0x0F;
}

/// Block-change intent, decoded from [`upstream::UpstreamPacket::SetBlock`]'s mode byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    Destroy,
    Place,
}

impl BuildMode {
    /// `None` for any mode byte outside the two known values, matching the reference server's
    /// silent ignore of unrecognized modes.
    #[must_use]
    pub fn from_byte(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Destroy),
            1 => Some(Self::Place),
            _ => None,
        }
    }
}
