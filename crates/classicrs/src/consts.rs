use std::time::Duration;

pub const PROTOCOL_VERSION: u8 = 0x07;

/// Fixed width of every string field on the wire (usernames, MOTDs, chat lines).
pub const STRING_FIELD_LEN: usize = 64;

/// Size of a single `LevelDataChunk` payload, zero-padded when short.
pub const LEVEL_CHUNK_LEN: usize = 1024;

/// Player IDs are a signed byte; the reference server additionally caps the pool at 128
/// regardless of a larger configured `playerCount`.
pub const MAX_PLAYERS: usize = 128;

pub const WATER_TICK_INTERVAL: Duration = Duration::from_millis(200);
pub const LAVA_TICK_INTERVAL: Duration = Duration::from_millis(1500);
pub const WORLD_SAVE_INTERVAL: Duration = Duration::from_secs(60);
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(45);

pub const SALT_LEN: usize = 16;
pub const SALT_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ1234567890";

pub const HEARTBEAT_URL: &str = "https://www.classicube.net/server/heartbeat";

pub const WORLD_FILENAME: &str = "world.gw";
pub const SETTINGS_FILENAME: &str = "settings.txt";
pub const OPS_FILENAME: &str = "ops.txt";
pub const BANS_FILENAME: &str = "bans.txt";

pub const DEFAULT_KICK_REASON: &str = "You were kicked";

pub const DEFAULT_IP: &str = "";
pub const DEFAULT_PORT: u16 = 25565;
pub const DEFAULT_NAME: &str = "Classic Server";
pub const DEFAULT_MOTD: &str = "A multiplayer voxel server written in Rust";
pub const DEFAULT_ONLINE: bool = false;
pub const DEFAULT_PUBLIC: bool = false;
pub const DEFAULT_PASSWORD: &str = "";
pub const DEFAULT_WORLD_X: i16 = 256;
pub const DEFAULT_WORLD_Y: i16 = 256;
pub const DEFAULT_WORLD_Z: i16 = 256;
pub const DEFAULT_PLAYER_COUNT: u8 = 128;
