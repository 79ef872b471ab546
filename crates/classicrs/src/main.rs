pub mod color;
pub mod commands;
pub mod config;
pub mod connection;
pub mod consts;
pub mod error;
pub mod event_loop;
pub mod heartbeat;
pub mod id_pool;
pub mod player;
pub mod protocol;
pub mod server;
pub mod world;

use std::path::Path;

use anyhow::Result;
use rand::Rng;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::info;

use crate::consts::{BANS_FILENAME, OPS_FILENAME, SALT_ALPHABET, SALT_LEN, SETTINGS_FILENAME, WORLD_FILENAME};
use crate::event_loop::EVENT_CHANNEL_CAPACITY;
use crate::server::ServerState;

fn generate_salt() -> String {
    let mut rng = rand::thread_rng();
    (0..SALT_LEN).map(|_| SALT_ALPHABET[rng.gen_range(0..SALT_ALPHABET.len())] as char).collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_line_number(true)
        .with_max_level(tracing::Level::DEBUG)
        .compact()
        .init();

    let settings = config::settings::load(Path::new(SETTINGS_FILENAME))?;
    info!("server starting on port {}", settings.port);
    info!("name: {}", settings.name);
    info!("motd: {}", settings.motd);
    info!("online: {}", settings.online);

    let world = world::load_or_generate(Path::new(WORLD_FILENAME), settings.world_x, settings.world_y, settings.world_z)?;

    let ops = config::lists::load(Path::new(OPS_FILENAME))?;
    let bans = config::lists::load(Path::new(BANS_FILENAME))?;

    let salt = generate_salt();
    info!("salt: {salt}");

    let bind_host = if settings.ip.is_empty() { "0.0.0.0" } else { &settings.ip };
    let addr = format!("{bind_host}:{}", settings.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("listening on {addr}");

    info!("allocating for {} players", settings.player_count);
    let (events_tx, events_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    let server = ServerState::new(world, settings, salt, ops, bans, events_tx.clone());

    event_loop::run(listener, server, events_tx, events_rx).await
}
