//! The single authoritative event loop. One task owns all of [`ServerState`] and every mutation
//! to it happens here, driven by a `tokio::select!` merging connection events with the periodic
//! tickers. Per-connection tasks never touch server state directly; they only forward events
//! over a channel.

use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{error, info};

use crate::color::{GREEN, RED, TEAL};
use crate::connection::{ServerEvent, WorldSaveCommand, handle_connection};
use crate::consts::{HEARTBEAT_INTERVAL, LAVA_TICK_INTERVAL, WATER_TICK_INTERVAL, WORLD_FILENAME, WORLD_SAVE_INTERVAL};
use crate::heartbeat;
use crate::player::Player;
use crate::protocol::downstream::DownstreamPacket;
use crate::server::{self, ServerState};
use crate::world::automaton;

pub const EVENT_CHANNEL_CAPACITY: usize = 256;

pub async fn run(
    listener: TcpListener,
    mut server: ServerState,
    events_tx: mpsc::Sender<ServerEvent>,
    mut events_rx: mpsc::Receiver<ServerEvent>,
) -> anyhow::Result<()> {
    info!("server ready");

    let accept_events = events_tx.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((stream, _addr)) => {
                    let events = accept_events.clone();
                    tokio::spawn(handle_connection(stream, events));
                }
                Err(err) => error!("accept failed: {err}"),
            }
        }
    });

    let mut heartbeat_ticker = interval(HEARTBEAT_INTERVAL);
    let mut world_save_ticker = interval(WORLD_SAVE_INTERVAL);
    let mut lava_ticker = interval(LAVA_TICK_INTERVAL);
    let mut water_ticker = interval(WATER_TICK_INTERVAL);

    heartbeat::send(&server.settings, &server.salt, server.player_count());

    loop {
        tokio::select! {
            _ = heartbeat_ticker.tick() => {
                if server.settings.online {
                    heartbeat::send(&server.settings, &server.salt, server.player_count());
                }
            }

            _ = world_save_ticker.tick() => {
                spawn_world_save(server.world.clone());
            }

            _ = lava_ticker.tick() => {
                automaton::update_lava(&mut server).await;
            }

            _ = water_ticker.tick() => {
                automaton::update_water(&mut server).await;
            }

            Some(event) = events_rx.recv() => {
                handle_event(&mut server, event).await;
            }
        }
    }
}

/// Saves a snapshot of the world on a detached task so the gzip compress-and-write never blocks
/// the event loop.
pub fn spawn_world_save(world: crate::world::World) {
    tokio::spawn(async move {
        let path = std::path::Path::new(WORLD_FILENAME);
        match tokio::task::spawn_blocking(move || crate::world::persist::save(path, &world)).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => error!("periodic world save failed: {err}"),
            Err(err) => error!("world save task panicked: {err}"),
        }
    });
}

async fn handle_event(server: &mut ServerState, event: ServerEvent) {
    match event {
        ServerEvent::Connect { username, verification, write_half, reply } => {
            let Some(id) = server.id_pool.try_acquire() else {
                let mut write_half = write_half;
                DownstreamPacket::DisconnectPlayer { reason: "Server is full".to_string() }
                    .write(&mut write_half)
                    .await
                    .ok();
                reply.send(None).ok();
                return;
            };
            reply.send(Some(id)).ok();
            let player = Player::new(id, username.clone(), write_half);
            server.connect_player(id, username, verification, player).await;
        }

        ServerEvent::Disconnect { id } => {
            server.disconnect_player(id).await;
        }

        ServerEvent::Message { id, message } => {
            if message.is_empty() {
                return;
            }
            crate::commands::handle_chat(server, id, &message).await;
        }

        ServerEvent::SetPosition { id, x, y, z, yaw, pitch } => {
            server.set_position(id, x, y, z, yaw, pitch).await;
        }

        ServerEvent::SetBlock { id, x, y, z, mode, block } => {
            if server.get_player(id).is_none() || !server.world.valid(x, y, z) {
                return;
            }
            server::apply_set_block(server, x, y, z, mode, block).await;
        }

        ServerEvent::WorldSaveComplete { requester_id, requester_name, command, result } => {
            let (ok_message, log_verb) = match command {
                WorldSaveCommand::SetSpawn => (format!("{TEAL}World spawn set"), "/setspawn"),
                WorldSaveCommand::SaveWorld => (format!("{GREEN}World saved"), "/saveworld"),
            };
            match result {
                Ok(()) => {
                    if let Some(player) = server.get_player_mut(requester_id) {
                        player.send_message(ok_message).await;
                    }
                    info!("world saved by {requester_name} via {log_verb}");
                }
                Err(err) => {
                    if let Some(player) = server.get_player_mut(requester_id) {
                        player.send_message(format!("{RED}World save failed")).await;
                    }
                    error!("failed world save; attempted by {requester_name} via {log_verb}: {err}");
                }
            }
        }
    }
}
