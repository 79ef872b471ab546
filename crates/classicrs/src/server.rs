//! Owns every piece of mutable server state. Everything here runs on the single event-loop
//! task in [`crate::event_loop`]; nothing in this module is `Send`-shared behind a lock, since
//! nothing else ever touches it concurrently.

use std::collections::HashMap;

use tokio::sync::mpsc;
use tracing::info;

use crate::config::Settings;
use crate::connection::{ServerEvent, WorldSaveCommand};
use crate::consts::{BANS_FILENAME, DEFAULT_KICK_REASON, MAX_PLAYERS, OPS_FILENAME, WORLD_FILENAME};
use crate::player::{Player, PlayerMode};
use crate::protocol::downstream::DownstreamPacket;
use crate::protocol::fixed::FpShort;
use crate::world::automaton::BlockSink;
use crate::world::block::{BLOCK_AIR, Block};
use crate::world::World;
use crate::{config, id_pool::IdPool};

pub struct ServerState {
    pub players: HashMap<i8, Player>,
    pub world: World,
    pub settings: Settings,
    pub salt: String,
    pub ops: Vec<String>,
    pub bans: Vec<String>,
    pub id_pool: IdPool,
    pending_disconnects: Vec<i8>,
    events_tx: mpsc::Sender<ServerEvent>,
}

impl ServerState {
    #[must_use]
    pub fn new(
        world: World,
        settings: Settings,
        salt: String,
        ops: Vec<String>,
        bans: Vec<String>,
        events_tx: mpsc::Sender<ServerEvent>,
    ) -> Self {
        let id_pool = IdPool::new(settings.player_count);
        Self {
            players: HashMap::new(),
            world,
            settings,
            salt,
            ops,
            bans,
            id_pool,
            pending_disconnects: Vec::new(),
            events_tx,
        }
    }

    /// Saves a snapshot of the world on a detached task so the gzip compress-and-write never
    /// blocks the event loop, reporting the outcome back to the requesting player (by name, in
    /// case they've since disconnected) once the task completes.
    pub fn spawn_world_save_for(&self, requester_id: i8, requester_name: String, command: WorldSaveCommand) {
        let world = self.world.clone();
        let events_tx = self.events_tx.clone();
        tokio::spawn(async move {
            let path = std::path::Path::new(WORLD_FILENAME);
            let result = match tokio::task::spawn_blocking(move || crate::world::persist::save(path, &world)).await {
                Ok(Ok(())) => Ok(()),
                Ok(Err(err)) => Err(err.to_string()),
                Err(err) => Err(err.to_string()),
            };
            events_tx.send(ServerEvent::WorldSaveComplete { requester_id, requester_name, command, result }).await.ok();
        });
    }

    #[must_use]
    pub fn get_player(&self, id: i8) -> Option<&Player> {
        self.players.get(&id)
    }

    #[must_use]
    pub fn get_player_mut(&mut self, id: i8) -> Option<&mut Player> {
        self.players.get_mut(&id)
    }

    #[must_use]
    pub fn get_player_by_name(&self, username: &str) -> Option<i8> {
        self.players
            .values()
            .find(|player| player.username == username)
            .map(|player| player.id)
    }

    /// Runs the full join handshake: verification, username validation, ban check, world
    /// transfer and spawn fan-out. On any rejection the player is written a disconnect reason
    /// and removed before this returns.
    pub async fn connect_player(&mut self, id: i8, username: String, verification: String, mut player: Player) {
        player.username = username.clone();

        if self.settings.online {
            let digest = md5::compute(format!("{}{}", self.salt, username));
            let hash = format!("{digest:x}");
            if verification.to_lowercase() != hash.to_lowercase() {
                self.reject(player, "Invalid verification provided").await;
                return;
            }
        } else if !self.settings.password.is_empty() && verification != self.settings.password {
            self.reject(player, "Incorrect password").await;
            return;
        }

        let valid_username = username.len() >= 3
            && username.len() <= 16
            && username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid_username {
            self.reject(player, "Invalid username provided (Letters, numbers and _)").await;
            return;
        }

        if self.players.values().any(|other| other.username == username) {
            self.reject(player, "Username in use").await;
            return;
        }

        if self.bans.contains(&username) {
            self.reject(player, "You have been banned").await;
            return;
        }

        player.mode = if self.ops.contains(&username) { PlayerMode::Op } else { PlayerMode::Normal };

        let identification = DownstreamPacket::ServerIdentification {
            name: self.settings.name.clone(),
            motd: self.settings.motd.clone(),
            mode: player.mode.as_byte(),
        };
        if player.write(&identification).await.is_err() {
            self.id_pool.release(id);
            return;
        }

        if self.send_world(&mut player).await.is_err() {
            self.id_pool.release(id);
            return;
        }

        player.x = self.world.spawn_x;
        player.y = self.world.spawn_y;
        player.z = self.world.spawn_z;
        player.yaw = self.world.spawn_yaw;
        player.pitch = self.world.spawn_pitch;

        self.players.insert(id, player);

        let join_msg = format!("{} has joined", username);
        info!("{join_msg}");
        self.broadcast_message(-1, &join_msg).await;

        let (spawn_x, spawn_y, spawn_z) = (self.world.spawn_x, self.world.spawn_y, self.world.spawn_z);
        let (spawn_yaw, spawn_pitch) = (self.world.spawn_yaw, self.world.spawn_pitch);

        let mut others = Vec::new();
        for other in self.players.values() {
            if other.id != id {
                others.push((other.id, other.username.clone(), other.x, other.y, other.z, other.yaw, other.pitch));
            }
        }

        let mut failed = Vec::new();

        if let Some(joined) = self.players.get_mut(&id) {
            if joined
                .write(&DownstreamPacket::SpawnPlayer {
                    id: -1,
                    username: username.clone(),
                    x: spawn_x,
                    y: spawn_y,
                    z: spawn_z,
                    yaw: spawn_yaw,
                    pitch: spawn_pitch,
                })
                .await
                .is_err()
            {
                failed.push(id);
            }
            for (other_id, other_name, x, y, z, yaw, pitch) in &others {
                if joined
                    .write(&DownstreamPacket::SpawnPlayer {
                        id: *other_id,
                        username: other_name.clone(),
                        x: *x,
                        y: *y,
                        z: *z,
                        yaw: *yaw,
                        pitch: *pitch,
                    })
                    .await
                    .is_err()
                {
                    failed.push(id);
                    break;
                }
            }
        }

        for (other_id, _, _, _, _, _, _) in &others {
            if let Some(other) = self.players.get_mut(other_id) {
                if other
                    .write(&DownstreamPacket::SpawnPlayer {
                        id,
                        username: username.clone(),
                        x: spawn_x,
                        y: spawn_y,
                        z: spawn_z,
                        yaw: spawn_yaw,
                        pitch: spawn_pitch,
                    })
                    .await
                    .is_err()
                {
                    failed.push(*other_id);
                }
            }
        }

        for failed_id in failed {
            self.queue_disconnect(failed_id);
        }
        self.flush_pending_disconnects().await;
    }

    async fn reject(&self, mut player: Player, reason: &str) {
        player.write(&DownstreamPacket::DisconnectPlayer { reason: reason.to_string() }).await.ok();
        self.id_pool.release(player.id);
    }

    async fn send_world(&self, player: &mut Player) -> std::io::Result<()> {
        let payload = crate::world::persist::build_transfer_payload(&self.world)?;
        player.write(&DownstreamPacket::LevelInit).await?;
        for (data, length, percent) in crate::world::persist::chunk_transfer_payload(&payload) {
            player.write(&DownstreamPacket::LevelChunk { data, length, percent }).await?;
        }
        player
            .write(&DownstreamPacket::LevelFinalize {
                x: self.world.size_x,
                y: self.world.size_y,
                z: self.world.size_z,
            })
            .await
    }

    pub async fn set_position(&mut self, id: i8, x: FpShort, y: FpShort, z: FpShort, yaw: u8, pitch: u8) {
        if let Some(player) = self.get_player_mut(id) {
            player.x = x;
            player.y = y;
            player.z = z;
            player.yaw = yaw;
            player.pitch = pitch;
        } else {
            return;
        }

        let packet = DownstreamPacket::SetPosition { id, x, y, z, yaw, pitch };
        let mut failed = Vec::new();
        for (other_id, other) in &mut self.players {
            if *other_id != id && other.write(&packet).await.is_err() {
                failed.push(*other_id);
            }
        }
        for failed_id in failed {
            self.queue_disconnect(failed_id);
        }
        self.flush_pending_disconnects().await;
    }

    pub async fn broadcast_message(&mut self, sender_id: i8, message: &str) {
        let packet = DownstreamPacket::message(sender_id, message);
        let mut failed = Vec::new();
        for player in self.players.values_mut() {
            if player.write(&packet).await.is_err() {
                failed.push(player.id);
            }
        }
        for failed_id in failed {
            self.queue_disconnect(failed_id);
        }
        self.flush_pending_disconnects().await;
    }

    pub async fn ban(&mut self, username: &str, reason: &str) {
        if !self.bans.contains(&username.to_string()) {
            self.bans.push(username.to_string());
            self.save_bans();
        }

        if let Some(id) = self.get_player_by_name(username) {
            self.kick(id, reason).await;
        }
    }

    pub fn unban(&mut self, username: &str) {
        if self.bans.iter().any(|entry| entry == username) {
            self.bans.retain(|entry| entry != username);
            self.save_bans();
        }
    }

    pub fn add_op(&mut self, username: &str) {
        if !self.ops.contains(&username.to_string()) {
            self.ops.push(username.to_string());
            self.save_ops();
        }
        if let Some(player) = self.players.values_mut().find(|player| player.username == username) {
            player.mode = PlayerMode::Op;
        }
    }

    pub fn remove_op(&mut self, username: &str) {
        if self.ops.iter().any(|entry| entry == username) {
            self.ops.retain(|entry| entry != username);
            self.save_ops();
        }
        if let Some(player) = self.players.values_mut().find(|player| player.username == username) {
            player.mode = PlayerMode::Normal;
        }
    }

    fn save_ops(&self) {
        if let Err(err) = config::lists::save(std::path::Path::new(OPS_FILENAME), &self.ops) {
            tracing::warn!("failed to save {OPS_FILENAME}: {err}");
        }
    }

    fn save_bans(&self) {
        if let Err(err) = config::lists::save(std::path::Path::new(BANS_FILENAME), &self.bans) {
            tracing::warn!("failed to save {BANS_FILENAME}: {err}");
        }
    }

    pub async fn kick(&mut self, id: i8, reason: &str) {
        if let Some(player) = self.get_player_mut(id) {
            player
                .write(&DownstreamPacket::DisconnectPlayer {
                    reason: if reason.is_empty() { DEFAULT_KICK_REASON.to_string() } else { reason.to_string() },
                })
                .await
                .ok();
        }
        self.disconnect_player(id).await;
    }

    /// Removes a player that the reader task reported as gone (socket closed or read error).
    /// Idempotent: a player already removed (e.g. via [`Self::kick`]) is simply not found.
    pub async fn disconnect_player(&mut self, id: i8) {
        let Some(player) = self.players.remove(&id) else { return };
        self.id_pool.release(id);

        let despawn = DownstreamPacket::DespawnPlayer { id };
        let mut failed = Vec::new();
        for other in self.players.values_mut() {
            if other.write(&despawn).await.is_err() {
                failed.push(other.id);
            }
        }
        for failed_id in failed {
            self.queue_disconnect(failed_id);
        }
        self.flush_pending_disconnects().await;

        let leave_msg = format!("{} has disconnected", player.username);
        info!("{leave_msg}");
        self.broadcast_message(-1, &leave_msg).await;
    }

    /// Applies a mutation queued mid-broadcast rather than acting immediately, so a write
    /// failure discovered while iterating `players` never mutates the map out from under the
    /// loop holding it.
    pub fn queue_disconnect(&mut self, id: i8) {
        self.pending_disconnects.push(id);
    }

    pub async fn flush_pending_disconnects(&mut self) {
        let pending = std::mem::take(&mut self.pending_disconnects);
        for id in pending {
            Box::pin(self.disconnect_player(id)).await;
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len().min(MAX_PLAYERS)
    }
}

impl BlockSink for ServerState {
    fn world(&self) -> &World {
        &self.world
    }

    fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    async fn broadcast_block(&mut self, x: i16, y: i16, z: i16, block: Block) {
        let packet = DownstreamPacket::SetBlock { x, y, z, block };
        let mut failed = Vec::new();
        for player in self.players.values_mut() {
            if player.write(&packet).await.is_err() {
                failed.push(player.id);
            }
        }
        for failed_id in failed {
            self.queue_disconnect(failed_id);
        }
        self.flush_pending_disconnects().await;
    }
}

/// Entry point used by the event loop for a player-initiated block edit: destroy mode always
/// writes air regardless of the block the client sent.
pub async fn apply_set_block(server: &mut ServerState, x: i16, y: i16, z: i16, mode: crate::protocol::BuildMode, block: Block) {
    use crate::protocol::BuildMode;
    let resolved = match mode {
        BuildMode::Place => block,
        BuildMode::Destroy => BLOCK_AIR,
    };
    crate::world::automaton::set_block(server, x, y, z, resolved).await;
}
