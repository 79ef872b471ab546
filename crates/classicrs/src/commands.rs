//! Slash-command dispatch. Each handler mirrors the op-gated chat commands of the reference
//! server, formatted with the same `&`-color scheme.

use tracing::info;

use crate::color::{DARK_RED, DARK_TEAL, GREEN, RED, TEAL};
use crate::connection::WorldSaveCommand;
use crate::consts::DEFAULT_KICK_REASON;
use crate::player::PlayerMode;
use crate::server::ServerState;

/// Splits a chat line into `/command` and its arguments, or formats it as an ordinary chat
/// message if it doesn't start with `/`.
pub async fn handle_chat(server: &mut ServerState, id: i8, message: &str) {
    if let Some(rest) = message.strip_prefix('/') {
        let mut parts = rest.split(' ');
        let command = parts.next().unwrap_or_default().to_lowercase();
        let args: Vec<&str> = parts.collect();
        handle_command(server, id, &command, &args).await;
        return;
    }

    let Some(username) = server.get_player(id).map(|player| player.username.clone()) else { return };
    let formatted = format!("&f{username}&7: {message}");
    server.broadcast_message(id, &formatted).await;
}

async fn handle_command(server: &mut ServerState, id: i8, command: &str, args: &[&str]) {
    let Some(player) = server.get_player(id) else { return };
    let (username, mode) = (player.username.clone(), player.mode);

    macro_rules! require_op {
        () => {
            if mode != PlayerMode::Op {
                if let Some(player) = server.get_player_mut(id) {
                    player.send_message(format!("{DARK_RED}This command is only available to operators")).await;
                }
                return;
            }
        };
    }

    match command {
        "help" => handle_help(server, id, mode).await,
        "about" => handle_about(server, id).await,
        "kick" => {
            require_op!();
            handle_kick(server, id, &username, args).await;
        }
        "ban" => {
            require_op!();
            handle_ban(server, id, &username, args).await;
        }
        "unban" => {
            require_op!();
            handle_unban(server, id, &username, args).await;
        }
        "op" => {
            require_op!();
            handle_op(server, id, &username, args).await;
        }
        "deop" => {
            require_op!();
            handle_deop(server, id, &username, args).await;
        }
        "tp" => {
            require_op!();
            handle_tp(server, id, args).await;
        }
        "setspawn" => {
            require_op!();
            handle_set_spawn(server, id, &username).await;
        }
        "saveworld" => {
            require_op!();
            handle_save_world(server, id, &username).await;
        }
        other => {
            if let Some(player) = server.get_player_mut(id) {
                player.send_message(format!("{RED}Unknown Command \"{other}\"")).await;
            }
        }
    }
}

async fn handle_help(server: &mut ServerState, id: i8, mode: PlayerMode) {
    let Some(player) = server.get_player_mut(id) else { return };
    player.send_message(format!("{TEAL}Available Commands:")).await;
    player.send_message(format!("{DARK_TEAL} - /help - Show available commands")).await;
    player.send_message(format!("{DARK_TEAL} - /about - Display server info")).await;
    if mode == PlayerMode::Op {
        player.send_message(format!("{TEAL}Operator Commands:")).await;
        player.send_message(format!("{DARK_TEAL} - /kick <username> [reason] - Disconnect user")).await;
        player.send_message(format!("{DARK_TEAL} - /ban <username> [reason] - Ban & Disconnect user")).await;
        player.send_message(format!("{DARK_TEAL} - /unban <username> - Unban user")).await;
        player.send_message(format!("{DARK_TEAL} - /tp <playerfrom> <playerto> - Teleport a player to another")).await;
        player.send_message(format!("{DARK_TEAL} - /op <username> - Make user an operator")).await;
        player.send_message(format!("{DARK_TEAL} - /deop <username> - Remove operator from user")).await;
        player.send_message(format!("{DARK_TEAL} - /setspawn - Set server world spawn, saving the world")).await;
        player.send_message(format!("{DARK_TEAL} - /saveworld - Save the world")).await;
    }
}

async fn handle_about(server: &mut ServerState, id: i8) {
    let (name, motd) = (server.settings.name.clone(), server.settings.motd.clone());
    if let Some(player) = server.get_player_mut(id) {
        player.send_message(format!("{TEAL}{name}")).await;
        player.send_message(format!("{DARK_TEAL}{motd}")).await;
    }
}

async fn handle_kick(server: &mut ServerState, id: i8, username: &str, args: &[&str]) {
    let Some(target_name) = args.first() else {
        if let Some(player) = server.get_player_mut(id) {
            player.send_message(format!("{RED}Invalid command, Expected:")).await;
            player.send_message(format!("{RED}/kick <username> [reason]")).await;
        }
        return;
    };

    if *target_name == username {
        if let Some(player) = server.get_player_mut(id) {
            player.send_message(format!("{RED}Cannot kick self")).await;
        }
        return;
    }

    let reason = if args.len() > 1 { args[1..].join(" ") } else { DEFAULT_KICK_REASON.to_string() };

    match server.get_player_by_name(target_name) {
        Some(target_id) => {
            server.kick(target_id, &reason).await;
            if let Some(player) = server.get_player_mut(id) {
                player.send_message(format!("{GREEN}Kicking {target_name}")).await;
            }
            info!("{username} has kicked {target_name}");
        }
        None => {
            if let Some(player) = server.get_player_mut(id) {
                player.send_message(format!("{RED}Could not find player \"{target_name}\"")).await;
            }
        }
    }
}

async fn handle_ban(server: &mut ServerState, id: i8, username: &str, args: &[&str]) {
    let Some(target_name) = args.first() else {
        if let Some(player) = server.get_player_mut(id) {
            player.send_message(format!("{RED}Invalid command, Expected:")).await;
            player.send_message(format!("{RED}/ban <username> [reason]")).await;
        }
        return;
    };

    if server.bans.iter().any(|entry| entry == target_name) {
        if let Some(player) = server.get_player_mut(id) {
            player.send_message(format!("{RED}{target_name} is already banned")).await;
        }
        return;
    }

    let reason = if args.len() > 1 { args[1..].join(" ") } else { DEFAULT_KICK_REASON.to_string() };
    server.ban(target_name, &reason).await;
    if let Some(player) = server.get_player_mut(id) {
        player.send_message(format!("{GREEN}Banning {target_name}")).await;
    }
    info!("{username} has banned {target_name}");
}

async fn handle_unban(server: &mut ServerState, id: i8, username: &str, args: &[&str]) {
    let Some(target_name) = args.first() else {
        if let Some(player) = server.get_player_mut(id) {
            player.send_message(format!("{RED}Invalid command, Expected:")).await;
            player.send_message(format!("{RED}/unban <username>")).await;
        }
        return;
    };

    if !server.bans.iter().any(|entry| entry == target_name) {
        if let Some(player) = server.get_player_mut(id) {
            player.send_message(format!("{RED}{target_name} is not banned")).await;
        }
        return;
    }

    server.unban(target_name);
    if let Some(player) = server.get_player_mut(id) {
        player.send_message(format!("{GREEN}Unbanning {target_name}")).await;
    }
    info!("{username} has unbanned {target_name}");
}

async fn handle_op(server: &mut ServerState, id: i8, username: &str, args: &[&str]) {
    let Some(target_name) = args.first() else {
        if let Some(player) = server.get_player_mut(id) {
            player.send_message(format!("{RED}Invalid command, Expected:")).await;
            player.send_message(format!("{RED}/op <username>")).await;
        }
        return;
    };

    if server.ops.iter().any(|entry| entry == target_name) {
        if let Some(player) = server.get_player_mut(id) {
            player.send_message(format!("{RED}{target_name} is already an operator")).await;
        }
        return;
    }

    server.add_op(target_name);
    if let Some(player) = server.get_player_mut(id) {
        player.send_message(format!("{GREEN}Making {target_name} an operator")).await;
    }
    info!("{username} has made {target_name} an operator");
}

async fn handle_deop(server: &mut ServerState, id: i8, username: &str, args: &[&str]) {
    let Some(target_name) = args.first() else {
        if let Some(player) = server.get_player_mut(id) {
            player.send_message(format!("{RED}Invalid command, Expected:")).await;
            player.send_message(format!("{RED}/deop <username>")).await;
        }
        return;
    };

    if !server.ops.iter().any(|entry| entry == target_name) {
        if let Some(player) = server.get_player_mut(id) {
            player.send_message(format!("{RED}{target_name} is not an operator")).await;
        }
        return;
    }

    server.remove_op(target_name);
    if let Some(player) = server.get_player_mut(id) {
        player.send_message(format!("{GREEN}Removing {target_name} as an operator")).await;
    }
    info!("{username} has removed {target_name} as an operator");
}

async fn handle_set_spawn(server: &mut ServerState, id: i8, username: &str) {
    let Some((x, y, z, yaw, pitch)) = server.get_player(id).map(|p| (p.x, p.y, p.z, p.yaw, p.pitch)) else { return };
    server.world.spawn_x = x;
    server.world.spawn_y = y;
    server.world.spawn_z = z;
    server.world.spawn_yaw = yaw;
    server.world.spawn_pitch = pitch;
    info!("world spawn set to x:{x} y:{y} z:{z}");

    server.spawn_world_save_for(id, username.to_string(), WorldSaveCommand::SetSpawn);
}

async fn handle_tp(server: &mut ServerState, id: i8, args: &[&str]) {
    if args.len() < 2 {
        if let Some(player) = server.get_player_mut(id) {
            player.send_message(format!("{RED}Invalid command, Expected:")).await;
            player.send_message(format!("{RED}/tp <playerfrom> <playerto>")).await;
        }
        return;
    }

    let (from_name, to_name) = (args[0], args[1]);

    let Some(from_id) = server.get_player_by_name(from_name) else {
        if let Some(player) = server.get_player_mut(id) {
            player.send_message(format!("{RED}Could not find player \"{from_name}\"")).await;
        }
        return;
    };
    let Some(to_id) = server.get_player_by_name(to_name) else {
        if let Some(player) = server.get_player_mut(id) {
            player.send_message(format!("{RED}Could not find player \"{to_name}\"")).await;
        }
        return;
    };

    let Some((x, y, z)) = server.get_player(to_id).map(|p| (p.x, p.y, p.z)) else { return };
    let yaw_pitch = server.get_player(from_id).map(|p| (p.yaw, p.pitch));
    let Some((yaw, pitch)) = yaw_pitch else { return };

    server.set_position(from_id, x, y, z, yaw, pitch).await;
    if let Some(player) = server.get_player_mut(from_id) {
        player.write(&crate::protocol::downstream::DownstreamPacket::SetPosition { id: -1, x, y, z, yaw, pitch }).await.ok();
    }

    if let Some(player) = server.get_player_mut(id) {
        player.send_message(format!("{GREEN}Teleporting {from_name} to {to_name}")).await;
    }
}

async fn handle_save_world(server: &mut ServerState, id: i8, username: &str) {
    if let Some(player) = server.get_player_mut(id) {
        player.send_message(format!("{TEAL}Saving world...")).await;
    }

    server.spawn_world_save_for(id, username.to_string(), WorldSaveCommand::SaveWorld);
}
