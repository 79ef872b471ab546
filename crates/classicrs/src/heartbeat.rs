//! Registers this server with the classicube.net server list. Failure here is logged and
//! otherwise ignored — a server with no internet access still runs fine in offline/LAN mode.

use tracing::warn;

use crate::config::Settings;
use crate::consts::HEARTBEAT_URL;

/// Fires a fire-and-forget GET request; spawns its own task so a slow or hung heartbeat
/// endpoint never blocks the event loop.
pub fn send(settings: &Settings, salt: &str, player_count: usize) {
    let query = [
        ("port", settings.port.to_string()),
        ("max", settings.player_count.to_string()),
        ("name", settings.name.clone()),
        ("public", settings.public.to_string()),
        ("version", "7".to_string()),
        ("salt", salt.to_string()),
        ("users", player_count.to_string()),
    ];

    tokio::spawn(async move {
        let client = reqwest::Client::new();
        match client.get(HEARTBEAT_URL).query(&query).send().await {
            Ok(response) if !response.status().is_success() => {
                warn!("heartbeat request returned status {}", response.status());
            }
            Err(err) => {
                warn!("error requesting heartbeat: {err}");
            }
            Ok(_) => {}
        }
    });
}
