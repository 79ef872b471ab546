use std::path::Path;

use tracing::warn;

use crate::consts::*;
use crate::error::ConfigError;

#[derive(Debug, Clone)]
pub struct Settings {
    pub ip: String,
    pub port: u16,
    pub name: String,
    pub motd: String,
    pub online: bool,
    pub public: bool,
    pub password: String,
    pub world_x: i16,
    pub world_y: i16,
    pub world_z: i16,
    pub player_count: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ip: DEFAULT_IP.to_string(),
            port: DEFAULT_PORT,
            name: DEFAULT_NAME.to_string(),
            motd: DEFAULT_MOTD.to_string(),
            online: DEFAULT_ONLINE,
            public: DEFAULT_PUBLIC,
            password: DEFAULT_PASSWORD.to_string(),
            world_x: DEFAULT_WORLD_X,
            world_y: DEFAULT_WORLD_Y,
            world_z: DEFAULT_WORLD_Z,
            player_count: DEFAULT_PLAYER_COUNT,
        }
    }
}

impl Settings {
    fn apply_line(&mut self, key: &str, value: &str) {
        match key {
            "ip" => self.ip = value.to_string(),
            "port" => match value.parse() {
                Ok(parsed) => self.port = parsed,
                Err(err) => warn!("unable to interpret setting \"port\" value \"{value}\": {err}"),
            },
            "name" => self.name = value.to_string(),
            "motd" => self.motd = value.to_string(),
            "online" => match value.parse() {
                Ok(parsed) => self.online = parsed,
                Err(err) => warn!("unable to interpret setting \"online\" value \"{value}\": {err}"),
            },
            "public" => match value.parse() {
                Ok(parsed) => self.public = parsed,
                Err(err) => warn!("unable to interpret setting \"public\" value \"{value}\": {err}"),
            },
            "password" => self.password = value.to_string(),
            "worldX" => match value.parse() {
                Ok(parsed) => self.world_x = parsed,
                Err(err) => warn!("unable to interpret setting \"worldX\" value \"{value}\": {err}"),
            },
            "worldY" => match value.parse() {
                Ok(parsed) => self.world_y = parsed,
                Err(err) => warn!("unable to interpret setting \"worldY\" value \"{value}\": {err}"),
            },
            "worldZ" => match value.parse() {
                Ok(parsed) => self.world_z = parsed,
                Err(err) => warn!("unable to interpret setting \"worldZ\" value \"{value}\": {err}"),
            },
            "playerCount" => match value.parse() {
                Ok(parsed) => self.player_count = parsed,
                Err(err) => {
                    warn!("unable to interpret setting \"playerCount\" value \"{value}\": {err}")
                }
            },
            _ => {}
        }
    }

    pub fn to_file_contents(&self) -> String {
        format!(
            "ip={}\nport={}\nname={}\nmotd={}\nonline={}\npublic={}\npassword={}\nworldX={}\nworldY={}\nworldZ={}\nplayerCount={}\n",
            self.ip,
            self.port,
            self.name,
            self.motd,
            self.online,
            self.public,
            self.password,
            self.world_x,
            self.world_y,
            self.world_z,
            self.player_count,
        )
    }

    fn parse(contents: &str) -> Self {
        let mut settings = Self::default();
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match line.split_once('=') {
                Some((key, value)) => settings.apply_line(key, value),
                None => warn!("unable to interpret setting \"{line}\""),
            }
        }
        settings
    }
}

pub fn load(path: &Path) -> Result<Settings, ConfigError> {
    if !path.exists() {
        tracing::info!("creating new {}...", path.display());
        let settings = Settings::default();
        save(path, &settings)?;
        return Ok(settings);
    }

    let contents = std::fs::read_to_string(path)?;
    Ok(Settings::parse(&contents))
}

pub fn save(path: &Path, settings: &Settings) -> Result<(), ConfigError> {
    std::fs::write(path, settings.to_file_contents())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_keys_are_ignored_rather_than_fatal() {
        let settings = Settings::parse("port=1234\nfrobnicate=true\n");
        assert_eq!(settings.port, 1234);
    }

    #[test]
    fn malformed_values_fall_back_to_the_default() {
        let settings = Settings::parse("port=not-a-number\n");
        assert_eq!(settings.port, DEFAULT_PORT);
    }

    #[test]
    fn round_trips_through_file_contents() {
        let mut settings = Settings::default();
        settings.name = "Test Server".to_string();
        settings.world_x = 64;
        let reparsed = Settings::parse(&settings.to_file_contents());
        assert_eq!(reparsed.name, "Test Server");
        assert_eq!(reparsed.world_x, 64);
    }
}
