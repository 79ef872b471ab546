//! Loader/saver for `ops.txt` and `bans.txt`: one username per line, auto-created if missing.

use std::path::Path;

use crate::error::ConfigError;

pub fn load(path: &Path) -> Result<Vec<String>, ConfigError> {
    if !path.exists() {
        tracing::info!("creating new {}...", path.display());
        std::fs::write(path, "")?;
        return Ok(Vec::new());
    }

    let contents = std::fs::read_to_string(path)?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

pub fn save(path: &Path, entries: &[String]) -> Result<(), ConfigError> {
    let mut contents = String::new();
    for entry in entries {
        contents.push_str(entry);
        contents.push('\n');
    }
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_filtered_on_load() {
        let path = std::env::temp_dir().join("classicrs_lists_test.txt");
        std::fs::write(&path, "alice\n\nbob\n").unwrap();
        let entries = load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(entries, vec!["alice".to_string(), "bob".to_string()]);
    }
}
