//! Loading `SimConfig` from TOML files.
//!
//! Every key is optional; missing keys keep their compiled defaults.

use std::path::{Path, PathBuf};

use thiserror::Error;

use rampart_core::config::SimConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Parse a TOML document into a config.
pub fn parse_config(contents: &str) -> Result<SimConfig, toml::de::Error> {
    toml::from_str(contents)
}

/// Read and parse a TOML config file.
pub fn load_config(path: &Path) -> Result<SimConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rampart_core::enums::GameSpeed;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(parse_config("").unwrap(), SimConfig::default());
    }

    #[test]
    fn test_partial_document_overrides() {
        let config = parse_config(
            "seed = 7\nstarting_gold = 500\nsell_refund_ratio = 0.75\ngame_speed = \"Fast\"\n",
        )
        .unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.starting_gold, 500);
        assert_eq!(config.sell_refund_ratio, 0.75);
        assert_eq!(config.game_speed, GameSpeed::Fast);
        assert_eq!(config.starting_lives, 20);
        assert_eq!(config.wave_bonus(1), 25);
    }

    #[test]
    fn test_bad_type_is_parse_error() {
        assert!(parse_config("starting_gold = \"lots\"").is_err());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let path = Path::new("/nonexistent/rampart.toml");
        let err = load_config(path).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/rampart.toml"));
    }

    #[test]
    fn test_load_from_disk() {
        let path = std::env::temp_dir().join(format!("rampart-config-{}.toml", std::process::id()));
        std::fs::write(&path, "starting_lives = 3\nwave_break_secs = 4.5\n").unwrap();
        let config = load_config(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.starting_lives, 3);
        assert_eq!(config.wave_break_secs, 4.5);
    }
}
