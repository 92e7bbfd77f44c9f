//! JSON config file adapter.
//!
//! A missing file means "use the defaults"; a file that exists but does not
//! parse or validate is an error, so a typo never silently falls back.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::info;

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::WorkshopConfig;

pub struct JsonConfigFile {
    path: PathBuf,
}

impl JsonConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigPort for JsonConfigFile {
    fn load(&self) -> Result<WorkshopConfig, ConfigError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("no config at {}, using defaults", self.path.display());
                return Ok(WorkshopConfig::default());
            }
            Err(e) => return Err(ConfigError::Io(format!("{}: {e}", self.path.display()))),
        };
        let cfg: WorkshopConfig = serde_json::from_str(&text)
            .map_err(|e| ConfigError::Corrupted(format!("{}: {e}", self.path.display())))?;
        cfg.validate()?;
        info!("loaded config from {}", self.path.display());
        Ok(cfg)
    }

    fn save(&self, config: &WorkshopConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)
            .map_err(|e| ConfigError::Corrupted(e.to_string()))?;
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| ConfigError::Io(e.to_string()))?;
        }
        fs::write(&self.path, json).map_err(|e| ConfigError::Io(e.to_string()))?;
        info!("saved config to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("pi_workshop_cfg_{name}_{}.json", std::process::id()))
    }

    #[test]
    fn missing_file_gives_defaults() {
        let file = JsonConfigFile::new(scratch("missing"));
        assert_eq!(file.load().unwrap(), WorkshopConfig::default());
    }

    #[test]
    fn save_then_load() {
        let path = scratch("save");
        let file = JsonConfigFile::new(&path);
        let mut cfg = WorkshopConfig::default();
        cfg.reaction.rounds = 3;
        file.save(&cfg).unwrap();
        assert_eq!(file.load().unwrap().reaction.rounds, 3);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn invalid_values_are_rejected_not_clamped() {
        let path = scratch("invalid");
        fs::write(&path, r#"{ "display": { "rotation_deg": 45 } }"#).unwrap();
        let file = JsonConfigFile::new(&path);
        assert!(matches!(file.load(), Err(ConfigError::ValidationFailed(_))));

        let mut cfg = WorkshopConfig::default();
        cfg.reaction.rounds = 0;
        assert!(matches!(file.save(&cfg), Err(ConfigError::ValidationFailed(_))));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn broken_json_is_corrupted() {
        let path = scratch("broken");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            JsonConfigFile::new(&path).load(),
            Err(ConfigError::Corrupted(_))
        ));
        let _ = fs::remove_file(path);
    }
}
