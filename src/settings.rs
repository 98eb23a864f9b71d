use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DeskError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_submit_delay_ms")]
    pub submit_delay_ms: u64,
    #[serde(default = "default_banner_ttl_ms")]
    pub banner_ttl_ms: u64,
    /// Background particle/logo effects on the sign-in screen.
    #[serde(default = "default_effects")]
    pub effects: bool,
}

fn default_submit_delay_ms() -> u64 {
    1500
}

fn default_banner_ttl_ms() -> u64 {
    5000
}

fn default_effects() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            submit_delay_ms: default_submit_delay_ms(),
            banner_ttl_ms: default_banner_ttl_ms(),
            effects: default_effects(),
        }
    }
}

impl Settings {
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    pub fn banner_ttl(&self) -> Duration {
        Duration::from_millis(self.banner_ttl_ms)
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("dispatch-desk")
}

fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_default()
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| DeskError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_web_front_end_timings() {
        let settings = Settings::default();
        assert_eq!(settings.submit_delay(), Duration::from_millis(1500));
        assert_eq!(settings.banner_ttl(), Duration::from_millis(5000));
        assert!(settings.effects);
    }

    #[test]
    fn json_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            submit_delay_ms: 250,
            banner_ttl_ms: 1000,
            effects: false,
        };
        let json = serde_json::to_string_pretty(&settings).unwrap();
        std::fs::write(&path, &json).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let loaded: Settings = serde_json::from_str(&content).unwrap();
        assert_eq!(loaded.submit_delay_ms, 250);
        assert_eq!(loaded.banner_ttl_ms, 1000);
        assert!(!loaded.effects);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let loaded: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(loaded.submit_delay_ms, 1500);
        assert_eq!(loaded.banner_ttl_ms, 5000);
        assert!(loaded.effects);
    }
}
