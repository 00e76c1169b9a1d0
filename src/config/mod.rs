use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::PetError;
use crate::sound::SoundBackend;

/// Pet created and selected at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartingPet {
    pub name: String,
    pub kind: String,
}

impl Default for StartingPet {
    fn default() -> Self {
        Self {
            name: "Fluffy".to_string(),
            kind: "cat".to_string(),
        }
    }
}

/// Optional `#RRGGBB` / `#RGB` colour overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_dim: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub happiness: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub default_pet: StartingPet,

    /// Kinds offered by the create popup (free text is still accepted)
    pub kinds: Vec<String>,

    /// Base directory holding `images/` and `sounds/`
    pub assets_dir: PathBuf,

    pub sound: SoundBackend,

    /// How long an action animation plays, in milliseconds
    pub animation_ms: u64,

    pub theme: ThemeOverrides,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_pet: StartingPet::default(),
            kinds: ["cat", "dog", "bird", "fish"].iter().map(|k| k.to_string()).collect(),
            assets_dir: PathBuf::from("assets"),
            sound: SoundBackend::default(),
            animation_ms: 900,
            theme: ThemeOverrides::default(),
        }
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("gigapet");

        if let Err(e) = std::fs::create_dir_all(&config_dir) {
            tracing::warn!("Could not create config directory: {}", e);
        }

        Ok(config_dir.join("config.toml"))
    }

    /// Load the user config, falling back to (and writing out) defaults
    pub fn load() -> Result<Self> {
        let path = match Self::config_path() {
            Ok(p) => p,
            Err(_) => return Ok(AppConfig::default()),
        };

        if path.exists() {
            match Self::load_from(&path) {
                Ok(config) => return Ok(config),
                Err(e) => tracing::warn!("{}", e),
            }
            // Keep the user's broken file around for them to fix
            return Ok(AppConfig::default());
        }

        let config = AppConfig::default();
        if let Err(e) = config.save_to(&path) {
            tracing::warn!("Failed to write default config: {}", e);
        }
        Ok(config)
    }

    /// Load an explicit config file. Unlike [`AppConfig::load`] this fails
    /// loudly, since the user asked for this file by name.
    pub fn load_from(path: &Path) -> Result<Self, PetError> {
        let content = std::fs::read_to_string(path).map_err(|source| PetError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| PetError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let mut clean_config = self.clone();

        // Drop blank kinds and duplicates before writing
        let mut seen = Vec::new();
        clean_config.kinds.retain(|k| {
            let keep = !k.trim().is_empty() && !seen.contains(k);
            seen.push(k.clone());
            keep
        });

        let content = toml::to_string_pretty(&clean_config)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization() {
        let config = AppConfig {
            default_pet: StartingPet {
                name: "Rex".to_string(),
                kind: "dog".to_string(),
            },
            kinds: vec!["dog".to_string(), "hamster".to_string()],
            assets_dir: PathBuf::from("/usr/share/gigapet"),
            sound: SoundBackend::Bell,
            animation_ms: 500,
            theme: ThemeOverrides {
                accent: Some("#ffc107".to_string()),
                ..Default::default()
            },
        };

        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();

        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig = toml::from_str("sound = \"off\"\n").unwrap();
        assert_eq!(config.sound, SoundBackend::Off);
        assert_eq!(config.default_pet, StartingPet::default());
        assert_eq!(config.kinds.len(), 4);
        assert_eq!(config.animation_duration(), Duration::from_millis(900));
    }

    #[test]
    fn test_save_and_load_from() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = AppConfig::default();
        config.kinds = vec!["cat".into(), "".into(), "cat".into(), "axolotl".into()];
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.kinds, ["cat", "axolotl"]);
        assert_eq!(loaded.default_pet.name, "Fluffy");
    }

    #[test]
    fn test_load_from_reports_bad_files() {
        let dir = tempfile::TempDir::new().unwrap();

        let missing = AppConfig::load_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(missing, PetError::ConfigRead { .. }));

        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "animation_ms = \"soon\"").unwrap();
        let bad = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(bad, PetError::ConfigParse { .. }));
    }
}
