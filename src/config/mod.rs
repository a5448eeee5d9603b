//! Configuration management for the launcher
//!
//! The config is a JSON file in the per-user data directory. It is created as
//! `{}` when missing and read once at startup; every field has a default.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LauncherConfig {
    /// Buttons that must all be held to fire the bigscreen shortcut
    pub shortcut: Vec<String>,
    pub bindings: ButtonBindings,
    /// Launchable applications; the launch button starts the first entry
    pub launch_targets: Vec<LaunchTarget>,
    /// Delay before the launcher window is refocused after a kill
    pub refocus_delay_ms: u64,
    pub window: WindowConfig,
    pub tray: TrayConfig,
}

/// Single-button actions outside the shortcut combo
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ButtonBindings {
    pub launch: String,
    pub kill: String,
    pub inspect: String,
}

/// An application the launcher can spawn
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LaunchTarget {
    pub name: String,
    pub path: PathBuf,
    #[serde(default)]
    pub arguments: Vec<String>,
}

/// Launcher window configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

/// System tray configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TrayConfig {
    pub enabled: bool,
    pub tooltip: String,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            shortcut: vec!["back".to_string(), "start".to_string()],
            bindings: ButtonBindings::default(),
            launch_targets: vec![LaunchTarget::gran_turismo_4()],
            refocus_delay_ms: default_refocus_delay_ms(),
            window: WindowConfig::default(),
            tray: TrayConfig::default(),
        }
    }
}

impl Default for ButtonBindings {
    fn default() -> Self {
        Self {
            launch: "a".to_string(),
            kill: "b".to_string(),
            inspect: "x".to_string(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Bigscreen Launcher".to_string(),
            width: 900.0,
            height: 670.0,
        }
    }
}

impl Default for TrayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tooltip: "Bigscreen App Launcher".to_string(),
        }
    }
}

impl LaunchTarget {
    /// Built-in target used when the config file does not list any.
    pub fn gran_turismo_4() -> Self {
        let rom = dirs::home_dir()
            .unwrap_or_default()
            .join("Games/ROMS/PS2/Gran Turismo 4 (USA).iso");
        Self {
            name: "Gran Turismo 4".to_string(),
            path: PathBuf::from("/Applications/PCSX2.app/Contents/MacOS/PCSX2"),
            arguments: vec![
                "-fastboot".to_string(),
                "-fullscreen".to_string(),
                "-nogui".to_string(),
                "-state".to_string(),
                "1".to_string(),
                "--".to_string(),
                rom.to_string_lossy().into_owned(),
            ],
        }
    }
}

impl LauncherConfig {
    /// Load the config file, writing `{}` first if it does not exist yet.
    pub async fn load_or_create(path: &Path) -> Result<Self> {
        if !fs::try_exists(path).await.unwrap_or(false) {
            info!("Config file not found, creating {}", path.display());
            fs::write(path, "{}")
                .await
                .with_context(|| format!("Failed to create config file: {}", path.display()))?;
        }

        Self::load(path).await
    }

    /// Load configuration from file with validation
    pub async fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = Self::from_json(&contents)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    /// Parse and validate a JSON document
    pub fn from_json(contents: &str) -> Result<Self> {
        let config: LauncherConfig =
            serde_json::from_str(contents).context("Failed to parse JSON config")?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for correctness and consistency
    pub fn validate(&self) -> Result<()> {
        if self.shortcut.is_empty() {
            anyhow::bail!("Shortcut combo must name at least one button");
        }
        if self.shortcut.iter().any(|b| b.trim().is_empty()) {
            anyhow::bail!("Shortcut combo contains an empty button name");
        }

        for (idx, target) in self.launch_targets.iter().enumerate() {
            if target.name.trim().is_empty() {
                anyhow::bail!("Launch target {} name cannot be empty", idx);
            }
            if target.path.as_os_str().is_empty() {
                anyhow::bail!("Launch target '{}' path cannot be empty", target.name);
            }
        }

        Ok(())
    }

    pub fn refocus_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.refocus_delay_ms)
    }
}

fn default_refocus_delay_ms() -> u64 { 2000 }

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_object_yields_defaults() -> Result<()> {
        let config = LauncherConfig::from_json("{}")?;

        assert_eq!(config.shortcut, vec!["back", "start"]);
        assert_eq!(config.bindings.launch, "a");
        assert_eq!(config.bindings.kill, "b");
        assert_eq!(config.bindings.inspect, "x");
        assert_eq!(config.refocus_delay_ms, 2000);
        assert_eq!(config.launch_targets.len(), 1);
        assert_eq!(config.launch_targets[0].name, "Gran Turismo 4");
        assert_eq!(config.launch_targets[0].arguments[..5], ["-fastboot", "-fullscreen", "-nogui", "-state", "1"]);
        assert!(config.tray.enabled);
        Ok(())
    }

    #[test]
    fn test_unknown_keys_are_ignored() -> Result<()> {
        let config = LauncherConfig::from_json(r#"{ "theme": "dark", "refocus_delay_ms": 500 }"#)?;
        assert_eq!(config.refocus_delay_ms, 500);
        Ok(())
    }

    #[test]
    fn test_custom_targets_replace_default() -> Result<()> {
        let config = LauncherConfig::from_json(
            r#"{
                "launch_targets": [
                    { "name": "Dolphin", "path": "/usr/bin/dolphin-emu", "arguments": ["-b", "game.iso"] }
                ]
            }"#,
        )?;

        assert_eq!(
            config.launch_targets,
            vec![LaunchTarget {
                name: "Dolphin".to_string(),
                path: PathBuf::from("/usr/bin/dolphin-emu"),
                arguments: vec!["-b".to_string(), "game.iso".to_string()],
            }]
        );
        Ok(())
    }

    #[test]
    fn test_empty_shortcut_rejected() {
        assert!(LauncherConfig::from_json(r#"{ "shortcut": [] }"#).is_err());
    }

    #[test]
    fn test_target_without_path_rejected() {
        let result = LauncherConfig::from_json(
            r#"{ "launch_targets": [ { "name": "Broken", "path": "" } ] }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(LauncherConfig::from_json("{ not json").is_err());
    }

    #[tokio::test]
    async fn test_load_or_create_writes_empty_object() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.json");

        let config = LauncherConfig::load_or_create(&config_path).await?;

        assert_eq!(std::fs::read_to_string(&config_path)?, "{}");
        assert_eq!(config.shortcut, vec!["back", "start"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_load_or_create_keeps_existing_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.json");
        std::fs::write(&config_path, r#"{ "shortcut": ["guide"] }"#)?;

        let config = LauncherConfig::load_or_create(&config_path).await?;

        assert_eq!(config.shortcut, vec!["guide"]);
        assert_eq!(std::fs::read_to_string(&config_path)?, r#"{ "shortcut": ["guide"] }"#);
        Ok(())
    }
}
