use anyhow::Context;
use codestory_graph::{Color, EdgeItemSettings};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub window_width: f32,
    pub window_height: f32,
    pub show_order_badges: bool,
    pub show_scheme_colors: bool,
    /// Colors multiplexed onto every edge when scheme colors are shown
    pub scheme_colors: Vec<Color>,
    pub edge: EdgeItemSettings,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            window_width: 1280.0,
            window_height: 720.0,
            show_order_badges: true,
            show_scheme_colors: false,
            scheme_colors: vec![
                Color::rgb(66, 135, 245),
                Color::rgb(76, 175, 80),
                Color::rgb(233, 30, 99),
            ],
            edge: EdgeItemSettings::default(),
        }
    }
}

impl AppSettings {
    pub fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("codestory").join("edge_canvas.json"))
    }

    /// Load from the user config dir, falling back to defaults on any problem.
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            tracing::info!("No config directory, using default settings");
            return Self::default();
        };
        tracing::info!("Loading settings from {:?}", path);
        if !path.exists() {
            tracing::info!("Settings file not found, using defaults");
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::error!("{:#}", e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::settings_path().context("No config directory available")?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write settings file {}", path.display()))?;
        tracing::info!("Settings saved to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("edge_canvas.json");

        let mut settings = AppSettings::default();
        settings.show_scheme_colors = true;
        settings.edge.hit_width = 16.0;
        settings.save_to(&path).unwrap();

        let loaded = AppSettings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edge_canvas.json");
        std::fs::write(&path, r#"{ "show_order_badges": false, "edge": { "base_width": 2.0 } }"#)
            .unwrap();

        let loaded = AppSettings::load_from(&path).unwrap();
        assert!(!loaded.show_order_badges);
        assert_eq!(loaded.edge.base_width, 2.0);
        assert_eq!(loaded.edge.emphasized_width, 9.0);
        assert_eq!(loaded.scheme_colors.len(), 3);
    }

    #[test]
    fn test_load_errors_carry_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ nope").unwrap();

        let err = AppSettings::load_from(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("broken.json"));
        assert!(AppSettings::load_from(&dir.path().join("missing.json")).is_err());
    }
}
