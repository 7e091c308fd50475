//! Tunables for edge geometry and painting.

use crate::style::{
    COLOR_BADGE_OUTLINE, COLOR_EDGE_CANDIDATE, COLOR_EDGE_FORWARD, COLOR_EDGE_HIGHLIGHT,
    COLOR_EDGE_REVERSE, Color,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read edge settings from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse edge settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Colors used when painting edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgePalette {
    /// Selected or hovered edges
    pub highlight: Color,
    /// Edges whose source node sits right of the target node
    pub reverse: Color,
    /// Left-to-right edges
    pub forward: Color,
    /// Candidate edges (proposed, not yet confirmed)
    pub candidate: Color,
    /// Ring and text of the call-order badge
    pub badge_outline: Color,
}

impl Default for EdgePalette {
    fn default() -> Self {
        Self {
            highlight: COLOR_EDGE_HIGHLIGHT,
            reverse: COLOR_EDGE_REVERSE,
            forward: COLOR_EDGE_FORWARD,
            candidate: COLOR_EDGE_CANDIDATE,
            badge_outline: COLOR_BADGE_OUTLINE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeItemSettings {
    /// Anchors closer than this (manhattan) to the cached ones reuse the cached curve.
    pub endpoint_tolerance: f32,
    /// Width of the invisible stroke used for hit testing.
    pub hit_width: f32,
    /// Width of a plain edge.
    pub base_width: f32,
    /// Width of highlighted and candidate edges.
    pub emphasized_width: f32,
    /// Scheme overlay dash length, in multiples of the pen width.
    pub dash_unit: f32,
    pub badge_radius: f32,
    pub badge_outline_width: f32,
    pub badge_font_size: f32,
    /// Iteration budget of the label y search.
    pub y_search_iterations: usize,
    /// The label y search stops once its bracket is narrower than this.
    pub y_search_tolerance: f32,
    pub palette: EdgePalette,
}

impl Default for EdgeItemSettings {
    fn default() -> Self {
        Self {
            endpoint_tolerance: 0.05,
            hit_width: 10.0,
            base_width: 3.0,
            emphasized_width: 9.0,
            dash_unit: 5.0,
            badge_radius: 10.0,
            badge_outline_width: 2.0,
            badge_font_size: 12.0,
            y_search_iterations: 8,
            y_search_tolerance: 0.01,
            palette: EdgePalette::default(),
        }
    }
}

impl EdgeItemSettings {
    pub fn from_json(content: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_json(&content)?;
        tracing::debug!("Loaded edge settings from {:?}", path);
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = EdgeItemSettings::default();
        assert_eq!(settings.endpoint_tolerance, 0.05);
        assert_eq!(settings.hit_width, 10.0);
        assert_eq!(settings.y_search_iterations, 8);
        assert_eq!(settings.palette.highlight, Color::rgba(255, 157, 38, 255));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = EdgeItemSettings::from_json(
            r#"{ "base_width": 2.0, "palette": { "forward": { "r": 1, "g": 2, "b": 3, "a": 4 } } }"#,
        )
        .unwrap();
        assert_eq!(settings.base_width, 2.0);
        assert_eq!(settings.emphasized_width, 9.0);
        assert_eq!(settings.palette.forward, Color::rgba(1, 2, 3, 4));
        assert_eq!(settings.palette.reverse, COLOR_EDGE_REVERSE);
    }

    #[test]
    fn test_parse_error() {
        let err = EdgeItemSettings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "hit_width": 14.0 }}"#).unwrap();
        let settings = EdgeItemSettings::load(file.path()).unwrap();
        assert_eq!(settings.hit_width, 14.0);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = EdgeItemSettings::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
        assert!(err.to_string().contains("missing.json"));
    }
}
