use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use blinkshot_core::liveness::domain::liveness_config::LivenessConfig;
use blinkshot_core::outline::infrastructure::outline_factory::OutlineShape;
use blinkshot_core::shared::error::EngineError;
use blinkshot_core::shared::geometry::Size;

/// Persisted replay settings: overlay geometry, outline, liveness tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub overlay_width: f32,
    pub overlay_height: f32,
    pub outline_shape: OutlineShape,
    pub outline_width: f32,
    pub outline_height: f32,
    pub liveness: LivenessConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            overlay_width: 1080.0,
            overlay_height: 1920.0,
            outline_shape: OutlineShape::Oval,
            outline_width: 800.0,
            outline_height: 1100.0,
            liveness: LivenessConfig::default(),
        }
    }
}

impl Settings {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("Blinkshot").join("settings.json"))
    }

    /// Loads the per-user settings, falling back to defaults when the file
    /// is missing or unreadable.
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| Self::load_from(&path).ok())
            .unwrap_or_default()
    }

    pub fn load_from(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let json = fs::read_to_string(path)
            .map_err(|e| format!("cannot read settings {}: {e}", path.display()))?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Writes the settings to the per-user config file and returns its path.
    pub fn save(&self) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let path = Self::config_path().ok_or("could not determine config directory")?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn overlay_size(&self) -> Size {
        Size::new(self.overlay_width, self.overlay_height)
    }

    pub fn outline_size(&self) -> Size {
        Size::new(self.outline_width, self.outline_height)
    }

    /// Rejects sizes that cannot be drawn, then checks the liveness tunables.
    pub fn validate(&self) -> Result<(), EngineError> {
        for (name, size) in [("overlay", self.overlay_size()), ("outline", self.outline_size())] {
            if !size.is_usable() {
                return Err(EngineError::InvalidConfig(format!(
                    "{name} size must be positive, got {}x{}",
                    size.width, size.height
                )));
            }
        }
        self.liveness.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{"outline_shape": "rect", "liveness": {"smile_prompts": false}}"#,
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.outline_shape, OutlineShape::Rect);
        assert!(!settings.liveness.smile_prompts);
        assert_eq!(settings.liveness.max_closed_run, 3);
        assert_eq!(settings.overlay_width, 1080.0);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = Settings {
            overlay_width: 720.0,
            ..Settings::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = Settings::load_from(Path::new("/nonexistent/settings.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/settings.json"));
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[rstest]
    #[case::zero_overlay_width(0.0, 1920.0, 800.0, 1100.0)]
    #[case::negative_overlay_height(1080.0, -1.0, 800.0, 1100.0)]
    #[case::zero_outline_width(1080.0, 1920.0, 0.0, 1100.0)]
    #[case::nan_outline_height(1080.0, 1920.0, 800.0, f32::NAN)]
    fn test_rejects_unusable_sizes(
        #[case] overlay_width: f32,
        #[case] overlay_height: f32,
        #[case] outline_width: f32,
        #[case] outline_height: f32,
    ) {
        let settings = Settings {
            overlay_width,
            overlay_height,
            outline_width,
            outline_height,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_checks_liveness() {
        let mut settings = Settings::default();
        settings.liveness.max_closed_run = 0;
        assert!(settings.validate().is_err());
    }
}
