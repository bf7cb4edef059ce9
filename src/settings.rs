//! Game settings
//!
//! Loaded from an optional JSON file; every missing field falls back to its
//! default.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{EYE_DISTANCE, MAX_OBJECTS};

/// Why settings could not be loaded
#[derive(Debug)]
pub enum SettingsError {
    /// The file could not be read
    Io(std::io::Error),
    /// The file is not valid settings JSON
    Parse(serde_json::Error),
    /// A value is out of its allowed range
    Invalid(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "failed to read settings: {}", e),
            SettingsError::Parse(e) => write!(f, "failed to parse settings: {}", e),
            SettingsError::Invalid(msg) => write!(f, "invalid settings: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Display ===
    /// Viewport width in pixels
    pub width: u32,
    /// Viewport height in pixels
    pub height: u32,
    /// Projection focal length in pixels
    pub eye_distance: i32,
    /// Draw the tank destination and registry occupancy bars
    pub debug_overlay: bool,

    // === Timing ===
    /// Minimum wall-clock gap between simulation ticks
    pub frame_interval_ms: u64,

    // === World ===
    /// RNG seed; zero is replaced by a fixed constant
    pub seed: u64,
    /// Obstacles scattered at startup
    pub obstacle_count: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // Display
            width: 320,
            height: 200,
            eye_distance: EYE_DISTANCE,
            debug_overlay: false,

            // Timing
            frame_interval_ms: 16,

            // World
            seed: 0x5EED,
            obstacle_count: 20,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the renderer or world setup cannot work with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.width < 16 || self.height < 16 {
            return Err(SettingsError::Invalid(format!(
                "viewport {}x{} is smaller than 16x16",
                self.width, self.height
            )));
        }
        if self.width > 4096 || self.height > 4096 {
            return Err(SettingsError::Invalid(format!(
                "viewport {}x{} is larger than 4096x4096",
                self.width, self.height
            )));
        }
        if self.eye_distance <= 0 {
            return Err(SettingsError::Invalid(format!(
                "eye_distance must be positive, got {}",
                self.eye_distance
            )));
        }
        // One slot stays free for the tank
        if self.obstacle_count >= MAX_OBJECTS {
            return Err(SettingsError::Invalid(format!(
                "obstacle_count must be below {}, got {}",
                MAX_OBJECTS, self.obstacle_count
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7, "debug_overlay": true }"#).unwrap();
        assert_eq!(settings.seed, 7);
        assert!(settings.debug_overlay);
        assert_eq!(settings.width, Settings::default().width);
        assert_eq!(settings.obstacle_count, Settings::default().obstacle_count);
    }

    #[test]
    fn test_json_roundtrip() {
        let settings = Settings {
            width: 640,
            height: 400,
            seed: 99,
            ..Settings::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_parse_error() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
        assert!(err.to_string().starts_with("failed to parse settings"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Settings::from_json(r#"{ "eye_distance": 0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err = Settings::from_json(r#"{ "obstacle_count": 100 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err = Settings::from_json(r#"{ "width": 8 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load("/nonexistent/tanx-settings.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
