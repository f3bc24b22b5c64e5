//! Visualization settings
//!
//! Loaded from a JSON file by the host; every field has a default so partial
//! files are fine.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::consts::*;
use crate::error::{VisualError, VisualResult};
use crate::geometry::SeamMode;
use crate::orbit::OrbitSettings;
use crate::reveal::RevealTiming;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Surface grid resolution (samples per side)
    pub fn grid_size(&self) -> usize {
        match self {
            QualityPreset::Low => 50,
            QualityPreset::Medium => DEFAULT_GRID_SIZE,
            QualityPreset::High => 160,
        }
    }

    /// Cross-section segments
    pub fn profile_samples(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => DEFAULT_PROFILE_SAMPLES,
            QualityPreset::High => 400,
        }
    }

    /// Background stars in the orbit view
    pub fn starfield_count(&self) -> usize {
        match self {
            QualityPreset::Low => 2_000,
            QualityPreset::Medium => STARFIELD_COUNT,
            QualityPreset::High => 20_000,
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualSettings {
    pub quality: QualityPreset,

    // === Crater geometry ===
    /// Samples per side of the surface grid
    pub grid_size: usize,
    /// Segments of the cross-section (points = segments + 1)
    pub profile_samples: usize,
    pub seam_mode: SeamMode,

    // === Animation ===
    pub reveal: RevealTiming,

    // === Orbit view ===
    pub orbit: OrbitSettings,
    pub starfield_count: usize,
    pub starfield_extent: f32,
    pub starfield_seed: u64,
}

impl Default for VisualSettings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            grid_size: DEFAULT_GRID_SIZE,
            profile_samples: DEFAULT_PROFILE_SAMPLES,
            seam_mode: SeamMode::Continuous,

            reveal: RevealTiming::default(),

            orbit: OrbitSettings::default(),
            starfield_count: STARFIELD_COUNT,
            starfield_extent: STARFIELD_EXTENT,
            starfield_seed: 0,
        }
    }
}

impl VisualSettings {
    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset (updates resolution-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;
        self.grid_size = preset.grid_size();
        self.profile_samples = preset.profile_samples();
        self.starfield_count = preset.starfield_count();
    }

    /// Reject values no generator can work with
    pub fn validate(&self) -> VisualResult<()> {
        if self.grid_size < 2 {
            return Err(VisualError::Config(format!("grid_size must be at least 2, got {}", self.grid_size)));
        }
        if self.profile_samples < 1 {
            return Err(VisualError::Config("profile_samples must be at least 1".to_string()));
        }
        self.reveal.validate()?;
        if self.orbit.segments < MIN_ORBIT_SEGMENTS {
            return Err(VisualError::Config(format!(
                "orbit.segments must be at least {}, got {}",
                MIN_ORBIT_SEGMENTS, self.orbit.segments
            )));
        }
        Ok(())
    }

    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> VisualResult<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> VisualResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> VisualResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> VisualResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = VisualSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.grid_size, 100);
        assert_eq!(settings.profile_samples, 200);
        assert_eq!(settings.reveal.inter_layer_delay_ms, 800.0);
        assert_eq!(settings.orbit.segments, 128);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = VisualSettings::from_json(
            r#"{ "grid_size": 64, "seam_mode": "Legacy", "reveal": { "steps_per_layer": 10 } }"#,
        )
        .unwrap();
        assert_eq!(settings.grid_size, 64);
        assert_eq!(settings.seam_mode, SeamMode::Legacy);
        assert_eq!(settings.reveal.steps_per_layer, 10);
        assert_eq!(settings.reveal.per_layer_duration_ms, 600.0);
        assert_eq!(settings.orbit, OrbitSettings::default());
    }

    #[test]
    fn test_invalid_json_values() {
        assert!(matches!(
            VisualSettings::from_json(r#"{ "grid_size": 1 }"#),
            Err(VisualError::Config(_))
        ));
        assert!(VisualSettings::from_json(r#"{ "orbit": { "segments": 2 } }"#).is_err());
        assert!(VisualSettings::from_json(r#"{ "reveal": { "steps_per_layer": 0 } }"#).is_err());
        assert!(matches!(
            VisualSettings::from_json("not json"),
            Err(VisualError::Json(_))
        ));
    }

    #[test]
    fn test_reveal_timing_bounds() {
        for json in [
            r#"{ "reveal": { "steps_per_layer": 4000000000 } }"#,
            r#"{ "reveal": { "popup_hold_ms": 1e300 } }"#,
            r#"{ "reveal": { "inter_layer_delay_ms": -1.0 } }"#,
            r#"{ "reveal": { "per_layer_duration_ms": 60001.0 } }"#,
        ] {
            assert!(
                matches!(VisualSettings::from_json(json), Err(VisualError::Config(_))),
                "accepted {json}"
            );
        }

        let mut settings = VisualSettings::default();
        settings.reveal.popup_hold_ms = f64::NAN;
        assert!(settings.validate().is_err());
        settings.reveal.popup_hold_ms = MAX_TIMING_MS;
        settings.reveal.steps_per_layer = MAX_STEPS_PER_LAYER;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        let low = VisualSettings::from_preset(QualityPreset::Low);
        assert_eq!(low.grid_size, 50);
        assert_eq!(low.quality, QualityPreset::Low);
        assert_eq!(QualityPreset::parse("MED"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::parse("ultra"), None);
        assert_eq!(QualityPreset::High.as_str(), "High");
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!("impact-viz-settings-{}.json", std::process::id()));
        let settings = VisualSettings::from_preset(QualityPreset::High);
        settings.save(&path).unwrap();
        let loaded = VisualSettings::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded.quality, QualityPreset::High);
        assert_eq!(loaded.grid_size, 160);
        assert_eq!(loaded.starfield_count, 20_000);
        assert_eq!(loaded.reveal, settings.reveal);
        assert!((loaded.orbit.tilt_rad - settings.orbit.tilt_rad).abs() < 1e-12);
        assert!(matches!(
            VisualSettings::load(path.with_extension("missing")),
            Err(VisualError::Io(_))
        ));
    }
}
