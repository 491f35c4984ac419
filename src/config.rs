//=========================================================================
// Portfolio Configuration
//=========================================================================
//
// Tunables for the scene controller, loaded from TOML.
//
// Architecture:
//   portfolio.toml ──toml──► PortfolioConfig
//                              ├─ camera      (free roam / focus poses)
//                              ├─ navigation  (waypoints, interior rig)
//                              ├─ timing      (enter / cooldown length)
//                              ├─ orbit       (planet motion, visuals)
//                              └─ content     (section payloads)
//
// Every section is optional; missing keys fall back to the defaults of
// the live site.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::f32::consts::FRAC_PI_2;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use glam::Vec3;
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::content::ContentConfig;
use crate::core::path::WaypointConfig;

//=== ConfigError =========================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

//=== PortfolioConfig =====================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioConfig {
    pub camera: CameraConfig,
    pub navigation: NavigationConfig,
    pub timing: TimingConfig,
    pub orbit: OrbitConfig,
    pub content: ContentConfig,
}

impl PortfolioConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Reads and parses the TOML file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml_str(&source)?;
        info!(
            "Loaded config from {} ({} waypoints)",
            path.display(),
            config.navigation.waypoints.len()
        );
        Ok(config)
    }
}

//=== CameraConfig ========================================================

/// Free roam and focus camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub default_position: Vec3,
    pub default_look_at: Vec3,

    /// Vertical field of view in degrees, forwarded to the renderer.
    pub fov: f32,

    /// Per-frame smoothing factor in free roam.
    pub lerp_factor: f32,

    /// Per-frame smoothing factor while focused.
    pub focused_lerp_factor: f32,

    /// Camera height above the planet while focused.
    pub focus_height: f32,

    /// Camera offset toward the viewer while focused.
    pub focus_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            default_position: Vec3::new(0.0, 4.0, 12.0),
            default_look_at: Vec3::ZERO,
            fov: 50.0,
            lerp_factor: 0.05,
            focused_lerp_factor: 0.1,
            focus_height: 0.8,
            focus_distance: 4.0,
        }
    }
}

//=== NavigationConfig ====================================================

/// Interior path and the camera that follows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub waypoints: Vec<WaypointConfig>,
    pub transition_duration_ms: u64,

    pub camera_height: f32,
    pub camera_distance: f32,
    pub camera_tilt: f32,
    pub look_ahead: f32,

    /// Interior smoothing rate per second.
    pub interior_rate: f32,

    /// Multiplier on `interior_rate` while a transition is in flight.
    pub transition_boost: f32,

    /// Vessel smoothing rate per second.
    pub vessel_rate: f32,

    /// Interior pose used when no path could be built.
    pub static_position: Vec3,
    pub static_look_at: Vec3,
}

impl NavigationConfig {
    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_duration_ms)
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        let waypoints = [
            "start",
            "about",
            "skills",
            "experience-qube",
            "experience-zoho",
            "education",
        ]
        .iter()
        .enumerate()
        .map(|(i, section)| {
            WaypointConfig::new([-16.0 + 8.0 * i as f32, -0.4, 0.0], section, FRAC_PI_2)
        })
        .collect();

        Self {
            waypoints,
            transition_duration_ms: 2000,
            camera_height: 4.0,
            camera_distance: 6.0,
            camera_tilt: 1.5,
            look_ahead: 2.0,
            interior_rate: 1.0,
            transition_boost: 1.5,
            vessel_rate: 2.0,
            static_position: Vec3::new(0.0, 3.5, 7.0),
            static_look_at: Vec3::ZERO,
        }
    }
}

//=== TimingConfig ========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Length of the enter animation and of the return cooldown.
    pub animation_duration_ms: u64,
}

impl TimingConfig {
    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            animation_duration_ms: 1500,
        }
    }
}

//=== OrbitConfig =========================================================

/// Planet orbit and the scene visuals tied to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub radius: f32,

    /// Orbit angular speed in rad/s.
    pub angular_speed: f32,

    /// Planet self-rotation in rad/s.
    pub planet_spin: f32,

    /// Cloud layer rotation in rad/s.
    pub cloud_spin: f32,

    /// Planet scale reached by the enter animation.
    pub shrink_scale: f32,

    /// Per-frame scale smoothing during the enter animation.
    pub scale_lerp: f32,

    /// Per-frame star opacity smoothing.
    pub star_fade: f32,

    /// Hub label fade rate per second.
    pub label_fade_rate: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            radius: 3.0,
            angular_speed: 0.3,
            planet_spin: 0.2,
            cloud_spin: 0.15,
            shrink_scale: 0.01,
            scale_lerp: 0.05,
            star_fade: 0.1,
            label_fade_rate: 2.0,
        }
    }
}

//=== Tests ===============================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = PortfolioConfig::from_toml_str("").unwrap();
        assert_eq!(config, PortfolioConfig::default());
        assert_eq!(config.navigation.waypoints.len(), 6);
        assert_eq!(config.navigation.transition_duration(), Duration::from_millis(2000));
        assert_eq!(config.timing.animation_duration(), Duration::from_millis(1500));
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = PortfolioConfig::from_toml_str(
            r#"
            [camera]
            lerp_factor = 0.2

            [navigation]
            transition_duration_ms = 500
            waypoints = [
                { position = [0.0, 0.0, 0.0], section = "start" },
                { position = [5.0, 0.0, 0.0], section = "about", rotation = 0.0 },
            ]
            "#,
        )
        .unwrap();

        assert_eq!(config.camera.lerp_factor, 0.2);
        assert_eq!(config.camera.focused_lerp_factor, 0.1);
        assert_eq!(config.navigation.waypoints.len(), 2);
        assert_eq!(config.navigation.waypoints[0].rotation, FRAC_PI_2);
        assert_eq!(config.navigation.waypoints[1].rotation, 0.0);
        assert_eq!(config.navigation.camera_height, 4.0);
    }

    #[test]
    fn vectors_parse_from_arrays() {
        let config = PortfolioConfig::from_toml_str(
            "[camera]\ndefault_position = [1.0, 2.0, 3.0]",
        )
        .unwrap();
        assert_eq!(config.camera.default_position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let err = PortfolioConfig::from_toml_str("[camera\nfov = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = PortfolioConfig::load("/nonexistent/portfolio.toml").unwrap_err();
        match err {
            ConfigError::Io { path, .. } => {
                assert_eq!(path, PathBuf::from("/nonexistent/portfolio.toml"))
            }
            other => panic!("Expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn content_section_overrides_experiences() {
        let config = PortfolioConfig::from_toml_str(
            r#"
            [content.experiences.acme]
            title = "Engineer"
            company = "ACME"
            location = "Remote"
            duration = "2024"
            details = ["Built things"]
            "#,
        )
        .unwrap();
        assert_eq!(config.content.experiences.len(), 1);
        assert!(config.content.experiences.contains_key("acme"));
    }
}
