use std::fs;
use std::path::Path;

use anyhow::{Context, bail};
use archscape_animate::{LightParams, OscillatorParams, WaveParams};
use archscape_common::Color;
use archscape_input::CameraParams;
use archscape_mesh::{ArchParams, TerrainParams};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Everything needed to assemble the demo scene. Missing fields fall back
/// to their defaults, so a config file only lists what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub terrain: TerrainParams,
    pub arch: ArchParams,
    pub wave: WaveParams,
    pub oscillator: OscillatorParams,
    pub light: LightParams,
    pub camera: CameraParams,
    /// Where the arch stands, relative to the centre of the terrain.
    pub arch_position: Vec3,
    pub terrain_color: Color,
    pub arch_color: Color,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            terrain: TerrainParams::default(),
            arch: ArchParams::default(),
            wave: WaveParams::default(),
            oscillator: OscillatorParams::default(),
            light: LightParams::default(),
            camera: CameraParams::default(),
            arch_position: Vec3::new(0.0, 0.5, 0.0),
            terrain_color: Color::GREEN,
            arch_color: Color::RED,
        }
    }
}

impl SceneConfig {
    /// Load a config file; the format follows the extension (`.json`,
    /// `.yaml` or `.yml`).
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        Self::parse(&text, &ext).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn parse(text: &str, format: &str) -> anyhow::Result<Self> {
        let config = match format {
            "json" => serde_json::from_str(text)?,
            "yaml" | "yml" => serde_yaml::from_str(text)?,
            other => bail!("unsupported config format {other:?} (expected json, yaml or yml)"),
        };
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archscape_input::CameraMode;

    #[test]
    fn empty_documents_give_defaults() {
        assert_eq!(SceneConfig::parse("{}", "json").unwrap(), SceneConfig::default());
        assert_eq!(SceneConfig::parse("{}", "yaml").unwrap(), SceneConfig::default());
    }

    #[test]
    fn partial_yaml_overrides_only_named_fields() {
        let yaml = "
terrain:
  width_segments: 4
wave:
  amplitude: 2.5
camera:
  mode: AutoOrbit
arch_position: [1.0, 2.0, 3.0]
";
        let config = SceneConfig::parse(yaml, "yml").unwrap();
        assert_eq!(config.terrain.width_segments, 4);
        assert_eq!(config.terrain.length_segments, 10);
        assert_eq!(config.wave.amplitude, 2.5);
        assert_eq!(config.wave.frequency, 0.5);
        assert_eq!(config.camera.mode, CameraMode::AutoOrbit);
        assert_eq!(config.arch_position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(config.arch, ArchParams::default());
    }

    #[test]
    fn json_round_trips() {
        let mut config = SceneConfig::default();
        config.arch.segments = 7;
        config.light.on = false;
        let text = serde_json::to_string(&config).unwrap();
        assert_eq!(SceneConfig::parse(&text, "json").unwrap(), config);
    }

    #[test]
    fn unknown_format_is_rejected() {
        let err = SceneConfig::parse("{}", "toml").unwrap_err();
        assert!(err.to_string().contains("toml"));
    }

    #[test]
    fn malformed_input_is_an_error() {
        assert!(SceneConfig::parse("{ not json", "json").is_err());
        assert!(SceneConfig::parse("terrain: [1, 2", "yaml").is_err());
    }
}
