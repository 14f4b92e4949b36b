use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::board::Rgb;
use crate::error::Result;

const CONFIG_FILE_NAME: &str = "viewer_config.json";

/// Tunable constants of the viewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Nominal board footprint along x
    pub board_width: f32,
    /// Nominal board footprint along y; also the slicing extent
    pub board_depth: f32,

    pub layered_opacity: f32,
    pub layer_spacing: f32,

    pub trace_z_epsilon: f32,
    pub trace_color: Rgb,
    pub trace_line_width: f32,
    pub component_color: Rgb,
    pub outline_color: Rgb,
    pub show_outline: bool,

    /// Radians of model rotation per pixel of drag
    pub rotation_sensitivity: f32,
    pub zoom_in_factor: f32,
    pub zoom_out_factor: f32,

    pub isometric_eye: Point3<f32>,
    pub layered_eye: Point3<f32>,
    pub fovy_degrees: f32,
    pub znear: f32,
    pub zfar: f32,

    pub background_color: Rgb,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            board_width: 10.0,
            board_depth: 6.0,
            layered_opacity: 0.7,
            layer_spacing: 0.5,
            trace_z_epsilon: 0.001,
            trace_color: Rgb::new(0xffff00),
            trace_line_width: 3.0,
            component_color: Rgb::new(0x333333),
            outline_color: Rgb::new(0xcccccc),
            show_outline: false,
            rotation_sensitivity: 0.01,
            zoom_in_factor: 0.9,
            zoom_out_factor: 1.1,
            isometric_eye: Point3::new(10.0, 10.0, 10.0),
            layered_eye: Point3::new(0.0, 0.0, 20.0),
            fovy_degrees: 75.0,
            znear: 0.1,
            zfar: 1000.0,
            background_color: Rgb::new(0x1a1a1a),
        }
    }
}

impl ViewerConfig {
    /// Write the config as pretty JSON into `dir`
    pub fn save_to_file(&self, dir: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::create_dir_all(dir)?;
        std::fs::write(dir.join(CONFIG_FILE_NAME), json)?;
        Ok(())
    }

    /// Load the config from `dir`, falling back to defaults when no file exists
    pub fn load_from_file(dir: &Path) -> Result<Self> {
        let json_path = dir.join(CONFIG_FILE_NAME);
        if json_path.exists() {
            let json = std::fs::read_to_string(json_path)?;
            let config: ViewerConfig = serde_json::from_str(&json)?;
            Ok(config)
        } else {
            Ok(ViewerConfig::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("copperslice-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = scratch_dir("missing");
        assert_eq!(ViewerConfig::load_from_file(&dir).unwrap(), ViewerConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = scratch_dir("save");
        let config = ViewerConfig {
            show_outline: true,
            layer_spacing: 0.75,
            ..ViewerConfig::default()
        };
        config.save_to_file(&dir).unwrap();
        assert_eq!(ViewerConfig::load_from_file(&dir).unwrap(), config);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = scratch_dir("partial");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(CONFIG_FILE_NAME), r#"{ "zoom_in_factor": 0.8 }"#).unwrap();
        let config = ViewerConfig::load_from_file(&dir).unwrap();
        assert_eq!(config.zoom_in_factor, 0.8);
        assert_eq!(config.board_depth, 6.0);
        std::fs::remove_dir_all(&dir).ok();
    }
}
