use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::config::ViewerConfig;

/// Spatial arrangement of the layer stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ViewMode {
    /// Layers at their natural z, camera off-axis
    #[default]
    Isometric,
    /// Layers exploded at a fixed spacing, camera head-on
    Layered,
}

impl ViewMode {
    pub fn all() -> [Self; 2] {
        [Self::Isometric, Self::Layered]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Isometric => "Isometric View",
            Self::Layered => "Layered View",
        }
    }

    /// Stacking coordinate of layer `index` in this mode
    pub fn layer_z(&self, index: usize, natural_z: f32, spacing: f32) -> f32 {
        match self {
            Self::Isometric => natural_z,
            Self::Layered => index as f32 * spacing,
        }
    }

    pub fn layer_opacity(&self, config: &ViewerConfig) -> f32 {
        match self {
            Self::Isometric => 1.0,
            Self::Layered => config.layered_opacity,
        }
    }

    /// Default camera eye; the camera always looks at the origin
    pub fn default_eye(&self, config: &ViewerConfig) -> Point3<f32> {
        match self {
            Self::Isometric => config.isometric_eye,
            Self::Layered => config.layered_eye,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_z_per_mode() {
        assert_eq!(ViewMode::Isometric.layer_z(3, 1.1, 0.5), 1.1);
        assert_eq!(ViewMode::Layered.layer_z(3, 1.1, 0.5), 1.5);
        assert_eq!(ViewMode::Layered.layer_z(0, 1.1, 0.5), 0.0);
    }

    #[test]
    fn test_default_poses() {
        let config = ViewerConfig::default();
        let iso = ViewMode::Isometric.default_eye(&config);
        assert!(iso.x > 0.0 && iso.x == iso.y && iso.y == iso.z);

        let layered = ViewMode::Layered.default_eye(&config);
        assert_eq!((layered.x, layered.y), (0.0, 0.0));
        assert!(layered.z > 0.0);
    }

    #[test]
    fn test_only_layered_is_translucent() {
        let config = ViewerConfig::default();
        assert_eq!(ViewMode::Isometric.layer_opacity(&config), 1.0);
        assert_eq!(ViewMode::Layered.layer_opacity(&config), 0.7);
    }
}
