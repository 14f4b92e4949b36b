//! Geometry Builder - converts a board into positioned scene elements
//!
//! Layers become slabs over the nominal board footprint, components become
//! boxes at their own placement, traces become polylines lifted just above
//! their host layer.

use nalgebra::{Point3, Vector3};

use crate::board::BoardModel;
use crate::config::ViewerConfig;
use crate::error::Result;
use crate::scene::{ElementId, Geometry, Material, Scene, SceneElement};
use crate::view_mode::ViewMode;

/// Triangle list over the 8 corners returned by [`cuboid_corners`]
pub const CUBOID_INDICES: [u32; 36] = [
    // Bottom face
    0, 2, 1, 0, 3, 2,
    // Top face
    4, 5, 6, 4, 6, 7,
    // Front face
    0, 1, 5, 0, 5, 4,
    // Back face
    2, 3, 7, 2, 7, 6,
    // Left face
    0, 4, 7, 0, 7, 3,
    // Right face
    1, 2, 6, 1, 6, 5,
];

/// Corners of an axis-aligned box centered on `center`, bottom face first
pub fn cuboid_corners(center: Point3<f32>, size: Vector3<f32>) -> [Point3<f32>; 8] {
    let h = size / 2.0;
    let (min_x, min_y, z_start) = (center.x - h.x, center.y - h.y, center.z - h.z);
    let (max_x, max_y, z_end) = (center.x + h.x, center.y + h.y, center.z + h.z);
    [
        // Bottom face
        Point3::new(min_x, min_y, z_start),
        Point3::new(max_x, min_y, z_start),
        Point3::new(max_x, max_y, z_start),
        Point3::new(min_x, max_y, z_start),
        // Top face
        Point3::new(min_x, min_y, z_end),
        Point3::new(max_x, min_y, z_end),
        Point3::new(max_x, max_y, z_end),
        Point3::new(min_x, max_y, z_end),
    ]
}

/// Builds scenes from boards using one set of viewer constants
pub struct GeometryBuilder<'a> {
    config: &'a ViewerConfig,
}

impl<'a> GeometryBuilder<'a> {
    pub fn new(config: &'a ViewerConfig) -> Self {
        Self { config }
    }

    /// Build every element of `board` for `mode`, all visible.
    ///
    /// Fails with `InvalidBoardModel` when a trace names a layer the board
    /// does not have; `board` is never modified.
    pub fn build(&self, board: &BoardModel, mode: ViewMode) -> Result<Scene> {
        board.validate()?;
        if !board.board_outline.is_empty() && !board.is_outline_closed() {
            log::warn!(
                "Board outline is not closed ({} points); first and last point differ",
                board.board_outline.len()
            );
        }

        let mut scene = Scene::new(mode);
        scene.elements.reserve(board.element_count());

        let opacity = mode.layer_opacity(self.config);
        for (index, layer) in board.layers.iter().enumerate() {
            let z = mode.layer_z(index, layer.z, self.config.layer_spacing);
            scene.elements.push(SceneElement {
                id: ElementId::Layer(index),
                geometry: Geometry::Cuboid {
                    size: Vector3::new(self.config.board_width, self.config.board_depth, layer.thickness),
                },
                material: Material::translucent(layer.color, opacity),
                position: Point3::new(0.0, 0.0, z),
                visible: true,
            });
        }

        for (index, component) in board.components.iter().enumerate() {
            scene.elements.push(SceneElement {
                id: ElementId::Component(index),
                geometry: Geometry::Cuboid {
                    size: Vector3::new(component.width, component.height, component.depth),
                },
                material: Material::solid(self.config.component_color),
                position: Point3::new(component.x, component.y, component.z),
                visible: true,
            });
        }

        for (index, trace) in board.traces.iter().enumerate() {
            // Traces follow the host layer's natural z in every mode
            let host_z = board.layers[trace.layer_index].z;
            scene.elements.push(SceneElement {
                id: ElementId::Trace(index),
                geometry: Geometry::Polyline {
                    points: trace.points.iter().map(|p| Point3::new(p.x, p.y, 0.0)).collect(),
                    closed: false,
                },
                material: Material::line(self.config.trace_color, self.config.trace_line_width),
                position: Point3::new(0.0, 0.0, host_z + self.config.trace_z_epsilon),
                visible: true,
            });
        }

        if self.config.show_outline && board.board_outline.len() >= 2 {
            scene.outline = Some(SceneElement {
                id: ElementId::Outline,
                geometry: Geometry::Polyline {
                    points: board.board_outline.iter().map(|p| Point3::new(p.x, p.y, 0.0)).collect(),
                    closed: true,
                },
                material: Material::line(self.config.outline_color, 1.0),
                position: Point3::origin(),
                visible: true,
            });
        }

        log::debug!(
            "Built {:?} scene: {} layers, {} components, {} traces",
            mode,
            board.layers.len(),
            board.components.len(),
            board.traces.len()
        );
        Ok(scene)
    }
}
