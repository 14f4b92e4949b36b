//! Slicing Engine - cross-section visibility against a cut plane
//!
//! The cut plane is perpendicular to the board's depth axis (y). Boxes are
//! shown or hidden whole; a trace stays visible in full as long as at least
//! two of its control points lie on the near side of the plane.

use crate::scene::{Geometry, Scene, SceneElement};

pub const SLICE_MIN: f32 = 0.0;
pub const SLICE_MAX: f32 = 100.0;

/// Cross-section control state, owned by the shell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceState {
    pub enabled: bool,
    position: f32,
}

impl Default for SliceState {
    fn default() -> Self {
        Self {
            enabled: false,
            position: 50.0,
        }
    }
}

impl SliceState {
    pub fn new(enabled: bool, position: f32) -> Self {
        let mut state = Self {
            enabled,
            ..Self::default()
        };
        state.set_position(position);
        state
    }

    /// Slice position in percent, always within 0..=100
    pub fn position(&self) -> f32 {
        self.position
    }

    /// Clamp and store a new position. Non-finite input is ignored.
    pub fn set_position(&mut self, position: f32) -> bool {
        if !position.is_finite() {
            log::warn!("Ignoring non-finite slice position {}", position);
            return false;
        }
        self.position = position.clamp(SLICE_MIN, SLICE_MAX);
        true
    }
}

/// Depth-axis coordinate of the cut plane for a slice position
pub fn cut_plane(position: f32, depth_extent: f32) -> f32 {
    (position / 100.0) * depth_extent - depth_extent / 2.0
}

/// Visibility of one element against the plane `cut_y`
fn is_in_front(element: &SceneElement, cut_y: f32) -> bool {
    match &element.geometry {
        // NaN coordinates compare false and stay visible
        Geometry::Cuboid { .. } => !(element.position.y > cut_y),
        Geometry::Polyline { .. } => {
            let surviving = element
                .world_points()
                .iter()
                .filter(|p| p.y <= cut_y)
                .count();
            // a single point cannot render a line
            surviving >= 2
        }
    }
}

/// Assign slice visibility to every element of `scene`.
///
/// Pure: the result depends only on the scene, the slice state and the
/// extent. The outline element is never sliced.
pub fn apply_clip(mut scene: Scene, slice: &SliceState, depth_extent: f32) -> Scene {
    if !slice.enabled {
        return scene;
    }
    let cut_y = cut_plane(slice.position(), depth_extent);
    for element in &mut scene.elements {
        element.visible = is_in_front(element, cut_y);
    }
    log::debug!(
        "Slice at {:.1}% (cut y = {:.3}): {} of {} elements visible",
        slice.position(),
        cut_y,
        scene.visible_count(),
        scene.len()
    );
    scene
}

/// Counts reported to the shell after a rebuild
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceSummary {
    /// Cut plane coordinate, `None` while slicing is disabled
    pub cut_y: Option<f32>,
    pub visible: usize,
    pub hidden: usize,
}

impl SliceSummary {
    pub fn of(scene: &Scene, slice: &SliceState, depth_extent: f32) -> Self {
        Self {
            cut_y: slice
                .enabled
                .then(|| cut_plane(slice.position(), depth_extent)),
            visible: scene.visible_count(),
            hidden: scene.hidden_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Rgb;
    use crate::scene::{ElementId, Material};
    use nalgebra::{Point3, Vector3};

    fn cuboid(index: usize, y: f32) -> SceneElement {
        SceneElement {
            id: ElementId::Component(index),
            geometry: Geometry::Cuboid { size: Vector3::new(1.0, 1.0, 1.0) },
            material: Material::solid(Rgb::new(0x333333)),
            position: Point3::new(0.0, y, 0.0),
            visible: true,
        }
    }

    fn polyline(index: usize, ys: &[f32]) -> SceneElement {
        SceneElement {
            id: ElementId::Trace(index),
            geometry: Geometry::Polyline {
                points: ys.iter().enumerate().map(|(i, &y)| Point3::new(i as f32, y, 0.0)).collect(),
                closed: false,
            },
            material: Material::line(Rgb::new(0xffff00), 3.0),
            position: Point3::new(0.0, 0.0, 1.001),
            visible: true,
        }
    }

    fn scene_of(elements: Vec<SceneElement>) -> Scene {
        let mut scene = Scene::new(crate::ViewMode::Isometric);
        scene.elements = elements;
        scene
    }

    #[test]
    fn test_cut_plane_mapping() {
        assert_eq!(cut_plane(0.0, 6.0), -3.0);
        assert_eq!(cut_plane(50.0, 6.0), 0.0);
        assert_eq!(cut_plane(100.0, 6.0), 3.0);
        assert_eq!(cut_plane(25.0, 8.0), -2.0);
    }

    #[test]
    fn test_position_is_clamped() {
        assert_eq!(SliceState::new(true, 140.0).position(), 100.0);
        assert_eq!(SliceState::new(true, -3.0).position(), 0.0);

        let mut state = SliceState::new(true, 30.0);
        assert!(!state.set_position(f32::NAN));
        assert_eq!(state.position(), 30.0);
    }

    #[test]
    fn test_disabled_is_pass_through() {
        let scene = scene_of(vec![cuboid(0, 2.9), polyline(0, &[2.0, 2.5])]);
        let clipped = apply_clip(scene.clone(), &SliceState::new(false, 0.0), 6.0);
        assert_eq!(clipped, scene);
    }

    #[test]
    fn test_boxes_behind_plane_are_hidden() {
        let scene = scene_of(vec![cuboid(0, -1.0), cuboid(1, 0.0), cuboid(2, 0.5)]);
        let clipped = apply_clip(scene, &SliceState::new(true, 50.0), 6.0);
        let visible: Vec<bool> = clipped.elements.iter().map(|e| e.visible).collect();
        // exactly on the plane counts as in front
        assert_eq!(visible, vec![true, true, false]);
    }

    #[test]
    fn test_trace_needs_two_surviving_points() {
        let scene = scene_of(vec![
            polyline(0, &[0.0, 2.0, 1.0]),
            polyline(1, &[-1.0, 1.0, -1.0]),
        ]);
        let clipped = apply_clip(scene, &SliceState::new(true, 50.0), 6.0);
        assert!(!clipped.elements[0].visible);
        assert!(clipped.elements[1].visible);
        // surviving traces keep their full point list
        match &clipped.elements[1].geometry {
            Geometry::Polyline { points, .. } => assert_eq!(points.len(), 3),
            Geometry::Cuboid { .. } => unreachable!(),
        }
    }

    #[test]
    fn test_clip_recomputes_from_scratch() {
        let mut scene = scene_of(vec![cuboid(0, 1.0)]);
        scene.elements[0].visible = false;
        let clipped = apply_clip(scene, &SliceState::new(true, 100.0), 6.0);
        assert!(clipped.elements[0].visible);
    }

    #[test]
    fn test_summary() {
        let scene = apply_clip(
            scene_of(vec![cuboid(0, -1.0), cuboid(1, 1.0)]),
            &SliceState::new(true, 50.0),
            6.0,
        );
        let summary = SliceSummary::of(&scene, &SliceState::new(true, 50.0), 6.0);
        assert_eq!(summary, SliceSummary { cut_y: Some(0.0), visible: 1, hidden: 1 });

        let off = SliceSummary::of(&scene, &SliceState::default(), 6.0);
        assert_eq!(off.cut_y, None);
    }
}
