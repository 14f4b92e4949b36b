//! Board viewer state and control surface
//!
//! `BoardViewer` owns the loaded board, the current scene and everything the
//! render loop reads. Control changes rebuild the scene synchronously;
//! pointer and wheel input only touch the camera and model transform.

use crate::board::{BoardModel, LegendEntry, Rgb};
use crate::camera::{Camera, ModelTransform, ZoomDirection};
use crate::config::ViewerConfig;
use crate::error::Result;
use crate::geometry::GeometryBuilder;
use crate::orbit::{OrbitController, OrbitTransition, PointerPos};
use crate::projection::{project_scene, DrawPrimitive, Lighting, Viewport};
use crate::scene::Scene;
use crate::slicing::{apply_clip, SliceState, SliceSummary};
use crate::view_mode::ViewMode;

pub struct BoardViewer {
    config: ViewerConfig,
    board: Option<BoardModel>,
    scene: Option<Scene>,
    view_mode: ViewMode,
    slice: SliceState,
    camera: Camera,
    model: ModelTransform,
    orbit: OrbitController,
    lighting: Lighting,
}

impl BoardViewer {
    pub fn new(config: ViewerConfig) -> Self {
        let view_mode = ViewMode::default();
        Self {
            camera: Camera::for_mode(view_mode, &config),
            orbit: OrbitController::new(config.rotation_sensitivity),
            config,
            board: None,
            scene: None,
            view_mode,
            slice: SliceState::default(),
            model: ModelTransform::default(),
            lighting: Lighting::default(),
        }
    }

    /// Replace the board and rebuild.
    ///
    /// On error the previous board and scene stay in place.
    pub fn load_board(&mut self, board: BoardModel) -> Result<()> {
        let scene = self.synthesize(&board)?;
        log::info!(
            "Loaded board: {} layers, {} components, {} traces",
            board.layers.len(),
            board.components.len(),
            board.traces.len()
        );
        self.board = Some(board);
        self.scene = Some(scene);
        Ok(())
    }

    /// Switch layout; camera and model rotation go back to the mode's
    /// defaults
    pub fn set_view_mode(&mut self, mode: ViewMode) -> Result<()> {
        if mode == self.view_mode {
            return Ok(());
        }
        log::info!("View mode: {}", mode.display_name());
        self.view_mode = mode;
        self.camera.reset_to(mode, &self.config);
        self.model.reset();
        self.rebuild()
    }

    pub fn set_slice_enabled(&mut self, enabled: bool) -> Result<()> {
        if enabled == self.slice.enabled {
            return Ok(());
        }
        self.slice.enabled = enabled;
        self.rebuild()
    }

    /// Move the cut plane; positions are clamped to 0..=100 and non-finite
    /// input leaves the state untouched
    pub fn set_slice_position(&mut self, position: f32) -> Result<()> {
        if !self.slice.set_position(position) {
            return Ok(());
        }
        self.rebuild()
    }

    /// Default pose for the current mode and no model rotation
    pub fn reset_camera(&mut self) {
        self.camera.reset_to(self.view_mode, &self.config);
        self.model.reset();
        log::debug!("Camera reset to {} default", self.view_mode.display_name());
    }

    pub fn pointer_down(&mut self, pos: PointerPos) -> OrbitTransition {
        self.orbit.pointer_down(pos)
    }

    pub fn pointer_move(&mut self, pos: PointerPos) -> OrbitTransition {
        self.orbit.pointer_move(pos, &mut self.model)
    }

    pub fn pointer_up(&mut self) -> OrbitTransition {
        self.orbit.pointer_up()
    }

    pub fn pointer_leave(&mut self) -> OrbitTransition {
        self.orbit.pointer_leave()
    }

    pub fn wheel(&mut self, direction: ZoomDirection) {
        self.camera.zoom(direction.factor(&self.config));
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn board(&self) -> Option<&BoardModel> {
        self.board.as_ref()
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn slice(&self) -> SliceState {
        self.slice
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn model(&self) -> &ModelTransform {
        &self.model
    }

    pub fn is_dragging(&self) -> bool {
        self.orbit.is_dragging()
    }

    pub fn background(&self) -> Rgb {
        self.config.background_color
    }

    /// Visible/hidden counts of the current scene
    pub fn slice_summary(&self) -> Option<SliceSummary> {
        self.scene
            .as_ref()
            .map(|scene| SliceSummary::of(scene, &self.slice, self.config.board_depth))
    }

    pub fn legend(&self) -> Vec<LegendEntry> {
        self.board.as_ref().map(BoardModel::legend).unwrap_or_default()
    }

    /// Draw primitives for the current scene, empty before the first load
    pub fn frame(&self, viewport: Viewport) -> Vec<DrawPrimitive> {
        match &self.scene {
            Some(scene) => project_scene(scene, &self.camera, &self.model, viewport, &self.lighting),
            None => Vec::new(),
        }
    }

    fn synthesize(&self, board: &BoardModel) -> Result<Scene> {
        let scene = GeometryBuilder::new(&self.config).build(board, self.view_mode)?;
        Ok(apply_clip(scene, &self.slice, self.config.board_depth))
    }

    /// Discard the scene and build a new one from the current board
    fn rebuild(&mut self) -> Result<()> {
        let Some(board) = &self.board else {
            return Ok(());
        };
        let scene = self.synthesize(board)?;
        log::debug!(
            "Rebuilt {} scene: {} of {} elements visible",
            self.view_mode.display_name(),
            scene.visible_count(),
            scene.len()
        );
        self.scene = Some(scene);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_board;
    use crate::error::ViewerError;
    use crate::scene::ElementId;
    use nalgebra::Point3;

    fn loaded() -> BoardViewer {
        let mut viewer = BoardViewer::new(ViewerConfig::default());
        viewer.load_board(demo_board()).unwrap();
        viewer
    }

    fn visible(viewer: &BoardViewer, id: ElementId) -> bool {
        viewer.scene().unwrap().get(id).unwrap().visible
    }

    #[test]
    fn test_demo_board_all_visible_without_slicing() {
        let viewer = loaded();
        let summary = viewer.slice_summary().unwrap();
        assert_eq!(summary.visible, 9);
        assert_eq!(summary.hidden, 0);
        assert_eq!(summary.cut_y, None);
    }

    #[test]
    fn test_demo_board_sliced_at_middle() {
        let mut viewer = loaded();
        viewer.set_slice_enabled(true).unwrap();
        viewer.set_slice_position(50.0).unwrap();

        assert_eq!(viewer.slice_summary().unwrap().cut_y, Some(0.0));
        for layer in 0..4 {
            assert!(visible(&viewer, ElementId::Layer(layer)));
        }
        assert!(!visible(&viewer, ElementId::Component(0)));
        assert!(!visible(&viewer, ElementId::Component(1)));
        assert!(visible(&viewer, ElementId::Component(2)));
        // trace 0 keeps only (0, 0); trace 1 keeps both y = -1 points
        assert!(!visible(&viewer, ElementId::Trace(0)));
        assert!(visible(&viewer, ElementId::Trace(1)));
        assert_eq!(viewer.slice_summary().unwrap().visible, 6);
    }

    #[test]
    fn test_disabling_slice_restores_everything() {
        let mut viewer = loaded();
        viewer.set_slice_enabled(true).unwrap();
        viewer.set_slice_position(0.0).unwrap();
        assert!(viewer.slice_summary().unwrap().hidden > 0);

        viewer.set_slice_enabled(false).unwrap();
        assert_eq!(viewer.slice_summary().unwrap().visible, 9);
        // position survives the toggle
        assert_eq!(viewer.slice().position(), 0.0);
    }

    #[test]
    fn test_mode_round_trip_restores_layer_z() {
        let mut viewer = loaded();
        let before: Vec<f32> = (0..4)
            .map(|i| viewer.scene().unwrap().get(ElementId::Layer(i)).unwrap().position.z)
            .collect();

        viewer.set_view_mode(ViewMode::Layered).unwrap();
        assert_eq!(viewer.camera().eye, Point3::new(0.0, 0.0, 20.0));
        assert_eq!(
            viewer.scene().unwrap().get(ElementId::Layer(3)).unwrap().position.z,
            1.5
        );

        viewer.set_view_mode(ViewMode::Isometric).unwrap();
        let after: Vec<f32> = (0..4)
            .map(|i| viewer.scene().unwrap().get(ElementId::Layer(i)).unwrap().position.z)
            .collect();
        assert_eq!(before, after);
        assert_eq!(viewer.camera().eye, Point3::new(10.0, 10.0, 10.0));
    }

    #[test]
    fn test_failed_load_keeps_previous_scene() {
        let mut viewer = loaded();
        let before = viewer.scene().cloned();

        let mut bad = demo_board();
        bad.traces[0].layer_index = 9;
        let result = viewer.load_board(bad);
        assert!(matches!(result, Err(ViewerError::InvalidBoardModel(_))));
        assert_eq!(viewer.scene().cloned(), before);
        assert_eq!(viewer.board().unwrap().traces[0].layer_index, 0);
    }

    #[test]
    fn test_controls_before_load_are_harmless() {
        let mut viewer = BoardViewer::new(ViewerConfig::default());
        viewer.set_slice_enabled(true).unwrap();
        viewer.set_view_mode(ViewMode::Layered).unwrap();
        assert!(viewer.scene().is_none());
        assert!(viewer.frame(Viewport::new(0.0, 0.0, 100.0, 100.0)).is_empty());
        assert!(viewer.legend().is_empty());
    }

    #[test]
    fn test_orbit_and_zoom_leave_scene_alone() {
        let mut viewer = loaded();
        let before = viewer.scene().cloned();

        viewer.pointer_down(PointerPos::new(10.0, 10.0));
        viewer.pointer_move(PointerPos::new(110.0, 10.0));
        viewer.pointer_up();
        viewer.wheel(ZoomDirection::Out);

        assert!((viewer.model().yaw - 1.0).abs() < 1e-6);
        assert!(viewer.camera().distance() > 10.0 * 3f32.sqrt());
        assert_eq!(viewer.scene().cloned(), before);
    }

    #[test]
    fn test_mode_change_resets_camera_and_rotation() {
        let mut viewer = loaded();
        viewer.pointer_down(PointerPos::new(0.0, 0.0));
        viewer.pointer_move(PointerPos::new(30.0, 50.0));
        viewer.pointer_up();
        viewer.wheel(ZoomDirection::In);

        viewer.set_view_mode(ViewMode::Layered).unwrap();
        assert_eq!(*viewer.model(), ModelTransform::default());
        assert_eq!(viewer.camera().eye, Point3::new(0.0, 0.0, 20.0));
    }

    #[test]
    fn test_mode_change_mid_drag_zeroes_rotation() {
        let mut viewer = loaded();
        viewer.pointer_down(PointerPos::new(0.0, 0.0));
        viewer.pointer_move(PointerPos::new(40.0, 0.0));

        viewer.set_view_mode(ViewMode::Layered).unwrap();
        assert_eq!(*viewer.model(), ModelTransform::default());

        // the drag continues from the last pointer position
        assert!(viewer.is_dragging());
        viewer.pointer_move(PointerPos::new(50.0, 0.0));
        assert!((viewer.model().yaw - 0.1).abs() < 1e-6);
        assert_eq!(viewer.model().pitch, 0.0);
    }

    #[test]
    fn test_reset_while_dragging() {
        let mut viewer = loaded();
        viewer.pointer_down(PointerPos::new(10.0, 10.0));
        viewer.pointer_move(PointerPos::new(110.0, 60.0));
        viewer.wheel(ZoomDirection::Out);
        assert!(viewer.is_dragging());

        viewer.reset_camera();
        assert_eq!(viewer.camera().eye, Point3::new(10.0, 10.0, 10.0));
        assert_eq!(*viewer.model(), ModelTransform::default());

        // rotation accumulates from zero again
        viewer.pointer_move(PointerPos::new(120.0, 55.0));
        assert!((viewer.model().yaw - 0.1).abs() < 1e-6);
        assert!((viewer.model().pitch + 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_legend_uses_hex_colors() {
        let viewer = loaded();
        let legend = viewer.legend();
        assert_eq!(legend.len(), 4);
        assert_eq!(legend[0].name, "Top Copper");
        assert_eq!(legend[0].color.to_hex(), "#00ff00");
    }
}
