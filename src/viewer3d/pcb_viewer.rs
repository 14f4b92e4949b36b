//! Main 3D PCB Viewer component
//!
//! Combines the board viewer engine, the egui render loop and the controls
//! into one widget.

use copperslice_core::{
    BoardModel, BoardViewer, PointerPos, RenderLoop, ViewerConfig, ViewerError, ZoomDirection,
};

use crate::viewer3d::controls::ViewerControlsResponse;
use crate::viewer3d::surface::{EguiScheduler, EguiSurface};
use crate::viewer3d::ViewerControls;

/// Main 3D PCB Viewer widget for egui
pub struct PcbViewer {
    viewer: BoardViewer,
    controls: ViewerControls,
    render_loop: Option<RenderLoop<EguiSurface, EguiScheduler>>,
    /// Set once a surface failure stopped the loop for this session
    surface_failed: bool,
}

impl PcbViewer {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            viewer: BoardViewer::new(config),
            controls: ViewerControls::new(),
            render_loop: None,
            surface_failed: false,
        }
    }

    pub fn load_board(&mut self, board: BoardModel) -> Result<(), ViewerError> {
        self.viewer.load_board(board)
    }

    pub fn viewer(&self) -> &BoardViewer {
        &self.viewer
    }

    /// Side panel: controls, legend, statistics
    pub fn show_controls(&mut self, ui: &mut egui::Ui) -> Result<(), ViewerError> {
        let response = self.controls.show_ui(ui);
        let result = self.handle_controls_response(response);

        ui.separator();
        self.controls.show_legend(ui, &self.viewer.legend());
        let frames = self.render_loop.as_ref().map(|l| l.frames_drawn()).unwrap_or(0);
        self.controls.show_stats(ui, self.viewer.slice_summary(), frames);
        self.controls.show_camera_info(ui, self.viewer.camera(), self.viewer.model());
        self.controls.show_help(ui);

        result
    }

    /// Central viewport; drives one render loop tick per egui frame
    pub fn show_viewport(&mut self, ui: &mut egui::Ui) -> Result<(), ViewerError> {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
        self.handle_input(ui, rect, &response);

        if self.surface_failed {
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "Rendering stopped",
                egui::FontId::default(),
                egui::Color32::LIGHT_RED,
            );
            return Ok(());
        }

        let layer_id = ui.layer_id();
        if self.render_loop.is_none() {
            // the central panel has no size on the very first layout pass
            if !rect.is_positive() || !rect.is_finite() {
                ui.ctx().request_repaint();
                return Ok(());
            }
            let surface = EguiSurface::new(ui.ctx().clone(), layer_id, rect);
            let scheduler = EguiScheduler::new(ui.ctx().clone());
            match RenderLoop::mount(surface, scheduler) {
                Ok(render_loop) => self.render_loop = Some(render_loop),
                Err(e) => {
                    log::error!("Failed to acquire render surface: {}", e);
                    self.surface_failed = true;
                    return Err(e);
                }
            }
        }

        let Some(render_loop) = self.render_loop.as_mut() else {
            return Ok(());
        };
        if let Some(surface) = render_loop.surface_mut() {
            surface.set_rect(layer_id, rect);
        }
        if let Err(e) = render_loop.tick(&self.viewer) {
            log::error!("Render surface failed: {}", e);
            self.surface_failed = true;
            if let Err(e) = render_loop.teardown() {
                log::error!("Failed to release render surface: {}", e);
            }
            return Err(e);
        }
        Ok(())
    }

    /// Stop the render loop and release the surface
    pub fn teardown(&mut self) {
        if let Some(mut render_loop) = self.render_loop.take() {
            if let Err(e) = render_loop.teardown() {
                log::error!("Failed to release render surface: {}", e);
            }
        }
    }

    /// Translate egui pointer state into orbit and zoom events
    fn handle_input(&mut self, ui: &egui::Ui, rect: egui::Rect, response: &egui::Response) {
        let pointer = response.interact_pointer_pos().or(response.hover_pos());
        let to_pos = |p: egui::Pos2| PointerPos::new(p.x, p.y);

        if response.drag_started() {
            if let Some(p) = pointer {
                self.viewer.pointer_down(to_pos(p));
            }
        } else if response.dragged() {
            if let Some(p) = pointer {
                self.viewer.pointer_move(to_pos(p));
            }
        }
        if response.drag_stopped() {
            self.viewer.pointer_up();
        }

        // leaving the viewport ends the drag even with the button held
        if self.viewer.is_dragging() {
            let inside = ui.ctx().pointer_hover_pos().is_some_and(|p| rect.contains(p));
            if !inside {
                self.viewer.pointer_leave();
            }
        }

        if response.hovered() {
            // egui reports wheel-up as positive y
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if let Some(direction) = ZoomDirection::from_scroll(scroll) {
                self.viewer.wheel(direction);
            }
        }
    }

    fn handle_controls_response(&mut self, response: ViewerControlsResponse) -> Result<(), ViewerError> {
        if response.needs_rebuild() {
            log::debug!("Control change requires rebuild");
        }
        if let Some(mode) = response.view_mode {
            self.viewer.set_view_mode(mode)?;
        }
        if let Some(enabled) = response.slice_enabled {
            self.viewer.set_slice_enabled(enabled)?;
        }
        if let Some(position) = response.slice_position {
            self.viewer.set_slice_position(position)?;
        }
        if response.reset_camera {
            self.viewer.reset_camera();
        }
        Ok(())
    }
}
