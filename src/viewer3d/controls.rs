//! UI Controls for the 3D viewer
//!
//! Provides the side panel widgets for view mode, cross-section slicing,
//! camera reset, the layer legend and scene statistics.

use copperslice_core::slicing::{SLICE_MAX, SLICE_MIN};
use copperslice_core::{Camera, LegendEntry, ModelTransform, SliceSummary, ViewMode};

/// View control buttons and the slice state they edit
pub struct ViewerControls {
    pub view_mode: ViewMode,
    pub slice_enabled: bool,
    pub slice_position: f32,
}

impl ViewerControls {
    pub fn new() -> Self {
        Self {
            view_mode: ViewMode::default(),
            slice_enabled: false,
            slice_position: 50.0,
        }
    }

    /// Render the control panel UI
    pub fn show_ui(&mut self, ui: &mut egui::Ui) -> ViewerControlsResponse {
        let mut response = ViewerControlsResponse::default();

        ui.label("View Mode:");
        ui.horizontal(|ui| {
            for mode in ViewMode::all() {
                if ui.selectable_label(self.view_mode == mode, mode.display_name()).clicked()
                    && self.view_mode != mode
                {
                    self.view_mode = mode;
                    response.view_mode = Some(mode);
                }
            }
        });

        ui.separator();

        if ui.checkbox(&mut self.slice_enabled, "Cross-Section Slice").changed() {
            response.slice_enabled = Some(self.slice_enabled);
        }
        ui.add_enabled_ui(self.slice_enabled, |ui| {
            let slider = egui::Slider::new(&mut self.slice_position, SLICE_MIN..=SLICE_MAX)
                .text("Position")
                .suffix("%");
            if ui.add(slider).changed() {
                response.slice_position = Some(self.slice_position);
            }
        });

        ui.separator();

        if ui.button("Reset Camera").clicked() {
            response.reset_camera = true;
        }

        response
    }

    /// Layer colors of the loaded board
    pub fn show_legend(&self, ui: &mut egui::Ui, legend: &[LegendEntry]) {
        ui.group(|ui| {
            ui.label("Layers:");
            if legend.is_empty() {
                ui.weak("No board loaded");
            }
            for entry in legend {
                ui.horizontal(|ui| {
                    let (swatch, _) = ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
                    let color = egui::Color32::from_rgb(entry.color.r(), entry.color.g(), entry.color.b());
                    ui.painter().rect_filled(swatch, 2.0, color);
                    ui.label(&entry.name);
                    ui.weak(entry.color.to_hex());
                });
            }
        });
    }

    /// Show statistics panel
    pub fn show_stats(&self, ui: &mut egui::Ui, summary: Option<SliceSummary>, frames_drawn: u64) {
        ui.group(|ui| {
            ui.label("Statistics:");
            match summary {
                Some(summary) => {
                    ui.horizontal(|ui| {
                        ui.label(format!("Visible: {}", summary.visible));
                        ui.label(format!("Hidden: {}", summary.hidden));
                    });
                    if let Some(cut_y) = summary.cut_y {
                        ui.label(format!("Cut plane: y = {:.2}", cut_y));
                    }
                }
                None => {
                    ui.label("No scene");
                }
            }
            ui.label(format!("Frames: {}", frames_drawn));
        });
    }

    /// Show camera information
    pub fn show_camera_info(&self, ui: &mut egui::Ui, camera: &Camera, model: &ModelTransform) {
        ui.group(|ui| {
            ui.label("Camera Info:");
            ui.label(format!("Eye: ({:.1}, {:.1}, {:.1})", camera.eye.x, camera.eye.y, camera.eye.z));
            ui.horizontal(|ui| {
                ui.label(format!("Distance: {:.2}", camera.distance()));
                ui.label(format!("Yaw: {:.1}°", model.yaw.to_degrees()));
                ui.label(format!("Pitch: {:.1}°", model.pitch.to_degrees()));
            });
        });
    }

    /// Show help/instructions
    pub fn show_help(&self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.label("3D Camera Controls:");
            ui.label("• Drag: Rotate board");
            ui.label("• Scroll: Zoom in/out");
            ui.label("• Reset Camera: Default pose for the view mode");
        });
    }
}

/// Response from the controls UI indicating what actions were requested
#[derive(Default)]
pub struct ViewerControlsResponse {
    pub view_mode: Option<ViewMode>,
    pub slice_enabled: Option<bool>,
    pub slice_position: Option<f32>,
    pub reset_camera: bool,
}

impl ViewerControlsResponse {
    /// Check if any control change needs a scene rebuild
    pub fn needs_rebuild(&self) -> bool {
        self.view_mode.is_some() || self.slice_enabled.is_some() || self.slice_position.is_some()
    }
}
