use std::{fs, path::Path, path::PathBuf};

use egui::ViewportBuilder;
use egui_file_dialog::FileDialog;

use copperslice_core::demo::demo_board;
use copperslice_core::{BoardModel, ViewerConfig, ViewerError};

mod viewer3d;
use viewer3d::PcbViewer;

/// The main application struct
pub struct CopperSliceApp {
    pub pcb_viewer: PcbViewer,
    pub config: ViewerConfig,

    // Board file selection
    file_dialog: FileDialog,
    board_name: String,

    // Last error shown in the status line
    pub last_error: Option<String>,

    config_path: PathBuf,
}

impl Drop for CopperSliceApp {
    fn drop(&mut self) {
        self.pcb_viewer.teardown();
        // Save viewer config
        if let Err(e) = self.config.save_to_file(&self.config_path) {
            log::error!("Failed to save viewer config: {}", e);
        }
    }
}

/// Read and decode a board description from a JSON file
fn read_board(path: &Path) -> Result<BoardModel, ViewerError> {
    let json = fs::read_to_string(path)?;
    BoardModel::from_json(&json)
}

impl CopperSliceApp {
    /// **Create a new instance of the CopperSliceApp**
    ///
    /// Loads the viewer config from the user's config directory, falling back
    /// to defaults, and shows the built-in demo board.
    pub fn new() -> Self {
        let config_path = dirs::config_dir()
            .map(|d| d.join("copperslice"))
            .unwrap_or_default();
        Self::with_config_path(config_path)
    }

    fn with_config_path(config_path: PathBuf) -> Self {
        let config = match ViewerConfig::load_from_file(&config_path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring unreadable viewer config: {}", e);
                ViewerConfig::default()
            }
        };

        let mut app = Self {
            pcb_viewer: PcbViewer::new(config.clone()),
            config,
            file_dialog: FileDialog::new(),
            board_name: String::new(),
            last_error: None,
            config_path,
        };
        app.load_demo_board();
        app
    }

    fn load_demo_board(&mut self) {
        match self.pcb_viewer.load_board(demo_board()) {
            Ok(()) => {
                self.board_name = "Demo board".to_string();
                self.last_error = None;
            }
            Err(e) => self.report_error("Failed to load demo board", e),
        }
    }

    fn load_board_file(&mut self, path: &Path) {
        match read_board(path).and_then(|board| self.pcb_viewer.load_board(board)) {
            Ok(()) => {
                self.board_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| "Unknown file".to_string());
                self.last_error = None;
                log::info!("Loaded board file: {}", path.display());
            }
            // the previous board stays on screen
            Err(e) => self.report_error(&format!("Failed to load {}", path.display()), e),
        }
    }

    fn report_error(&mut self, context: &str, error: ViewerError) {
        log::warn!("{}: {}", context, error);
        self.last_error = Some(format!("{}: {}", context, error));
    }

    /// Consume the file picked in the dialog, if any; picking the same
    /// file again loads it again
    fn update_file_dialog(&mut self, ctx: &egui::Context) -> Option<PathBuf> {
        self.file_dialog.update(ctx);
        self.file_dialog.take_picked()
    }

    fn show_status_line(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if let Some(summary) = self.pcb_viewer.viewer().slice_summary() {
                let cut = match summary.cut_y {
                    Some(cut_y) => format!("cut y = {:.2}", cut_y),
                    None => "slicing off".to_string(),
                };
                ui.label(format!(
                    "{} | {} visible, {} hidden",
                    cut, summary.visible, summary.hidden
                ));
            }
            if let Some(error) = &self.last_error {
                ui.separator();
                ui.colored_label(egui::Color32::LIGHT_RED, error);
            }
        });
    }
}

/// Implement the eframe::App trait for CopperSliceApp
///
/// The `update` method is called every frame: it lays out the ribbon, the
/// control panel and the status line, then hands the central area to the
/// viewer, which ticks its render loop once.
impl eframe::App for CopperSliceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Board ribbon at the top
        egui::TopBottomPanel::top("board_ribbon").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 10.0;

                ui.label("📁 Board:");
                ui.label(egui::RichText::new(&self.board_name).strong());

                if ui.button("Open board…").clicked() {
                    self.file_dialog.pick_file();
                }
                if ui.button("Demo board").clicked() {
                    self.load_demo_board();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(format!("CopperSlice v{}", env!("CARGO_PKG_VERSION")))
                            .color(egui::Color32::from_rgb(100, 150, 200)),
                    );
                });
            });
        });

        if let Some(path) = self.update_file_dialog(ctx) {
            self.load_board_file(&path);
        }

        egui::TopBottomPanel::bottom("status_line").show(ctx, |ui| {
            self.show_status_line(ui);
        });

        egui::SidePanel::left("viewer_controls")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    if let Err(e) = self.pcb_viewer.show_controls(ui) {
                        self.report_error("Rebuild failed", e);
                    }
                });
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                if let Err(e) = self.pcb_viewer.show_viewport(ui) {
                    self.report_error("Rendering stopped", e);
                }
            });
    }
}

/// The main function is the entry point of the application.
///
/// It initializes the logger, sets up the native window options,
/// and runs the application using the `eframe` framework.
fn main() -> eframe::Result<()> {
    // Configure env_logger to quiet the windowing stack
    env_logger::Builder::from_default_env()
        .filter_module("winit", log::LevelFilter::Warn)
        .filter_module("wgpu_core", log::LevelFilter::Warn)
        .init();
    eframe::run_native(
        "CopperSlice - PCB Cross-Section Viewer",
        eframe::NativeOptions {
            viewport: ViewportBuilder::default().with_inner_size([1280.0, 768.0]),
            ..Default::default()
        },
        Box::new(|_cc| Ok(Box::new(CopperSliceApp::new()))),
    )
}
