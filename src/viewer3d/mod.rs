//! 3D Viewer Module
//!
//! This module hosts the board viewer engine inside egui: the viewport
//! widget, its side panel controls and the egui-backed render surface.

pub mod controls;
pub mod pcb_viewer;
pub mod surface;

// Re-export main types for easy access
pub use controls::ViewerControls;
pub use pcb_viewer::PcbViewer;
