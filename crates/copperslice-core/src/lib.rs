// CopperSlice Core Library
// Board geometry synthesis, cross-section slicing and the render loop

pub mod board;
pub mod camera;
pub mod config;
pub mod demo;
pub mod error;
pub mod geometry;
pub mod orbit;
pub mod projection;
pub mod render_loop;
pub mod scene;
pub mod slicing;
pub mod view_mode;
pub mod viewer;

// Re-export main types for easy access
pub use board::{BoardModel, Component, Layer, LegendEntry, Rgb, Trace};
pub use camera::{Camera, ModelTransform, ZoomDirection};
pub use config::ViewerConfig;
pub use error::{BoardModelIssue, Result, ViewerError};
pub use orbit::{OrbitController, OrbitState, OrbitTransition, PointerPos};
pub use projection::{project_scene, DrawPrimitive, Lighting, Viewport};
pub use render_loop::{FrameRequest, FrameScheduler, RenderLoop, RenderSurface};
pub use scene::{ElementId, Geometry, Material, Scene, SceneElement};
pub use slicing::{SliceState, SliceSummary};
pub use view_mode::ViewMode;
pub use viewer::BoardViewer;
