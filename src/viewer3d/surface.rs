//! egui backing for the engine's render loop
//!
//! `EguiSurface` paints draw primitives through a `Painter` clipped to the
//! viewer rectangle; `EguiScheduler` turns frame requests into repaints.

use copperslice_core::{DrawPrimitive, FrameRequest, FrameScheduler, RenderSurface, Result, Rgb, Viewport};
use egui::{Color32, Context, LayerId, Painter, Pos2, Rect, Shape, Stroke};

pub struct EguiSurface {
    ctx: Context,
    layer_id: LayerId,
    rect: Rect,
    released: bool,
}

impl EguiSurface {
    pub fn new(ctx: Context, layer_id: LayerId, rect: Rect) -> Self {
        Self {
            ctx,
            layer_id,
            rect,
            released: false,
        }
    }

    /// Follow the container; called every frame before the tick
    pub fn set_rect(&mut self, layer_id: LayerId, rect: Rect) {
        self.layer_id = layer_id;
        self.rect = rect;
    }
}

fn to_color(rgba: [u8; 4]) -> Color32 {
    Color32::from_rgba_unmultiplied(rgba[0], rgba[1], rgba[2], rgba[3])
}

fn to_pos(point: [f32; 2]) -> Pos2 {
    Pos2::new(point[0], point[1])
}

impl RenderSurface for EguiSurface {
    fn viewport(&self) -> Viewport {
        Viewport::new(self.rect.min.x, self.rect.min.y, self.rect.width(), self.rect.height())
    }

    fn present(&mut self, background: Rgb, primitives: &[DrawPrimitive]) -> Result<()> {
        let painter = Painter::new(self.ctx.clone(), self.layer_id, self.rect);
        painter.rect_filled(self.rect, 0.0, Color32::from_rgb(background.r(), background.g(), background.b()));

        let shapes = primitives.iter().map(|primitive| match primitive {
            DrawPrimitive::Triangle { points, color, .. } => Shape::convex_polygon(
                points.iter().copied().map(to_pos).collect(),
                to_color(*color),
                Stroke::NONE,
            ),
            DrawPrimitive::Line { points, color, width, .. } => Shape::line(
                points.iter().copied().map(to_pos).collect(),
                Stroke::new(*width, to_color(*color)),
            ),
        });
        painter.extend(shapes);
        Ok(())
    }

    fn release(&mut self) -> Result<()> {
        if !self.released {
            self.released = true;
            // nothing to free; egui owns the layer
            self.ctx.request_repaint();
        }
        Ok(())
    }
}

/// Frame requests map onto `Context::request_repaint`
pub struct EguiScheduler {
    ctx: Context,
    next_request: u64,
}

impl EguiScheduler {
    pub fn new(ctx: Context) -> Self {
        Self { ctx, next_request: 0 }
    }
}

impl FrameScheduler for EguiScheduler {
    fn request_frame(&mut self) -> FrameRequest {
        self.next_request += 1;
        self.ctx.request_repaint();
        FrameRequest(self.next_request)
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        // A repaint already queued with egui cannot be withdrawn; the torn
        // down loop ignores the frame when it arrives.
        log::trace!("Cancelled frame request {}", request.0);
    }
}
