//! Render Loop - draws the current scene once per display frame
//!
//! The loop owns the rendering surface and the pending frame request from
//! mount until teardown. A tick only reads the viewer, so camera and orbit
//! changes between frames are picked up without rebuilding geometry.

use crate::board::Rgb;
use crate::error::{Result, ViewerError};
use crate::projection::{DrawPrimitive, Viewport};
use crate::viewer::BoardViewer;

/// Token for one scheduled frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequest(pub u64);

/// Display-cadence callback source
pub trait FrameScheduler {
    /// Ask for one more frame
    fn request_frame(&mut self) -> FrameRequest;

    /// Drop a frame that has not fired yet
    fn cancel_frame(&mut self, request: FrameRequest);
}

/// Something draw primitives can be presented on
pub trait RenderSurface {
    /// Current drawable region, follows the size of the container
    fn viewport(&self) -> Viewport;

    /// Clear to `background` and paint `primitives` in order
    fn present(&mut self, background: Rgb, primitives: &[DrawPrimitive]) -> Result<()>;

    /// Give the surface back; called exactly once per mount
    fn release(&mut self) -> Result<()>;
}

enum LoopState<S> {
    Running {
        surface: S,
        pending: Option<FrameRequest>,
    },
    Stopped,
}

pub struct RenderLoop<S: RenderSurface, F: FrameScheduler> {
    state: LoopState<S>,
    scheduler: F,
    frames_drawn: u64,
}

impl<S: RenderSurface, F: FrameScheduler> RenderLoop<S, F> {
    /// Take ownership of `surface` and schedule the first frame.
    ///
    /// Fails with `SurfaceUnavailable` if the surface has no drawable area;
    /// nothing is scheduled in that case.
    pub fn mount(surface: S, mut scheduler: F) -> Result<Self> {
        let viewport = surface.viewport();
        if !viewport.is_drawable() {
            return Err(ViewerError::SurfaceUnavailable(format!(
                "viewport {}x{} has no drawable area",
                viewport.width, viewport.height
            )));
        }

        let pending = Some(scheduler.request_frame());
        log::info!("Render loop mounted on {}x{} surface", viewport.width, viewport.height);
        Ok(Self {
            state: LoopState::Running { surface, pending },
            scheduler,
            frames_drawn: 0,
        })
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running { .. })
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Surface access for the owner, e.g. to follow a container resize
    pub fn surface_mut(&mut self) -> Option<&mut S> {
        match &mut self.state {
            LoopState::Running { surface, .. } => Some(surface),
            LoopState::Stopped => None,
        }
    }

    /// Handle one fired frame: draw `viewer` once and schedule the next.
    ///
    /// After teardown this does nothing. A present failure is returned and
    /// no further frame is scheduled.
    pub fn tick(&mut self, viewer: &BoardViewer) -> Result<()> {
        let LoopState::Running { surface, pending } = &mut self.state else {
            return Ok(());
        };
        // the request that brought us here has fired
        pending.take();

        let viewport = surface.viewport();
        if viewport.is_drawable() {
            let primitives = viewer.frame(viewport);
            surface.present(viewer.background(), &primitives)?;
            self.frames_drawn += 1;
        }

        *pending = Some(self.scheduler.request_frame());
        Ok(())
    }

    /// Cancel the pending frame and release the surface.
    ///
    /// Safe to call with nothing scheduled and safe to call repeatedly;
    /// only the first call releases.
    pub fn teardown(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.state, LoopState::Stopped) {
            LoopState::Running { mut surface, pending } => {
                if let Some(request) = pending {
                    self.scheduler.cancel_frame(request);
                }
                log::info!("Render loop torn down after {} frames", self.frames_drawn);
                surface.release()
            }
            LoopState::Stopped => Ok(()),
        }
    }
}

impl<S: RenderSurface, F: FrameScheduler> Drop for RenderLoop<S, F> {
    fn drop(&mut self) {
        if let Err(e) = self.teardown() {
            log::error!("Failed to release render surface: {}", e);
        }
    }
}
