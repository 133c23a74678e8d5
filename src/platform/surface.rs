//=========================================================================
// Pixels Surface
//=========================================================================
//
// Window-backed presenter.
//
// The pixel buffer always matches the window's physical size, so the
// pixels crate draws it 1:1 and all letterboxing happens in
// `blit_scaled` with the host's scale region.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

use log::debug;
use pixels::{Pixels, SurfaceTexture};
use winit::window::Window;

//=== Internal Dependencies ===============================================

use super::PlatformError;
use crate::core::geometry::{Rect, Size};
use crate::core::render::{blit_scaled, Canvas, Presenter};
use crate::error::EngineError;

//=== PixelsPresenter =====================================================

pub(crate) struct PixelsPresenter {
    pixels: Pixels<'static>,
    size: Size,
}

impl PixelsPresenter {
    /// Creates a surface covering the window's current client area.
    pub(crate) fn new(window: Arc<Window>) -> Result<Self, PlatformError> {
        let inner = window.inner_size();
        let size = Size::new(inner.width.max(1), inner.height.max(1));

        let surface = SurfaceTexture::new(size.width, size.height, window);
        let pixels = Pixels::new(size.width, size.height, surface)?;

        debug!(target: "platform", "Surface created: {}x{}", size.width, size.height);
        Ok(Self { pixels, size })
    }
}

impl Presenter for PixelsPresenter {
    fn surface_size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) -> Result<(), EngineError> {
        self.size = size;

        // Minimized: keep the old surface, the host skips presentation.
        if size.is_empty() {
            return Ok(());
        }

        self.pixels
            .resize_surface(size.width, size.height)
            .map_err(|e| EngineError::from(PlatformError::SurfaceResize(e)))?;
        self.pixels
            .resize_buffer(size.width, size.height)
            .map_err(|e| EngineError::from(PlatformError::SurfaceResize(e)))?;
        Ok(())
    }

    fn present(&mut self, frame: &Canvas, region: Rect) -> Result<(), EngineError> {
        if self.size.is_empty() {
            return Ok(());
        }

        blit_scaled(frame, self.pixels.frame_mut(), self.size, region);
        self.pixels
            .render()
            .map_err(|e| EngineError::Present(e.to_string()))
    }
}
