//=== Internal Dependencies ===============================================

use super::{blit_scaled, Canvas};
use crate::core::geometry::{Rect, Size};
use crate::error::EngineError;

//=== Presenter ===========================================================

/// Puts a finished design-resolution frame on the real surface.
pub trait Presenter {
    /// Current surface size in physical pixels.
    fn surface_size(&self) -> Size;

    /// Called by the host after the window changed size.
    fn resize(&mut self, size: Size) -> Result<(), EngineError>;

    /// Clears the surface and blits `frame` into `region`.
    fn present(&mut self, frame: &Canvas, region: Rect) -> Result<(), EngineError>;
}

//=== HeadlessPresenter ===================================================

/// Presenter that renders into an in-memory backbuffer.
///
/// Used by tests and by hosts running without a window.
#[derive(Debug)]
pub struct HeadlessPresenter {
    size: Size,
    backbuffer: Vec<u8>,
    frames_presented: u64,
    last_region: Option<Rect>,
}

impl HeadlessPresenter {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            backbuffer: vec![0; Self::buffer_len(size)],
            frames_presented: 0,
            last_region: None,
        }
    }

    fn buffer_len(size: Size) -> usize {
        size.width as usize * size.height as usize * 4
    }

    pub fn backbuffer(&self) -> &[u8] {
        &self.backbuffer
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn last_region(&self) -> Option<Rect> {
        self.last_region
    }

    /// RGBA value of the backbuffer at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let i = (y as usize * self.size.width as usize + x as usize) * 4;
        let px = self.backbuffer.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

impl Presenter for HeadlessPresenter {
    fn surface_size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) -> Result<(), EngineError> {
        self.size = size;
        self.backbuffer = vec![0; Self::buffer_len(size)];
        Ok(())
    }

    fn present(&mut self, frame: &Canvas, region: Rect) -> Result<(), EngineError> {
        blit_scaled(frame, &mut self.backbuffer, self.size, region);
        self.frames_presented += 1;
        self.last_region = Some(region);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::{Color, Renderer};

    #[test]
    fn present_blits_and_counts() {
        let mut frame = Canvas::new(Size::new(2, 2));
        frame.clear(Color::WHITE);

        let mut presenter = HeadlessPresenter::new(Size::new(4, 2));
        presenter.present(&frame, Rect::new(1, 0, 2, 2)).unwrap();

        assert_eq!(presenter.frames_presented(), 1);
        assert_eq!(presenter.last_region(), Some(Rect::new(1, 0, 2, 2)));
        assert_eq!(presenter.pixel(0, 0), Some([0, 0, 0, 255]));
        assert_eq!(presenter.pixel(1, 1), Some([255, 255, 255, 255]));
        assert_eq!(presenter.pixel(3, 1), Some([0, 0, 0, 255]));
    }

    #[test]
    fn resize_reallocates_backbuffer() {
        let mut presenter = HeadlessPresenter::new(Size::new(2, 2));
        presenter.resize(Size::new(3, 1)).unwrap();

        assert_eq!(presenter.surface_size(), Size::new(3, 1));
        assert_eq!(presenter.backbuffer().len(), 12);
    }
}
