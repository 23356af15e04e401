//! Desktop window sink backed by minifb

use driftwall_core::display::{DisplayError, DisplayResult, DisplaySink};
use driftwall_core::frame::FrameBuffer;
use minifb::{Key, Window, WindowOptions};

/// Shows composited frames in a window; Escape or closing it ends the loop
pub struct WindowDisplay {
    window: Window,
    buffer: Vec<u32>,
    width: usize,
    height: usize,
}

impl WindowDisplay {
    pub fn open(title: &str, width: usize, height: usize) -> DisplayResult<Self> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| DisplayError::Unavailable(e.to_string()))?;

        // The coordinator already paces presents at its tick budget
        window.limit_update_rate(None);

        Ok(Self {
            window,
            buffer: vec![0; width * height],
            width,
            height,
        })
    }
}

impl DisplaySink for WindowDisplay {
    fn present(&mut self, frame: &FrameBuffer) -> DisplayResult<()> {
        if !self.window.is_open() || self.window.is_key_down(Key::Escape) {
            return Err(DisplayError::Closed);
        }
        if frame.width() != self.width || frame.height() != self.height {
            return Err(DisplayError::SizeMismatch {
                surface_width: self.width,
                surface_height: self.height,
                frame_width: frame.width(),
                frame_height: frame.height(),
            });
        }

        frame.copy_into(&mut self.buffer);
        self.window
            .update_with_buffer(&self.buffer, self.width, self.height)
            .map_err(|e| DisplayError::Present(e.to_string()))
    }

    fn name(&self) -> &str {
        "window"
    }
}
