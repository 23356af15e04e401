//! Shared ARGB frame buffer
//!
//! Written by every running animation and read by the coordinator when it
//! composites. Pixels are individual relaxed atomics: concurrent writers may
//! interleave on the same pixel and the coordinator may copy a frame that is
//! half old, half new. That only ever affects what is on screen, so there is
//! no lock and compositing never waits on a renderer.

use std::sync::atomic::{AtomicU32, Ordering};

/// Fixed-size pixel surface, allocated once and never resized
pub struct FrameBuffer {
    pixels: Vec<AtomicU32>,
    width: usize,
    height: usize,
}

impl FrameBuffer {
    /// Allocate a black frame
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: (0..width * height).map(|_| AtomicU32::new(0)).collect(),
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Check whether signed coordinates fall inside the frame
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Write one pixel; out-of-bounds coordinates are ignored
    ///
    /// Returns whether the pixel was inside the frame.
    #[inline]
    pub fn put_pixel(&self, x: i32, y: i32, color: u32) -> bool {
        if !self.contains(x, y) {
            return false;
        }
        self.pixels[y as usize * self.width + x as usize].store(color, Ordering::Relaxed);
        true
    }

    /// Read one pixel (`None` out of bounds)
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.contains(x, y)
            .then(|| self.pixels[y as usize * self.width + x as usize].load(Ordering::Relaxed))
    }

    /// Copy the whole frame into `out`
    ///
    /// `out` must hold at least `width * height` pixels; extra space is left
    /// untouched.
    pub fn copy_into(&self, out: &mut [u32]) {
        for (dst, src) in out.iter_mut().zip(&self.pixels) {
            *dst = src.load(Ordering::Relaxed);
        }
    }

    /// Copy the frame into a freshly allocated vector
    pub fn snapshot(&self) -> Vec<u32> {
        let mut out = vec![0; self.pixels.len()];
        self.copy_into(&mut out);
        out
    }

    /// Fill every pixel with one color
    pub fn fill(&self, color: u32) {
        for pixel in &self.pixels {
            pixel.store(color, Ordering::Relaxed);
        }
    }

    /// Number of pixels
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_pixel_bounds() {
        let frame = FrameBuffer::new(4, 3);
        assert!(frame.put_pixel(3, 2, 0xFFFF_0000));
        assert!(!frame.put_pixel(4, 0, 0xFFFF_FFFF));
        assert!(!frame.put_pixel(-1, 0, 0xFFFF_FFFF));
        assert!(!frame.put_pixel(0, 3, 0xFFFF_FFFF));
        assert_eq!(frame.pixel(3, 2), Some(0xFFFF_0000));
        assert_eq!(frame.pixel(4, 0), None);
    }

    #[test]
    fn test_snapshot_row_major() {
        let frame = FrameBuffer::new(3, 2);
        frame.put_pixel(1, 1, 7);
        let snap = frame.snapshot();
        assert_eq!(snap.len(), 6);
        assert_eq!(snap[4], 7);
        assert_eq!(snap.iter().filter(|&&p| p != 0).count(), 1);
    }

    #[test]
    fn test_fill() {
        let frame = FrameBuffer::new(2, 2);
        frame.fill(0xFF00_00FF);
        assert!(frame.snapshot().iter().all(|&p| p == 0xFF00_00FF));
    }
}
