//! Rasterization primitives on top of `FrameBuffer::put_pixel`
//!
//! All shapes clip per pixel against the frame, so callers may pass
//! centers and endpoints anywhere.

use crate::frame::FrameBuffer;

/// Midpoint circle outline
///
/// Walks one octant and mirrors each step into the other seven.
pub fn circle(frame: &FrameBuffer, cx: i32, cy: i32, radius: i32, color: u32) {
    for_each_octant_point(radius, |x, y| {
        for (px, py) in octants(cx, cy, x, y) {
            frame.put_pixel(px, py, color);
        }
    });
}

/// Filled disc using horizontal spans from each octant point to the center column
pub fn circle_fill(frame: &FrameBuffer, cx: i32, cy: i32, radius: i32, color: u32) {
    for_each_octant_point(radius, |x, y| {
        for (px, py) in octants(cx, cy, x, y) {
            if !frame.contains(px, py) {
                continue;
            }
            let (from, to) = if px < cx { (px, cx) } else { (cx, px) };
            for sx in from..=to {
                frame.put_pixel(sx, py, color);
            }
        }
    });
}

/// Bresenham line from `(x1, y1)` to `(x2, y2)`
///
/// Returns how many pixels landed inside the frame.
pub fn line(frame: &FrameBuffer, color: u32, x1: i32, y1: i32, x2: i32, y2: i32) -> usize {
    let dx = (x2 - x1).abs();
    let dy = -(y2 - y1).abs();
    let sx = if x1 < x2 { 1 } else { -1 };
    let sy = if y1 < y2 { 1 } else { -1 };

    let mut err = dx + dy;
    let (mut x, mut y) = (x1, y1);
    let mut plotted = 0;

    loop {
        if frame.put_pixel(x, y, color) {
            plotted += 1;
        }
        if x == x2 && y == y2 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }

    plotted
}

fn for_each_octant_point(radius: i32, mut plot: impl FnMut(i32, i32)) {
    if radius <= 0 {
        return;
    }
    let diameter = radius * 2;
    let mut x = radius - 1;
    let mut y = 0;
    let mut tx = 1;
    let mut ty = 1;
    let mut error = tx - diameter;

    while x >= y {
        plot(x, y);

        if error <= 0 {
            y += 1;
            error += ty;
            ty += 2;
        }
        if error > 0 {
            x -= 1;
            tx += 2;
            error += tx - diameter;
        }
    }
}

#[inline]
fn octants(cx: i32, cy: i32, x: i32, y: i32) -> [(i32, i32); 8] {
    [
        (cx + x, cy - y),
        (cx - x, cy + y),
        (cx + x, cy + y),
        (cx - x, cy - y),
        (cx + y, cy - x),
        (cx - y, cy + x),
        (cx + y, cy + x),
        (cx - y, cy - x),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: u32 = 0xFFFF_FFFF;

    fn lit(frame: &FrameBuffer) -> usize {
        frame.snapshot().iter().filter(|&&p| p != 0).count()
    }

    #[test]
    fn test_horizontal_line_count() {
        let frame = FrameBuffer::new(20, 5);
        assert_eq!(line(&frame, WHITE, 2, 2, 11, 2), 10);
        assert_eq!(lit(&frame), 10);
    }

    #[test]
    fn test_line_endpoints_either_direction() {
        let frame = FrameBuffer::new(16, 16);
        line(&frame, WHITE, 12, 9, 1, 3);
        assert_eq!(frame.pixel(12, 9), Some(WHITE));
        assert_eq!(frame.pixel(1, 3), Some(WHITE));
    }

    #[test]
    fn test_line_clipped_counts_only_visible() {
        let frame = FrameBuffer::new(10, 10);
        assert_eq!(line(&frame, WHITE, -5, 0, 4, 0), 5);
    }

    #[test]
    fn test_circle_is_symmetric() {
        let frame = FrameBuffer::new(41, 41);
        circle(&frame, 20, 20, 10, WHITE);
        let snap = frame.snapshot();
        for y in 0..41 {
            for x in 0..41 {
                let mirrored = snap[y * 41 + (40 - x)];
                assert_eq!(snap[y * 41 + x], mirrored, "asymmetric at ({x}, {y})");
            }
        }
        assert_eq!(frame.pixel(20, 20), Some(0));
    }

    #[test]
    fn test_circle_fill_covers_center() {
        let frame = FrameBuffer::new(41, 41);
        circle_fill(&frame, 20, 20, 10, WHITE);
        assert_eq!(frame.pixel(20, 20), Some(WHITE));
        assert_eq!(frame.pixel(0, 0), Some(0));
        assert!(lit(&frame) > 200);
    }

    #[test]
    fn test_shapes_outside_frame_do_not_panic() {
        let frame = FrameBuffer::new(8, 8);
        circle(&frame, -100, 400, 30, WHITE);
        circle_fill(&frame, 500, -20, 12, WHITE);
        circle(&frame, 4, 4, 0, WHITE);
        assert_eq!(lit(&frame), 0);
    }
}
