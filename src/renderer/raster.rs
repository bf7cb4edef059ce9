//! Integer line rasterization
//!
//! Screen coordinates here are whole pixels; the projection's 8-bit
//! sub-pixel fraction is dropped before anything reaches this module.

use super::projection::{ProjectedVertex, Viewport};
use super::surface::Surface;
use crate::models::Model;

/// Bresenham line from `(x0, y0)` to `(x1, y1)`, both ends inclusive.
///
/// No bounds checks; both endpoints are expected to be on-screen.
pub fn draw_line<S: Surface + ?Sized>(surface: &mut S, x0: i32, y0: i32, x1: i32, y1: i32) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);

    loop {
        surface.plot(x, y);
        if x == x1 && y == y1 {
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
}

/// One-sided clipped line. At least one endpoint must be inside `viewport`;
/// drawing starts from that end and stops as soon as the path leaves the
/// viewport. Returns the number of pixels plotted.
///
/// A segment whose two endpoints are both outside is not drawn, even when it
/// crosses the viewport.
pub fn draw_line_clipped<S: Surface + ?Sized>(
    surface: &mut S,
    viewport: &Viewport,
    from: (i32, i32),
    to: (i32, i32),
) -> usize {
    let (from, to) = if viewport.contains(from.0, from.1) {
        (from, to)
    } else {
        (to, from)
    };
    if !viewport.contains(from.0, from.1) {
        return 0;
    }

    let (x1, y1) = to;
    let dx = (x1 - from.0).abs();
    let dy = -(y1 - from.1).abs();
    let sx = if from.0 < x1 { 1 } else { -1 };
    let sy = if from.1 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = from;
    let mut plotted = 0;

    while viewport.contains(x, y) {
        surface.plot(x, y);
        plotted += 1;
        if x == x1 && y == y1 {
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

/// Draw one projected segment, picking the clipped or plain rasterizer
fn draw_segment<S: Surface + ?Sized>(
    surface: &mut S,
    viewport: &Viewport,
    a: &ProjectedVertex,
    b: &ProjectedVertex,
) {
    match (a.on_screen, b.on_screen) {
        (true, true) => {
            let (x0, y0) = a.pixel();
            let (x1, y1) = b.pixel();
            draw_line(surface, x0, y0, x1, y1);
        }
        // Vertices behind the eye carry no usable screen position
        (true, false) if b.in_front => {
            draw_line_clipped(surface, viewport, a.pixel(), b.pixel());
        }
        (false, true) if a.in_front => {
            draw_line_clipped(surface, viewport, a.pixel(), b.pixel());
        }
        _ => {}
    }
}

/// Draw every stroke of `model` using its already projected vertices
pub fn draw_model<S: Surface + ?Sized>(
    surface: &mut S,
    viewport: &Viewport,
    model: &Model,
    projected: &[ProjectedVertex],
) {
    for stroke in model.strokes() {
        for pair in stroke.windows(2) {
            let (Some(a), Some(b)) = (
                projected.get(pair[0] as usize),
                projected.get(pair[1] as usize),
            ) else {
                continue;
            };
            draw_segment(surface, viewport, a, b);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::surface::Framebuffer;
    use crate::sim::Color;

    fn lit(fb: &Framebuffer, x: i32, y: i32) -> bool {
        fb.pixel(x, y).is_some_and(|c| c != Color::BLACK)
    }

    #[test]
    fn test_line_endpoints_and_length() {
        let mut fb = Framebuffer::new(20, 20);
        draw_line(&mut fb, 2, 3, 12, 7);
        assert!(lit(&fb, 2, 3));
        assert!(lit(&fb, 12, 7));
        // One pixel per step along the major axis
        assert_eq!(fb.lit_count(), 11);
    }

    #[test]
    fn test_line_all_directions() {
        for &(x1, y1) in &[(0, 0), (19, 0), (0, 19), (19, 19), (10, 0), (0, 10)] {
            let mut fb = Framebuffer::new(20, 20);
            draw_line(&mut fb, 10, 10, x1, y1);
            assert!(lit(&fb, 10, 10));
            assert!(lit(&fb, x1, y1));
        }
        let mut fb = Framebuffer::new(4, 4);
        draw_line(&mut fb, 1, 1, 1, 1);
        assert_eq!(fb.lit_count(), 1);
    }

    #[test]
    fn test_clipped_line_stops_at_edge() {
        let viewport = Viewport::new(10, 10);
        let mut fb = Framebuffer::new(10, 10);
        let plotted = draw_line_clipped(&mut fb, &viewport, (5, 5), (25, 5));
        assert_eq!(plotted, 5);
        assert!(lit(&fb, 9, 5));

        // Endpoint order does not matter
        let mut fb = Framebuffer::new(10, 10);
        let plotted = draw_line_clipped(&mut fb, &viewport, (5, -40), (5, 2));
        assert_eq!(plotted, 3);
        assert!(lit(&fb, 5, 0));
    }

    #[test]
    fn test_clipped_line_needs_an_inside_endpoint() {
        let viewport = Viewport::new(10, 10);
        let mut fb = Framebuffer::new(10, 10);
        // Crosses the whole viewport but starts and ends outside
        assert_eq!(draw_line_clipped(&mut fb, &viewport, (-5, 5), (15, 5)), 0);
        assert_eq!(fb.lit_count(), 0);
    }

    #[test]
    fn test_clipped_line_reaching_target_inside() {
        let viewport = Viewport::new(10, 10);
        let mut fb = Framebuffer::new(10, 10);
        assert_eq!(draw_line_clipped(&mut fb, &viewport, (1, 1), (4, 1)), 4);
    }
}
