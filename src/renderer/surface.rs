//! Drawing targets
//!
//! The renderer only needs to plot single pixels in a chosen colour, so any
//! host window or image can implement `Surface`. `Framebuffer` is the
//! in-memory implementation used by the headless binary and the tests.

use crate::sim::Color;

/// Minimal pixel sink
pub trait Surface {
    fn set_color(&mut self, color: Color);
    /// Reset every pixel to black
    fn clear(&mut self);
    /// Plot at an integer screen position; out-of-range points are ignored
    fn plot(&mut self, x: i32, y: i32);
}

/// Software RGB framebuffer
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
    color: Color,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK.0; (width * height) as usize],
            color: Color::WHITE,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.offset(x, y).map(|i| Color(self.pixels[i]))
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Number of non-black pixels
    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|&&p| p != Color::BLACK.0).count()
    }

    /// Downsample to `cols` x `rows` characters; a cell is `#` if any pixel
    /// inside it is lit. Empty for a zero-sized buffer.
    pub fn to_ascii(&self, cols: u32, rows: u32) -> String {
        if self.width == 0 || self.height == 0 {
            return String::new();
        }
        let cols = cols.clamp(1, self.width);
        let rows = rows.clamp(1, self.height);
        let mut out = String::with_capacity(((cols + 1) * rows) as usize);

        for row in 0..rows {
            let y0 = row * self.height / rows;
            let y1 = ((row + 1) * self.height / rows).max(y0 + 1);
            for col in 0..cols {
                let x0 = col * self.width / cols;
                let x1 = ((col + 1) * self.width / cols).max(x0 + 1);
                let lit = (y0..y1).any(|y| {
                    (x0..x1).any(|x| self.pixels[(y * self.width + x) as usize] != Color::BLACK.0)
                });
                out.push(if lit { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }
}

impl Surface for Framebuffer {
    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn clear(&mut self) {
        self.pixels.fill(Color::BLACK.0);
    }

    fn plot(&mut self, x: i32, y: i32) {
        if let Some(i) = self.offset(x, y) {
            self.pixels[i] = self.color.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_ignores_out_of_range() {
        let mut fb = Framebuffer::new(4, 3);
        fb.set_color(Color::RED);
        fb.plot(1, 1);
        fb.plot(-1, 0);
        fb.plot(4, 0);
        fb.plot(0, 3);
        assert_eq!(fb.lit_count(), 1);
        assert_eq!(fb.pixel(1, 1), Some(Color::RED));
        assert_eq!(fb.pixel(4, 0), None);
    }

    #[test]
    fn test_ascii_thumbnail() {
        let mut fb = Framebuffer::new(8, 4);
        fb.plot(0, 0);
        fb.plot(7, 3);
        assert_eq!(fb.to_ascii(4, 2), "#...\n...#\n");
        fb.clear();
        assert_eq!(fb.lit_count(), 0);
    }

    #[test]
    fn test_zero_sized_buffer() {
        let mut fb = Framebuffer::new(0, 5);
        fb.plot(0, 0);
        assert_eq!(fb.lit_count(), 0);
        assert_eq!(fb.to_ascii(10, 10), "");
        assert_eq!(Framebuffer::new(7, 0).to_ascii(3, 3), "");
    }
}
