//! # In-Memory Framebuffer
//!
//! A plain RGB888 pixel buffer implementing `embedded-graphics`'
//! [`DrawTarget`]. The binary renders into it for PNG export and the ASCII
//! development preview; tests use it as a pixel oracle.

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use image::RgbImage;
use std::convert::Infallible;
use std::path::Path;

/// RGB pixel buffer, row-major from the top-left corner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgb888>,
}

impl Framebuffer {
    /// Black buffer of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb888::BLACK; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sets one pixel; writes outside the buffer are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgb888) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb888> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Number of pixels that differ from `background`.
    pub fn count_not(&self, background: Rgb888) -> usize {
        self.pixels.iter().filter(|p| **p != background).count()
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            let p = self.pixels[y as usize * self.width as usize + x as usize];
            image::Rgb([p.r(), p.g(), p.b()])
        })
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> image::ImageResult<()> {
        self.to_rgb_image().save_with_format(path, image::ImageFormat::Png)
    }

    /// Coarse text preview: one character per `cell` x `2 * cell` pixel
    /// block, shaded by the block's mean luminance relative to `background`.
    pub fn to_ascii(&self, cell: u32, background: Rgb888) -> String {
        const RAMP: [char; 5] = [' ', '.', ':', '+', '#'];
        let cell_w = cell.max(1);
        let cell_h = cell_w * 2;
        let bg = luma(background);
        let mut out = String::new();

        for cy in (0..self.height).step_by(cell_h as usize) {
            let mut line = String::new();
            for cx in (0..self.width).step_by(cell_w as usize) {
                let mut sum = 0.0;
                let mut count = 0.0;
                for y in cy..(cy + cell_h).min(self.height) {
                    for x in cx..(cx + cell_w).min(self.width) {
                        let p = self.pixels[y as usize * self.width as usize + x as usize];
                        sum += (luma(p) - bg).abs();
                        count += 1.0;
                    }
                }
                let level = if count > 0.0 { sum / count / 255.0 } else { 0.0 };
                let idx = ((level * (RAMP.len() - 1) as f32).round() as usize).min(RAMP.len() - 1);
                line.push(RAMP[idx]);
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

fn luma(c: Rgb888) -> f32 {
    0.299 * f32::from(c.r()) + 0.587 * f32::from(c.g()) + 0.114 * f32::from(c.b())
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for Framebuffer {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color);
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };
        for y in area.top_left.y..=bottom_right.y {
            let row = y as usize * self.width as usize;
            let start = row + area.top_left.x as usize;
            let end = row + bottom_right.x as usize + 1;
            self.pixels[start..end].fill(color);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.pixels.fill(color);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

    #[test]
    fn test_out_of_bounds_writes_are_ignored() {
        let mut fb = Framebuffer::new(4, 3);
        fb.set_pixel(-1, 0, Rgb888::RED);
        fb.set_pixel(4, 0, Rgb888::RED);
        fb.set_pixel(0, 3, Rgb888::RED);
        assert_eq!(fb.count_not(Rgb888::BLACK), 0);
        assert_eq!(fb.pixel(4, 0), None);
    }

    #[test]
    fn test_fill_solid_clips_to_bounds() {
        let mut fb = Framebuffer::new(10, 10);
        fb.fill_solid(&Rectangle::new(Point::new(8, 8), Size::new(5, 5)), Rgb888::GREEN)
            .unwrap();
        assert_eq!(fb.count_not(Rgb888::BLACK), 4);
        assert_eq!(fb.pixel(9, 9), Some(Rgb888::GREEN));
    }

    #[test]
    fn test_embedded_graphics_primitives_draw() {
        let mut fb = Framebuffer::new(16, 16);
        Rectangle::new(Point::new(2, 2), Size::new(4, 4))
            .into_styled(PrimitiveStyle::with_fill(Rgb888::WHITE))
            .draw(&mut fb)
            .unwrap();
        assert_eq!(fb.count_not(Rgb888::BLACK), 16);
    }

    #[test]
    fn test_ascii_preview_shape() {
        let mut fb = Framebuffer::new(8, 8);
        fb.fill_solid(&Rectangle::new(Point::zero(), Size::new(4, 8)), Rgb888::WHITE)
            .unwrap();
        let ascii = fb.to_ascii(4, Rgb888::BLACK);
        assert_eq!(ascii, "#\n");
    }

    #[test]
    fn test_png_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let mut fb = Framebuffer::new(3, 2);
        fb.set_pixel(1, 1, Rgb888::new(10, 20, 30));
        fb.save_png(&path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(loaded.dimensions(), (3, 2));
        assert_eq!(loaded.get_pixel(1, 1).0, [10, 20, 30]);
    }
}
