//! # Glyph Surfaces
//!
//! Every glyph is painted into a square [`Pixmap`] and then composited onto
//! the target. The two constructors match the two draw modes.
//!
//! - [`GlyphSurface::direct`] paints at final scale. The glyph's fractional
//!   position is kept inside the pixmap, so the composite lands on whole
//!   pixels.
//! - [`GlyphSurface::offscreen`] paints at a multiple of the design grid and
//!   resamples down to the final size with a triangle filter. Its cost is
//!   bounded by the surface size rather than the on-screen size.
//!
//! ## Sizing
//! The offscreen unpadded size starts at `5 * 144` and steps down by 144
//! (halving once below 144) while the text would still fit, so the surface
//! is never much larger than the glyph it serves. Both surfaces are twice the
//! unpadded size: glyphs are drawn with a half-size margin on every side
//! because some transitions swing outside their nominal box.
//!
//! ## Alpha
//! Pixmaps hold premultiplied RGBA, and the resampler filters every channel
//! independently, so coverage stays premultiplied throughout. Compositing
//! blends it against the paints' background colour, or thresholds coverage at
//! 50% when there is none.

use crate::canvas::Scratch;
use crate::font::DRAW_HEIGHT;
use crate::{ClockPaints, StrokePaint};
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::prelude::*;
use image::imageops::{self, FilterType};
use image::RgbaImage;
use tiny_skia::{Color, FillRule, Paint, Pixmap, Stroke, Transform};

const GRID: u32 = DRAW_HEIGHT as u32;

/// Per-renderer pixmap one glyph is painted into.
#[derive(Debug, Clone)]
pub struct GlyphSurface {
    pixmap: Pixmap,
    text_size: f32,
    /// Surface pixels per design unit
    scale: f32,
    /// Offset of the design origin from the surface corner, in surface pixels
    margin: f32,
    /// Edge length the surface is resampled to before compositing
    resample: Option<u32>,
}

impl GlyphSurface {
    /// Unpadded offscreen size used for glyphs `text_size` pixels tall.
    pub fn unpadded_size_for(text_size: f32) -> u32 {
        let mut unpadded = GRID * 5;
        while text_size < unpadded as f32 {
            let next = if unpadded > GRID {
                unpadded - GRID
            } else {
                unpadded / 2
            };
            if next == 0 || text_size > next as f32 {
                break;
            }
            unpadded = next;
        }
        unpadded
    }

    /// Final-scale surface. `None` when the text size cannot be represented.
    pub fn direct(text_size: f32) -> Option<Self> {
        let text_size = text_size.max(0.0);
        // one spare pixel for the sub-pixel offset
        let side = (2.0 * text_size).ceil() as u32 + 1;
        Some(Self {
            pixmap: Pixmap::new(side, side)?,
            text_size,
            scale: text_size / DRAW_HEIGHT,
            margin: text_size / 2.0,
            resample: None,
        })
    }

    /// Design-grid surface resampled to the final size.
    pub fn offscreen(text_size: f32) -> Option<Self> {
        let unpadded = Self::unpadded_size_for(text_size);
        let u = unpadded as f32;
        Some(Self {
            pixmap: Pixmap::new(unpadded * 2, unpadded * 2)?,
            text_size,
            scale: u / DRAW_HEIGHT,
            margin: u / 2.0,
            resample: Some((2.0 * text_size).round().max(1.0) as u32),
        })
    }

    /// Edge length of the square surface in pixels.
    pub fn side(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn is_resampled(&self) -> bool {
        self.resample.is_some()
    }

    /// Target pixel of the composite's top-left corner, plus the fraction of
    /// a pixel the glyph itself must be shifted by.
    fn placement(&self, left: f32, top: f32) -> (Point, f32, f32) {
        let x = left - self.text_size / 2.0;
        let y = top - self.text_size / 2.0;
        if self.is_resampled() {
            (Point::new(x.round() as i32, y.round() as i32), 0.0, 0.0)
        } else {
            let (fx, fy) = (x.floor(), y.floor());
            (Point::new(fx as i32, fy as i32), x - fx, y - fy)
        }
    }

    /// Design-grid to surface transform for a glyph box at `(left, top)`.
    pub fn glyph_transform(&self, left: f32, top: f32) -> Transform {
        let (_, fx, fy) = self.placement(left, top);
        Transform::from_translate(self.margin + fx, self.margin + fy).pre_scale(self.scale, self.scale)
    }

    /// Clears the surface and paints every recorded shape, fill first and
    /// then the optional outline.
    ///
    /// Outline widths are in device pixels, so outlines are stroked along
    /// the transformed path.
    pub fn paint(&mut self, scratch: &Scratch, paints: &ClockPaints, strokes: Option<&StrokePaint>) {
        self.pixmap.fill(Color::TRANSPARENT);
        let mut fill = Paint::default();
        fill.anti_alias = paints.anti_alias;

        for shape in scratch.shapes() {
            let ink = shape.ink.index();
            set_color(&mut fill, paints.fills[ink]);
            self.pixmap
                .fill_path(&shape.path, &fill, FillRule::Winding, shape.transform, None);

            let Some(stroke) = strokes else { continue };
            let Some(outline) = shape.path.clone().transform(shape.transform) else {
                continue;
            };
            let mut paint = Paint::default();
            paint.anti_alias = stroke.anti_alias;
            set_color(&mut paint, stroke.colors[ink]);
            let style = Stroke {
                width: stroke.width,
                ..Stroke::default()
            };
            self.pixmap
                .stroke_path(&outline, &paint, &style, Transform::identity(), None);
        }
    }

    /// Draws the surface onto `target` for a glyph box whose top-left corner
    /// is `(left, top)`.
    pub fn composite<D>(&self, target: &mut D, left: f32, top: f32, background: Option<Rgb888>) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        let (origin, _, _) = self.placement(left, top);
        match self.resample {
            Some(side) => {
                let (w, h) = (self.pixmap.width(), self.pixmap.height());
                let Some(image) = RgbaImage::from_raw(w, h, self.pixmap.data().to_vec()) else {
                    return Ok(());
                };
                let scaled = imageops::resize(&image, side, side, FilterType::Triangle);
                blit(target, origin, side, scaled.pixels().map(|px| px.0), background)
            }
            None => {
                let pixels = self
                    .pixmap
                    .pixels()
                    .iter()
                    .map(|px| [px.red(), px.green(), px.blue(), px.alpha()]);
                blit(target, origin, self.pixmap.width(), pixels, background)
            }
        }
    }
}

fn set_color(paint: &mut Paint<'_>, color: Rgb888) {
    paint.set_color_rgba8(color.r(), color.g(), color.b(), u8::MAX);
}

/// Writes premultiplied rows of `width` pixels starting at `origin`.
fn blit<D>(
    target: &mut D,
    origin: Point,
    width: u32,
    pixels: impl Iterator<Item = [u8; 4]>,
    background: Option<Rgb888>,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let width = width.max(1) as usize;
    let pixels = pixels.enumerate().filter_map(|(i, [r, g, b, a])| {
        let color = match background {
            _ if a == 0 => return None,
            Some(bg) => Rgb888::new(over(r, bg.r(), a), over(g, bg.g(), a), over(b, bg.b(), a)),
            None if a >= 128 => Rgb888::new(unpremultiply(r, a), unpremultiply(g, a), unpremultiply(b, a)),
            None => return None,
        };
        let offset = Point::new((i % width) as i32, (i / width) as i32);
        Some(Pixel(origin + offset, color))
    });
    target.draw_iter(pixels)
}

/// Premultiplied source over an opaque backdrop.
fn over(src: u8, backdrop: u8, alpha: u8) -> u8 {
    let inv = u16::from(u8::MAX - alpha);
    (u16::from(src) + (u16::from(backdrop) * inv + 127) / 255).min(255) as u8
}

fn unpremultiply(src: u8, alpha: u8) -> u8 {
    ((u16::from(src) * 255 + u16::from(alpha) / 2) / u16::from(alpha)).min(255) as u8
}
