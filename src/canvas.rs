//! # Glyph Drawing Canvas
//!
//! The glyph catalog describes every shape with a small vector vocabulary:
//! rectangles, ovals, rounded rectangles, pie wedges and free-form paths,
//! under a save/restore transform stack. [`GlyphCanvas`] records each shape
//! as a [`tiny_skia::Path`] in glyph coordinates together with the transform
//! that was current when it was drawn. Nothing is rasterized here; the
//! renderer replays the recorded shapes onto a [`tiny_skia::Pixmap`] once
//! the glyph is complete.
//!
//! ## Conventions
//! - y grows downwards.
//! - Angles are degrees, 0° points to 3 o'clock and positive sweeps turn
//!   clockwise on screen.
//! - Transforms pre-concatenate, so the most recent call acts first on
//!   shape coordinates.
//! - Fills use the nonzero winding rule and close every contour implicitly.
//!
//! ## Scratch Ownership
//! Each renderer owns one [`Scratch`] and clears it before every glyph.
//! Cleared paths hand their buffers back as builders, so the arena grows to
//! the size of the most complex glyph and then stops allocating. Two
//! renderers never share one.

use std::f32::consts::FRAC_PI_2;
use tiny_skia::{Path, Transform};

/// One of the three fill colour slots of [`ClockPaints`](crate::ClockPaints).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ink {
    One,
    Two,
    Three,
}

impl Ink {
    pub fn index(self) -> usize {
        match self {
            Ink::One => 0,
            Ink::Two => 1,
            Ink::Three => 2,
        }
    }
}

/// A recorded fill: a path in glyph coordinates and where it lands.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub ink: Ink,
    pub path: Path,
    pub transform: Transform,
}

/// Reusable per-renderer arena for recorded glyph geometry.
#[derive(Debug, Default)]
pub struct Scratch {
    shapes: Vec<Shape>,
    spare: Vec<tiny_skia::PathBuilder>,
    stack: Vec<Transform>,
}

impl Scratch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets all recorded geometry, keeping the allocations.
    pub fn clear(&mut self) {
        let recycled = self.shapes.drain(..).map(|shape| shape.path.clear());
        self.spare.extend(recycled);
        self.stack.clear();
    }

    /// Recorded shapes in paint order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }
}

/// Drawing context handed to [`Glyph::draw`](crate::font::Glyph::draw).
pub struct GlyphCanvas<'s> {
    scratch: &'s mut Scratch,
    matrix: Transform,
}

impl<'s> GlyphCanvas<'s> {
    /// Starts recording into `scratch` with `base` as the outermost transform.
    pub fn new(scratch: &'s mut Scratch, base: Transform) -> Self {
        Self {
            scratch,
            matrix: base,
        }
    }

    pub fn save(&mut self) {
        self.scratch.stack.push(self.matrix);
    }

    /// Pops the last [`save`](Self::save). Unbalanced restores are ignored.
    pub fn restore(&mut self) {
        if let Some(matrix) = self.scratch.stack.pop() {
            self.matrix = matrix;
        }
    }

    /// Runs `f` between a save and its matching restore.
    pub fn scoped(&mut self, f: impl FnOnce(&mut Self)) {
        self.save();
        f(self);
        self.restore();
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.matrix = self.matrix.pre_translate(dx, dy);
    }

    pub fn scale(&mut self, sx: f32, sy: f32, px: f32, py: f32) {
        self.matrix = self
            .matrix
            .pre_translate(px, py)
            .pre_scale(sx, sy)
            .pre_translate(-px, -py);
    }

    pub fn scale_uniform(&mut self, s: f32, px: f32, py: f32) {
        self.scale(s, s, px, py);
    }

    pub fn rotate(&mut self, degrees: f32, px: f32, py: f32) {
        self.matrix = self.matrix.pre_concat(Transform::from_rotate_at(degrees, px, py));
    }

    pub fn rect(&mut self, left: f32, top: f32, right: f32, bottom: f32, ink: Ink) {
        self.fill_path(ink, |p| {
            p.move_to(left, top);
            p.line_to(right, top);
            p.line_to(right, bottom);
            p.line_to(left, bottom);
            p.close();
        });
    }

    /// Ellipse inscribed in the given bounds.
    pub fn oval(&mut self, left: f32, top: f32, right: f32, bottom: f32, ink: Ink) {
        self.fill_path(ink, |p| {
            p.arc_to(left, top, right, bottom, 0.0, 360.0, true);
            p.close();
        });
    }

    /// Rectangle with elliptical corners of radii `rx`, `ry`.
    pub fn round_rect(&mut self, left: f32, top: f32, right: f32, bottom: f32, rx: f32, ry: f32, ink: Ink) {
        let (l, r) = (left.min(right), left.max(right));
        let (t, b) = (top.min(bottom), top.max(bottom));
        let rx = rx.clamp(0.0, (r - l) / 2.0);
        let ry = ry.clamp(0.0, (b - t) / 2.0);
        self.fill_path(ink, |p| {
            p.arc_to(r - 2.0 * rx, t, r, t + 2.0 * ry, -90.0, 90.0, true);
            p.arc_to(r - 2.0 * rx, b - 2.0 * ry, r, b, 0.0, 90.0, false);
            p.arc_to(l, b - 2.0 * ry, l + 2.0 * rx, b, 90.0, 90.0, false);
            p.arc_to(l, t, l + 2.0 * rx, t + 2.0 * ry, 180.0, 90.0, false);
            p.close();
        });
    }

    /// Pie wedge: the arc of the inscribed ellipse joined to its centre.
    pub fn arc(&mut self, left: f32, top: f32, right: f32, bottom: f32, start: f32, sweep: f32, ink: Ink) {
        let cx = (left + right) / 2.0;
        let cy = (top + bottom) / 2.0;
        self.fill_path(ink, |p| {
            p.move_to(cx, cy);
            p.arc_to(left, top, right, bottom, start, sweep, false);
            p.close();
        });
    }

    /// Records a free-form path built by `build` as one filled shape.
    ///
    /// Paths that end up empty, such as a lone move-to, record nothing.
    pub fn fill_path(&mut self, ink: Ink, build: impl FnOnce(&mut ContourBuilder)) {
        let mut builder = ContourBuilder {
            inner: self.scratch.spare.pop().unwrap_or_else(tiny_skia::PathBuilder::new),
            has_points: false,
        };
        build(&mut builder);
        if let Some(path) = builder.inner.finish() {
            self.scratch.shapes.push(Shape {
                ink,
                path,
                transform: self.matrix,
            });
        }
    }
}

/// Path builder for [`GlyphCanvas::fill_path`], in glyph coordinates.
///
/// Wraps [`tiny_skia::PathBuilder`] and adds elliptical arcs.
pub struct ContourBuilder {
    inner: tiny_skia::PathBuilder,
    has_points: bool,
}

impl ContourBuilder {
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.inner.move_to(x, y);
        self.has_points = true;
    }

    /// After a [`close`](Self::close) the line continues from the closed
    /// contour's first point.
    pub fn line_to(&mut self, x: f32, y: f32) {
        self.inner.line_to(x, y);
        self.has_points = true;
    }

    /// Appends an arc of the ellipse inscribed in the bounds.
    ///
    /// With `force_move`, or on an empty path, the arc starts a new contour.
    /// Otherwise a line joins the current point to the arc's first point.
    /// The arc is emitted as cubic segments of at most a quarter turn.
    pub fn arc_to(&mut self, left: f32, top: f32, right: f32, bottom: f32, start: f32, sweep: f32, force_move: bool) {
        let cx = (left + right) / 2.0;
        let cy = (top + bottom) / 2.0;
        let rx = (right - left).abs() / 2.0;
        let ry = (bottom - top).abs() / 2.0;
        let at = |angle: f32| (cx + rx * angle.cos(), cy + ry * angle.sin());

        let start = start.to_radians();
        let sweep = sweep.to_radians();
        let (x, y) = at(start);
        if force_move || !self.has_points {
            self.move_to(x, y);
        } else {
            self.line_to(x, y);
        }

        let segments = (sweep.abs() / FRAC_PI_2).ceil() as usize;
        if segments == 0 {
            return;
        }
        let step = sweep / segments as f32;
        // tangent length of a cubic approximating a circular arc of `step`
        let k = 4.0 / 3.0 * (step / 4.0).tan();
        for i in 0..segments {
            let a0 = start + step * i as f32;
            let a1 = a0 + step;
            let (sin0, cos0) = a0.sin_cos();
            let (sin1, cos1) = a1.sin_cos();
            let (x1, y1) = at(a1);
            self.inner.cubic_to(
                cx + rx * (cos0 - k * sin0),
                cy + ry * (sin0 + k * cos0),
                cx + rx * (cos1 + k * sin1),
                cy + ry * (sin1 - k * cos1),
                x1,
                y1,
            );
        }
    }

    pub fn close(&mut self) {
        self.inner.close();
    }
}
