//! # Layout Geometry
//!
//! Boxes produced by the layout pass, in target pixels relative to the
//! clock's top-left corner. Shape transforms live in [`tiny_skia::Transform`].

/// Axis-aligned rectangle given by its edges.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// Measured size of a rendered clock, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_size() {
        let r = Rect {
            left: 2.0,
            top: 5.0,
            right: 12.0,
            bottom: 20.0,
        };
        assert_eq!(r.width(), 10.0);
        assert_eq!(r.height(), 15.0);
    }
}
