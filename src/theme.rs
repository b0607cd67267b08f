//! # Colour Themes
//!
//! A theme is three related colours: a light one for the primary ink, a
//! mid tone for the secondary ink and a dark one painted behind the clock.
//! The third ink is always white so every theme shares the same highlight.
//!
//! Ambient paints are theme independent. Screens that cannot show grey
//! levels, or that must avoid burn-in, switch to white outlines on black.

use crate::{ClockPaints, StrokePaint};
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

/// Outline width used by the outline-only ambient paints, in device pixels.
pub const AMBIENT_STROKE_WIDTH: f32 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub id: &'static str,
    pub light: Rgb888,
    pub mid: Rgb888,
    pub dark: Rgb888,
}

pub const BLUE: Theme = Theme {
    id: "blue",
    light: Rgb888::new(0x40, 0xC4, 0xFF),
    mid: Rgb888::new(0x03, 0x9B, 0xE5),
    dark: Rgb888::new(0x01, 0x57, 0x9B),
};

pub const TEAL: Theme = Theme {
    id: "teal",
    light: Rgb888::new(0x64, 0xFF, 0xDA),
    mid: Rgb888::new(0x00, 0x89, 0x7B),
    dark: Rgb888::new(0x00, 0x4D, 0x40),
};

pub const RED: Theme = Theme {
    id: "red",
    light: Rgb888::new(0xFF, 0x8A, 0x80),
    mid: Rgb888::new(0xE5, 0x39, 0x35),
    dark: Rgb888::new(0xB7, 0x1C, 0x1C),
};

pub const YELLOW: Theme = Theme {
    id: "yellow",
    light: Rgb888::new(0xFF, 0xE5, 0x7F),
    mid: Rgb888::new(0xFF, 0xB3, 0x00),
    dark: Rgb888::new(0xE6, 0x51, 0x00),
};

pub const GRAY: Theme = Theme {
    id: "gray",
    light: Rgb888::new(0xE0, 0xE0, 0xE0),
    mid: Rgb888::new(0x9E, 0x9E, 0x9E),
    dark: Rgb888::new(0x42, 0x42, 0x42),
};

pub const THEMES: [Theme; 5] = [BLUE, TEAL, RED, YELLOW, GRAY];

pub const DEFAULT_THEME: Theme = BLUE;

impl Theme {
    pub fn by_id(id: &str) -> Option<Theme> {
        THEMES.iter().copied().find(|t| t.id == id)
    }

    /// Interactive paints: light and mid inks, white highlight, dark background.
    pub fn paints(&self) -> ClockPaints {
        ClockPaints {
            fills: [self.light, self.mid, Rgb888::WHITE],
            strokes: None,
            background: Some(self.dark),
            anti_alias: true,
        }
    }
}

impl ClockPaints {
    /// Paints for the low-power display mode.
    ///
    /// With `low_bit` or `burn_in` set, shapes are black with white outlines
    /// so few pixels stay lit. Fills are aliased, and outlines too on
    /// low-bit screens. Otherwise inks are smoothed shades of grey.
    pub fn ambient(low_bit: bool, burn_in: bool) -> Self {
        if low_bit || burn_in {
            ClockPaints {
                fills: [Rgb888::BLACK; 3],
                strokes: Some(StrokePaint {
                    colors: [Rgb888::WHITE; 3],
                    width: AMBIENT_STROKE_WIDTH,
                    anti_alias: !low_bit,
                }),
                background: Some(Rgb888::BLACK),
                anti_alias: false,
            }
        } else {
            ClockPaints {
                fills: [Rgb888::new(0xCC, 0xCC, 0xCC), Rgb888::new(0xAA, 0xAA, 0xAA), Rgb888::WHITE],
                strokes: None,
                background: Some(Rgb888::BLACK),
                anti_alias: true,
            }
        }
    }
}
