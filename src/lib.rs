//! # Form Clock Core Library
//!
//! A digital clock renderer whose digits morph into one another: a "2"
//! deforms into a "3" over a couple of seconds instead of cutting over.
//! The library draws into any `embedded-graphics`
//! [`DrawTarget`](embedded_graphics::draw_target::DrawTarget) with
//! [`Rgb888`] colours.
//!
//! ## Design Philosophy
//!
//! ### Closed Glyph Set
//! The alphabet is tiny and known up front: ten digits, a colon, a blank and
//! the digit-pair transitions a clock can actually produce. Each shape is a
//! variant of [`font::Glyph`] with hand-authored geometry, not a font file.
//!
//! ### Pull-Based Timing
//! Nothing in the library owns a thread or a timer. A host loop feeds the
//! current time to a [`renderer::ClockRenderer`], draws, and asks
//! [`time_until_next_animation_boundary`](renderer::ClockRenderer::time_until_next_animation_boundary)
//! how long it may sleep before the next frame matters.
//!
//! ### Per-Instance Scratch
//! Each renderer owns its recorded-geometry arena and its glyph surfaces.
//! Renderers are independent and never share mutable state, so an
//! hour:minute clock and a seconds clock can be driven side by side.
//!
//! ### Data Flow
//! 1. **Time model**: [`time::TimeValue`] formats the current and next instant
//! 2. **Diff**: [`renderer::AnimationPlan`] picks a glyph per character and staggers the changing ones
//! 3. **Layout**: glyph widths at their current progress give positions and the measured size
//! 4. **Paint**: glyphs record `tiny-skia` paths, paint into a pixmap and composite onto the target
//!
//! ## Core Types
//! - [`RenderOptions`]: size, spacing and timing of one clock
//! - [`ClockPaints`]: the three ink colours plus optional outline and background

use embedded_graphics::pixelcolor::Rgb888;
use serde::{Deserialize, Serialize};
use std::time::Duration;

// Module declarations
pub mod canvas;
pub mod config;
pub mod face;
pub mod font;
pub mod framebuffer;
pub mod geometry;
pub mod math;
pub mod renderer;
pub mod surface;
pub mod theme;
pub mod time;

#[cfg(test)]
mod tests;

/// Configuration of one clock renderer.
///
/// Values are copied into the renderer; changing them means calling
/// [`ClockRenderer::configure`](renderer::ClockRenderer::configure) again.
///
/// # Example
/// ```
/// use form_clock_lib::RenderOptions;
///
/// let hm = RenderOptions::default();
/// let seconds = hm.seconds_variant();
/// assert!(seconds.only_seconds);
/// assert_eq!(seconds.text_size, hm.text_size / 2.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Glyph height in pixels
    pub text_size: f32,
    /// Gap between glyphs in pixels
    pub char_spacing: f32,
    /// Show only the seconds field
    pub only_seconds: bool,
    /// 24-hour instead of 12-hour numbering
    pub is_24_hour: bool,
    /// Average start offset between consecutive changing glyphs
    pub glyph_anim_average_delay_ms: u64,
    /// Animation length of a single glyph
    pub glyph_anim_duration_ms: u64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            text_size: 72.0,
            char_spacing: 21.0,
            only_seconds: false,
            is_24_hour: false,
            glyph_anim_average_delay_ms: 500,
            glyph_anim_duration_ms: 2000,
        }
    }
}

impl RenderOptions {
    pub fn glyph_anim_average_delay(&self) -> Duration {
        Duration::from_millis(self.glyph_anim_average_delay_ms)
    }

    pub fn glyph_anim_duration(&self) -> Duration {
        Duration::from_millis(self.glyph_anim_duration_ms)
    }

    /// Companion seconds clock: half size, no stagger, one-second animations.
    pub fn seconds_variant(&self) -> Self {
        Self {
            text_size: self.text_size / 2.0,
            char_spacing: self.char_spacing / 2.0,
            only_seconds: true,
            is_24_hour: self.is_24_hour,
            glyph_anim_average_delay_ms: 0,
            glyph_anim_duration_ms: 960,
        }
    }
}

/// Outline colours drawn over every filled shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokePaint {
    /// Per-ink outline colour, indexed like [`ClockPaints::fills`]
    pub colors: [Rgb888; 3],
    /// Outline width in device pixels
    pub width: f32,
    pub anti_alias: bool,
}

/// Colours every glyph draws with.
///
/// Swapping paints never changes layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClockPaints {
    /// Fill colour per ink slot
    pub fills: [Rgb888; 3],
    /// Optional outline pass, used by degraded display modes
    pub strokes: Option<StrokePaint>,
    /// Colour behind the glyphs, used to blend smoothed edges
    pub background: Option<Rgb888>,
    /// Smooth fill edges
    pub anti_alias: bool,
}

impl Default for ClockPaints {
    fn default() -> Self {
        theme::DEFAULT_THEME.paints()
    }
}
