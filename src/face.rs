//! # Watch Face Composition
//!
//! Combines a large hour:minute clock with a half-size seconds clock tucked
//! under its right edge. The face is host-driven: each frame the host passes
//! the wall-clock time and a monotonic clock reading, and the face decides
//! which renderer should be animating.
//!
//! ## Frame Logic
//! - **First frame**: both clocks are planned from the previous instant and
//!   pinned to the end of their animation, so the current time appears at rest.
//! - **New second**: the seconds clock animates from the previous second.
//!   The hour:minute clock is re-planned every second but only restarts its
//!   animation when the minute changed.
//! - **Ambient**: low-power paints, hour:minute pinned at rest, seconds hidden
//!   and glyphs drawn directly without smoothing.

use crate::config::Config;
use crate::renderer::{ClockRenderer, DrawMode, Phase};
use crate::time::{until_next_boundary, Boundary, HourCycle, TimeValue};
use crate::{ClockPaints, RenderOptions};
use chrono::Timelike;
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use std::time::Duration;
use tracing::debug;

/// Geometry and behaviour of a [`ClockFace`].
#[derive(Clone, Debug, PartialEq)]
pub struct FaceOptions {
    pub hour_minute: RenderOptions,
    pub seconds: RenderOptions,
    /// Frame size the face is centred in
    pub size: Size,
    /// Gap between the hour:minute box and the seconds clock
    pub seconds_gap: f32,
    pub offscreen_glyphs: bool,
    pub show_seconds: bool,
}

impl FaceOptions {
    pub fn from_config(config: &Config) -> Self {
        FaceOptions {
            hour_minute: config.hour_minute_options(),
            seconds: config.seconds_options(),
            size: Size::new(config.display.width, config.display.height),
            seconds_gap: config.display.seconds_gap,
            offscreen_glyphs: config.display.offscreen_glyphs,
            show_seconds: config.preferences.show_seconds,
        }
    }
}

pub struct ClockFace {
    options: FaceOptions,
    hour_minute: ClockRenderer,
    seconds: ClockRenderer,
    normal_paints: ClockPaints,
    ambient_paints: ClockPaints,
    ambient: bool,
    /// Last sampled wall-clock second
    last: Option<TimeValue>,
    /// Monotonic start of the running animations, `None` when pinned at rest
    hour_minute_started: Option<Duration>,
    seconds_started: Option<Duration>,
}

impl ClockFace {
    pub fn new(options: FaceOptions, paints: ClockPaints) -> Self {
        Self {
            hour_minute: ClockRenderer::new(options.hour_minute.clone(), paints),
            seconds: ClockRenderer::new(options.seconds.clone(), paints),
            options,
            normal_paints: paints,
            ambient_paints: ClockPaints::ambient(false, false),
            ambient: false,
            last: None,
            hour_minute_started: None,
            seconds_started: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(FaceOptions::from_config(config), config.paints())
    }

    pub fn options(&self) -> &FaceOptions {
        &self.options
    }

    pub fn hour_minute(&self) -> &ClockRenderer {
        &self.hour_minute
    }

    pub fn seconds(&self) -> &ClockRenderer {
        &self.seconds
    }

    pub fn is_ambient(&self) -> bool {
        self.ambient
    }

    pub fn set_ambient(&mut self, ambient: bool) {
        self.ambient = ambient;
        self.apply_paints();
    }

    /// Interactive paints, usually from a [`Theme`](crate::theme::Theme).
    pub fn set_paints(&mut self, paints: ClockPaints) {
        self.normal_paints = paints;
        self.apply_paints();
    }

    /// Rebuilds the ambient paints for the screen's low-power capabilities.
    pub fn set_display_properties(&mut self, low_bit: bool, burn_in: bool) {
        self.ambient_paints = ClockPaints::ambient(low_bit, burn_in);
        self.apply_paints();
    }

    pub fn set_show_seconds(&mut self, show_seconds: bool) {
        self.options.show_seconds = show_seconds;
    }

    fn current_paints(&self) -> ClockPaints {
        if self.ambient {
            self.ambient_paints
        } else {
            self.normal_paints
        }
    }

    fn apply_paints(&mut self) {
        let paints = self.current_paints();
        self.hour_minute.set_paints(paints);
        self.seconds.set_paints(paints);
    }

    /// Advances both clocks to wall-clock `now`.
    ///
    /// `clock` is a monotonic reading; only differences between calls matter.
    pub fn frame<T: Timelike>(&mut self, now: &T, clock: Duration) {
        let cycle = HourCycle::from_24_hour(self.options.hour_minute.is_24_hour);
        let current = TimeValue::from_time(now, cycle);

        match self.last {
            None => {
                self.hour_minute.set_time(&current.remove_seconds().previous());
                self.seconds.set_time(&current.remove_hours_minutes().previous());
                self.hour_minute_started = None;
                self.seconds_started = None;
            }
            Some(last) if last != current => {
                let previous = current.previous();
                self.seconds.set_time(&previous.remove_hours_minutes());
                self.seconds_started = Some(clock);
                self.hour_minute.set_time(&current.remove_seconds().previous());
                if previous.minute() != current.minute() {
                    debug!(time = %current, "minute changed");
                    self.hour_minute_started = Some(clock);
                }
            }
            Some(_) => {}
        }
        self.last = Some(current);

        let hour_minute_time = if self.ambient {
            Duration::MAX
        } else {
            elapsed_since(self.hour_minute_started, clock)
        };
        self.hour_minute.set_anim_time(hour_minute_time);
        self.seconds.set_anim_time(elapsed_since(self.seconds_started, clock));
    }

    fn seconds_visible(&self) -> bool {
        self.options.show_seconds && !self.ambient
    }

    pub fn is_animating(&self) -> bool {
        self.hour_minute.phase() == Phase::Animating
            || (self.seconds_visible() && self.seconds.phase() == Phase::Animating)
    }

    /// How long the host may wait before drawing again.
    pub fn time_until_next_frame<T: Timelike>(&self, now: &T) -> Duration {
        if self.is_animating() {
            Duration::ZERO
        } else if self.ambient {
            until_next_boundary(now, Boundary::Minute)
        } else {
            until_next_boundary(now, Boundary::Second)
        }
    }

    /// Fills the frame with the background and draws both clocks.
    pub fn draw<D>(&mut self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        let background = self.current_paints().background.unwrap_or(Rgb888::BLACK);
        target.fill_solid(&Rectangle::new(Point::zero(), self.options.size), background)?;

        let mode = if self.ambient || !self.options.offscreen_glyphs {
            DrawMode::Direct
        } else {
            DrawMode::Offscreen
        };

        let width = self.options.size.width as f32;
        let height = self.options.size.height as f32;
        let hm = self.hour_minute.measure();
        let hm_origin = Point::new(
            ((width - hm.width) / 2.0).round() as i32,
            ((height - hm.height) / 2.0).round() as i32,
        );
        self.hour_minute.draw_with(target, hm_origin, mode)?;

        if self.seconds_visible() {
            let s = self.seconds.measure();
            let origin = Point::new(
                ((width + hm.width) / 2.0 - s.width).round() as i32,
                ((height + hm.height) / 2.0 + self.options.seconds_gap).round() as i32,
            );
            self.seconds.draw_with(target, origin, mode)?;
        }
        Ok(())
    }
}

fn elapsed_since(start: Option<Duration>, clock: Duration) -> Duration {
    match start {
        Some(start) => clock.saturating_sub(start),
        None => Duration::MAX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::Glyph;
    use crate::framebuffer::Framebuffer;
    use crate::theme::DEFAULT_THEME;
    use chrono::NaiveTime;

    fn face() -> ClockFace {
        let config = Config::default();
        let mut options = FaceOptions::from_config(&config);
        options.size = Size::new(320, 160);
        ClockFace::new(options, DEFAULT_THEME.paints())
    }

    fn at(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_first_frame_is_at_rest() {
        let mut face = face();
        face.frame(&at(10, 41, 20), Duration::from_secs(100));
        assert!(!face.is_animating());

        // "10:40" -> "10:41" pinned at its end
        let last = face.hour_minute().layout()[4];
        assert_eq!(last.glyph, Glyph::ZeroOne);
        assert_eq!(last.progress, 1.0);
    }

    #[test]
    fn test_new_second_animates_seconds_only() {
        let mut face = face();
        face.frame(&at(10, 41, 20), Duration::from_secs(100));
        face.frame(&at(10, 41, 21), Duration::from_millis(100_200));

        assert_eq!(face.seconds().phase(), Phase::Animating);
        assert_eq!(face.seconds().anim_time(), Duration::ZERO);
        assert_eq!(face.hour_minute().phase(), Phase::Idle);
        assert_eq!(face.time_until_next_frame(&at(10, 41, 21)), Duration::ZERO);

        face.frame(&at(10, 41, 21), Duration::from_millis(101_500));
        assert!(!face.is_animating(), "seconds settle within the second");
    }

    #[test]
    fn test_new_minute_restarts_hour_minute() {
        let mut face = face();
        face.frame(&at(10, 41, 59), Duration::from_secs(10));
        face.frame(&at(10, 42, 0), Duration::from_secs(11));
        assert_eq!(face.hour_minute().phase(), Phase::Animating);
        assert_eq!(face.hour_minute().plan().animated_positions(), &[4]);

        face.frame(&at(10, 42, 1), Duration::from_secs(12));
        assert_eq!(face.hour_minute().anim_time(), Duration::from_secs(1));
    }

    #[test]
    fn test_ambient_pins_and_hides_seconds() {
        let mut face = face();
        // low-bit screens get aliased outlines, so only two levels appear
        face.set_display_properties(true, true);
        face.frame(&at(10, 41, 59), Duration::from_secs(10));
        face.set_ambient(true);
        face.frame(&at(10, 42, 0), Duration::from_secs(11));
        assert!(!face.is_animating());
        assert_eq!(
            face.time_until_next_frame(&at(10, 42, 0)),
            Duration::from_secs(60)
        );

        let mut fb = Framebuffer::new(320, 160);
        face.draw(&mut fb).unwrap();
        let lit = fb.count_not(Rgb888::BLACK);
        assert!(lit > 0, "outlines drawn");
        for y in 0..160 {
            for x in 0..320 {
                let p = fb.pixel(x, y).unwrap();
                assert!(p == Rgb888::BLACK || p == Rgb888::WHITE, "unexpected colour {p:?}");
            }
        }
    }

    #[test]
    fn test_draw_fills_background_and_places_seconds() {
        let mut face = face();
        face.frame(&at(3, 7, 45), Duration::ZERO);
        let mut fb = Framebuffer::new(320, 160);
        face.draw(&mut fb).unwrap();
        assert_eq!(fb.pixel(0, 0), Some(DEFAULT_THEME.dark));

        let with_seconds = fb.clone();
        face.set_show_seconds(false);
        face.draw(&mut fb).unwrap();
        assert_ne!(with_seconds, fb, "seconds clock contributes pixels");
    }
}
