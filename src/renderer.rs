//! # Clock Layout and Animation Engine
//!
//! [`ClockRenderer`] turns a time into pixels. Whenever the displayed
//! instant changes it diffs the current and next fixed-width strings
//! character by character and builds an [`AnimationPlan`]: one glyph per
//! position, plus the positions whose character changes. Those positions
//! morph through a transition glyph; every other position rests at
//! progress 0.
//!
//! ## States
//! - **Idle**: nothing is moving, every glyph draws at rest.
//! - **Animating**: at least one position is part-way through its transition.
//!
//! Diffing happens synchronously inside [`set_time`](ClockRenderer::set_time),
//! [`update`](ClockRenderer::update) and [`sync_to`](ClockRenderer::sync_to),
//! so it is never observable as a separate phase. A new time simply
//! replaces the previous plan.
//!
//! ## Stagger
//! Changing positions start in reverse reading order, right-most first. The
//! `i`-th of `n` starts at `accelerate5(i / (n - 1))` of the total stagger
//! window, so the slow-changing leading digits set off late and close
//! together. The window is `n * average_delay` and the last glyph to start
//! still runs for the full per-glyph duration, giving a total of
//! `n * average_delay + per_glyph`.
//!
//! ## Driving the Clock
//! - **Host-driven**: [`set_time`](ClockRenderer::set_time) plans `time -> time.next()`
//!   and the host advances [`set_anim_time`](ClockRenderer::set_anim_time).
//! - **Incremental**: [`update`](ClockRenderer::update) plans from the
//!   previously shown instant to the new one.
//! - **Wall clock**: [`sync_to`](ClockRenderer::sync_to) plans the upcoming
//!   boundary so each transition lands exactly on the tick.

use crate::canvas::{GlyphCanvas, Scratch};
use crate::font::{Font, Glyph, DRAW_HEIGHT};
use crate::geometry::{Extent, Rect};
use crate::math::{accelerate5, progress};
use crate::surface::GlyphSurface;
use crate::time::{until_next_boundary, Boundary, HourCycle, TimeValue};
use crate::{ClockPaints, RenderOptions};
use chrono::Timelike;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use std::time::Duration;
use tracing::{debug, warn};

/// Observable animation state of a renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Animating,
}

/// How glyphs reach the target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DrawMode {
    /// Paint at final scale. The only mode that draws outlines, used for
    /// ambient displays.
    Direct,
    /// Paint on a design-grid surface and resample it down.
    #[default]
    Offscreen,
}

/// Glyph assignment and stagger timing for one current/next string pair.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnimationPlan {
    glyphs: Vec<Glyph>,
    /// Changing positions, right-most first.
    animated: Vec<usize>,
    duration: Duration,
    glyph_duration: Duration,
}

impl AnimationPlan {
    /// Compares `current` and `next` position by position.
    ///
    /// Colons are never animated. If `next` is shorter, the missing
    /// positions rest at their current character.
    pub fn diff(font: &Font, current: &str, next: &str, options: &RenderOptions) -> Self {
        let mut glyphs = Vec::with_capacity(current.len());
        let mut animated = Vec::new();
        let mut next_chars = next.chars();

        for (i, c1) in current.chars().enumerate() {
            let c2 = next_chars.next().unwrap_or(c1);
            if c1 == ':' {
                glyphs.push(Glyph::Colon);
            } else if c1 == c2 {
                glyphs.push(font.resting(c1));
            } else {
                glyphs.push(font.transition(c1, c2));
                animated.push(i);
            }
        }
        animated.reverse();

        let glyph_duration = options.glyph_anim_duration();
        let duration = match animated.len() {
            0 => Duration::ZERO,
            n => options.glyph_anim_average_delay() * n as u32 + glyph_duration,
        };

        Self {
            glyphs,
            animated,
            duration,
            glyph_duration,
        }
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Animating positions in start order (right-most first).
    pub fn animated_positions(&self) -> &[usize] {
        &self.animated
    }

    pub fn is_animated(&self, position: usize) -> bool {
        self.animated.contains(&position)
    }

    /// Total time from the first glyph starting to the last one finishing.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Start offset of the `order`-th animating glyph, within a window of
    /// `duration - glyph_duration`.
    pub fn start_offset(&self, order: usize) -> Duration {
        let count = self.animated.len();
        if count <= 1 {
            return Duration::ZERO;
        }
        let window = self.duration.saturating_sub(self.glyph_duration);
        let f = accelerate5(order as f32 / (count - 1) as f32);
        window.mul_f64(f64::from(f))
    }

    /// Progress of the glyph at `position` after `elapsed` animation time.
    pub fn progress_at(&self, position: usize, elapsed: Duration) -> f32 {
        let Some(order) = self.animated.iter().position(|&p| p == position) else {
            return 0.0;
        };
        let start = millis(self.start_offset(order));
        progress(millis(elapsed), start, start + millis(self.glyph_duration))
    }
}

fn millis(d: Duration) -> f32 {
    (d.as_secs_f64() * 1000.0) as f32
}

/// One positioned glyph from the layout pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphLayout {
    pub glyph: Glyph,
    pub progress: f32,
    /// Box in pixels relative to the clock's top-left corner
    pub rect: Rect,
}

/// Stateful renderer for one logical clock.
pub struct ClockRenderer {
    options: RenderOptions,
    paints: ClockPaints,
    font: Font,
    plan: AnimationPlan,
    anim_time: Duration,
    /// Time to the planned boundary at the last wall-clock sync
    until_boundary: Option<Duration>,
    shown: Option<TimeValue>,
    /// Instants the current plan morphs between
    planned: Option<(TimeValue, TimeValue)>,
    scratch: Scratch,
    direct: Option<GlyphSurface>,
    offscreen: Option<GlyphSurface>,
}

impl ClockRenderer {
    pub fn new(options: RenderOptions, paints: ClockPaints) -> Self {
        let (direct, offscreen) = surfaces(options.text_size);
        Self {
            options,
            paints,
            font: Font::new(),
            plan: AnimationPlan::default(),
            anim_time: Duration::ZERO,
            until_boundary: None,
            shown: None,
            planned: None,
            scratch: Scratch::new(),
            direct,
            offscreen,
        }
    }

    /// Replaces the options and re-plans the same transition with the new
    /// timing. The animation time is kept.
    ///
    /// After a 12/24-hour switch the shown and planned instants are
    /// renumbered for the new cycle, so the clock keeps its place.
    pub fn configure(&mut self, options: RenderOptions) {
        if options.text_size != self.options.text_size {
            (self.direct, self.offscreen) = surfaces(options.text_size);
        }
        self.options = options;
        let cycle = HourCycle::from_24_hour(self.options.is_24_hour);
        self.shown = self.shown.map(|t| t.with_cycle(cycle));
        if let Some((current, next)) = self.planned {
            self.build_plan(&current.with_cycle(cycle), &next.with_cycle(cycle));
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Swaps colours. Layout is unaffected.
    pub fn set_paints(&mut self, paints: ClockPaints) {
        self.paints = paints;
    }

    pub fn paints(&self) -> &ClockPaints {
        &self.paints
    }

    pub fn plan(&self) -> &AnimationPlan {
        &self.plan
    }

    /// Plans the transition from `time` to its successor and rewinds the
    /// animation clock.
    pub fn set_time(&mut self, time: &TimeValue) {
        self.replan(time, &time.next());
        self.shown = Some(*time);
        self.until_boundary = None;
    }

    pub fn set_anim_time(&mut self, anim_time: Duration) {
        self.anim_time = anim_time;
    }

    pub fn anim_time(&self) -> Duration {
        self.anim_time
    }

    /// Advances the logical clock to `time`, animating from the shown string.
    ///
    /// Any jump animates, even one with no catalog transition; those
    /// positions morph through the fallback glyph. The first update settles
    /// at `time` and a repeat leaves the running animation alone.
    pub fn update(&mut self, time: &TimeValue) {
        match self.shown {
            Some(shown) if shown == *time => return,
            Some(shown) => self.replan(&shown, time),
            None => self.replan(time, time),
        }
        self.shown = Some(*time);
        self.until_boundary = None;
    }

    /// Plans the upcoming seconds (or minutes) boundary from wall-clock `now`.
    ///
    /// The animation time is set so that every transition finishes exactly
    /// on the boundary; before the animation window opens all glyphs rest.
    pub fn sync_to<T: Timelike>(&mut self, now: &T) {
        let cycle = HourCycle::from_24_hour(self.options.is_24_hour);
        let sampled = TimeValue::from_time(now, cycle);
        let (current, boundary) = if self.options.only_seconds {
            (sampled.remove_hours_minutes(), Boundary::Second)
        } else {
            (sampled.remove_seconds(), Boundary::Minute)
        };

        if self.shown != Some(current) || self.until_boundary.is_none() {
            self.replan(&current, &current.next());
            self.shown = Some(current);
        }

        let until = until_next_boundary(now, boundary);
        let duration = self.plan.duration();
        self.anim_time = duration.saturating_sub(until);
        self.until_boundary = Some(until);
    }

    /// Plans `current -> next` and rewinds the animation clock.
    fn replan(&mut self, current: &TimeValue, next: &TimeValue) {
        self.build_plan(current, next);
        self.anim_time = Duration::ZERO;
    }

    fn build_plan(&mut self, current: &TimeValue, next: &TimeValue) {
        let current_str = current.format_string();
        let next_str = next.format_string();
        self.plan = AnimationPlan::diff(&self.font, &current_str, &next_str, &self.options);
        self.planned = Some((*current, *next));
        debug!(
            current = %current_str,
            next = %next_str,
            animating = self.plan.animated_positions().len(),
            duration_ms = self.plan.duration().as_millis() as u64,
            "animation planned"
        );
    }

    pub fn phase(&self) -> Phase {
        let waiting = self
            .until_boundary
            .is_some_and(|until| until > self.plan.duration());
        if self.plan.animated_positions().is_empty() || waiting || self.anim_time >= self.plan.duration() {
            Phase::Idle
        } else {
            Phase::Animating
        }
    }

    /// How long the host may wait before the picture next changes.
    ///
    /// Zero while animating. When synced to a wall clock, the time until the
    /// next animation opens. Otherwise nothing is scheduled and the result
    /// is [`Duration::MAX`].
    pub fn time_until_next_animation_boundary(&self) -> Duration {
        if self.phase() == Phase::Animating {
            return Duration::ZERO;
        }
        match self.until_boundary {
            Some(until) => until.saturating_sub(self.plan.duration()),
            None => Duration::MAX,
        }
    }

    /// Progress of the glyph at `position` at the current animation time.
    pub fn glyph_progress(&self, position: usize) -> f32 {
        self.plan.progress_at(position, self.anim_time)
    }

    fn layout_pass(&self, mut visit: impl FnMut(GlyphLayout)) {
        let text_size = self.options.text_size;
        let mut x = 0.0f32;
        for (i, &glyph) in self.plan.glyphs().iter().enumerate() {
            let t = self.glyph_progress(i);
            let width = glyph.width_at(t) * text_size / DRAW_HEIGHT;
            visit(GlyphLayout {
                glyph,
                progress: t,
                rect: Rect {
                    left: x,
                    top: 0.0,
                    right: x + width,
                    bottom: text_size,
                },
            });
            x += (width + self.options.char_spacing).floor();
        }
    }

    /// Positions of every glyph at the current animation state.
    pub fn layout(&self) -> Vec<GlyphLayout> {
        let mut boxes = Vec::with_capacity(self.plan.glyphs().len());
        self.layout_pass(|b| boxes.push(b));
        boxes
    }

    /// Bounding box of the clock at the current animation state.
    pub fn measure(&self) -> Extent {
        let mut extent = Extent::default();
        self.layout_pass(|b| {
            extent.width = extent.width.max(b.rect.right);
            extent.height = extent.height.max(b.rect.bottom);
        });
        extent
    }

    /// Draws through the offscreen surface with `origin` as top-left corner.
    pub fn draw<D>(&mut self, target: &mut D, origin: Point) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        self.draw_with(target, origin, DrawMode::Offscreen)
    }

    /// Draws every glyph through the surface for `mode`.
    ///
    /// Outline paints only take effect in [`DrawMode::Direct`].
    pub fn draw_with<D>(&mut self, target: &mut D, origin: Point, mode: DrawMode) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        let boxes = self.layout();
        let (surface, strokes) = match mode {
            DrawMode::Direct => (self.direct.as_mut(), self.paints.strokes.as_ref()),
            DrawMode::Offscreen => (self.offscreen.as_mut(), None),
        };
        let Some(surface) = surface else {
            return Ok(());
        };

        for b in boxes {
            let (glyph, t) = snap_to_rest(b.glyph, b.progress);
            let left = origin.x as f32 + b.rect.left;
            let top = origin.y as f32 + b.rect.top;

            self.scratch.clear();
            glyph.draw(t, &mut GlyphCanvas::new(&mut self.scratch, surface.glyph_transform(left, top)));
            surface.paint(&self.scratch, &self.paints, strokes);
            surface.composite(target, left, top, self.paints.background)?;
        }
        Ok(())
    }
}

fn surfaces(text_size: f32) -> (Option<GlyphSurface>, Option<GlyphSurface>) {
    let direct = GlyphSurface::direct(text_size);
    let offscreen = GlyphSurface::offscreen(text_size);
    if direct.is_none() || offscreen.is_none() {
        warn!(text_size, "glyph surface could not be allocated, affected draws are skipped");
    }
    (direct, offscreen)
}

/// Exact boundary progress draws the resting glyph instead of the transition.
fn snap_to_rest(glyph: Glyph, t: f32) -> (Glyph, f32) {
    if t <= 0.0 {
        (glyph.canonical_start(), 0.0)
    } else if t >= 1.0 {
        (glyph.canonical_end(), 0.0)
    } else {
        (glyph, t)
    }
}
