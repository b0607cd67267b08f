//! Pixel-level scenarios, using [`Framebuffer`] as the oracle.

use crate::framebuffer::Framebuffer;
use crate::renderer::{ClockRenderer, DrawMode};
use crate::theme::DEFAULT_THEME;
use crate::time::{HourCycle, TimeValue};
use crate::{ClockPaints, RenderOptions};
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::prelude::*;
use std::collections::BTreeSet;
use std::time::Duration;

const MODES: [DrawMode; 2] = [DrawMode::Direct, DrawMode::Offscreen];

fn options() -> RenderOptions {
    RenderOptions {
        text_size: 40.0,
        char_spacing: 6.0,
        ..RenderOptions::default()
    }
}

fn distinct_colours(fb: &Framebuffer) -> usize {
    let mut seen = BTreeSet::new();
    for y in 0..fb.height() as i32 {
        for x in 0..fb.width() as i32 {
            if let Some(p) = fb.pixel(x, y) {
                seen.insert((p.r(), p.g(), p.b()));
            }
        }
    }
    seen.len()
}

fn render(renderer: &mut ClockRenderer, mode: DrawMode) -> Framebuffer {
    let mut fb = Framebuffer::new(260, 80);
    let background = renderer.paints().background.unwrap_or(Rgb888::BLACK);
    fb.clear(background).unwrap();
    renderer.draw_with(&mut fb, Point::new(10, 20), mode).unwrap();
    fb
}

/// Asking for a time past the end renders the same frame as the end itself.
#[test]
fn overshoot_renders_end_state() {
    for mode in MODES {
        let mut renderer = ClockRenderer::new(options(), DEFAULT_THEME.paints());
        renderer.set_time(&TimeValue::hour_minute(12, 59, HourCycle::Twelve));
        let duration = renderer.plan().duration();

        renderer.set_anim_time(duration);
        let at_end = render(&mut renderer, mode);
        renderer.set_anim_time(duration + Duration::from_millis(250));
        let jittered = render(&mut renderer, mode);
        renderer.set_anim_time(Duration::MAX);
        let far = render(&mut renderer, mode);

        assert_eq!(at_end, jittered, "{mode:?}: small overshoot changed the frame");
        assert_eq!(at_end, far, "{mode:?}: large overshoot changed the frame");
    }
}

/// A finished transition is pixel-identical to the next instant at rest.
#[test]
fn finished_transition_matches_resting_successor() {
    for mode in MODES {
        let mut animated = ClockRenderer::new(options(), DEFAULT_THEME.paints());
        animated.set_time(&TimeValue::hour_minute(9, 59, HourCycle::Twelve));
        animated.set_anim_time(animated.plan().duration());

        let mut resting = ClockRenderer::new(options(), DEFAULT_THEME.paints());
        resting.update(&TimeValue::hour_minute(10, 0, HourCycle::Twelve));

        assert_eq!(animated.measure(), resting.measure());
        assert_eq!(render(&mut animated, mode), render(&mut resting, mode), "{mode:?}");
    }
}

/// A transition that has not started is pixel-identical to the current instant at rest.
#[test]
fn unstarted_transition_matches_resting_current() {
    let time = TimeValue::hour_minute(2, 19, HourCycle::Twelve);
    for mode in MODES {
        let mut animated = ClockRenderer::new(options(), DEFAULT_THEME.paints());
        animated.set_time(&time);

        let mut resting = ClockRenderer::new(options(), DEFAULT_THEME.paints());
        resting.update(&time);

        assert_eq!(render(&mut animated, mode), render(&mut resting, mode), "{mode:?}");
    }
}

/// Both drawing paths put ink inside every digit's box.
#[test]
fn direct_and_offscreen_cover_glyph_boxes() {
    let mut renderer = ClockRenderer::new(options(), DEFAULT_THEME.paints());
    renderer.update(&TimeValue::hour_minute(10, 28, HourCycle::Twelve));
    let background = DEFAULT_THEME.dark;

    for mode in MODES {
        let fb = render(&mut renderer, mode);
        for b in renderer.layout() {
            let mut inked = 0;
            for y in b.rect.top as i32..b.rect.bottom as i32 {
                for x in b.rect.left as i32..b.rect.right as i32 {
                    if fb.pixel(10 + x, 20 + y) != Some(background) {
                        inked += 1;
                    }
                }
            }
            assert!(inked > 0, "{mode:?}: {:?} left its box empty", b.glyph);
        }
    }
}

/// Mid-animation frames differ from both ends.
#[test]
fn mid_animation_differs_from_ends() {
    let mut renderer = ClockRenderer::new(options(), DEFAULT_THEME.paints());
    renderer.set_time(&TimeValue::hour_minute(4, 5, HourCycle::Twelve));
    let start = render(&mut renderer, DrawMode::Direct);
    renderer.set_anim_time(Duration::from_millis(1000));
    let middle = render(&mut renderer, DrawMode::Direct);
    renderer.set_anim_time(Duration::from_secs(5));
    let end = render(&mut renderer, DrawMode::Direct);

    assert_ne!(start, middle);
    assert_ne!(middle, end);
}

/// Low-bit outline paints light nothing but their stroke colour.
#[test]
fn low_bit_paints_draw_outlines_only() {
    let mut renderer = ClockRenderer::new(options(), ClockPaints::ambient(true, false));
    renderer.update(&TimeValue::hour_minute(8, 8, HourCycle::Twelve));
    let fb = render(&mut renderer, DrawMode::Direct);

    let mut lit = 0;
    for y in 0..fb.height() as i32 {
        for x in 0..fb.width() as i32 {
            let p = fb.pixel(x, y).unwrap();
            if p == Rgb888::WHITE {
                lit += 1;
            } else {
                assert_eq!(p, Rgb888::BLACK, "unexpected pixel at ({x}, {y})");
            }
        }
    }
    assert!(lit > 0, "outlines should be visible");

    renderer.set_paints(ClockPaints::ambient(false, false));
    let filled = render(&mut renderer, DrawMode::Direct);
    assert_ne!(filled, fb, "grey ambient paints fill the shapes");
}

/// Burn-in outlines on a full-colour screen keep their smoothed edges.
#[test]
fn burn_in_outlines_are_smoothed() {
    let mut renderer = ClockRenderer::new(options(), ClockPaints::ambient(false, true));
    renderer.update(&TimeValue::hour_minute(8, 8, HourCycle::Twelve));
    let fb = render(&mut renderer, DrawMode::Direct);
    assert!(distinct_colours(&fb) > 2, "outline edges blend into the background");
}

/// Outlines belong to the final-scale path; offscreen glyphs are fills only.
#[test]
fn offscreen_mode_draws_no_outlines() {
    let mut renderer = ClockRenderer::new(options(), ClockPaints::ambient(true, true));
    renderer.update(&TimeValue::hour_minute(8, 8, HourCycle::Twelve));
    let fb = render(&mut renderer, DrawMode::Offscreen);
    assert_eq!(fb.count_not(Rgb888::BLACK), 0, "black fills on black leave nothing visible");
}

/// The interactive direct path smooths glyph edges against the background.
#[test]
fn interactive_direct_frames_are_smoothed() {
    let mut renderer = ClockRenderer::new(options(), DEFAULT_THEME.paints());
    renderer.update(&TimeValue::hour_minute(10, 8, HourCycle::Twelve));
    let fb = render(&mut renderer, DrawMode::Direct);
    // background plus three inks, and then edge coverage between them
    assert!(distinct_colours(&fb) > 4, "only {} colours", distinct_colours(&fb));
}

/// Two renderers drawing in turn produce the frames they produce alone.
#[test]
fn renderers_do_not_share_scratch_state() {
    let mut hm = ClockRenderer::new(options(), DEFAULT_THEME.paints());
    let mut seconds = ClockRenderer::new(options().seconds_variant(), DEFAULT_THEME.paints());
    hm.set_time(&TimeValue::hour_minute(6, 59, HourCycle::Twelve));
    hm.set_anim_time(Duration::from_millis(1300));
    seconds.set_time(&TimeValue::seconds_only(29));
    seconds.set_anim_time(Duration::from_millis(400));

    let hm_alone = render(&mut hm, DrawMode::Offscreen);
    let seconds_alone = render(&mut seconds, DrawMode::Offscreen);
    for _ in 0..2 {
        assert_eq!(render(&mut hm, DrawMode::Offscreen), hm_alone);
        assert_eq!(render(&mut seconds, DrawMode::Offscreen), seconds_alone);
    }
}
