//! Timing and diff scenarios driven through the public renderer API.

use crate::font::{Font, Glyph};
use crate::renderer::{AnimationPlan, ClockRenderer, Phase};
use crate::theme::DEFAULT_THEME;
use crate::time::{HourCycle, TimeValue};
use crate::RenderOptions;
use std::time::Duration;

fn hour_minute_renderer() -> ClockRenderer {
    ClockRenderer::new(RenderOptions::default(), DEFAULT_THEME.paints())
}

fn seconds_renderer() -> ClockRenderer {
    ClockRenderer::new(RenderOptions::default().seconds_variant(), DEFAULT_THEME.paints())
}

/// Rolling over the hour in 12-hour mode changes both hour digits and both
/// minute digits, while the colon stays put.
#[test]
fn hour_rollover_animates_four_digits() {
    let time = TimeValue::hms(12, 59, 59, HourCycle::Twelve);
    assert_eq!(time.next(), TimeValue::hms(1, 0, 0, HourCycle::Twelve));

    let mut renderer = hour_minute_renderer();
    renderer.set_time(&time.remove_seconds());

    let plan = renderer.plan();
    let mut animated = plan.animated_positions().to_vec();
    animated.sort_unstable();
    assert_eq!(animated, vec![0, 1, 3, 4], "exactly the four digits animate");
    assert_eq!(plan.glyphs()[2], Glyph::Colon);
    assert!(!plan.is_animated(2), "colon never animates");
}

/// Colons keep their glyph whenever the full hh:mm:ss string changes.
#[test]
fn colons_never_animate_with_seconds() {
    let time = TimeValue::hms(12, 59, 59, HourCycle::Twelve);
    let options = RenderOptions::default();
    let plan = AnimationPlan::diff(&Font::new(), &time.format_string(), &time.next().format_string(), &options);

    assert_eq!(plan.animated_positions().len(), 6);
    for (i, c) in time.format_string().chars().enumerate() {
        if c == ':' {
            assert_eq!(plan.glyphs()[i], Glyph::Colon);
            assert!(!plan.is_animated(i), "colon at {} animated", i);
        }
    }
}

/// "59" -> "00" on the seconds clock starts the ones digit first.
#[test]
fn seconds_ones_digit_starts_first() {
    let mut options = RenderOptions::default().seconds_variant();
    // give the stagger some room so the ordering is observable
    options.glyph_anim_average_delay_ms = 400;
    let mut renderer = ClockRenderer::new(options, DEFAULT_THEME.paints());
    renderer.set_time(&TimeValue::seconds_only(59));

    assert_eq!(renderer.plan().animated_positions(), &[1, 0]);

    renderer.set_anim_time(Duration::from_millis(200));
    let ones = renderer.glyph_progress(1);
    let tens = renderer.glyph_progress(0);
    assert!(ones > 0.0, "ones digit should be moving, got {}", ones);
    assert_eq!(tens, 0.0, "tens digit should not have started");
}

/// Seconds strings are always two characters wide, 12 or 24 hour.
#[test]
fn seconds_strings_are_two_digits() {
    let mut value = TimeValue::seconds_only(0);
    for _ in 0..60 {
        assert_eq!(value.format_string().chars().count(), 2, "{}", value);
        value = value.next();
    }
    assert_eq!(value, TimeValue::seconds_only(0), "sixty steps wrap around");
}

/// Every changed digit adds one stagger step to the glyph duration.
#[test]
fn seconds_duration_by_changed_digits() {
    let options = RenderOptions {
        glyph_anim_average_delay_ms: 120,
        ..RenderOptions::default().seconds_variant()
    };
    let font = Font::new();
    let one = AnimationPlan::diff(&font, "41", "42", &options);
    let two = AnimationPlan::diff(&font, "49", "50", &options);

    assert_eq!(one.duration(), Duration::from_millis(960 + 120));
    assert_eq!(
        two.duration(),
        options.glyph_anim_duration() + options.glyph_anim_average_delay() * 2
    );
}

/// Formatted consecutive instants keep separators at the same indices.
#[test]
fn consecutive_strings_share_layout() {
    for cycle in [HourCycle::Twelve, HourCycle::TwentyFour] {
        let first_hour = match cycle {
            HourCycle::Twelve => 12,
            HourCycle::TwentyFour => 0,
        };
        let mut value = TimeValue::hour_minute(first_hour, 0, cycle);
        for _ in 0..(24 * 60) {
            let a = value.format_string();
            let b = value.next().format_string();
            assert_eq!(a.len(), b.len(), "{a:?} vs {b:?}");
            let colons = |s: &str| s.char_indices().filter(|(_, c)| *c == ':').map(|(i, _)| i).collect::<Vec<_>>();
            assert_eq!(colons(&a), colons(&b));
            value = value.next();
        }
    }
}

/// The renderer returns to idle once the whole staggered window has run.
#[test]
fn phase_returns_to_idle() {
    let mut renderer = hour_minute_renderer();
    renderer.set_time(&TimeValue::hour_minute(9, 59, HourCycle::Twelve));
    let duration = renderer.plan().duration();
    assert_eq!(duration, Duration::from_millis(4 * 500 + 2000));

    renderer.set_anim_time(duration - Duration::from_millis(1));
    assert_eq!(renderer.phase(), Phase::Animating);
    renderer.set_anim_time(duration);
    assert_eq!(renderer.phase(), Phase::Idle);
}

/// Changing timing options re-plans the shown instant.
#[test]
fn configure_replans_with_new_timing() {
    // the seconds clock has no stagger delay
    let mut renderer = seconds_renderer();
    renderer.set_time(&TimeValue::seconds_only(9));
    assert_eq!(renderer.plan().duration(), Duration::from_millis(960));

    let mut options = renderer.options().clone();
    options.glyph_anim_duration_ms = 500;
    renderer.configure(options);
    assert_eq!(renderer.plan().duration(), Duration::from_millis(500));
}

/// Switching to 24-hour numbering renumbers the shown instant in place.
#[test]
fn hour_cycle_switch_replans_in_new_numbering() {
    let mut renderer = hour_minute_renderer();
    renderer.set_time(&TimeValue::hour_minute(9, 59, HourCycle::Twelve));
    renderer.set_anim_time(Duration::from_millis(700));

    let options = RenderOptions {
        is_24_hour: true,
        ..RenderOptions::default()
    };
    renderer.configure(options);
    assert_eq!(renderer.plan().animated_positions(), &[4, 3, 1, 0]);
    assert_eq!(renderer.anim_time(), Duration::from_millis(700), "animation keeps its place");
    assert!(renderer.measure().width > 0.0);
}
