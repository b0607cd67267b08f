//! # Form Clock Application Entry Point
//!
//! This binary drives the morphing clock face from the command line. It supports
//! an ASCII development mode for terminals and PNG output for inspecting
//! individual frames or whole transitions.
//!
//! ## Usage
//! ```text
//! form-clock [--config PATH] [--at HH:MM:SS] [--24h] (--stdout | --watch | --png PATH | --sequence DIR)
//! ```
//! - `--stdout`: print one frame as ASCII
//! - `--watch`: redraw the ASCII face live until interrupted
//! - `--png PATH`: write one frame as a PNG snapshot
//! - `--sequence DIR`: write the 30 fps PNG frames of the hour:minute transition into `--at`

use anyhow::{bail, Context};
use chrono::{Local, NaiveTime, Timelike};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use form_clock_lib::config::Config;
use form_clock_lib::face::ClockFace;
use form_clock_lib::framebuffer::Framebuffer;
use form_clock_lib::renderer::{ClockRenderer, DrawMode, Phase};
use form_clock_lib::time::{HourCycle, TimeValue};
use std::env;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::info;

/// Pixels per ASCII cell column (rows are twice as tall)
const ASCII_CELL: u32 = 4;

/// Longest sleep between live ASCII frames
const WATCH_FRAME_INTERVAL: Duration = Duration::from_millis(100);

const SEQUENCE_FPS: u32 = 30;

/// Value following `flag` on the command line, if the flag is present.
fn flag_value(args: &[String], flag: &str) -> anyhow::Result<Option<String>> {
    match args.iter().position(|a| a == flag) {
        Some(i) => match args.get(i + 1) {
            Some(value) if !value.starts_with("--") => Ok(Some(value.clone())),
            _ => bail!("{flag} requires a value"),
        },
        None => Ok(None),
    }
}

fn parse_time(value: &str) -> anyhow::Result<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .with_context(|| format!("invalid --at time {value:?}, expected HH:MM:SS"))
}

fn frame_buffer(config: &Config) -> Framebuffer {
    Framebuffer::new(config.display.width, config.display.height)
}

/// Renders one face frame at `at`, with every animation settled.
fn render_frame(config: &Config, at: &NaiveTime) -> Framebuffer {
    let mut face = ClockFace::from_config(config);
    face.frame(at, Duration::ZERO);
    let mut fb = frame_buffer(config);
    // Framebuffer drawing is infallible
    let _ = face.draw(&mut fb);
    fb
}

fn print_ascii(fb: &Framebuffer, config: &Config) {
    let background = config.paints().background.unwrap_or(Rgb888::BLACK);
    print!("{}", fb.to_ascii(ASCII_CELL, background));
}

/// Live ASCII face; `offset` shifts the wall clock when `--at` was given.
fn watch(config: &Config, offset: Option<NaiveTime>) -> anyhow::Result<()> {
    let mut face = ClockFace::from_config(config);
    let mut fb = frame_buffer(config);
    let start = Instant::now();
    let base = offset.map(|at| (at, Local::now().time()));

    loop {
        let wall = Local::now().time();
        let now = match base {
            Some((at, started)) => at + (wall - started),
            None => wall,
        };
        face.frame(&now, start.elapsed());
        let _ = face.draw(&mut fb);

        // home the cursor and clear before each frame
        print!("\x1b[H\x1b[2J");
        print_ascii(&fb, config);

        std::thread::sleep(face.time_until_next_frame(&now).min(WATCH_FRAME_INTERVAL));
    }
}

/// Writes every frame of the hour:minute transition that ends at `at`.
fn write_sequence(config: &Config, at: &NaiveTime, dir: &Path) -> anyhow::Result<usize> {
    std::fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let options = config.hour_minute_options();
    let cycle = HourCycle::from_24_hour(options.is_24_hour);
    let paints = config.paints();
    let mode = if config.display.offscreen_glyphs {
        DrawMode::Offscreen
    } else {
        DrawMode::Direct
    };
    let background = paints.background.unwrap_or(Rgb888::BLACK);

    let mut renderer = ClockRenderer::new(options, paints);
    let target = TimeValue::from_time(at, cycle).remove_seconds();
    renderer.set_time(&target.previous());
    info!(from = %target.previous(), to = %target, duration_ms = renderer.plan().duration().as_millis() as u64, "rendering sequence");

    let mut fb = frame_buffer(config);
    let frame = Duration::from_secs(1) / SEQUENCE_FPS;
    let mut index = 0;
    loop {
        renderer.set_anim_time(frame * index as u32);
        let _ = fb.clear(background);
        let size = renderer.measure();
        let origin = Point::new(
            ((config.display.width as f32 - size.width) / 2.0).round() as i32,
            ((config.display.height as f32 - size.height) / 2.0).round() as i32,
        );
        let _ = renderer.draw_with(&mut fb, origin, mode);

        let path: PathBuf = dir.join(format!("frame_{index:04}.png"));
        fb.save_png(&path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        index += 1;

        if renderer.phase() == Phase::Idle {
            return Ok(index);
        }
    }
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();

    let mut config = match flag_value(&args, "--config")? {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    };
    if args.iter().any(|a| a == "--24h") {
        config.display.is_24_hour = true;
    }

    let at = flag_value(&args, "--at")?.map(|v| parse_time(&v)).transpose()?;
    let now = at.unwrap_or_else(|| Local::now().time());

    // Development mode: ASCII output for testing
    if args.iter().any(|a| a == "--stdout") {
        print_ascii(&render_frame(&config, &now), &config);
        return Ok(());
    }

    if args.iter().any(|a| a == "--watch") {
        return watch(&config, at);
    }

    if let Some(path) = flag_value(&args, "--png")? {
        render_frame(&config, &now)
            .save_png(&path)
            .with_context(|| format!("failed to write {path}"))?;
        info!(path = %path, time = %format!("{:02}:{:02}:{:02}", now.hour(), now.minute(), now.second()), "snapshot written");
        return Ok(());
    }

    if let Some(dir) = flag_value(&args, "--sequence")? {
        let frames = write_sequence(&config, &now, Path::new(&dir))?;
        info!(dir = %dir, frames, "sequence written");
        return Ok(());
    }

    bail!("no output selected; use --stdout, --watch, --png PATH or --sequence DIR")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_flag_value() {
        let a = args(&["--png", "out.png", "--24h"]);
        assert_eq!(flag_value(&a, "--png").unwrap().as_deref(), Some("out.png"));
        assert_eq!(flag_value(&a, "--config").unwrap(), None);
        assert!(flag_value(&args(&["--png"]), "--png").is_err());
        assert!(flag_value(&args(&["--png", "--24h"]), "--png").is_err());
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("12:59:59").unwrap(), NaiveTime::from_hms_opt(12, 59, 59).unwrap());
        assert_eq!(parse_time("07:05").unwrap(), NaiveTime::from_hms_opt(7, 5, 0).unwrap());
        assert!(parse_time("25:00:00").is_err());
    }

    #[test]
    fn test_sequence_ends_at_rest() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.display.width = 200;
        config.display.height = 80;
        config.clock.text_size = 32.0;
        config.clock.char_spacing = 6.0;
        let at = NaiveTime::from_hms_opt(10, 0, 0).unwrap();

        let frames = write_sequence(&config, &at, dir.path()).unwrap();
        // " 9:59" -> "10:00" animates four glyphs over 4 * 500 + 2000 ms,
        // sampled at 30 fps up to and including the first settled frame
        assert_eq!(frames, 122);
        assert!(dir.path().join("frame_0000.png").exists());
        assert!(dir.path().join(format!("frame_{:04}.png", frames - 1)).exists());
    }
}
