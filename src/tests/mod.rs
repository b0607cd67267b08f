//! # Clock Scenario Tests
//!
//! End-to-end behaviour of the renderer across module boundaries: time
//! formatting feeding the diff, stagger timing, and pixel output through the
//! in-memory framebuffer. Module-level unit tests live next to their code.

mod animation_tests;
mod drawing_tests;
