//! Gantry engine crate.
//!
//! Platform and GPU runtime: one window, a depth-tested quad renderer, keyboard input
//! and frame timing. Scene semantics live in higher layers.

pub mod core;
pub mod device;
pub mod input;
pub mod time;
pub mod window;

pub mod coords;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
