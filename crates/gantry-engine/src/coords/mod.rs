//! Coordinate types shared between the runtime and renderers.
//!
//! World-space geometry uses `glam` vectors; this module only carries the
//! window-facing sizes.

mod viewport;

pub use viewport::Viewport;
