//! Gantry rig: the deformable column / arm / hanger model.
//!
//! This crate is platform-free. It owns the shapes, their transforms, the held-key
//! rules that deform them, and the per-frame scene step. Drawing and key polling are
//! reached through the [`RenderBackend`] and [`KeySource`] traits.

pub mod config;
pub mod emit;
pub mod rig;
pub mod rules;
pub mod scene;
pub mod shape;
pub mod transform;

pub use config::{Ortho, RigConfig, SceneConfig};
pub use emit::{Face, Quad, QuadSink, Rgb};
pub use rig::{Part, Rig};
pub use rules::{Direction, InputRuleEngine, KeySnapshot, KeySource, Outcome, RigKey, Rule};
pub use scene::{FrameControl, RenderBackend, Scene, WindowSize};
pub use shape::Shape;
