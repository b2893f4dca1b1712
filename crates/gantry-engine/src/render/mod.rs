//! GPU rendering subsystem.
//!
//! Renderers consume `scene` draw streams and issue GPU commands via wgpu.
//! Each renderer owns its GPU resources (pipelines, buffers) and creates them lazily.
//!
//! Convention:
//! - CPU geometry is in world units.
//! - The vertex shader applies the draw list's projection matrix.
//! - Depth range is `[0, 1]`, nearer is smaller.

mod ctx;
mod quad;

pub use ctx::{RenderCtx, RenderTarget};
pub use quad::QuadRenderer;
