use glam::Mat4;

use super::QuadCmd;
use crate::coords::Viewport;

/// Recorded draw stream for a frame.
///
/// Performance characteristics:
/// - `push()` is O(1)
/// - `clear()` keeps capacity, so steady-state frames do not allocate
#[derive(Debug)]
pub struct DrawList {
    quads: Vec<QuadCmd>,
    projection: Mat4,
    viewport: Option<Viewport>,
    skipped: usize,
}

impl Default for DrawList {
    fn default() -> Self {
        Self {
            quads: Vec::new(),
            projection: Mat4::IDENTITY,
            viewport: None,
            skipped: 0,
        }
    }
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded quads. Keeps allocated capacity, the projection and the viewport.
    #[inline]
    pub fn clear(&mut self) {
        self.quads.clear();
        self.skipped = 0;
    }

    #[inline]
    pub fn set_projection(&mut self, projection: Mat4) {
        self.projection = projection;
    }

    #[inline]
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// Target rectangle in physical pixels. Invalid sizes are ignored.
    #[inline]
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if viewport.is_valid() {
            self.viewport = Some(viewport);
        }
    }

    /// Viewport requested by the recorder, if any. Renderers fall back to the full
    /// target when unset.
    #[inline]
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Records a quad. Non-finite quads are dropped and counted.
    #[inline]
    pub fn push(&mut self, quad: QuadCmd) {
        if quad.is_finite() {
            self.quads.push(quad);
        } else {
            self.skipped += 1;
        }
    }

    #[inline]
    pub fn quads(&self) -> &[QuadCmd] {
        &self.quads
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.quads.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    /// Quads dropped since the last `clear()`.
    #[inline]
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}
