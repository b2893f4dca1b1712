use glam::Vec3;

use crate::paint::Color;

/// One flat-colored quad in world space.
///
/// Corners are counter-clockwise when seen from the visible side; the renderer culls
/// the other side.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct QuadCmd {
    pub corners: [Vec3; 4],
    pub color: Color,
}

impl QuadCmd {
    #[inline]
    pub const fn new(corners: [Vec3; 4], color: Color) -> Self {
        Self { corners, color }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.corners.iter().all(|c| c.is_finite()) && self.color.is_finite()
    }
}
