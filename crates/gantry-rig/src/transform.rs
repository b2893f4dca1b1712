//! World transform composition for a [`Shape`].
//!
//! Innermost (applied first) on the right:
//!
//! ```text
//! T(+pivot) · Rz · Ry · Rx · T(-pivot) · T(+position) · Ry(local) · T(-position)
//! ```
//!
//! The pivot rotation applies X, then Y, then Z. The local spin turns the shape about
//! its own center before the pivot rotation moves it, so a dependent cube can spin in
//! place and still orbit the hierarchy pivot.

use glam::{Mat4, Vec3};

use crate::shape::Shape;

/// Pivot rotation only: `T(+pivot) · Rz · Ry · Rx · T(-pivot)`.
pub fn pivot_rotation(shape: &Shape) -> Mat4 {
    let pivot = shape.pivot();
    Mat4::from_translation(pivot)
        * Mat4::from_rotation_z(shape.rotate_z().to_radians())
        * Mat4::from_rotation_y(shape.rotate_y().to_radians())
        * Mat4::from_rotation_x(shape.rotate_x().to_radians())
        * Mat4::from_translation(-pivot)
}

/// Local spin only: `T(+position) · Ry(local) · T(-position)`.
pub fn local_rotation(shape: &Shape) -> Mat4 {
    let position = shape.position();
    Mat4::from_translation(position)
        * Mat4::from_rotation_y(shape.local_rotate_y().to_radians())
        * Mat4::from_translation(-position)
}

/// Full world transform for vertices emitted around `shape.position()`.
#[inline]
pub fn world_transform(shape: &Shape) -> Mat4 {
    pivot_rotation(shape) * local_rotation(shape)
}

#[inline]
pub fn transform_point(shape: &Shape, p: Vec3) -> Vec3 {
    world_transform(shape).transform_point3(p)
}
