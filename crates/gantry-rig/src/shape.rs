use glam::Vec3;

/// Parametric state of one rectangular prism.
///
/// Setters return `&mut Self` so several can be chained, but they never validate:
/// constraints are owned by the rule engine (`rules`), not by the shape.
///
/// Angles are in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Shape {
    size: f32,
    stretch: Vec3,
    position: Vec3,
    pivot: Vec3,
    rotate: Vec3,
    local_rotate_y: f32,
    colorize: bool,
}

impl Default for Shape {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Shape {
    /// Unit stretch at the origin, per-face colors on.
    pub fn new(size: f32) -> Self {
        Self {
            size,
            stretch: Vec3::ONE,
            position: Vec3::ZERO,
            pivot: Vec3::ZERO,
            rotate: Vec3::ZERO,
            local_rotate_y: 0.0,
            colorize: true,
        }
    }

    pub fn at(size: f32, x: f32, y: f32, z: f32) -> Self {
        let mut shape = Self::new(size);
        shape.position = Vec3::new(x, y, z);
        shape
    }

    // ── size / stretch ────────────────────────────────────────────────────

    #[inline]
    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn set_size(&mut self, size: f32) -> &mut Self {
        self.size = size;
        self
    }

    #[inline]
    pub fn stretch_x(&self) -> f32 {
        self.stretch.x
    }

    #[inline]
    pub fn stretch_y(&self) -> f32 {
        self.stretch.y
    }

    #[inline]
    pub fn stretch_z(&self) -> f32 {
        self.stretch.z
    }

    pub fn set_stretch_x(&mut self, v: f32) -> &mut Self {
        self.stretch.x = v;
        self
    }

    pub fn set_stretch_y(&mut self, v: f32) -> &mut Self {
        self.stretch.y = v;
        self
    }

    pub fn set_stretch_z(&mut self, v: f32) -> &mut Self {
        self.stretch.z = v;
        self
    }

    /// `size * stretch / 2` on each axis.
    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        self.stretch * (self.size * 0.5)
    }

    // ── position ──────────────────────────────────────────────────────────

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.position.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.position.y
    }

    #[inline]
    pub fn z(&self) -> f32 {
        self.position.z
    }

    pub fn set_x(&mut self, v: f32) -> &mut Self {
        self.position.x = v;
        self
    }

    pub fn set_y(&mut self, v: f32) -> &mut Self {
        self.position.y = v;
        self
    }

    pub fn set_z(&mut self, v: f32) -> &mut Self {
        self.position.z = v;
        self
    }

    pub fn set_position(&mut self, position: Vec3) -> &mut Self {
        self.position = position;
        self
    }

    // ── pivot ─────────────────────────────────────────────────────────────

    /// Point the primary rotation (`rotate_x/y/z`) is applied about.
    #[inline]
    pub fn pivot(&self) -> Vec3 {
        self.pivot
    }

    pub fn set_pivot(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.pivot = Vec3::new(x, y, z);
        self
    }

    pub fn set_pivot_point(&mut self, pivot: Vec3) -> &mut Self {
        self.pivot = pivot;
        self
    }

    // ── rotation ──────────────────────────────────────────────────────────

    #[inline]
    pub fn rotate_x(&self) -> f32 {
        self.rotate.x
    }

    #[inline]
    pub fn rotate_y(&self) -> f32 {
        self.rotate.y
    }

    #[inline]
    pub fn rotate_z(&self) -> f32 {
        self.rotate.z
    }

    pub fn set_rotate_x(&mut self, deg: f32) -> &mut Self {
        self.rotate.x = deg;
        self
    }

    pub fn set_rotate_y(&mut self, deg: f32) -> &mut Self {
        self.rotate.y = deg;
        self
    }

    pub fn set_rotate_z(&mut self, deg: f32) -> &mut Self {
        self.rotate.z = deg;
        self
    }

    /// Spin about the shape's own position, layered under the pivot rotation.
    #[inline]
    pub fn local_rotate_y(&self) -> f32 {
        self.local_rotate_y
    }

    pub fn set_local_rotate_y(&mut self, deg: f32) -> &mut Self {
        self.local_rotate_y = deg;
        self
    }

    // ── color mode ────────────────────────────────────────────────────────

    #[inline]
    pub fn colorize(&self) -> bool {
        self.colorize
    }

    pub fn colorize_on(&mut self) -> &mut Self {
        self.colorize = true;
        self
    }

    pub fn colorize_off(&mut self) -> &mut Self {
        self.colorize = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_shape_is_unit_stretch_at_origin() {
        let s = Shape::new(2.0);
        assert_eq!(s.size(), 2.0);
        assert_eq!(s.half_extents(), Vec3::ONE);
        assert_eq!(s.position(), Vec3::ZERO);
        assert_eq!(s.pivot(), Vec3::ZERO);
        assert!(s.colorize());
    }

    #[test]
    fn half_extents_follow_stretch() {
        let mut s = Shape::new(2.0);
        s.set_stretch_x(4.0).set_stretch_y(8.0);
        assert_eq!(s.half_extents(), Vec3::new(4.0, 8.0, 1.0));
    }

    #[test]
    fn chained_setters_keep_net_state() {
        let mut s = Shape::at(2.0, 1.0, 2.0, 3.0);
        s.set_y(7.0)
            .set_pivot(0.0, 7.0, 0.0)
            .set_rotate_x(10.0)
            .set_rotate_x(12.0)
            .colorize_off();

        assert_eq!(s.position(), Vec3::new(1.0, 7.0, 3.0));
        assert_eq!(s.pivot(), Vec3::new(0.0, 7.0, 0.0));
        assert_eq!(s.rotate_x(), 12.0);
        assert!(!s.colorize());
    }

    #[test]
    fn setters_do_not_validate() {
        let mut s = Shape::new(1.0);
        s.set_stretch_x(-3.0);
        assert_eq!(s.stretch_x(), -3.0);
    }
}
