use crate::emit::Rgb;

/// Tuning for the rig and its input rules.
///
/// All steps are applied once per frame; they are not scaled by frame time.
#[derive(Debug, Clone, PartialEq)]
pub struct RigConfig {
    /// Stretch change per frame for every resize rule.
    pub stretch_step: f32,
    /// Degrees per frame for every rotation rule.
    pub rotation_step: f32,

    /// Lowest `stretch_x` the secondary may shrink to.
    pub secondary_min_stretch: f32,
    /// Lowest `stretch_y` the tertiary may shrink to.
    pub tertiary_min_stretch: f32,
    /// Primary may not shrink below `secondary.size / divisor + tertiary.stretch_y`.
    pub primary_min_divisor: f32,

    /// Floor center sits at this multiple of the primary's bottom edge.
    pub floor_depth_factor: f32,
    /// Fixed X stretch of the floor.
    pub floor_spread: f32,
    /// Fixed Z stretch of the floor. Kept inside the default view depth so the
    /// front face is not clipped away.
    pub floor_depth_spread: f32,

    pub primary_size: f32,
    pub primary_stretch_y: f32,
    pub secondary_size: f32,
    pub secondary_stretch_x: f32,
    pub tertiary_size: f32,
    pub tertiary_stretch_y: f32,
    pub floor_size: f32,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            stretch_step: 1.0,
            rotation_step: 2.0,

            secondary_min_stretch: SECONDARY_MIN_STRETCH,
            tertiary_min_stretch: TERTIARY_MIN_STRETCH,
            primary_min_divisor: 1.5,

            floor_depth_factor: 3.5,
            floor_spread: 100.0,
            floor_depth_spread: 18.0,

            primary_size: 2.0,
            primary_stretch_y: 8.0,
            secondary_size: 2.0,
            secondary_stretch_x: 4.0,
            tertiary_size: 2.0,
            tertiary_stretch_y: 4.0,
            floor_size: 2.0,
        }
    }
}

pub const SECONDARY_MIN_STRETCH: f32 = 1.0;
pub const TERTIARY_MIN_STRETCH: f32 = 1.0;

/// Axis-aligned orthographic view volume.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ortho {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl Ortho {
    /// `[-half, half]` on every axis.
    pub const fn cube(half: f32) -> Self {
        Self {
            left: -half,
            right: half,
            bottom: -half,
            top: half,
            near: -half,
            far: half,
        }
    }

    /// Right-handed projection with a `[0, 1]` depth range.
    pub fn matrix(&self) -> glam::Mat4 {
        glam::Mat4::orthographic_rh(
            self.left,
            self.right,
            self.bottom,
            self.top,
            self.near,
            self.far,
        )
    }
}

impl Default for Ortho {
    fn default() -> Self {
        Self::cube(20.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub ortho: Ortho,
    pub clear: Rgb,
    /// Color used for faces that are not colorized (the floor).
    pub base_color: Rgb,
    pub rig: RigConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            ortho: Ortho::default(),
            clear: Rgb::new(0.0, 0.0, 0.0),
            base_color: Rgb::new(0.55, 0.55, 0.55),
            rig: RigConfig::default(),
        }
    }
}
