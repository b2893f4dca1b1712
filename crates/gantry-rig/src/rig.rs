use glam::Vec3;

use crate::config::RigConfig;
use crate::shape::Shape;

/// Stable handle to one of the four shapes of a [`Rig`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Part {
    /// Vertical column.
    Primary,
    /// Horizontal arm on top of the column.
    Secondary,
    /// Hanger below the far end of the arm.
    Tertiary,
    Floor,
}

impl Part {
    /// Paint order.
    pub const ALL: [Part; 4] = [Part::Primary, Part::Secondary, Part::Tertiary, Part::Floor];

    #[inline]
    const fn index(self) -> usize {
        match self {
            Part::Primary => 0,
            Part::Secondary => 1,
            Part::Tertiary => 2,
            Part::Floor => 3,
        }
    }
}

/// The fixed column / arm / hanger / floor hierarchy.
///
/// Shapes are allocated once here and only ever mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Rig {
    shapes: [Shape; 4],
}

impl Rig {
    /// Builds the assembled rig: the arm rests on the column top and extends along +X,
    /// the hanger hangs from the arm's far end.
    pub fn new(config: &RigConfig) -> Self {
        let mut primary = Shape::new(config.primary_size);
        primary.set_stretch_y(config.primary_stretch_y);

        let top = primary.y() + primary.half_extents().y;

        let mut secondary = Shape::new(config.secondary_size);
        secondary.set_stretch_x(config.secondary_stretch_x);
        let sh = secondary.half_extents();
        secondary
            .set_x(primary.x() + primary.half_extents().x + sh.x)
            .set_y(top - sh.y);

        let mut tertiary = Shape::new(config.tertiary_size);
        tertiary.set_stretch_y(config.tertiary_stretch_y);
        let th = tertiary.half_extents();
        tertiary
            .set_x(secondary.x() + sh.x - th.x)
            .set_y(secondary.y() - sh.y - th.y);

        let mut floor = Shape::new(config.floor_size);
        floor
            .set_stretch_x(config.floor_spread)
            .set_stretch_z(config.floor_depth_spread)
            .colorize_off();

        let mut rig = Self {
            shapes: [primary, secondary, tertiary, floor],
        };
        rig.sync_pivots();
        rig.place_floor(config);
        rig
    }

    #[inline]
    pub fn shape(&self, part: Part) -> &Shape {
        &self.shapes[part.index()]
    }

    #[inline]
    pub fn shape_mut(&mut self, part: Part) -> &mut Shape {
        &mut self.shapes[part.index()]
    }

    #[inline]
    pub fn primary(&self) -> &Shape {
        self.shape(Part::Primary)
    }

    #[inline]
    pub fn secondary(&self) -> &Shape {
        self.shape(Part::Secondary)
    }

    #[inline]
    pub fn tertiary(&self) -> &Shape {
        self.shape(Part::Tertiary)
    }

    #[inline]
    pub fn floor(&self) -> &Shape {
        self.shape(Part::Floor)
    }

    /// Shapes in paint order.
    pub fn iter(&self) -> impl Iterator<Item = (Part, &Shape)> {
        Part::ALL.into_iter().map(move |p| (p, self.shape(p)))
    }

    /// Rotation center of the assembly: on the column axis, at the arm's mid-height.
    pub fn shared_pivot(&self) -> Vec3 {
        let primary = self.primary();
        let top = primary.y() + primary.half_extents().y;
        Vec3::new(primary.x(), top - self.secondary().size() * 0.5, primary.z())
    }

    /// Writes [`Self::shared_pivot`] into the column, arm and hanger.
    pub fn sync_pivots(&mut self) {
        let pivot = self.shared_pivot();
        for part in [Part::Primary, Part::Secondary, Part::Tertiary] {
            self.shape_mut(part).set_pivot_point(pivot);
        }
    }

    /// Lowest point of the column.
    #[inline]
    pub fn primary_bottom(&self) -> f32 {
        let primary = self.primary();
        primary.y() - primary.half_extents().y
    }

    /// Recomputes the floor from the column's current extent.
    ///
    /// The floor center sits at `floor_depth_factor` times the column bottom and its
    /// height is chosen so the top face touches that bottom. Depends only on the
    /// primary shape, so repeated calls are no-ops.
    pub fn place_floor(&mut self, config: &RigConfig) {
        let bottom = self.primary_bottom();
        let (px, pz) = (self.primary().x(), self.primary().z());

        let half_height = ((config.floor_depth_factor - 1.0) * bottom).abs();

        let floor = self.shape_mut(Part::Floor);
        let size = floor.size();
        floor
            .set_x(px)
            .set_y(config.floor_depth_factor * bottom)
            .set_z(pz)
            .set_stretch_x(config.floor_spread)
            .set_stretch_z(config.floor_depth_spread);
        if size > 0.0 {
            floor.set_stretch_y(2.0 * half_height / size);
        }
    }
}

impl Default for Rig {
    fn default() -> Self {
        Self::new(&RigConfig::default())
    }
}
