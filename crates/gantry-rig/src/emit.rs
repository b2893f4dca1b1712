//! Prism → quad emission.
//!
//! One table of six face definitions drives every prism. Corners are listed
//! counter-clockwise when viewed from outside the face, so back-face culling with a
//! CCW front face keeps exactly the visible faces.

use glam::{Mat4, Vec3};

use crate::shape::Shape;
use crate::transform::world_transform;

/// Straight RGB in `[0, 1]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const RED: Rgb = Rgb::new(1.0, 0.0, 0.0);
    pub const GREEN: Rgb = Rgb::new(0.0, 1.0, 0.0);
    pub const BLUE: Rgb = Rgb::new(0.0, 0.0, 1.0);
    pub const MAGENTA: Rgb = Rgb::new(1.0, 0.0, 1.0);
    pub const CYAN: Rgb = Rgb::new(0.0, 1.0, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Face {
    Front,
    Back,
    Top,
    Bottom,
    Right,
    Left,
}

/// One emitted face.
///
/// `color == None` means "draw with the backend's current color".
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quad {
    pub face: Face,
    pub corners: [Vec3; 4],
    pub color: Option<Rgb>,
}

/// Receiver of emitted quads.
pub trait QuadSink {
    fn quad(&mut self, quad: Quad);
}

impl QuadSink for Vec<Quad> {
    fn quad(&mut self, quad: Quad) {
        self.push(quad);
    }
}

/// Sink adapter that maps every corner through `matrix` before forwarding.
pub struct Transformed<'a, S: QuadSink + ?Sized> {
    pub matrix: Mat4,
    pub inner: &'a mut S,
}

impl<S: QuadSink + ?Sized> QuadSink for Transformed<'_, S> {
    fn quad(&mut self, mut quad: Quad) {
        for c in &mut quad.corners {
            *c = self.matrix.transform_point3(*c);
        }
        self.inner.quad(quad);
    }
}

struct FaceDef {
    face: Face,
    normal: Vec3,
    color: Rgb,
    /// Corner signs, multiplied by the half-extents.
    corners: [Vec3; 4],
}

const fn v(x: f32, y: f32, z: f32) -> Vec3 {
    Vec3::new(x, y, z)
}

const FACES: [FaceDef; 6] = [
    FaceDef {
        face: Face::Front,
        normal: Vec3::Z,
        color: Rgb::RED,
        corners: [v(-1., -1., 1.), v(1., -1., 1.), v(1., 1., 1.), v(-1., 1., 1.)],
    },
    FaceDef {
        face: Face::Back,
        normal: Vec3::NEG_Z,
        color: Rgb::GREEN,
        corners: [v(-1., -1., -1.), v(-1., 1., -1.), v(1., 1., -1.), v(1., -1., -1.)],
    },
    FaceDef {
        face: Face::Top,
        normal: Vec3::Y,
        color: Rgb::BLUE,
        corners: [v(-1., 1., -1.), v(-1., 1., 1.), v(1., 1., 1.), v(1., 1., -1.)],
    },
    FaceDef {
        face: Face::Bottom,
        normal: Vec3::NEG_Y,
        color: Rgb::BLUE,
        corners: [v(-1., -1., -1.), v(1., -1., -1.), v(1., -1., 1.), v(-1., -1., 1.)],
    },
    FaceDef {
        face: Face::Right,
        normal: Vec3::X,
        color: Rgb::MAGENTA,
        corners: [v(1., -1., -1.), v(1., 1., -1.), v(1., 1., 1.), v(1., -1., 1.)],
    },
    FaceDef {
        face: Face::Left,
        normal: Vec3::NEG_X,
        color: Rgb::CYAN,
        corners: [v(-1., -1., -1.), v(-1., -1., 1.), v(-1., 1., 1.), v(-1., 1., -1.)],
    },
];

/// Emits the six faces of an axis-aligned prism, in the order
/// front, back, top, bottom, right, left.
pub fn emit_prism(
    half_extents: Vec3,
    center: Vec3,
    colorize: bool,
    sink: &mut (impl QuadSink + ?Sized),
) {
    for def in &FACES {
        sink.quad(Quad {
            face: def.face,
            corners: def.corners.map(|sign| center + sign * half_extents),
            color: colorize.then_some(def.color),
        });
    }
}

/// Emits `shape` in world space (see [`crate::transform`]).
pub fn emit_shape(shape: &Shape, sink: &mut (impl QuadSink + ?Sized)) {
    let mut world = Transformed {
        matrix: world_transform(shape),
        inner: sink,
    };
    emit_prism(shape.half_extents(), shape.position(), shape.colorize(), &mut world);
}

/// Outward normal of a face in prism-local space.
pub fn face_normal(face: Face) -> Vec3 {
    FACES
        .iter()
        .find(|d| d.face == face)
        .map_or(Vec3::ZERO, |d| d.normal)
}
