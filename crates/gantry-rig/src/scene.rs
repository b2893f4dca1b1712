use crate::config::{Ortho, SceneConfig};
use crate::emit::{emit_shape, Quad, QuadSink, Rgb};
use crate::rig::Rig;
use crate::rules::{InputRuleEngine, KeySource, Outcome, RigKey};

/// Drawable surface size in physical pixels.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

/// Drawing capability the scene renders through.
///
/// Calls arrive in a fixed order each frame:
/// `begin_frame`, `set_projection`, `set_color`, `emit_quad`..., `present_frame`.
pub trait RenderBackend {
    fn begin_frame(&mut self, size: WindowSize);
    fn set_projection(&mut self, ortho: &Ortho);
    /// Color applied to quads emitted without one.
    fn set_color(&mut self, color: Rgb);
    fn emit_quad(&mut self, quad: Quad);
    fn present_frame(&mut self);
}

struct BackendSink<'a, B: ?Sized>(&'a mut B);

impl<B: RenderBackend + ?Sized> QuadSink for BackendSink<'_, B> {
    fn quad(&mut self, quad: Quad) {
        self.0.emit_quad(quad);
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameControl {
    Continue,
    /// The exit key was released; the loop should stop.
    Close,
}

/// Owns the rig and projection; drives one frame at a time.
#[derive(Debug, Clone)]
pub struct Scene {
    rig: Rig,
    rules: InputRuleEngine,
    ortho: Ortho,
    base_color: Rgb,
    size: WindowSize,
    last_outcome: Option<Outcome>,
}

impl Scene {
    pub fn new(config: SceneConfig, size: WindowSize) -> Self {
        let rig = Rig::new(&config.rig);
        log::debug!(
            "scene created: {}x{} px, ortho {:?}, column stretch {}",
            size.width,
            size.height,
            config.ortho,
            rig.primary().stretch_y()
        );
        Self {
            rig,
            rules: InputRuleEngine::new(config.rig),
            ortho: config.ortho,
            base_color: config.base_color,
            size,
            last_outcome: None,
        }
    }

    #[inline]
    pub fn rig(&self) -> &Rig {
        &self.rig
    }

    #[inline]
    pub fn size(&self) -> WindowSize {
        self.size
    }

    #[inline]
    pub fn ortho(&self) -> Ortho {
        self.ortho
    }

    /// Rule result of the most recent frame, if any rule matched.
    #[inline]
    pub fn last_outcome(&self) -> Option<Outcome> {
        self.last_outcome
    }

    /// Records a new surface size. Zero-sized updates (minimised windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if self.size.width != width || self.size.height != height {
            log::debug!("scene resized to {width}x{height}");
        }
        self.size = WindowSize { width, height };
    }

    /// Applies input, re-derives the floor, and renders every shape.
    pub fn frame(
        &mut self,
        keys: &(impl KeySource + ?Sized),
        backend: &mut (impl RenderBackend + ?Sized),
    ) -> FrameControl {
        self.last_outcome = self.rules.step(keys, &mut self.rig);
        self.rig.place_floor(self.rules.config());

        self.render(backend);

        if keys.was_released(RigKey::Exit) {
            FrameControl::Close
        } else {
            FrameControl::Continue
        }
    }

    /// Renders the current state without applying input.
    pub fn render(&self, backend: &mut (impl RenderBackend + ?Sized)) {
        backend.begin_frame(self.size);
        backend.set_projection(&self.ortho);
        backend.set_color(self.base_color);

        let mut sink = BackendSink(&mut *backend);
        for (_, shape) in self.rig.iter() {
            emit_shape(shape, &mut sink);
        }

        backend.present_frame();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::Face;
    use crate::rig::Part;
    use crate::rules::KeySnapshot;

    #[derive(Debug, PartialEq)]
    enum Call {
        Begin(WindowSize),
        Projection(Ortho),
        Color(Rgb),
        Quad(Face, Option<Rgb>),
        Present,
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl RenderBackend for Recorder {
        fn begin_frame(&mut self, size: WindowSize) {
            self.calls.push(Call::Begin(size));
        }
        fn set_projection(&mut self, ortho: &Ortho) {
            self.calls.push(Call::Projection(*ortho));
        }
        fn set_color(&mut self, color: Rgb) {
            self.calls.push(Call::Color(color));
        }
        fn emit_quad(&mut self, quad: Quad) {
            self.calls.push(Call::Quad(quad.face, quad.color));
        }
        fn present_frame(&mut self) {
            self.calls.push(Call::Present);
        }
    }

    const SIZE: WindowSize = WindowSize { width: 600, height: 600 };

    fn scene() -> Scene {
        Scene::new(SceneConfig::default(), SIZE)
    }

    #[test]
    fn frame_calls_backend_in_order() {
        let mut scene = scene();
        let mut backend = Recorder::default();
        let control = scene.frame(&KeySnapshot::default(), &mut backend);

        assert_eq!(control, FrameControl::Continue);
        assert_eq!(backend.calls.len(), 3 + 4 * 6 + 1);
        assert_eq!(backend.calls[0], Call::Begin(SIZE));
        assert_eq!(backend.calls[1], Call::Projection(Ortho::cube(20.0)));
        assert!(matches!(backend.calls[2], Call::Color(_)));
        assert_eq!(backend.calls.last(), Some(&Call::Present));
    }

    #[test]
    fn only_floor_is_uncolored() {
        let mut scene = scene();
        let mut backend = Recorder::default();
        scene.frame(&KeySnapshot::default(), &mut backend);

        let colors: Vec<bool> = backend
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Quad(_, color) => Some(color.is_some()),
                _ => None,
            })
            .collect();
        assert_eq!(colors.len(), 24);
        assert!(colors[..18].iter().all(|&c| c));
        assert!(colors[18..].iter().all(|&c| !c));
    }

    #[test]
    fn frame_applies_rules_then_floor() {
        let mut scene = scene();
        let mut backend = Recorder::default();
        let up = KeySnapshot::holding([RigKey::Up]);

        scene.frame(&up, &mut backend);

        assert_eq!(scene.rig().primary().stretch_y(), 9.0);
        assert_eq!(scene.rig().primary_bottom(), -9.0);
        assert_eq!(scene.rig().floor().y(), 3.5 * -9.0);
        assert!(matches!(scene.last_outcome(), Some(Outcome::Applied(_))));
    }

    #[test]
    fn exit_release_requests_close() {
        let mut scene = scene();
        let mut backend = Recorder::default();
        let exit = KeySnapshot::releasing([RigKey::Exit]);
        assert_eq!(scene.frame(&exit, &mut backend), FrameControl::Close);

        let other = KeySnapshot::releasing([RigKey::Up]);
        assert_eq!(scene.frame(&other, &mut backend), FrameControl::Continue);
    }

    #[test]
    fn zero_resize_is_ignored() {
        let mut scene = scene();
        scene.resize(0, 480);
        assert_eq!(scene.size(), SIZE);
        scene.resize(800, 480);
        assert_eq!(scene.size(), WindowSize { width: 800, height: 480 });
    }

    #[test]
    fn shapes_are_mutated_in_place() {
        let mut scene = scene();
        let mut backend = Recorder::default();
        let floor_before = scene.rig().shape(Part::Floor) as *const _;

        let right = KeySnapshot::holding([RigKey::Right]);
        for _ in 0..5 {
            scene.frame(&right, &mut backend);
        }
        assert_eq!(scene.rig().shape(Part::Floor) as *const _, floor_before);
        assert_eq!(scene.rig().primary().rotate_y(), 10.0);
    }
}
