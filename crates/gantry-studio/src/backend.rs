use gantry_engine::coords::Viewport;
use gantry_engine::paint::Color;
use gantry_engine::scene::{DrawList, QuadCmd};
use gantry_rig::{Ortho, Quad, RenderBackend, Rgb, WindowSize};

/// Records the scene's frame into a [`DrawList`] for the GPU renderer.
///
/// `present_frame` only marks the list complete; the app submits it through
/// `FrameCtx::render` afterwards.
pub struct DrawListBackend<'a> {
    list: &'a mut DrawList,
    current: Color,
    complete: bool,
}

impl<'a> DrawListBackend<'a> {
    pub fn new(list: &'a mut DrawList) -> Self {
        Self {
            list,
            current: Color::WHITE,
            complete: false,
        }
    }

    /// Whether a full frame was recorded since construction.
    pub fn is_complete(&self) -> bool {
        self.complete
    }
}

pub fn to_color(rgb: Rgb) -> Color {
    Color::opaque(rgb.r, rgb.g, rgb.b)
}

impl RenderBackend for DrawListBackend<'_> {
    fn begin_frame(&mut self, size: WindowSize) {
        self.list.clear();
        self.list
            .set_viewport(Viewport::new(size.width as f32, size.height as f32));
        self.complete = false;
    }

    fn set_projection(&mut self, ortho: &Ortho) {
        self.list.set_projection(ortho.matrix());
    }

    fn set_color(&mut self, color: Rgb) {
        self.current = to_color(color);
    }

    fn emit_quad(&mut self, quad: Quad) {
        let color = quad.color.map(to_color).unwrap_or(self.current);
        self.list.push(QuadCmd::new(quad.corners, color));
    }

    fn present_frame(&mut self) {
        self.complete = true;
        if self.list.skipped() > 0 {
            log::warn!("{} non-finite quads dropped this frame", self.list.skipped());
        }
    }
}

#[cfg(test)]
mod tests {
    use gantry_rig::{KeySnapshot, Scene, SceneConfig};

    use super::*;

    const SIZE: WindowSize = WindowSize { width: 600, height: 600 };

    #[test]
    fn scene_frame_fills_draw_list() {
        let mut list = DrawList::new();
        let mut scene = Scene::new(SceneConfig::default(), SIZE);

        let mut backend = DrawListBackend::new(&mut list);
        scene.frame(&KeySnapshot::default(), &mut backend);
        assert!(backend.is_complete());

        assert_eq!(list.len(), 24);
        assert_eq!(list.projection(), SceneConfig::default().ortho.matrix());
        assert_eq!(list.viewport(), Some(Viewport::new(600.0, 600.0)));
    }

    #[test]
    fn resized_scene_records_resized_viewport() {
        let mut list = DrawList::new();
        let mut scene = Scene::new(SceneConfig::default(), SIZE);

        scene.resize(1024, 768);
        scene.frame(&KeySnapshot::default(), &mut DrawListBackend::new(&mut list));
        assert_eq!(list.viewport(), Some(Viewport::new(1024.0, 768.0)));

        // Minimised windows keep the last drawable size.
        scene.resize(0, 0);
        scene.frame(&KeySnapshot::default(), &mut DrawListBackend::new(&mut list));
        assert_eq!(list.viewport(), Some(Viewport::new(1024.0, 768.0)));
    }

    #[test]
    fn uncolored_quads_take_current_color() {
        let config = SceneConfig::default();
        let grey = to_color(config.base_color);
        let mut list = DrawList::new();
        let mut scene = Scene::new(config, SIZE);

        scene.frame(&KeySnapshot::default(), &mut DrawListBackend::new(&mut list));

        // Floor is painted last.
        assert!(list.quads()[18..].iter().all(|q| q.color == grey));
        assert_eq!(list.quads()[0].color, to_color(Rgb::RED));
    }

    #[test]
    fn begin_frame_discards_previous_quads() {
        let mut list = DrawList::new();
        let mut scene = Scene::new(SceneConfig::default(), SIZE);

        for _ in 0..3 {
            scene.frame(&KeySnapshot::default(), &mut DrawListBackend::new(&mut list));
        }
        assert_eq!(list.len(), 24);
    }
}
