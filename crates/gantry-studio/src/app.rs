use gantry_engine::core::{App, AppControl, FrameCtx};
use gantry_engine::render::QuadRenderer;
use gantry_engine::scene::DrawList;
use gantry_rig::{FrameControl, Outcome, Scene, SceneConfig, WindowSize};

use crate::backend::{to_color, DrawListBackend};
use crate::keys::FrameKeys;

/// Frames between periodic rig state traces.
const TRACE_INTERVAL: u64 = 120;

/// Engine app driving the rig scene.
pub struct GantryApp {
    scene: Scene,
    clear: gantry_engine::paint::Color,
    renderer: QuadRenderer,
    draw_list: DrawList,
}

impl GantryApp {
    pub fn new(config: SceneConfig, width: u32, height: u32) -> Self {
        let clear = to_color(config.clear);
        Self {
            scene: Scene::new(config, WindowSize { width, height }),
            clear,
            renderer: QuadRenderer::new(),
            draw_list: DrawList::new(),
        }
    }
}

impl App for GantryApp {
    fn on_resize(&mut self, width: u32, height: u32) {
        self.scene.resize(width, height);
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let keys = FrameKeys {
            state: ctx.input,
            frame: ctx.input_frame,
        };

        let mut backend = DrawListBackend::new(&mut self.draw_list);
        let control = self.scene.frame(&keys, &mut backend);
        let complete = backend.is_complete();

        if let Some(Outcome::Refused(rule)) = self.scene.last_outcome() {
            log::trace!("{rule:?} refused at its limit");
        }

        if ctx.time.frame_index % TRACE_INTERVAL == 0 {
            let rig = self.scene.rig();
            log::trace!(
                "frame {} ({:.1} ms): column {:.1}, arm {:.1}, hanger {:.1}, yaw {:.1}",
                ctx.time.frame_index,
                ctx.time.dt * 1000.0,
                rig.primary().stretch_y(),
                rig.secondary().stretch_x(),
                rig.tertiary().stretch_y(),
                rig.primary().rotate_y()
            );
        }

        if control == FrameControl::Close {
            log::info!("exit key released");
            return AppControl::Exit;
        }

        if !complete {
            return AppControl::Continue;
        }

        let (renderer, list) = (&mut self.renderer, &self.draw_list);
        ctx.render(self.clear, |rctx, target| renderer.render(rctx, target, list))
    }
}
