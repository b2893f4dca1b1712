mod app;
mod backend;
mod keys;

use anyhow::Result;
use winit::dpi::LogicalSize;

use gantry_engine::device::GpuInit;
use gantry_engine::logging::{init_logging, LoggingConfig};
use gantry_engine::window::{Runtime, RuntimeConfig};
use gantry_rig::SceneConfig;

use crate::app::GantryApp;

const WINDOW_SIZE: u32 = 600;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "Gantry".to_string(),
        initial_size: LogicalSize::new(WINDOW_SIZE as f64, WINDOW_SIZE as f64),
        resizable: true,
        centered: true,
    };

    // Face colors are display values; an sRGB surface would brighten them.
    let gpu_init = GpuInit {
        prefer_srgb: false,
        ..GpuInit::default()
    };

    log::info!("arrows deform the rig; hold Shift or Control for the arm and hanger; Escape quits");

    let app = GantryApp::new(SceneConfig::default(), WINDOW_SIZE, WINDOW_SIZE);
    Runtime::run(config, gpu_init, app)
}
