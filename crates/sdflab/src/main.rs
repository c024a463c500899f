//! Distance-field viewer: a circle or square rasterized into a small signed
//! texture, shown full-screen, with a panel of live parameters.
//!
//! Escape quits.

mod app;
mod config;
mod renderer;
mod scene;
mod shader;

use anyhow::Result;
use winit::dpi::LogicalSize;

use sdflab_engine::device::GpuInit;
use sdflab_engine::logging::{LoggingConfig, init_logging};
use sdflab_engine::window::{Runtime, RuntimeConfig};

use crate::app::SdfApp;
use crate::config::DemoConfig;

fn main() {
    init_logging(LoggingConfig::default());

    if let Err(e) = run() {
        log::error!("{e:#}");
        std::process::exit(-1);
    }
}

fn run() -> Result<()> {
    let config = DemoConfig::from_env();
    let runtime = RuntimeConfig {
        title: config.title.clone(),
        initial_size: LogicalSize::new(config.width, config.height),
    };
    // The field shader writes its colors as-is.
    let gpu_init = GpuInit { prefer_srgb: false, ..GpuInit::default() };

    let app = SdfApp::new(config)?;
    Runtime::run(runtime, gpu_init, app)
}
