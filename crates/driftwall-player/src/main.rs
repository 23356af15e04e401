//! Driftwall - a live procedural wallpaper
//!
//! This is the main entry point. It:
//! 1. Loads the YAML config (`$DRIFTWALL_CONFIG` or the platform config dir)
//! 2. Starts the animation worker pool
//! 3. Spawns the coordinator, which opens the display and launches the
//!    initial slots
//! 4. Waits for the coordinator to exit (window closed) or runs forever
//!
//! Build with `--features window` for a desktop window; otherwise frames go
//! to a headless sink.

#[cfg(feature = "window")]
mod window;

use std::sync::Arc;

use anyhow::{Context, Result};

use driftwall_core::animation::reference_factory;
use driftwall_core::config::{default_config_path, load_config, DisplayConfig, DriftwallConfig};
use driftwall_core::coordinator::{self, PoolLauncher};
use driftwall_core::display::{DisplayFactory, DisplaySink};
use driftwall_core::frame::FrameBuffer;
use driftwall_core::pool::ThreadPool;
use driftwall_core::signal::SignalRegister;

fn main() -> Result<()> {
    // Initialize logger - set RUST_LOG=debug for verbose output
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("driftwall starting up");

    let config_path = default_config_path();
    let config: DriftwallConfig = load_config(&config_path);

    let width = config.display.width.max(1);
    let height = config.display.height.max(1);

    let register = Arc::new(SignalRegister::new());
    let frame = Arc::new(FrameBuffer::new(width, height));
    let pool = Arc::new(
        ThreadPool::new(config.pool.max_workers, config.pool.max_queue_depth)
            .context("Failed to start the animation worker pool")?,
    );

    let launcher = PoolLauncher::new(
        pool.clone(),
        register.clone(),
        frame.clone(),
        reference_factory(),
        config.coordinator.tick_budget(),
    );

    let display = display_factory(&config.display, width, height);
    let handle = coordinator::spawn(config, register, frame, display, launcher)
        .context("Failed to start the coordinator")?;

    log::info!("driftwall running");
    handle.join();

    pool.shutdown();
    log::info!("driftwall stopped");
    Ok(())
}

#[cfg(feature = "window")]
fn display_factory(config: &DisplayConfig, width: usize, height: usize) -> DisplayFactory {
    let title = config.title.clone();
    Box::new(move || {
        let display = window::WindowDisplay::open(&title, width, height)?;
        Ok(Box::new(display) as Box<dyn DisplaySink>)
    })
}

#[cfg(not(feature = "window"))]
fn display_factory(_config: &DisplayConfig, width: usize, height: usize) -> DisplayFactory {
    log::info!("Built without the window feature, presenting headless");
    Box::new(move || Ok(Box::new(driftwall_core::display::HeadlessDisplay::new(width, height)) as Box<dyn DisplaySink>))
}
