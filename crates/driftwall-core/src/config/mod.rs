//! Configuration for driftwall
//!
//! - Generic YAML config loading/saving
//! - Default config location (`$DRIFTWALL_CONFIG` override)
//! - Coordinator, pool, display and slot wiring sections
//!
//! # Usage
//!
//! ```ignore
//! use driftwall_core::config::{default_config_path, load_config, DriftwallConfig};
//!
//! let config: DriftwallConfig = load_config(&default_config_path());
//! config.validate()?;
//! ```

mod error;
mod io;
mod paths;
mod settings;

pub use error::SlotConfigError;
pub use io::{load_config, save_config};
pub use paths::{default_config_path, CONFIG_ENV};
pub use settings::{CoordinatorConfig, DisplayConfig, DriftwallConfig, Handoff, PoolConfig, SlotsConfig, StopRule};
