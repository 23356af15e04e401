//! Where the config file lives

use std::path::PathBuf;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "DRIFTWALL_CONFIG";

/// Get the default config file path
///
/// Returns: `$DRIFTWALL_CONFIG` when set and non-empty, otherwise
/// `~/.config/driftwall/config.yaml` (platform config dir).
pub fn default_config_path() -> PathBuf {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => platform_config_path(),
    }
}

fn platform_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join("driftwall")
        .join("config.yaml")
}
