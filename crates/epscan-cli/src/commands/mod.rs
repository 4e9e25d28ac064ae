//! Subcommand implementations.

pub mod batch;
pub mod check;
pub mod config;
pub mod process;

use std::path::Path;

use epscan_core::EpscanConfig;

/// Load configuration from an explicit path, the default location, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<EpscanConfig> {
    let config = if let Some(path) = config_path {
        EpscanConfig::from_file(Path::new(path))?
    } else {
        let default_path = config::default_config_path();
        if default_path.exists() {
            EpscanConfig::from_file(&default_path)?
        } else {
            EpscanConfig::default()
        }
    };

    config.validate()?;
    Ok(config)
}
