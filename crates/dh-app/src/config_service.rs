//! Network configuration loading, saving and validation.

use std::path::Path;

use dh_graph::NetworkConfig;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::format::{read_file, write_file};

/// Load a network configuration from a YAML or JSON file.
///
/// Missing fields take their defaults. The result is validated.
pub fn load_config(path: &Path) -> AppResult<NetworkConfig> {
    let config: NetworkConfig = read_file(path)?;
    validate_config(&config)?;
    debug!(path = %path.display(), ?config, "loaded network config");
    Ok(config)
}

pub fn save_config(path: &Path, config: &NetworkConfig) -> AppResult<()> {
    write_file(path, config)
}

/// Check configuration values are usable.
pub fn validate_config(config: &NetworkConfig) -> AppResult<()> {
    config
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))
}
