// src/config.rs

//! Configuration loading utilities.
//!
//! This module provides convenience functions for loading configuration
//! and seed data from files.

use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::{Config, Seed};

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file cannot be read, but a file that
/// loads with invalid values is an error.
pub fn load_config(path: &Path) -> Result<Config> {
    let config = Config::load_or_default(path);
    config
        .validate()
        .map_err(|e| AppError::config(format!("Invalid config {path:?}: {e}")))?;
    Ok(config)
}

/// Load seed data named by the config, or the built-in sample.
pub fn load_seed(config: &Config) -> Result<Seed> {
    let seed = match &config.paths.seed_file {
        Some(path) => Seed::load_or_default(path),
        None => Seed::default(),
    };
    seed.validate()
        .map_err(|e| AppError::config(format!("Invalid seed data: {e}")))?;
    Ok(seed)
}

/// Load and validate both config and seed data.
pub fn load_all(config_path: &Path) -> Result<(Config, Seed)> {
    let config = load_config(config_path)?;
    let seed = load_seed(&config)?;
    Ok((config, seed))
}
