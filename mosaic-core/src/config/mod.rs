//! Configuration module for mappers
//!
//! Loads the mapper configuration (model identifier, instruction-role
//! policy, generation defaults) from YAML or JSON files, with `${VAR}`
//! environment interpolation and validation.

mod env;
mod error;
mod schema;
mod validator;

pub use env::interpolate_env_vars;
pub use error::{ConfigError, ConfigResult, ValidationError, ValidationErrorKind};
pub use schema::{DefaultConfig, InstructionRoleConfig, MapperConfig, CONFIG_VERSION};
pub use validator::ConfigValidator;

use std::fs;
use std::path::Path;
use tracing::debug;

/// Load a configuration from a YAML file
pub fn load_from_yaml<P: AsRef<Path>>(path: P) -> ConfigResult<MapperConfig> {
    let path = path.as_ref();
    let content = read(path)?;
    parse_yaml(&content, &path.to_string_lossy())
}

/// Load a configuration from a JSON file
pub fn load_from_json<P: AsRef<Path>>(path: P) -> ConfigResult<MapperConfig> {
    let path = path.as_ref();
    let content = read(path)?;
    let origin = path.to_string_lossy();

    // Interpolate environment variables before parsing
    let interpolated = env::interpolate_env_vars(&content)?;

    let config: MapperConfig =
        serde_json::from_str(&interpolated).map_err(|e| ConfigError::ParseError {
            path: origin.to_string(),
            line: Some(e.line()),
            column: Some(e.column()),
            message: e.to_string(),
        })?;

    finish(config, &origin)
}

/// Parse a configuration from an in-memory YAML document
pub fn from_yaml_str(content: &str) -> ConfigResult<MapperConfig> {
    parse_yaml(content, "<inline>")
}

fn read(path: &Path) -> ConfigResult<String> {
    fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.to_string_lossy().to_string(),
        source: e,
    })
}

fn parse_yaml(content: &str, origin: &str) -> ConfigResult<MapperConfig> {
    let interpolated = env::interpolate_env_vars(content)?;

    let config: MapperConfig =
        serde_yaml::from_str(&interpolated).map_err(|e| ConfigError::ParseError {
            path: origin.to_string(),
            line: e.location().map(|l| l.line()),
            column: e.location().map(|l| l.column()),
            message: e.to_string(),
        })?;

    finish(config, origin)
}

fn finish(config: MapperConfig, origin: &str) -> ConfigResult<MapperConfig> {
    ConfigValidator::new().validate(&config)?;
    debug!(origin, model = ?config.model, "loaded mapper configuration");
    Ok(config)
}
