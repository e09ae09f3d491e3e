//! Configuration schema structures with serde support

use super::error::ValidationError;
use crate::protocol::GenOpts;
use crate::providers::openai::policy::DEFAULT_DEVELOPER_PREFIX;
use serde::{Deserialize, Serialize};

/// Supported schema version
pub const CONFIG_VERSION: &str = "0.1";

/// Root configuration structure for a mapper
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MapperConfig {
    /// Schema version (required - no default)
    pub version: String,

    /// Model identifier used to select the instruction role
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Instruction-role policy
    #[serde(default)]
    pub instruction_role: InstructionRoleConfig,

    /// Generation defaults passed through to requests
    #[serde(default)]
    pub defaults: DefaultConfig,
}

/// Which models take instructions under the developer role
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct InstructionRoleConfig {
    /// Model identifier prefixes that switch to the developer role
    #[serde(default = "default_developer_prefixes")]
    pub developer_prefixes: Vec<String>,
}

impl Default for InstructionRoleConfig {
    fn default() -> Self {
        Self {
            developer_prefixes: default_developer_prefixes(),
        }
    }
}

/// Default generation parameters
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultConfig {
    /// Default temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Default maximum output tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl DefaultConfig {
    /// Generation options carrying these defaults
    pub fn gen_opts(&self) -> GenOpts {
        GenOpts {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

fn default_developer_prefixes() -> Vec<String> {
    vec![DEFAULT_DEVELOPER_PREFIX.to_string()]
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            model: None,
            instruction_role: InstructionRoleConfig::default(),
            defaults: DefaultConfig::default(),
        }
    }
}

impl MapperConfig {
    /// Built-in structural validation
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.version.is_empty() {
            return Err(ValidationError::required("version"));
        }

        if self.version != CONFIG_VERSION {
            return Err(ValidationError::invalid_version(&self.version, CONFIG_VERSION));
        }

        if let Some(model) = &self.model {
            if model.trim().is_empty() {
                return Err(ValidationError::required("model")
                    .with_context("model must not be blank when set"));
            }
        }

        self.defaults.validate("defaults")
    }
}

impl DefaultConfig {
    pub fn validate(&self, path: &str) -> Result<(), ValidationError> {
        if let Some(temp) = self.temperature {
            if !(0.0..=2.0).contains(&temp) {
                return Err(ValidationError::out_of_range(
                    format!("{}.temperature", path),
                    format!("temperature must be between 0.0 and 2.0, got {}", temp),
                ));
            }
        }

        if self.max_tokens == Some(0) {
            return Err(ValidationError::out_of_range(
                format!("{}.max_tokens", path),
                "max_tokens must be greater than 0",
            ));
        }

        Ok(())
    }
}
