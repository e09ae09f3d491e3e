//! Configuration validation utilities

use super::env::ENV_VAR_PATTERN;
use super::error::ValidationError;
use super::schema::MapperConfig;
use std::collections::HashSet;

/// Configuration validator with additional validation rules
#[derive(Debug, Default)]
pub struct ConfigValidator;

impl ConfigValidator {
    /// Create a new validator
    pub fn new() -> Self {
        Self
    }

    /// Validate a configuration with extended rules
    pub fn validate(&self, config: &MapperConfig) -> Result<(), ValidationError> {
        // First run the built-in validation
        config.validate()?;

        self.validate_placeholders(config)?;
        self.validate_prefixes(config)?;

        Ok(())
    }

    /// Placeholders must have been interpolated before validation
    fn validate_placeholders(&self, config: &MapperConfig) -> Result<(), ValidationError> {
        if let Some(model) = &config.model {
            if ENV_VAR_PATTERN.is_match(model) {
                return Err(ValidationError::invalid_format(
                    "model",
                    format!("unresolved environment placeholder in '{}'", model),
                ));
            }
        }
        Ok(())
    }

    fn validate_prefixes(&self, config: &MapperConfig) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();

        for (i, prefix) in config.instruction_role.developer_prefixes.iter().enumerate() {
            let path = format!("instruction_role.developer_prefixes[{}]", i);

            if prefix.is_empty() {
                return Err(ValidationError::required(path)
                    .with_context("an empty prefix would match every model"));
            }

            if !seen.insert(prefix.as_str()) {
                return Err(ValidationError::duplicate(path, prefix.as_str()));
            }
        }

        Ok(())
    }
}
