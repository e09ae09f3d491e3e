//! Environment variable interpolation for configuration

use super::error::ConfigError;
use regex::Regex;
use std::env;
use std::sync::LazyLock;

/// Matches `${VAR_NAME}` placeholders
pub(crate) static ENV_VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env var pattern is a valid regex")
});

/// Interpolate environment variables in a configuration string
pub fn interpolate_env_vars(content: &str) -> Result<String, ConfigError> {
    let mut missing_vars = Vec::new();

    let result = ENV_VAR_PATTERN.replace_all(content, |cap: &regex::Captures<'_>| {
        let var_name = &cap[1];
        match env::var(var_name) {
            Ok(value) => value,
            Err(_) => {
                missing_vars.push(var_name.to_string());
                cap[0].to_string()
            }
        }
    });

    // Report the first missing variable
    if let Some(var) = missing_vars.into_iter().next() {
        return Err(ConfigError::EnvVarNotFound { var });
    }

    Ok(result.into_owned())
}
