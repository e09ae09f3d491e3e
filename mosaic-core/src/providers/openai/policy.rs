//! Instruction-role policy
//!
//! Some model families reject a plain `system` role and expect instructions
//! under the `developer` role instead. Which models do is a property of the
//! deployment, so the decision is injected rather than hard-coded.

/// Decides, per model identifier, whether instructions use the developer role
pub trait InstructionRolePolicy: Send + Sync {
    fn prefers_developer_role(&self, model: &str) -> bool;
}

impl<F> InstructionRolePolicy for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn prefers_developer_role(&self, model: &str) -> bool {
        self(model)
    }
}

/// Default model prefix that switches to the developer role
pub const DEFAULT_DEVELOPER_PREFIX: &str = "o1";

/// Switches to the developer role for models matching any configured prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixPolicy {
    prefixes: Vec<String>,
}

impl PrefixPolicy {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }
}

impl Default for PrefixPolicy {
    fn default() -> Self {
        Self::new([DEFAULT_DEVELOPER_PREFIX])
    }
}

impl InstructionRolePolicy for PrefixPolicy {
    fn prefers_developer_role(&self, model: &str) -> bool {
        self.prefixes
            .iter()
            .any(|prefix| !prefix.is_empty() && model.starts_with(prefix.as_str()))
    }
}

/// Always keeps the plain system role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemRolePolicy;

impl InstructionRolePolicy for SystemRolePolicy {
    fn prefers_developer_role(&self, _model: &str) -> bool {
        false
    }
}
