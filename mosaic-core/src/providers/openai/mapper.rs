//! OpenAI message mapper
//!
//! Ties the converter, codec and instruction-role policy together behind the
//! [`MessageMapper`] and [`ToolMapper`] traits, and assembles the request
//! body handed to the transport.

use super::codec;
use super::converter;
use super::policy::{InstructionRolePolicy, PrefixPolicy};
use super::types::*;
use crate::config::MapperConfig;
use crate::protocol::{GenOpts, MappedResponse, Message, ToolSpec};
use crate::providers::adapter::{MessageMapper, ToolMapper};
use crate::providers::error::{MapperError, MapperResult};
use serde_json::json;
use std::fmt;
use std::sync::Arc;

/// Stateless mapper for the OpenAI chat completion format.
///
/// The only state is the model identifier, the instruction-role policy and
/// the generation defaults. All are fixed at construction, so one instance
/// can serve concurrent calls.
#[derive(Clone)]
pub struct OpenAIMessageMapper {
    model: Option<String>,
    policy: Arc<dyn InstructionRolePolicy>,
    defaults: GenOpts,
}

impl OpenAIMessageMapper {
    /// Create a mapper with no model identifier and the default prefix policy
    pub fn new() -> Self {
        Self {
            model: None,
            policy: Arc::new(PrefixPolicy::default()),
            defaults: GenOpts::default(),
        }
    }

    /// Create a mapper bound to a model identifier
    pub fn for_model(model: impl Into<String>) -> Self {
        Self {
            model: Some(model.into()),
            ..Self::new()
        }
    }

    /// Replace the instruction-role policy
    pub fn with_policy<P>(mut self, policy: P) -> Self
    where
        P: InstructionRolePolicy + 'static,
    {
        self.policy = Arc::new(policy);
        self
    }

    /// Generation options used where a request leaves a field unset
    pub fn with_defaults(mut self, defaults: GenOpts) -> Self {
        self.defaults = defaults;
        self
    }

    /// Build a mapper from configuration
    pub fn from_config(config: &MapperConfig) -> Self {
        Self {
            model: config.model.clone(),
            policy: Arc::new(PrefixPolicy::new(
                config.instruction_role.developer_prefixes.iter().cloned(),
            )),
            defaults: config.defaults.gen_opts(),
        }
    }

    /// Model identifier, if any
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Generation defaults
    pub fn defaults(&self) -> &GenOpts {
        &self.defaults
    }

    /// Whether instructions go out under the developer role for this model
    pub fn prefers_developer_role(&self) -> bool {
        self.model
            .as_deref()
            .is_some_and(|model| self.policy.prefers_developer_role(model))
    }

    /// Assemble the full request body for the transport.
    ///
    /// `tool_choice` is set to `"auto"` only when a non-empty tool list is given.
    /// Fields left unset in `opts` fall back to the mapper's defaults.
    pub fn build_request(
        &self,
        messages: &[Message],
        tools: Option<&[ToolSpec]>,
        opts: &GenOpts,
    ) -> MapperResult<OpenAIRequest> {
        let model = self.model.clone().ok_or(MapperError::MissingModel)?;
        let messages = self.to_provider(messages)?;

        let tools = tools
            .filter(|tools| !tools.is_empty())
            .map(|tools| self.to_provider_tools(tools));
        let tool_choice = tools.as_ref().map(|_| json!("auto"));

        Ok(OpenAIRequest {
            model,
            messages,
            tools,
            tool_choice,
            temperature: opts.temperature.or(self.defaults.temperature),
            max_tokens: opts.max_tokens.or(self.defaults.max_tokens),
        })
    }

    /// Map a whole response using its first choice
    pub fn from_provider_response(&self, response: &OpenAIResponse) -> MappedResponse {
        converter::from_openai_response(response)
    }
}

impl Default for OpenAIMessageMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OpenAIMessageMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAIMessageMapper")
            .field("model", &self.model)
            .field("prefers_developer_role", &self.prefers_developer_role())
            .field("defaults", &self.defaults)
            .finish()
    }
}

impl MessageMapper for OpenAIMessageMapper {
    type WireMessage = OpenAIMessage;
    type WireChoice = OpenAIChoice;

    fn name(&self) -> &str {
        "openai"
    }

    fn to_provider(&self, messages: &[Message]) -> MapperResult<Vec<OpenAIMessage>> {
        converter::to_openai_messages(messages, self.prefers_developer_role())
    }

    fn from_provider(&self, choice: &OpenAIChoice) -> MappedResponse {
        converter::from_openai_choice(choice)
    }
}

impl ToolMapper for OpenAIMessageMapper {
    type WireToolDef = OpenAITool;

    fn to_provider_tools(&self, tools: &[ToolSpec]) -> Vec<OpenAITool> {
        codec::to_provider_tools(tools)
    }
}
