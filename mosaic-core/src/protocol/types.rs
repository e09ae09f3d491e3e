//! Core protocol types for provider-agnostic conversations
//!
//! This module contains the conversation model shared by every mapper. The
//! design prioritizes:
//! - Type safety through closed enums for roles and content parts
//! - Forward compatibility through an `Unknown` content part catch-all
//! - Explicit JSON values (`serde_json::Value`) for loosely typed payloads

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions that guide the model's behavior
    System,
    /// User input message
    User,
    /// Assistant (model) response
    Assistant,
    /// Tool reply
    Tool,
}

impl Role {
    /// Lowercase name as used in logs and error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Tool => "tool",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content of a message - either plain text or an ordered list of parts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Plain text content
    Text(String),
    /// Ordered content parts; order is significant
    Parts(Vec<ContentPart>),
}

/// Individual content part of a message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Text content part
    Text { text: String },

    /// Image referenced by URL (plain or `data:` URL)
    #[serde(rename = "image_url")]
    Image { url: String },

    /// Assistant-authored request to invoke a tool
    ToolCall {
        name: String,
        /// Parsed JSON arguments
        #[serde(default)]
        arguments: Value,
    },

    /// Reply to a specific prior tool call
    ToolResult {
        tool_call_id: String,
        #[serde(default)]
        result: Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },

    /// Any part tag this version does not recognise
    #[serde(other)]
    Unknown,
}

/// A message in the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message author
    pub role: Role,

    /// Content of the message
    pub content: MessageContent,
}

/// Locally executable tool handler.
///
/// Mappers never call it; it is carried for the orchestration layer.
pub type ToolHandler = Arc<dyn Fn(Value) -> Result<Value, String> + Send + Sync>;

/// Tool specification offered to the model
#[derive(Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    /// Tool name, unique within a single call
    pub name: String,

    /// Human readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// JSON schema describing the arguments
    #[serde(default)]
    pub schema: Value,

    /// Optional local handler
    #[serde(skip)]
    pub invoke: Option<ToolHandler>,
}

impl fmt::Debug for ToolSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolSpec")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("schema", &self.schema)
            .field("invoke", &self.invoke.as_ref().map(|_| "<handler>"))
            .finish()
    }
}

impl PartialEq for ToolSpec {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.description == other.description
            && self.schema == other.schema
    }
}

/// Tool call recovered from a provider response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Identifier correlating the call with its result
    pub id: String,

    /// Name of the tool to invoke
    pub name: String,

    /// Parsed arguments, or the raw argument string when it was not valid JSON
    pub args: Value,
}

/// Normalized result of a single provider choice
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappedResponse {
    /// Flattened assistant text
    pub text: String,

    /// Requested tool calls, empty when none
    pub tool_calls: Vec<ToolCall>,
}

/// Generation options passed through to the wire request
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GenOpts {
    /// Sampling temperature (0.0 to 2.0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl Message {
    /// Create a message with plain text content
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: MessageContent::Text(content.into()),
        }
    }

    /// Create a message from ordered content parts
    pub fn with_parts(role: Role, parts: Vec<ContentPart>) -> Self {
        Self {
            role,
            content: MessageContent::Parts(parts),
        }
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text { text: text.into() }
    }

    pub fn image(url: impl Into<String>) -> Self {
        ContentPart::Image { url: url.into() }
    }

    pub fn tool_call(name: impl Into<String>, arguments: Value) -> Self {
        ContentPart::ToolCall {
            name: name.into(),
            arguments,
        }
    }

    pub fn tool_result(tool_call_id: impl Into<String>, result: Value) -> Self {
        ContentPart::ToolResult {
            tool_call_id: tool_call_id.into(),
            result,
            name: None,
        }
    }

    /// Is this a tool result part?
    pub fn is_tool_result(&self) -> bool {
        matches!(self, ContentPart::ToolResult { .. })
    }

    /// Text carried by this part, if it is a text part
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentPart::Text { text } => Some(text),
            _ => None,
        }
    }
}

impl MessageContent {
    /// Check if content is empty
    pub fn is_empty(&self) -> bool {
        match self {
            MessageContent::Text(s) => s.is_empty(),
            MessageContent::Parts(parts) => parts.is_empty(),
        }
    }

    /// Get text representation when the content is plain text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessageContent::Text(s) => Some(s.as_str()),
            MessageContent::Parts(_) => None,
        }
    }

    /// Concatenate all text, left to right, without separators
    pub fn flatten_text(&self) -> String {
        match self {
            MessageContent::Text(s) => s.clone(),
            MessageContent::Parts(parts) => parts.iter().filter_map(ContentPart::as_text).collect(),
        }
    }
}

impl ToolSpec {
    /// Create a tool spec with a name and argument schema
    pub fn new(name: impl Into<String>, schema: Value) -> Self {
        Self {
            name: name.into(),
            description: None,
            schema,
            invoke: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach a local handler
    pub fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.invoke = Some(Arc::new(handler));
        self
    }
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, args: Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            args,
        }
    }
}

impl GenOpts {
    /// Set temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set max tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}
