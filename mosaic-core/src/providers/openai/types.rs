//! OpenAI chat completion wire types
//!
//! These types match the chat completion wire format. Inbound fields are
//! lenient so that missing optional data degrades to neutral values instead
//! of failing deserialization.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Chat completion request body handed to the transport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAIRequest {
    pub model: String,
    pub messages: Vec<OpenAIMessage>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<OpenAITool>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// Wire message role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenAIRole {
    System,
    /// Instruction role preferred by some model families over `system`
    Developer,
    User,
    #[default]
    Assistant,
    Tool,
}

impl OpenAIRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpenAIRole::System => "system",
            OpenAIRole::Developer => "developer",
            OpenAIRole::User => "user",
            OpenAIRole::Assistant => "assistant",
            OpenAIRole::Tool => "tool",
        }
    }
}

/// OpenAI message format
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenAIMessage {
    #[serde(default)]
    pub role: OpenAIRole,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<OpenAIContent>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<OpenAIToolCall>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

/// OpenAI content (can be string or array of parts)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OpenAIContent {
    Text(String),
    Parts(Vec<OpenAIContentPart>),
}

/// OpenAI content part.
///
/// Deserialization never fails: a part without a `type` tag is read as text
/// when it carries a `text` string, and anything unrecognized becomes
/// [`OpenAIContentPart::Other`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum OpenAIContentPart {
    #[serde(rename = "text")]
    Text { text: String },

    #[serde(rename = "image_url")]
    ImageUrl { image_url: OpenAIImageUrl },

    /// Refusals, audio and any part type added later
    #[serde(rename = "other")]
    Other,
}

impl OpenAIContentPart {
    fn from_value(value: Value) -> Self {
        let text = || {
            value
                .get("text")
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        match value.get("type").and_then(Value::as_str) {
            Some("text") => OpenAIContentPart::Text {
                text: text().unwrap_or_default(),
            },
            Some("image_url") => value
                .get("image_url")
                .cloned()
                .and_then(|image_url| serde_json::from_value(image_url).ok())
                .map_or(OpenAIContentPart::Other, |image_url| {
                    OpenAIContentPart::ImageUrl { image_url }
                }),
            Some(_) => OpenAIContentPart::Other,
            None => text().map_or(OpenAIContentPart::Other, |text| {
                OpenAIContentPart::Text { text }
            }),
        }
    }
}

impl<'de> Deserialize<'de> for OpenAIContentPart {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

/// OpenAI image URL format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAIImageUrl {
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// OpenAI function call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenAIFunctionCall {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// JSON-encoded arguments, as produced by the model
    #[serde(default, deserialize_with = "null_as_default")]
    pub arguments: String,
}

/// OpenAI tool call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAIToolCall {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,

    #[serde(rename = "type", default = "function_type")]
    pub tool_type: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub function: OpenAIFunctionCall,
}

/// OpenAI tool definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAITool {
    #[serde(rename = "type")]
    pub tool_type: String,

    pub function: OpenAIFunction,
}

/// OpenAI function definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAIFunction {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

/// OpenAI chat completion response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenAIResponse {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub model: Option<String>,

    #[serde(default)]
    pub choices: Vec<OpenAIChoice>,
}

/// OpenAI choice
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenAIChoice {
    #[serde(default)]
    pub index: usize,

    #[serde(default)]
    pub message: OpenAIMessage,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

pub(crate) const FUNCTION_TYPE: &str = "function";

fn function_type() -> String {
    FUNCTION_TYPE.to_string()
}

/// Explicit `null` reads the same as an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
