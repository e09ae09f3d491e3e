//! Conversion between the domain conversation model and OpenAI format

use super::codec;
use super::types::*;
use crate::protocol::{ContentPart, MappedResponse, Message, MessageContent, Role};
use crate::providers::error::{MapperError, MapperResult};
use tracing::debug;

/// Convert domain messages to OpenAI wire messages.
///
/// Tool-result parts are split out into their own `tool` messages, emitted
/// ahead of whatever remains of the message that carried them. When
/// `prefers_developer` is set, system messages use the developer role and
/// assistant messages go out as text-only `system` messages.
pub fn to_openai_messages(
    messages: &[Message],
    prefers_developer: bool,
) -> MapperResult<Vec<OpenAIMessage>> {
    let mut out = Vec::with_capacity(messages.len());

    for message in messages {
        let residual;
        let content = match &message.content {
            MessageContent::Parts(parts) if parts.iter().any(ContentPart::is_tool_result) => {
                let mut rest = Vec::new();
                for part in parts {
                    match part {
                        ContentPart::ToolResult {
                            tool_call_id,
                            result,
                            ..
                        } => out.push(tool_result_message(tool_call_id, result)),
                        other => rest.push(other.clone()),
                    }
                }

                // Nothing but tool results: no conversational message follows
                if rest.is_empty() {
                    continue;
                }
                residual = MessageContent::Parts(rest);
                &residual
            }
            content => content,
        };

        out.push(to_openai_message(message.role, content, prefers_developer)?);
    }

    debug!(
        input = messages.len(),
        output = out.len(),
        prefers_developer,
        "mapped messages to openai format"
    );
    Ok(out)
}

fn to_openai_message(
    role: Role,
    content: &MessageContent,
    prefers_developer: bool,
) -> MapperResult<OpenAIMessage> {
    match role {
        Role::System if prefers_developer => {
            instruction_message(OpenAIRole::Developer, OpenAIRole::Developer, content)
        }
        Role::System => instruction_message(OpenAIRole::System, OpenAIRole::System, content),
        Role::Assistant if prefers_developer => {
            instruction_message(OpenAIRole::System, OpenAIRole::Assistant, content)
        }
        Role::Assistant => assistant_message(content),
        Role::User => Ok(user_message(content)),
        Role::Tool => Err(MapperError::BareToolMessage),
    }
}

/// A `tool` message answering the call identified by `tool_call_id`
fn tool_result_message(tool_call_id: &str, result: &serde_json::Value) -> OpenAIMessage {
    OpenAIMessage {
        role: OpenAIRole::Tool,
        content: Some(OpenAIContent::Text(codec::stringify_tool_result(result))),
        tool_calls: None,
        tool_call_id: Some(tool_call_id.to_string()),
    }
}

/// Text-only message sent under `role`.
///
/// `source` names the role reported when an image part is rejected.
fn instruction_message(
    role: OpenAIRole,
    source: OpenAIRole,
    content: &MessageContent,
) -> MapperResult<OpenAIMessage> {
    let parts = match content {
        MessageContent::Text(text) => vec![text_part(text)],
        MessageContent::Parts(parts) => parts
            .iter()
            .map(|part| match part {
                ContentPart::Text { text } => Ok(text_part(text)),
                ContentPart::Image { .. } => Err(MapperError::ImageInInstructionMessage {
                    role: source.as_str().to_string(),
                }),
                other => Ok(degraded_part(role, other)),
            })
            .collect::<MapperResult<Vec<_>>>()?,
    };

    Ok(message(role, OpenAIContent::Parts(parts)))
}

fn user_message(content: &MessageContent) -> OpenAIMessage {
    let parts = match content {
        MessageContent::Text(text) => vec![text_part(text)],
        MessageContent::Parts(parts) => parts
            .iter()
            .map(|part| match part {
                ContentPart::Text { text } => text_part(text),
                ContentPart::Image { url } => OpenAIContentPart::ImageUrl {
                    image_url: OpenAIImageUrl {
                        url: url.clone(),
                        detail: None,
                    },
                },
                other => degraded_part(OpenAIRole::User, other),
            })
            .collect(),
    };

    message(OpenAIRole::User, OpenAIContent::Parts(parts))
}

fn assistant_message(content: &MessageContent) -> MapperResult<OpenAIMessage> {
    let content = match content {
        MessageContent::Text(text) => OpenAIContent::Text(text.clone()),
        MessageContent::Parts(parts) => OpenAIContent::Parts(
            parts
                .iter()
                .map(|part| match part {
                    ContentPart::Text { text } => Ok(text_part(text)),
                    ContentPart::Image { .. } => Err(MapperError::ImageInAssistantMessage),
                    other => Ok(degraded_part(OpenAIRole::Assistant, other)),
                })
                .collect::<MapperResult<Vec<_>>>()?,
        ),
    };

    Ok(message(OpenAIRole::Assistant, content))
}

fn message(role: OpenAIRole, content: OpenAIContent) -> OpenAIMessage {
    OpenAIMessage {
        role,
        content: Some(content),
        tool_calls: None,
        tool_call_id: None,
    }
}

fn text_part(text: &str) -> OpenAIContentPart {
    OpenAIContentPart::Text {
        text: text.to_string(),
    }
}

/// Parts the role cannot carry keep their slot as empty text
fn degraded_part(role: OpenAIRole, part: &ContentPart) -> OpenAIContentPart {
    debug!(role = role.as_str(), part = ?part, "content part not representable, sending empty text");
    text_part("")
}

/// Convert an OpenAI choice to the normalized domain result
pub fn from_openai_choice(choice: &OpenAIChoice) -> MappedResponse {
    let message = &choice.message;

    let text = match &message.content {
        Some(OpenAIContent::Text(text)) => text.clone(),
        Some(OpenAIContent::Parts(parts)) => parts
            .iter()
            .map(|part| match part {
                OpenAIContentPart::Text { text } => text.as_str(),
                _ => "",
            })
            .collect(),
        None => String::new(),
    };

    let tool_calls = message
        .tool_calls
        .iter()
        .flatten()
        .map(codec::from_provider_tool_call)
        .collect();

    MappedResponse { text, tool_calls }
}

/// Convert an OpenAI response using its first choice.
///
/// A response without choices maps to an empty result.
pub fn from_openai_response(response: &OpenAIResponse) -> MappedResponse {
    match response.choices.first() {
        Some(choice) => from_openai_choice(choice),
        None => {
            debug!(id = ?response.id, "openai response carried no choices");
            MappedResponse::default()
        }
    }
}
