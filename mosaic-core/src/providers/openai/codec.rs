//! Tool-call codec
//!
//! Encodes tool specs into wire tool definitions and moves tool arguments
//! and results between JSON values and the JSON text the wire carries.
//! Malformed payloads never raise: they degrade to a string form so that a
//! single bad argument does not abort an otherwise valid response.

use super::types::{OpenAIFunction, OpenAIFunctionCall, OpenAITool, OpenAIToolCall, FUNCTION_TYPE};
use crate::protocol::types::{ToolCall, ToolSpec};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use tracing::warn;

/// Convert tool specs to wire tool definitions.
///
/// One entry per spec, order preserved. Duplicate names are not checked.
pub fn to_provider_tools(tools: &[ToolSpec]) -> Vec<OpenAITool> {
    tools.iter().map(to_provider_tool).collect()
}

fn to_provider_tool(tool: &ToolSpec) -> OpenAITool {
    OpenAITool {
        tool_type: FUNCTION_TYPE.to_string(),
        function: OpenAIFunction {
            name: tool.name.clone(),
            description: tool.description.clone(),
            parameters: Some(tool.schema.clone()),
        },
    }
}

/// Decode a wire argument string.
///
/// Returns the parsed JSON value, `Value::Null` for an empty string, and the
/// raw string unchanged when it is not valid JSON.
pub fn decode_arguments(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::Null;
    }

    match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            warn!("Tool call arguments are not valid JSON, keeping raw string: {}", e);
            Value::String(raw.to_string())
        }
    }
}

/// Encode tool arguments as wire JSON text. String values pass through.
pub fn encode_arguments(args: &Value) -> String {
    stringify_tool_result(args)
}

/// Convert a tool result payload into the string the wire carries.
///
/// Strings pass through unchanged, other values are JSON-serialized. When
/// serialization fails the value's `Debug` form is used instead.
pub fn stringify_tool_result<T>(value: &T) -> String
where
    T: Serialize + fmt::Debug + ?Sized,
{
    match serde_json::to_value(value) {
        Ok(Value::String(s)) => s,
        Ok(json) => json.to_string(),
        Err(e) => {
            warn!("Tool result is not JSON-serializable, using debug form: {}", e);
            format!("{:?}", value)
        }
    }
}

/// Convert a wire tool call into the domain form
pub fn from_provider_tool_call(call: &OpenAIToolCall) -> ToolCall {
    ToolCall {
        id: call.id.clone(),
        name: call.function.name.clone(),
        args: decode_arguments(&call.function.arguments),
    }
}

/// Convert a domain tool call back into its wire form
pub fn encode_tool_call(call: &ToolCall) -> OpenAIToolCall {
    OpenAIToolCall {
        id: call.id.clone(),
        tool_type: FUNCTION_TYPE.to_string(),
        function: OpenAIFunctionCall {
            name: call.name.clone(),
            arguments: encode_arguments(&call.args),
        },
    }
}
