//! Mapper error types

use thiserror::Error;

/// Result type for mapper operations
pub type MapperResult<T> = Result<T, MapperError>;

/// Errors raised while mapping domain messages onto a wire protocol.
///
/// Every variant is fatal: the input itself is invalid for the target
/// protocol, so retrying cannot help.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapperError {
    /// Image part in a system/developer (instruction-carrying) message
    #[error("{role} messages cannot include image parts")]
    ImageInInstructionMessage { role: String },

    /// Image part in an assistant message
    #[error("assistant messages cannot include image parts")]
    ImageInAssistantMessage,

    /// Plain tool-role message without a correlating tool call id
    #[error("tool replies must be sent as tool_result parts carrying a tool_call_id, not as bare tool messages")]
    BareToolMessage,

    /// Request assembly attempted without a model identifier
    #[error("no model identifier configured for request assembly")]
    MissingModel,
}

impl MapperError {
    /// Whether the error signals a caller contract violation for the protocol
    pub fn is_protocol_violation(&self) -> bool {
        match self {
            Self::ImageInInstructionMessage { .. } => true,
            Self::ImageInAssistantMessage => true,
            Self::BareToolMessage => true,
            Self::MissingModel => false,
        }
    }
}
