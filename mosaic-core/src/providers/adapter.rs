//! Mapper traits
//!
//! Defines the seam between the provider-agnostic conversation model and a
//! concrete wire format. Implementations are pure: they never perform I/O.

use crate::protocol::types::{MappedResponse, Message, ToolSpec};
use crate::providers::error::MapperResult;

/// Bidirectional translator between domain messages and a wire format
pub trait MessageMapper: Send + Sync {
    /// Wire representation of a single request message
    type WireMessage;

    /// Wire representation of a single response choice
    type WireChoice;

    /// Get the mapper's wire protocol name
    fn name(&self) -> &str;

    /// Map domain messages to wire messages, preserving order
    fn to_provider(&self, messages: &[Message]) -> MapperResult<Vec<Self::WireMessage>>;

    /// Recover the normalized result from one wire choice
    fn from_provider(&self, choice: &Self::WireChoice) -> MappedResponse;
}

/// Tool-use capability of a mapper.
///
/// Mappers that do not implement this trait cannot offer tools to the model.
pub trait ToolMapper: MessageMapper {
    /// Wire representation of a tool definition
    type WireToolDef;

    /// Encode tool specs, one wire entry per spec, order preserved
    fn to_provider_tools(&self, tools: &[ToolSpec]) -> Vec<Self::WireToolDef>;
}
