//! Protocol module for provider-agnostic conversation structures
//!
//! This module defines the domain conversation model consumed by mappers.
//! These structures are designed to be:
//! - Provider-agnostic
//! - Immutable per call (constructed by the caller, consumed once)
//! - Type-safe and serializable

pub mod types;

pub use types::{
    ContentPart, GenOpts, MappedResponse, Message, MessageContent, Role, ToolCall, ToolHandler,
    ToolSpec,
};
