//! Provider mappers
//!
//! This module implements the mapping layer between the provider-agnostic
//! conversation model and concrete wire formats. Only the OpenAI chat
//! completion format is modeled.

pub mod adapter;
pub mod error;
pub mod openai;

pub use adapter::{MessageMapper, ToolMapper};
pub use error::{MapperError, MapperResult};

// Re-export concrete mappers
pub use openai::OpenAIMessageMapper;
