//! OpenAI chat completion mapper
//!
//! This module translates between the domain conversation model and the
//! OpenAI chat completion wire format, including tool-call plumbing.

pub mod codec;
pub mod converter;
mod mapper;
pub mod policy;
pub mod types;

pub use mapper::OpenAIMessageMapper;
pub use policy::{InstructionRolePolicy, PrefixPolicy, SystemRolePolicy};
pub use types::{OpenAIChoice, OpenAIMessage, OpenAIRequest, OpenAIResponse, OpenAITool};
