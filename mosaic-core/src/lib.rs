//! Mosaic Core Library
//!
//! Maps a provider-agnostic conversation model (roles, text, image and tool
//! parts) onto a concrete chat completion wire format and back. Mapping is
//! pure: the transport that executes the call lives outside this crate.

pub mod config;
pub mod protocol;
pub mod providers;

/// Returns the version of the Mosaic Core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
