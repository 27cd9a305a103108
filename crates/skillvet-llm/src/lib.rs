//! # skillvet-llm
//!
//! Abstraction layer over the LLM provider that drives review sessions.
//! The provider owns the model side of the tool-call loop; skillvet only
//! sends conversations and reads back text and tool requests.

pub mod anthropic;
pub mod mock;
pub mod provider;

pub use anthropic::AnthropicProvider;
pub use mock::MockProvider;
pub use provider::{LlmProvider, LlmRequest, LlmResponse, StopReason, Usage};
