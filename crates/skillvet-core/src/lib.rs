//! # skillvet-core
//!
//! Core types, traits, and primitives for the skillvet review tool.
//! This crate defines the shared vocabulary used by every other crate in the workspace.

pub mod error;
pub mod event;
pub mod message;
pub mod tool;

pub use error::{Result, VetError};
pub use event::SessionEvent;
pub use message::{Message, MessageContent, Role};
pub use tool::{Tool, ToolCall, ToolExecutor, ToolResult};
