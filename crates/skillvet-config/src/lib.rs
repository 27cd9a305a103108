//! # skillvet-config
//!
//! Configuration system for skillvet. Reads from `skillvet.toml`, environment
//! variables, and CLI overrides — in that precedence order.

pub mod loader;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::VetConfig;
