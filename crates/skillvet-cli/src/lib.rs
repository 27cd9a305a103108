//! # skillvet-cli
//!
//! Command-line interface for skillvet.
//!
//! ## Commands
//!
//! - `skillvet run` — Review every skill and file the reports
//! - `skillvet list` — Show the skills a run would review
//! - `skillvet config` — Show current configuration
//! - `skillvet version` — Show version and build info

pub mod commands;

pub use commands::Cli;
