//! # skillvet-runtime
//!
//! The review runtime: the two file tools handed to the model, the prompt
//! template, the session loop that drives one review, the `gh` issue
//! publisher, and the sequential run loop tying them together.

pub mod prompt;
pub mod publish;
pub mod runner;
pub mod session;
pub mod tools;

pub use publish::IssuePublisher;
pub use runner::{ReviewRunner, RunSummary};
pub use session::{ReviewSession, SessionHandle, SessionOptions, collect_report};
pub use tools::ReviewTools;
