//! # skillvet-skills
//!
//! Skill enumeration. A skill is a directory under the configured skills
//! root, conventionally containing a primary markdown doc plus optional
//! `references/` and `scripts/` subdirectories. Skillvet does not enforce
//! or parse that shape — the reviewing model explores each skill itself
//! through its file tools, so enumeration stops at the directory handle.

pub mod enumerate;

pub use enumerate::{SkillRef, enumerate_skills};
