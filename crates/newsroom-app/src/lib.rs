//! Newsroom - command-line front end for the news classifier.
//!
//! This crate wires the classification engine to its callers:
//!
//! - Engine configuration from flags and environment ([`config`])
//! - Command implementations reading content and writing JSON ([`commands`])

pub mod commands;
pub mod config;

pub use commands::{BatchFilter, ClassifiedText};
pub use config::EngineConfig;
