//! Atlas - AI mind-map generation service
//!
//! Turns a topic into markmap-flavoured markdown by way of a single
//! chat-completion call, and optionally publishes the result as a
//! self-contained HTML page.

pub mod config;
pub mod generator;
pub mod llm;
pub mod page;
pub mod prompt;
pub mod server;

pub use config::{Config, ConfigArgs};
pub use generator::{GenerateError, GenerationResult, MindMapGenerator};
