pub mod client;

pub use client::{CompletionModel, LLMClient};
