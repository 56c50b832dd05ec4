pub mod analyzer;
pub mod cli;
pub mod config;
pub mod llm;
pub mod sources;
pub mod types;

// Re-export commonly used types
pub use analyzer::workflow::launch;
pub use config::Config;
