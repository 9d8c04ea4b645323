//! Presentation layer for examforge
//!
//! This crate contains CLI definitions, output formatters,
//! and progress reporters.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{
    Cli, Command, ConfirmArgs, GenerateArgs, ListArgs, OutputFormat, QuestionRefArgs,
};
pub use output::console::{ConsoleFormatter, JsonFormatter};
pub use output::formatter::OutputFormatter;
pub use output::formatter_for;
pub use progress::reporter::ProgressReporter;
