//! Output formatting

pub mod console;
pub mod formatter;

use crate::cli::commands::OutputFormat;
use formatter::OutputFormatter;

/// Formatter for the requested output format
pub fn formatter_for(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(console::ConsoleFormatter),
        OutputFormat::Json => Box::new(console::JsonFormatter),
    }
}
