//! Status indicators and message formatting.

use owo_colors::OwoColorize;

/// Status types for consistent formatting.
#[derive(Debug, Clone, Copy)]
pub enum Status {
    Success,
    Warning,
}

impl Status {
    pub fn symbol(&self) -> &'static str {
        match self {
            Status::Success => "✓",
            Status::Warning => "⚠",
        }
    }

    /// Formats a status message with symbol and color.
    pub fn format(&self, message: &str) -> String {
        match self {
            Status::Success => format!("{} {}", self.symbol().green(), message.green().bold()),
            Status::Warning => format!("{} {}", self.symbol().yellow(), message.yellow().bold()),
        }
    }
}

/// Prints an inline error line, matching the report's `Error: message` shape.
pub fn print_error(message: &str) {
    println!("{} {}", "Error:".red(), message.blue());
}

pub fn print_success(message: &str) {
    println!("{}", Status::Success.format(message));
}

pub fn print_warning(message: &str) {
    println!("{}", Status::Warning.format(message));
}
