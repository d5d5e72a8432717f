//! General output formatting utilities.

use owo_colors::OwoColorize;

/// Prints a labeled value: green label, blue value.
pub fn print_key_value(key: &str, value: &str) {
    println!("{} {}", format!("{}:", key).green().bold(), value.blue());
}
