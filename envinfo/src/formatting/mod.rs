//! CLI formatting utilities.
//!
//! This module provides consistent colors and layout for report output.

mod headers;
mod output;
mod status;
mod tables;

pub use headers::{print_section_header, SectionStyle};
pub use output::print_key_value;
pub use status::{print_error, print_success, print_warning};
pub use tables::{print_candidate_table, CandidateDir};
