//! Table formatting utilities using comfy-table.

use std::path::{Path, PathBuf};

use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use envinfo_core::Error;

/// One scanned candidate directory.
pub struct CandidateDir<'a> {
    pub dir: &'a Path,
    /// Directory listing, or why it could not be listed.
    pub listing: Result<usize, &'a Error>,
    /// Config files in this directory that reference the root path.
    pub matches: usize,
}

impl<'a> CandidateDir<'a> {
    /// Pairs a directory with its scan outcome. A listing error is looked up
    /// among `errors` by path.
    pub fn new(dir: &'a Path, file_count: Option<usize>, errors: &'a [Error], matches: &[PathBuf]) -> Self {
        let listing = match file_count {
            Some(count) => Ok(count),
            None => errors
                .iter()
                .find(|e| matches!(e, Error::DirectoryUnreadable { path, .. } if path == dir))
                .map_or(Ok(0), Err),
        };
        Self {
            dir,
            listing,
            matches: matches.iter().filter(|m| m.starts_with(dir)).count(),
        }
    }
}

/// Text and color of a directory's listing cell.
///
/// Unreadable directories are red, empty ones yellow, anything else green.
pub fn listing_cell(listing: &Result<usize, &Error>) -> (String, Color) {
    match listing {
        Ok(0) => ("empty".to_string(), Color::DarkYellow),
        Ok(1) => ("1 file".to_string(), Color::Green),
        Ok(count) => (format!("{} files", count), Color::Green),
        Err(error) => (error.to_string(), Color::Red),
    }
}

/// Text and color of a directory's match-count cell.
///
/// More than one match across the table makes the selection ambiguous, so
/// any directory contributing to that is highlighted.
pub fn match_cell(matches: usize, total_matches: usize) -> (String, Color) {
    let color = match (matches, total_matches) {
        (0, _) => Color::DarkGrey,
        (_, 1) => Color::Green,
        _ => Color::Yellow,
    };
    (matches.to_string(), color)
}

/// Prints the candidate directories with their listing and match counts.
pub fn print_candidate_table(candidates: &[CandidateDir<'_>]) {
    let total_matches: usize = candidates.iter().map(|c| c.matches).sum();

    let mut table = Table::new();
    table
        .set_header(vec![
            Cell::new("Directory").add_attribute(Attribute::Bold),
            Cell::new("Listing").add_attribute(Attribute::Bold),
            Cell::new("Matches").add_attribute(Attribute::Bold),
        ])
        .load_preset(comfy_table::presets::UTF8_FULL)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    for candidate in candidates {
        let (listing, listing_color) = listing_cell(&candidate.listing);
        let (matches, matches_color) = match_cell(candidate.matches, total_matches);
        table.add_row(vec![
            Cell::new(candidate.dir.display()),
            Cell::new(listing).fg(listing_color),
            Cell::new(matches).fg(matches_color),
        ]);
    }

    println!("{}", table);
}
