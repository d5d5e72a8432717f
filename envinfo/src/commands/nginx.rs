//! Nginx virtual-host discovery for the installation.

use std::path::PathBuf;

use anyhow::Result;
use envinfo_core::{ConfigFileLocator, MatchScan, Selection, Settings};

use crate::formatting::{
    print_candidate_table, print_error, print_key_value, print_section_header, print_success,
    print_warning, CandidateDir, SectionStyle,
};

pub fn cmd_nginx(root: PathBuf, settings: Settings, plain: bool) -> Result<()> {
    let locator = ConfigFileLocator::new(&settings.nginx)?;
    let root_str = root.display().to_string();

    let MatchScan { matches, errors } = locator.find_matching_config_files(&root_str);
    let candidates: Vec<CandidateDir<'_>> = locator
        .candidate_dirs()
        .iter()
        .map(|dir| {
            let file_count = ConfigFileLocator::list_candidate_files(dir)
                .ok()
                .map(|files| files.len());
            CandidateDir::new(dir, file_count, &errors, &matches)
        })
        .collect();

    let selection = ConfigFileLocator::select_config_file(matches.clone());
    let selected = selection.clone().into_result(&root_str);
    let logs = selected
        .as_ref()
        .ok()
        .map(|path| locator.extract_log_paths(path));

    if plain {
        for candidate in &candidates {
            match &candidate.listing {
                Ok(count) => println!(
                    "{}: {} files, {} matches",
                    candidate.dir.display(),
                    count,
                    candidate.matches
                ),
                Err(e) => println!("{}: {}", candidate.dir.display(), e),
            }
        }
        for error in &errors {
            println!("Error: {}", error);
        }
        if let Err(e) = &selected {
            println!("Error: {}", e);
        }
        println!("Host Nginx config File: {}", selection);
        match logs {
            Some(Ok(logs)) => println!("Host Nginx Log files: {}", logs),
            Some(Err(e)) => println!("Error: {}", e),
            None => {}
        }
        return Ok(());
    }

    let style = match (&selection, errors.is_empty()) {
        (_, false) => SectionStyle::Error,
        (Selection::Single(_), true) => SectionStyle::Primary,
        _ => SectionStyle::Warning,
    };
    print_section_header("Nginx Config Discovery", style);
    print_key_value("Root Path", &root_str);
    println!();
    print_candidate_table(&candidates);
    println!();

    for error in &errors {
        print_error(&error.to_string());
    }

    match &selected {
        Ok(path) => print_success(&format!("Config file: {}", path.display())),
        Err(e) => print_warning(&e.to_string()),
    }

    match logs {
        Some(Ok(logs)) => {
            print_key_value("Error Log", logs.error_log.as_deref().unwrap_or("(none)"));
            print_key_value("Access Log", logs.access_log.as_deref().unwrap_or("(none)"));
        }
        Some(Err(e)) => print_error(&e.to_string()),
        None => {}
    }
    println!();

    Ok(())
}
