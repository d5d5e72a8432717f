use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use envinfo_core::error::Error;
use envinfo_core::locator::{ConfigFileLocator, Selection, AMBIGUOUS_PREFIX};

const ROOT: &str = "/var/www/shop";

fn write_vhost(dir: &Path, name: &str, root: &str, logs: &[(&str, &str)]) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let mut config = format!(
        "server {{\n    listen 80;\n    server_name shop.test;\n    root {}/pub;\n",
        root
    );
    for (directive, file) in logs {
        config.push_str(&format!("    {} /var/log/nginx/{};\n", directive, file));
    }
    config.push_str("}\n");

    let path = dir.join(name);
    fs::write(&path, config).unwrap();
    path
}

fn setup() -> (TempDir, PathBuf, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let vhost_dir = temp_dir.path().join("vhost");
    let sites_dir = temp_dir.path().join("sites-enabled");
    fs::create_dir_all(&vhost_dir).unwrap();
    fs::create_dir_all(&sites_dir).unwrap();
    (temp_dir, vhost_dir, sites_dir)
}

fn locator(vhost_dir: &Path, sites_dir: &Path) -> ConfigFileLocator {
    ConfigFileLocator::with_dirs(
        vec![vhost_dir.to_path_buf(), sites_dir.to_path_buf()],
        "/var/log/nginx/",
    )
    .unwrap()
}

#[test]
fn test_list_candidate_files() {
    let (_temp_dir, vhost_dir, _) = setup();
    fs::write(vhost_dir.join("b.conf"), "").unwrap();
    fs::write(vhost_dir.join("a.conf"), "").unwrap();

    let files = ConfigFileLocator::list_candidate_files(&vhost_dir).unwrap();
    assert_eq!(files, vec![vhost_dir.join("a.conf"), vhost_dir.join("b.conf")]);
}

#[test]
fn test_list_missing_directory() {
    let (temp_dir, _, _) = setup();
    let missing = temp_dir.path().join("missing");

    let err = ConfigFileLocator::list_candidate_files(&missing).unwrap_err();
    assert!(matches!(err, Error::DirectoryUnreadable { ref path, .. } if path == &missing));
}

#[test]
fn test_no_match_when_root_absent() {
    let (_temp_dir, vhost_dir, sites_dir) = setup();
    write_vhost(&vhost_dir, "other.conf", "/srv/other", &[]);

    let scan = locator(&vhost_dir, &sites_dir).find_matching_config_files(ROOT);
    assert!(scan.matches.is_empty());
    assert!(scan.errors.is_empty());
}

#[test]
fn test_matches_from_both_directories() {
    let (_temp_dir, vhost_dir, sites_dir) = setup();
    let a = write_vhost(&vhost_dir, "shop.conf", ROOT, &[]);
    let b = write_vhost(&sites_dir, "shop", ROOT, &[]);
    write_vhost(&sites_dir, "default", "/srv/default", &[]);

    let scan = locator(&vhost_dir, &sites_dir).find_matching_config_files(ROOT);
    assert_eq!(scan.matches.len(), 2);
    assert!(scan.matches.contains(&a));
    assert!(scan.matches.contains(&b));
}

#[test]
fn test_substring_match_is_not_path_aware() {
    let (_temp_dir, vhost_dir, sites_dir) = setup();
    let longer = write_vhost(&vhost_dir, "shop2.conf", "/var/www/shop2", &[]);

    let scan = locator(&vhost_dir, &sites_dir).find_matching_config_files(ROOT);
    assert_eq!(scan.matches, vec![longer]);
}

#[test]
fn test_file_listing_root_twice_matches_once() {
    let (_temp_dir, vhost_dir, sites_dir) = setup();
    fs::write(
        vhost_dir.join("shop.conf"),
        format!("root {}/pub;\n# {}\n", ROOT, ROOT),
    )
    .unwrap();

    let scan = locator(&vhost_dir, &sites_dir).find_matching_config_files(ROOT);
    assert_eq!(scan.matches.len(), 1);
}

#[test]
fn test_unreadable_directory_does_not_stop_scan() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("vhost");
    let sites_dir = temp_dir.path().join("sites-enabled");
    let expected = write_vhost(&sites_dir, "shop", ROOT, &[]);

    let scan = locator(&missing, &sites_dir).find_matching_config_files(ROOT);
    assert_eq!(scan.matches, vec![expected]);
    assert_eq!(scan.errors.len(), 1);
    assert!(matches!(scan.errors[0], Error::DirectoryUnreadable { .. }));
}

#[test]
fn test_select_none() {
    assert_eq!(ConfigFileLocator::select_config_file(Vec::new()), Selection::None);
}

#[test]
fn test_select_single() {
    let path = PathBuf::from("/etc/nginx/sites-enabled/shop");
    let selection = ConfigFileLocator::select_config_file(vec![path.clone()]);
    assert_eq!(selection, Selection::Single(path.clone()));
    assert_eq!(selection.to_string(), path.display().to_string());
}

#[test]
fn test_select_ambiguous_display() {
    let selection = ConfigFileLocator::select_config_file(vec![
        PathBuf::from("/var/www/vhost/shop.conf"),
        PathBuf::from("/etc/nginx/sites-enabled/shop"),
    ]);

    assert!(matches!(selection, Selection::Ambiguous(ref paths) if paths.len() == 2));
    assert_eq!(
        selection.to_string(),
        format!(
            "{}/var/www/vhost/shop.conf /etc/nginx/sites-enabled/shop",
            AMBIGUOUS_PREFIX
        )
    );
    assert_eq!(selection.single(), None);
}

#[test]
fn test_extract_last_match_wins() {
    let (_temp_dir, vhost_dir, sites_dir) = setup();
    let path = write_vhost(
        &vhost_dir,
        "shop.conf",
        ROOT,
        &[
            ("access_log", "a.log"),
            ("error_log", "shop.error.log"),
            ("access_log", "b.log"),
        ],
    );

    let logs = locator(&vhost_dir, &sites_dir).extract_log_paths(&path).unwrap();
    assert_eq!(logs.access_log.as_deref(), Some("/var/log/nginx/b.log"));
    assert_eq!(logs.error_log.as_deref(), Some("/var/log/nginx/shop.error.log"));
    assert_eq!(
        logs.to_string(),
        "Error Log: /var/log/nginx/shop.error.log Access Log: /var/log/nginx/b.log"
    );
}

#[test]
fn test_extract_missing_directive_is_absent() {
    let (_temp_dir, vhost_dir, sites_dir) = setup();
    let path = write_vhost(&vhost_dir, "shop.conf", ROOT, &[("error_log", "e.log")]);

    let logs = locator(&vhost_dir, &sites_dir).extract_log_paths(&path).unwrap();
    assert_eq!(logs.access_log, None);
    assert_eq!(logs.to_string(), "Error Log: /var/log/nginx/e.log Access Log: ");
}

#[test]
fn test_extract_unreadable_file() {
    let (temp_dir, vhost_dir, sites_dir) = setup();
    let missing = temp_dir.path().join("gone.conf");

    let err = locator(&vhost_dir, &sites_dir)
        .extract_log_paths(&missing)
        .unwrap_err();
    assert!(matches!(err, Error::ConfigFileUnreadable { .. }));
}

#[test]
fn test_locate_single() {
    let (_temp_dir, vhost_dir, sites_dir) = setup();
    let path = write_vhost(
        &sites_dir,
        "shop",
        ROOT,
        &[("access_log", "shop.access.log"), ("error_log", "shop.error.log")],
    );

    let location = locator(&vhost_dir, &sites_dir).locate(ROOT);
    assert_eq!(location.selection, Selection::Single(path));
    let logs = location.logs.unwrap();
    assert_eq!(logs.access_log.as_deref(), Some("/var/log/nginx/shop.access.log"));
    assert!(location.errors.is_empty());
}

#[test]
fn test_locate_ambiguous_skips_extraction() {
    let (_temp_dir, vhost_dir, sites_dir) = setup();
    write_vhost(&vhost_dir, "shop.conf", ROOT, &[("access_log", "a.log")]);
    write_vhost(&sites_dir, "shop", ROOT, &[("access_log", "b.log")]);

    let location = locator(&vhost_dir, &sites_dir).locate(ROOT);
    assert!(matches!(location.selection, Selection::Ambiguous(_)));
    assert!(location.logs.is_none());
    assert!(location.errors.is_empty());
}

#[test]
fn test_locate_none() {
    let (_temp_dir, vhost_dir, sites_dir) = setup();

    let location = locator(&vhost_dir, &sites_dir).locate(ROOT);
    assert_eq!(location.selection, Selection::None);
    assert!(location.logs.is_none());
}
