use std::fs;

use addrbook::{canonicalize_or_current, verbosity_level};
use tempfile::tempdir;

#[test]
fn canonicalize_or_current_returns_cwd_for_dot() {
    let cwd = std::env::current_dir().expect("cwd");
    let result = canonicalize_or_current(".").expect("canonicalize");
    assert_eq!(result, cwd);
}

#[test]
fn canonicalize_or_current_resolves_existing_path() {
    let tmp = tempdir().expect("tempdir");
    let subdir = tmp.path().join("nested");
    fs::create_dir_all(&subdir).expect("create nested");

    let result = canonicalize_or_current(subdir.to_str().unwrap()).expect("canonicalize nested");
    assert_eq!(result, subdir.canonicalize().expect("canonicalize subdir"));
}

#[test]
fn canonicalize_or_current_joins_missing_relative_path() {
    let cwd = std::env::current_dir().expect("cwd");
    let result = canonicalize_or_current("does-not-exist-yet").expect("join");
    assert_eq!(result, cwd.join("does-not-exist-yet"));
}

#[test]
fn verbosity_maps_to_levels() {
    assert_eq!(verbosity_level(0), tracing::Level::WARN);
    assert_eq!(verbosity_level(1), tracing::Level::INFO);
    assert_eq!(verbosity_level(2), tracing::Level::DEBUG);
    assert_eq!(verbosity_level(9), tracing::Level::DEBUG);
}
