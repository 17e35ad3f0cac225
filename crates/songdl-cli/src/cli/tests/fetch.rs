//! Tests for the fetch subcommand: parsing, overrides and URL selection.

use super::parse;
use crate::cli::commands::{apply_overrides, collect_urls};
use crate::cli::{Cli, CliCommand, FetchArgs};
use clap::Parser;
use songdl_core::config::SongdlConfig;
use songdl_core::sources::BUILTIN_SOURCES;
use std::path::{Path, PathBuf};

fn fetch_args(args: &[&str]) -> FetchArgs {
    match parse(args) {
        CliCommand::Fetch(a) => a,
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_parse_fetch_defaults() {
    let a = fetch_args(&["songdl", "fetch"]);
    assert!(a.urls.is_empty());
    assert!(a.list.is_none());
    assert!(a.output_dir.is_none());
    assert!(a.template.is_none());
    assert!(a.quality.is_none());
    assert!(!a.dry_run);
    assert!(!a.strict);
}

#[test]
fn cli_parse_fetch_urls_and_flags() {
    let a = fetch_args(&[
        "songdl",
        "fetch",
        "https://www.youtube.com/watch?v=a",
        "https://www.youtube.com/watch?v=b",
        "--output-dir",
        "/tmp/songs",
        "--template",
        "%(id)s.%(ext)s",
        "--quality",
        "320",
        "--dry-run",
        "--strict",
    ]);
    assert_eq!(a.urls.len(), 2);
    assert_eq!(a.output_dir.as_deref(), Some(Path::new("/tmp/songs")));
    assert_eq!(a.template.as_deref(), Some("%(id)s.%(ext)s"));
    assert_eq!(a.quality, Some(320));
    assert!(a.dry_run);
    assert!(a.strict);
}

#[test]
fn cli_rejects_out_of_range_quality() {
    assert!(Cli::try_parse_from(["songdl", "fetch", "--quality", "1000"]).is_err());
    assert!(Cli::try_parse_from(["songdl", "fetch", "--quality", "abc"]).is_err());
}

#[test]
fn overrides_replace_config_values() {
    let a = fetch_args(&[
        "songdl",
        "fetch",
        "--output-dir",
        "out",
        "--template",
        "%(id)s.%(ext)s",
        "--quality",
        "128",
    ]);
    let cfg = apply_overrides(SongdlConfig::default(), &a);
    assert_eq!(cfg.output_dir, PathBuf::from("out"));
    assert_eq!(cfg.output_template, "%(id)s.%(ext)s");
    assert_eq!(cfg.audio.quality_kbps, 128);
}

#[test]
fn no_overrides_keep_config() {
    let a = fetch_args(&["songdl", "fetch"]);
    let cfg = apply_overrides(SongdlConfig::default(), &a);
    assert_eq!(cfg.output_dir, PathBuf::from("public/songs"));
    assert_eq!(cfg.audio.quality_kbps, 192);
}

#[test]
fn urls_default_to_builtin_list() {
    let a = fetch_args(&["songdl", "fetch"]);
    let urls = collect_urls(&SongdlConfig::default(), &a).unwrap();
    assert_eq!(urls, BUILTIN_SOURCES.to_vec());
}

#[test]
fn urls_from_config_sources() {
    let a = fetch_args(&["songdl", "fetch"]);
    let cfg = SongdlConfig {
        sources: vec!["https://cfg.example/1".into()],
        ..SongdlConfig::default()
    };
    assert_eq!(collect_urls(&cfg, &a).unwrap(), vec!["https://cfg.example/1"]);
}

#[test]
fn urls_from_args_and_list_file() {
    let dir = tempfile::tempdir().unwrap();
    let list = dir.path().join("urls.txt");
    std::fs::write(&list, "# mine\nhttps://list.example/1\n\nhttps://list.example/2\n").unwrap();
    let list_str = list.to_string_lossy().into_owned();
    let a = fetch_args(&["songdl", "fetch", "https://cli.example/1", "--list", &list_str]);
    let cfg = SongdlConfig {
        sources: vec!["https://cfg.example/1".into()],
        ..SongdlConfig::default()
    };
    assert_eq!(
        collect_urls(&cfg, &a).unwrap(),
        vec![
            "https://cli.example/1",
            "https://list.example/1",
            "https://list.example/2"
        ]
    );
}

#[test]
fn missing_list_file_is_an_error() {
    let a = fetch_args(&["songdl", "fetch", "--list", "/nonexistent/urls.txt"]);
    assert!(collect_urls(&SongdlConfig::default(), &a).is_err());
}

#[test]
fn list_file_without_urls_is_an_error_not_a_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let list = dir.path().join("urls.txt");
    std::fs::write(&list, "# nothing yet\n\n").unwrap();
    let list_str = list.to_string_lossy().into_owned();
    let a = fetch_args(&["songdl", "fetch", "--list", &list_str]);
    let err = collect_urls(&SongdlConfig::default(), &a).unwrap_err();
    assert!(err.to_string().contains("no URLs in"));
}

#[test]
fn empty_list_file_with_positional_urls_is_fine() {
    let dir = tempfile::tempdir().unwrap();
    let list = dir.path().join("urls.txt");
    std::fs::write(&list, "").unwrap();
    let list_str = list.to_string_lossy().into_owned();
    let a = fetch_args(&["songdl", "fetch", "https://cli.example/1", "--list", &list_str]);
    assert_eq!(
        collect_urls(&SongdlConfig::default(), &a).unwrap(),
        vec!["https://cli.example/1"]
    );
}
