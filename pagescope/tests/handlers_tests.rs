use clap::ArgMatches;
use pagescope::commands::command_argument_builder;
use pagescope::handlers::*;
use pagescope::prompt::Prompter;
use pagescope_core::config::{DEFAULT_TIMEOUT_SECS, InputError, OutputTarget, PageSource};
use std::io::Cursor;
use std::path::PathBuf;

fn subcommand_matches(args: &[&str]) -> ArgMatches {
    let mut argv = vec!["pagescope"];
    argv.extend_from_slice(args);
    let matches = command_argument_builder()
        .try_get_matches_from(argv)
        .unwrap();
    let (_, sub) = matches.subcommand().unwrap();
    sub.clone()
}

fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
    Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
}

fn transcript(p: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
    String::from_utf8(p.into_output()).unwrap()
}

// ============================================================================
// Exit Tests
// ============================================================================

#[test]
fn test_exit_choice_stops_before_any_other_prompt() {
    let args = subcommand_matches(&["assets"]);
    let mut p = prompter("x\nhttps://example.com\n100\n");

    let config = collect_asset_config(&args, &mut p, false).unwrap();
    assert!(config.is_none());

    let out = transcript(p);
    assert!(out.contains("console or as a file"));
    assert!(!out.contains("comma-separated list of URLs"));
}

#[test]
fn test_exit_choice_for_scan() {
    let args = subcommand_matches(&["scan", "--sitemap", "https://example.com/sitemap.xml"]);
    let mut p = prompter("X\n");
    assert!(collect_scan_config(&args, &mut p, false).unwrap().is_none());
}

#[test]
fn test_end_of_input_is_exit() {
    let args = subcommand_matches(&["weigh"]);
    let mut p = prompter("");
    assert!(collect_weigh_config(&args, &mut p, false).unwrap().is_none());
}

// ============================================================================
// Prompted Config Tests
// ============================================================================

#[test]
fn test_asset_config_from_prompts() {
    let args = subcommand_matches(&["assets"]);
    let mut p = prompter("c\nhttps://a.test/one, https://a.test/two\n250\n");

    let config = collect_asset_config(&args, &mut p, true).unwrap().unwrap();
    assert_eq!(
        config.source,
        PageSource::Urls(vec![
            "https://a.test/one".to_string(),
            "https://a.test/two".to_string()
        ])
    );
    assert_eq!(config.threshold_kb, 250.0);
    assert_eq!(config.output, OutputTarget::Console);
    assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    assert!(config.show_progress);
}

#[test]
fn test_weigh_prompts_for_sitemap() {
    let args = subcommand_matches(&["weigh"]);
    let mut p = prompter("f\nnot a url\nhttps://a.test/sitemap.xml\n");

    let config = collect_weigh_config(&args, &mut p, false).unwrap().unwrap();
    assert_eq!(
        config.source,
        PageSource::Sitemap("https://a.test/sitemap.xml".to_string())
    );
    assert_eq!(config.output, OutputTarget::File(PathBuf::from("outputs")));

    let out = transcript(p);
    assert!(out.contains("Invalid sitemap URL"));
}

#[test]
fn test_scan_prompts_for_search_strings() {
    let args = subcommand_matches(&["scan", "-o", "console"]);
    let mut p = prompter("https://a.test/sitemap.xml\n , \ngtag(, analytics.js\n");

    let config = collect_scan_config(&args, &mut p, false).unwrap().unwrap();
    assert_eq!(config.search_strings, vec!["gtag(", "analytics.js"]);

    let out = transcript(p);
    assert!(!out.contains("console or as a file"));
    assert!(out.contains("at least one search string"));
}

// ============================================================================
// Flag Config Tests
// ============================================================================

#[test]
fn test_flags_skip_every_prompt() {
    let args = subcommand_matches(&[
        "assets",
        "--output",
        "file",
        "--output-dir",
        "reports",
        "--sitemap",
        "https://a.test/sitemap.xml",
        "--threshold",
        "0",
        "--timeout",
        "5",
    ]);
    let mut p = prompter("");

    let config = collect_asset_config(&args, &mut p, false).unwrap().unwrap();
    assert_eq!(
        config.source,
        PageSource::Sitemap("https://a.test/sitemap.xml".to_string())
    );
    assert_eq!(config.threshold_kb, 0.0);
    assert_eq!(config.output, OutputTarget::File(PathBuf::from("reports")));
    assert_eq!(config.timeout_secs, 5);
    assert!(transcript(p).is_empty());
}

#[test]
fn test_scan_accepts_url_list_flag() {
    let args = subcommand_matches(&[
        "scan",
        "-o",
        "console",
        "--urls",
        "https://a.test/, https://b.test/",
        "--search",
        "foo",
    ]);
    let mut p = prompter("");

    let config = collect_scan_config(&args, &mut p, false).unwrap().unwrap();
    assert_eq!(
        config.source,
        PageSource::Urls(vec!["https://a.test/".to_string(), "https://b.test/".to_string()])
    );
}

#[test]
fn test_invalid_threshold_flag_is_an_error() {
    let args = subcommand_matches(&[
        "assets",
        "-o",
        "console",
        "--urls",
        "https://a.test/",
        "--threshold",
        "lots",
    ]);
    let mut p = prompter("");

    let err = collect_asset_config(&args, &mut p, false).unwrap_err();
    assert_eq!(
        err.downcast_ref::<InputError>(),
        Some(&InputError::InvalidThreshold)
    );
}

#[test]
fn test_invalid_url_flag_is_an_error() {
    let args = subcommand_matches(&["weigh", "-o", "console", "--urls", "a.test"]);
    let mut p = prompter("");

    let err = collect_weigh_config(&args, &mut p, false).unwrap_err();
    assert_eq!(
        err.downcast_ref::<InputError>(),
        Some(&InputError::InvalidUrls)
    );
}

#[test]
fn test_invalid_timeout_flag_is_an_error() {
    let args = subcommand_matches(&["weigh", "--timeout", "0"]);
    let mut p = prompter("c\n");

    let err = collect_weigh_config(&args, &mut p, false).unwrap_err();
    assert_eq!(
        err.downcast_ref::<InputError>(),
        Some(&InputError::InvalidTimeout)
    );
}

#[test]
fn test_expand_output_dir_keeps_plain_paths() {
    assert_eq!(expand_output_dir("outputs"), PathBuf::from("outputs"));
    assert_eq!(expand_output_dir("./a/b"), PathBuf::from("./a/b"));
}
