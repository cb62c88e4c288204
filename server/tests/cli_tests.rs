use chrono::Duration;
use clap::Parser;
use sles_server::{Args, LogFormat};
use std::path::PathBuf;

fn parse(extra: &[&str]) -> Args {
    let argv = std::iter::once("sles-server").chain(extra.iter().copied());
    Args::try_parse_from(argv).unwrap()
}

#[test]
fn defaults_match_the_service_layout() {
    let args = parse(&[]);
    assert_eq!(args.bind_addr(), "127.0.0.1:3000");
    assert_eq!(args.log_format, LogFormat::Compact);
    assert!(!args.verbose);

    let config = args.vault_config().unwrap();
    assert_eq!(config.output_dir, PathBuf::from("./encrypted_files"));
    assert_eq!(config.default_link_ttl, Duration::hours(1));
    assert_eq!(config.public_base_url, "http://localhost:3000");
}

#[test]
fn json_log_format_is_selectable() {
    let args = parse(&["--log-format", "json", "--verbose"]);
    assert_eq!(args.log_format, LogFormat::Json);
    assert!(args.verbose);
}

#[test]
fn unknown_log_format_is_rejected() {
    let argv = ["sles-server", "--log-format", "xml"];
    assert!(Args::try_parse_from(argv).is_err());
}

#[test]
fn custom_link_ttl_reaches_the_vault_config() {
    let config = parse(&["--link-ttl-secs", "90"]).vault_config().unwrap();
    assert_eq!(config.default_link_ttl, Duration::seconds(90));
}

#[test]
fn non_positive_link_ttl_is_rejected() {
    for ttl in ["--link-ttl-secs=0", "--link-ttl-secs=-1"] {
        let args = parse(&[ttl]);
        assert!(args.vault_config().is_err(), "ttl {ttl}");
    }
}

#[test]
fn out_of_range_link_ttl_is_rejected() {
    for ttl in ["100000000000000000", "9223372036854775807"] {
        let err = parse(&["--link-ttl-secs", ttl]).vault_config().unwrap_err();
        assert!(err.to_string().contains("out of range"), "{err}");
    }
}
